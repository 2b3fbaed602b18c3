//! External pet-image providers.
//!
//! The classifier never does I/O. Once a directive has been chosen, the
//! responder turns it into an [`ImageRequest`] and hands that to an
//! [`ImageProvider`], which resolves it to a picture URL.

pub mod dog_ceo;
pub mod random_fox;
pub mod wolf;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::classifier::ResponseDirective;
use crate::config::ProvidersConfig;

pub use dog_ceo::DogCeoClient;
pub use random_fox::RandomFoxClient;
pub use wolf::WolfPictures;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("no {0} pictures configured")]
    EmptyPool(&'static str),
}

/// Source of the breed names used for breed detection.
#[async_trait]
pub trait BreedSource: Send + Sync {
    async fn fetch_all_breeds(&self) -> Result<Vec<String>, ProviderError>;
}

/// Which picture to fetch for a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRequest {
    DogRandom,
    DogBreed(String),
    Fox,
    Wolf,
}

impl ImageRequest {
    /// `None` for the silent directive.
    pub fn for_directive(directive: &ResponseDirective) -> Option<Self> {
        match directive {
            ResponseDirective::None => None,
            ResponseDirective::DogGeneric { .. } => Some(Self::DogRandom),
            ResponseDirective::DogBreed { breed, .. } => Some(Self::DogBreed(breed.clone())),
            ResponseDirective::Fox { .. } => Some(Self::Fox),
            ResponseDirective::Wolf { .. } => Some(Self::Wolf),
        }
    }
}

impl fmt::Display for ImageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRequest::DogRandom => write!(f, "dog"),
            ImageRequest::DogBreed(breed) => write!(f, "dog ({})", breed),
            ImageRequest::Fox => write!(f, "fox"),
            ImageRequest::Wolf => write!(f, "wolf"),
        }
    }
}

/// Resolves an image request to a picture URL.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn fetch_image_url(&self, request: &ImageRequest) -> Result<String, ProviderError>;
}

/// Routes each request to the provider for its animal.
pub struct PetImages {
    dog: DogCeoClient,
    fox: RandomFoxClient,
    wolf: WolfPictures,
}

impl PetImages {
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            dog: DogCeoClient::new(client.clone(), &config.dog_api_base_url),
            fox: RandomFoxClient::new(client.clone(), &config.fox_api_url),
            wolf: WolfPictures::from_config(client, &config.wolf),
        })
    }

    /// The dog.ceo client doubles as the breed source.
    pub fn breed_source(&self) -> &DogCeoClient {
        &self.dog
    }
}

#[async_trait]
impl ImageProvider for PetImages {
    async fn fetch_image_url(&self, request: &ImageRequest) -> Result<String, ProviderError> {
        match request {
            ImageRequest::DogRandom => self.dog.random_image().await,
            ImageRequest::DogBreed(breed) => self.dog.breed_image(breed).await,
            ImageRequest::Fox => self.fox.random_image().await,
            ImageRequest::Wolf => self.wolf.random_image().await,
        }
    }
}

/// GET `url` and decode the JSON body, treating non-2xx as an error.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, ProviderError> {
    debug!("Fetching {}", url);

    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status { status, body });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_for_each_directive() {
        let caption = || "Bark!".to_string();
        assert_eq!(ImageRequest::for_directive(&ResponseDirective::None), None);
        assert_eq!(
            ImageRequest::for_directive(&ResponseDirective::DogGeneric { caption: caption() }),
            Some(ImageRequest::DogRandom)
        );
        assert_eq!(
            ImageRequest::for_directive(&ResponseDirective::DogBreed {
                breed: "pug".to_string(),
                caption: caption(),
            }),
            Some(ImageRequest::DogBreed("pug".to_string()))
        );
        assert_eq!(
            ImageRequest::for_directive(&ResponseDirective::Fox { caption: caption() }),
            Some(ImageRequest::Fox)
        );
        assert_eq!(
            ImageRequest::for_directive(&ResponseDirective::Wolf { caption: caption() }),
            Some(ImageRequest::Wolf)
        );
    }

    #[test]
    fn test_request_display() {
        assert_eq!(ImageRequest::DogBreed("pug".to_string()).to_string(), "dog (pug)");
        assert_eq!(ImageRequest::Wolf.to_string(), "wolf");
    }
}
