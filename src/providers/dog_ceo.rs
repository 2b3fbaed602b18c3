use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::{get_json, BreedSource, ProviderError};

/// Every dog.ceo endpoint wraps its payload in `message`.
#[derive(Debug, Deserialize)]
struct DogApiResponse<T> {
    message: T,
    #[serde(default)]
    status: Option<String>,
}

impl<T> DogApiResponse<T> {
    fn into_message(self) -> Result<T, ProviderError> {
        match self.status.as_deref() {
            None | Some("success") => Ok(self.message),
            Some(other) => Err(ProviderError::Malformed(format!(
                "dog.ceo status '{}'",
                other
            ))),
        }
    }
}

/// Client for the Dog API (https://dog.ceo/dog-api/).
pub struct DogCeoClient {
    client: reqwest::Client,
    base_url: String,
}

impl DogCeoClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn breed_list_url(&self) -> String {
        format!("{}/breeds/list/all", self.base_url)
    }

    pub fn random_image_url(&self) -> String {
        format!("{}/breeds/image/random", self.base_url)
    }

    pub fn breed_image_url(&self, breed: &str) -> String {
        format!("{}/breed/{}/images/random", self.base_url, breed)
    }

    pub async fn random_image(&self) -> Result<String, ProviderError> {
        let response: DogApiResponse<String> =
            get_json(&self.client, &self.random_image_url()).await?;
        response.into_message()
    }

    pub async fn breed_image(&self, breed: &str) -> Result<String, ProviderError> {
        let response: DogApiResponse<String> =
            get_json(&self.client, &self.breed_image_url(breed)).await?;
        response.into_message()
    }
}

#[async_trait]
impl BreedSource for DogCeoClient {
    async fn fetch_all_breeds(&self) -> Result<Vec<String>, ProviderError> {
        let url = self.breed_list_url();
        info!("Fetching breed list from {}", url);

        let response: DogApiResponse<serde_json::Map<String, serde_json::Value>> =
            get_json(&self.client, &url).await?;
        Ok(response.into_message()?.into_iter().map(|(breed, _)| breed).collect())
    }
}
