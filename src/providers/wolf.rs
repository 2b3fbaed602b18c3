use rand::seq::SliceRandom;
use tracing::info;

use super::{get_json, ProviderError};
use crate::config::WolfSourceConfig;

/// Built-in wolf pictures used when no live wolf provider is configured.
pub const WOLF_PICTURES: &[&str] = &[
    "https://upload.wikimedia.org/wikipedia/commons/6/68/Eurasian_wolf_2.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/5/5f/Kolm%C3%A5rden_Wolf.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/a/a4/Canis_lupus_laying_in_grass.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/3/3b/Canis_lupus_lupus_prague_zoo.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/f/f5/Howling_Wolf.jpg",
];

/// Where wolf pictures come from.
pub enum WolfPictures {
    /// Picked uniformly from a fixed list, no network call.
    Static(Vec<String>),
    /// Fetched from a JSON endpoint, reading the URL from `image_field`.
    Live {
        client: reqwest::Client,
        url: String,
        image_field: String,
    },
}

impl WolfPictures {
    pub fn from_config(client: reqwest::Client, config: &WolfSourceConfig) -> Self {
        match config {
            WolfSourceConfig::Static { pictures } => {
                info!("Wolf pictures: {} static URLs", pictures.len());
                WolfPictures::Static(pictures.clone())
            }
            WolfSourceConfig::Live { url, image_field } => {
                info!("Wolf pictures: live from {}", url);
                WolfPictures::Live {
                    client,
                    url: url.clone(),
                    image_field: image_field.clone(),
                }
            }
        }
    }

    pub async fn random_image(&self) -> Result<String, ProviderError> {
        match self {
            WolfPictures::Static(pictures) => pictures
                .choose(&mut rand::thread_rng())
                .cloned()
                .ok_or(ProviderError::EmptyPool("wolf")),
            WolfPictures::Live {
                client,
                url,
                image_field,
            } => {
                let body: serde_json::Value = get_json(client, url).await?;
                image_url_field(&body, image_field)
            }
        }
    }
}

fn image_url_field(body: &serde_json::Value, field: &str) -> Result<String, ProviderError> {
    body.get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::Malformed(format!("missing string field '{}'", field)))
}
