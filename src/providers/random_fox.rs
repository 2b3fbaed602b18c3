use serde::Deserialize;

use super::{get_json, ProviderError};

#[derive(Debug, Deserialize)]
struct FloofResponse {
    image: String,
}

/// Client for https://randomfox.ca/floof/
pub struct RandomFoxClient {
    client: reqwest::Client,
    url: String,
}

impl RandomFoxClient {
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    pub async fn random_image(&self) -> Result<String, ProviderError> {
        let response: FloofResponse = get_json(&self.client, &self.url).await?;
        Ok(response.image)
    }
}
