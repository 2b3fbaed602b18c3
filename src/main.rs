mod classifier;
mod config;
mod platform;
mod providers;
mod responder;
mod responses;
mod vocabulary;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::classifier::Classifier;
use crate::config::Config;
use crate::providers::PetImages;
use crate::responder::Responder;
use crate::vocabulary::{BreedRegistry, Vocabulary};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dogpicsbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  Dog API: {}", config.providers.dog_api_base_url);
    info!("  Fox API: {}", config.providers.fox_api_url);

    let images = PetImages::from_config(&config.providers)
        .context("Failed to build image provider clients")?;

    // Breed detection is required, so a failed fetch stops startup
    let breeds = BreedRegistry::fetch(images.breed_source())
        .await
        .context("Failed to fetch the dog breed list")?;

    let vocabulary = Vocabulary::with_extras(&config.triggers);
    info!(
        "Triggers: dog={} fox={} wolf={} sad={}",
        vocabulary.dog.triggers().len(),
        vocabulary.fox.triggers().len(),
        vocabulary.wolf.triggers().len(),
        vocabulary.sad.triggers().len()
    );

    let classifier = Classifier::new(vocabulary, breeds);
    let responder = Arc::new(Responder::new(
        classifier,
        Arc::new(images),
        config.replies.fallback_text.clone(),
    ));

    info!("Bot is starting...");
    platform::telegram::run(responder, &config.telegram.bot_token).await?;

    Ok(())
}
