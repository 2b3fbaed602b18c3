use std::sync::Arc;

use tracing::{info, warn};

use crate::classifier::{Classifier, ResponseDirective};
use crate::platform::{IncomingMessage, Reply};
use crate::providers::{ImageProvider, ImageRequest};

/// Platform-agnostic core: receives an IncomingMessage, returns what to send.
///
/// Holds only read-only state, so one instance is shared across every
/// update handler.
pub struct Responder {
    classifier: Classifier,
    images: Arc<dyn ImageProvider>,
    fallback_text: Option<String>,
}

impl Responder {
    pub fn new(
        classifier: Classifier,
        images: Arc<dyn ImageProvider>,
        fallback_text: Option<String>,
    ) -> Self {
        Self {
            classifier,
            images,
            fallback_text,
        }
    }

    pub fn directive_for(&self, message: &IncomingMessage) -> ResponseDirective {
        if message.has_sticker {
            self.classifier.directive_for_sticker(message)
        } else {
            self.classifier.directive_for_text(message)
        }
    }

    /// Classify a message and fetch the picture for it, if any.
    pub async fn respond(&self, message: &IncomingMessage) -> Option<Reply> {
        let directive = self.directive_for(message);
        self.fulfil(directive).await
    }

    /// Fetch the picture a directive asks for.
    ///
    /// Provider failures never reach the chat as raw errors: the configured
    /// fallback text is sent instead, or nothing at all.
    pub async fn fulfil(&self, directive: ResponseDirective) -> Option<Reply> {
        let request = ImageRequest::for_directive(&directive)?;
        let caption = directive.caption().unwrap_or_default().to_string();

        match self.images.fetch_image_url(&request).await {
            Ok(url) => {
                info!("Replying with {} picture: {}", request, url);
                Some(Reply::Photo { url, caption })
            }
            Err(e) => {
                warn!("Failed to fetch {} picture: {}", request, e);
                self.fallback_text.clone().map(Reply::Text)
            }
        }
    }
}
