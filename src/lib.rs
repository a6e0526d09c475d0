pub mod categories;
pub mod error;
pub mod handler;
pub mod http_server;
pub mod logging;
pub mod pdf_extractor;
pub mod pipeline;
pub mod sentiment;
pub mod settings;
pub mod utils;

use std::sync::Arc;

use tracing::{info, warn};

pub use error::{ModelError, PipelineError};
pub use pipeline::{ClassifyResponse, CvClassifier, UploadedDocument};

use sentiment::{DistilBertClassifier, MockSentimentModel, SentimentModel};
use settings::Settings;

/// Load the sentiment model once and wrap it in a classifier.
///
/// `mock` swaps in the fixed in-process model (no download).
pub fn build_classifier(settings: &Settings, mock: bool) -> Result<CvClassifier, ModelError> {
    let model: Arc<dyn SentimentModel> = if mock {
        info!("using mock sentiment model");
        Arc::new(MockSentimentModel::new())
    } else {
        Arc::new(DistilBertClassifier::load(&settings.model)?)
    };

    if settings.categories.is_empty() {
        warn!("category table is empty, every CV will map to the fallback category");
    } else {
        info!(labels = settings.categories.len(), "category table loaded");
    }

    Ok(CvClassifier::new(model, settings.categories.clone()))
}
