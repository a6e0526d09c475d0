//! CV classifier server — HTTP API around the classification pipeline.
//!
//! Loads the sentiment model once, then serves `POST /classify`.
//!
//! Usage:
//!   CV_CLASSIFIER_BIND=127.0.0.1:8000 cv-classifier-server
//!
//! Or with args:
//!   cv-classifier-server --bind 0.0.0.0:8000 --model-dir ./models/sst2

use std::sync::Arc;

use clap::Parser;
use cv_classifier::{build_classifier, http_server, logging, settings::SettingsArgs};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cv-classifier-server", version, about = "CV classification HTTP API")]
struct Args {
    /// Bind address (overrides the settings file)
    #[arg(long, env = "CV_CLASSIFIER_BIND")]
    bind: Option<String>,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let mock = args.settings.mock_model;

    let settings = match args.settings.into_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[Server] {}", e);
            std::process::exit(1);
        }
    };
    logging::init(settings.log_format);

    let bind_addr = args.bind.unwrap_or_else(|| settings.bind.clone());
    info!(bind = %bind_addr, model = %settings.model.repo, "starting");

    let classifier = match build_classifier(&settings, mock) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!(error = %e, "failed to load sentiment model");
            std::process::exit(1);
        }
    };

    if let Err(e) = http_server::serve(classifier, &bind_addr).await {
        error!(error = %e, addr = %bind_addr, "server error");
        std::process::exit(1);
    }
}
