//! cv-classify — run the function-style handler over a local file.
//!
//! Prints the JSON body on stdout; exits 0 on status 200, 1 otherwise.
//!
//! Usage:
//!   cv-classify resume.pdf
//!   cv-classify resume.pdf --mock-model

use std::path::PathBuf;

use clap::Parser;
use cv_classifier::{
    build_classifier,
    handler::{self, FunctionRequest},
    logging,
    settings::SettingsArgs,
    UploadedDocument,
};
use tracing::error;

#[derive(Parser)]
#[command(name = "cv-classify", version, about = "Classify a CV PDF into a job category")]
struct Args {
    /// PDF file to classify
    file: PathBuf,

    /// Request method handed to the handler
    #[arg(long, default_value = handler::METHOD_POST)]
    method: String,

    #[command(flatten)]
    settings: SettingsArgs,
}

fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let mock = args.settings.mock_model;

    let settings = match args.settings.into_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[CLI] {}", e);
            std::process::exit(1);
        }
    };
    logging::init(settings.log_format);

    let content = match std::fs::read(&args.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("[CLI] Failed to read {}: {}", args.file.display(), e);
            std::process::exit(1);
        }
    };
    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let classifier = match build_classifier(&settings, mock) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to load sentiment model");
            std::process::exit(1);
        }
    };

    let request = FunctionRequest {
        method: args.method,
        file: Some(UploadedDocument::new(filename, content)),
    };
    let (body, status) = handler::handle(&classifier, &request);

    match serde_json::to_string_pretty(&body) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{}", body),
    }

    if status != 200 {
        eprintln!("[CLI] status {}", status);
        std::process::exit(1);
    }
}
