//! DistilBERT SST-2 sentiment classifier via candle.
//!
//! The encoder comes from candle-transformers; the sequence classification
//! head (`pre_classifier` + ReLU + `classifier`) is rebuilt with candle-nn
//! from the same safetensors file. Labels are read from the model config.

use std::collections::HashMap;
use std::path::PathBuf;

use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::{Config, DistilBertModel, DTYPE};
use hf_hub::{api::sync::Api, Repo, RepoType};
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

use super::{Classification, SentimentModel};
use crate::error::{ModelError, PipelineError};
use crate::settings::ModelSettings;

/// Fields of `config.json` that candle's `Config` keeps private
#[derive(Debug, Deserialize)]
struct HeadConfig {
    dim: usize,
    id2label: HashMap<String, String>,
}

struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

pub struct DistilBertClassifier {
    model: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
    model_id: String,
}

impl DistilBertClassifier {
    /// Load model from a local directory or the Hugging Face Hub (downloads on first use)
    pub fn load(settings: &ModelSettings) -> Result<Self, ModelError> {
        let device = select_device();
        let files = resolve_files(settings)?;

        let config_str = std::fs::read_to_string(&files.config)?;
        let config: Config = serde_json::from_str(&config_str)?;
        let head: HeadConfig = serde_json::from_str(&config_str)?;
        let labels = ordered_labels(&head.id2label)?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;
        configure_tokenizer(&mut tokenizer, settings.max_tokens)?;

        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[files.weights], DTYPE, &device)? };
        let model = DistilBertModel::load(vb.pp("distilbert"), &config)?;
        let pre_classifier = candle_nn::linear(head.dim, head.dim, vb.pp("pre_classifier"))?;
        let classifier = candle_nn::linear(head.dim, labels.len(), vb.pp("classifier"))?;

        info!(model = %settings.repo, labels = ?labels, "sentiment model loaded");

        Ok(Self {
            model,
            pre_classifier,
            classifier,
            tokenizer,
            labels,
            device,
            model_id: settings.repo.clone(),
        })
    }

    /// Softmax probabilities, one per label, for `text`.
    fn probabilities(&self, text: &str) -> Result<Vec<f32>, PipelineError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| PipelineError::InferenceFailure(format!("Tokenization failed: {}", e)))?;
        let ids = encoding.get_ids();
        let seq_len = ids.len();
        debug!(tokens = seq_len, "text tokenized");

        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        // Single unpadded sequence: nothing to mask
        let mask = Tensor::zeros((seq_len, seq_len), DType::U8, &self.device)?;

        let hidden_states = self.model.forward(&input_ids, &mask)?;
        let cls = hidden_states.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&cls)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;
        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?
            .squeeze(0)?
            .to_dtype(DType::F32)?
            .to_vec1::<f32>()?;

        Ok(probs)
    }
}

impl SentimentModel for DistilBertClassifier {
    fn classify(&self, text: &str) -> Result<Classification, PipelineError> {
        let probs = self.probabilities(text)?;
        let (index, confidence) = top_class(&probs).ok_or_else(|| {
            PipelineError::InferenceFailure("Model returned no class scores".to_string())
        })?;
        let label = self.labels.get(index).ok_or_else(|| {
            PipelineError::InferenceFailure(format!("Model returned unknown class {}", index))
        })?;

        Ok(Classification::new(label.clone(), confidence))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

fn select_device() -> Device {
    // Try CUDA if feature enabled, otherwise CPU only
    #[cfg(feature = "cuda")]
    let device = if candle_core::utils::cuda_is_available() {
        match Device::new_cuda(0) {
            Ok(dev) => {
                info!("using CUDA device (GPU)");
                dev
            }
            Err(e) => {
                tracing::warn!(error = %e, "CUDA device creation failed, falling back to CPU");
                Device::Cpu
            }
        }
    } else {
        tracing::warn!("CUDA not available, using CPU");
        Device::Cpu
    };

    #[cfg(not(feature = "cuda"))]
    let device = {
        info!("using CPU (cuda feature not enabled)");
        Device::Cpu
    };

    device
}

/// Truncate long inputs to `max_tokens` and encode a single unpadded sequence.
fn configure_tokenizer(tokenizer: &mut Tokenizer, max_tokens: usize) -> Result<(), ModelError> {
    let truncation = TruncationParams {
        max_length: max_tokens,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| ModelError::Tokenizer(e.to_string()))?;
    tokenizer.with_padding(None);
    Ok(())
}

fn resolve_files(settings: &ModelSettings) -> Result<ModelFiles, ModelError> {
    if let Some(dir) = &settings.local_dir {
        info!(dir = %dir.display(), "loading model from local directory");
        return Ok(ModelFiles {
            config: dir.join("config.json"),
            tokenizer: dir.join("tokenizer.json"),
            weights: dir.join("model.safetensors"),
        });
    }

    info!(model = %settings.repo, revision = %settings.revision, "fetching model from Hugging Face Hub");
    let api = Api::new()?;
    let repo = api.repo(Repo::with_revision(
        settings.repo.clone(),
        RepoType::Model,
        settings.revision.clone(),
    ));
    let config = repo.get("config.json")?;
    let weights = repo.get("model.safetensors")?;
    let tokenizer = api.model(settings.tokenizer_repo.clone()).get("tokenizer.json")?;

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}

/// `id2label` as a vector indexed by class id.
fn ordered_labels(id2label: &HashMap<String, String>) -> Result<Vec<String>, ModelError> {
    (0..id2label.len())
        .map(|i| {
            id2label
                .get(&i.to_string())
                .cloned()
                .ok_or(ModelError::MissingLabel(i))
        })
        .collect()
}

/// Index and score of the highest probability.
fn top_class(probs: &[f32]) -> Option<(usize, f32)> {
    probs
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((i, p)),
        })
}
