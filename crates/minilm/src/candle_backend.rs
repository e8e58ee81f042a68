//! candle inference for BERT-family sentence encoders.
//!
//! ## Algorithm
//! 1. Tokenize (with `[CLS]`/`[SEP]`, truncated to [`MAX_TOKENS`])
//! 2. Run the BERT encoder to get one hidden state per token
//! 3. Mean-pool hidden states under the attention mask
//! 4. L2-normalize

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use crate::{CONFIG_FILE, MiniLmError, ModelFiles, Result, TOKENIZER_FILE, WEIGHTS_FILE};

/// Sequence length the model was trained with.
const MAX_TOKENS: usize = 256;

impl From<candle_core::Error> for MiniLmError {
    fn from(e: candle_core::Error) -> Self {
        MiniLmError::Model(e.to_string())
    }
}

/// Download (or find in the local cache) the three model files.
pub(crate) fn fetch(repo_id: &str, revision: &str) -> Result<ModelFiles> {
    let download_error = |file: &str, reason: String| MiniLmError::Download {
        repo: repo_id.to_string(),
        file: file.to_string(),
        reason,
    };

    let api = Api::new().map_err(|e| download_error("(hub client)", e.to_string()))?;
    let repo = api.repo(Repo::with_revision(
        repo_id.to_string(),
        RepoType::Model,
        revision.to_string(),
    ));
    let get = |file: &str| repo.get(file).map_err(|e| download_error(file, e.to_string()));

    Ok(ModelFiles {
        config: get(CONFIG_FILE)?,
        tokenizer: get(TOKENIZER_FILE)?,
        weights: get(WEIGHTS_FILE)?,
    })
}

pub(crate) struct CandleBackend {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl CandleBackend {
    pub(crate) fn load(files: &ModelFiles) -> Result<Self> {
        let config_text = std::fs::read_to_string(&files.config)
            .map_err(|e| MiniLmError::Config(format!("{}: {e}", files.config.display())))?;
        let config: Config =
            serde_json::from_str(&config_text).map_err(|e| MiniLmError::Config(e.to_string()))?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| MiniLmError::Tokenizer(e.to_string()))?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| MiniLmError::Tokenizer(e.to_string()))?;

        let device = Device::Cpu;
        let weights = std::fs::read(&files.weights).map_err(|e| MiniLmError::MissingFile {
            path: format!("{}: {e}", files.weights.display()),
        })?;
        let vb = VarBuilder::from_buffered_safetensors(weights, DTYPE, &device)?;
        let model = BertModel::load(vb, &config)?;

        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    pub(crate) fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| MiniLmError::Tokenizer(e.to_string()))?;
        debug!("Encoding {} tokens", encoding.get_ids().len());

        let token_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = token_ids.zeros_like()?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        // (1, tokens, hidden)
        let hidden = self
            .model
            .forward(&token_ids, &token_type_ids, Some(&attention_mask))?;

        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?;

        let norm = pooled.sqr()?.sum_keepdim(1)?.sqrt()?;
        let normalized = pooled.broadcast_div(&norm)?;
        Ok(normalized.squeeze(0)?.to_vec1::<f32>()?)
    }
}
