//! Local sentence embeddings with `sentence-transformers/all-MiniLM-L6-v2`.
//!
//! This crate provides [`MiniLmEmbedder`], an [`Embedder`] that runs the
//! pretrained MiniLM model in-process and returns mean-pooled, L2-normalized
//! 384-dim vectors.
//!
//! # Feature Flags
//!
//! - `candle` (default): inference with the candle ML framework (pure Rust,
//!   no ONNX). Model files are fetched from the HuggingFace Hub on first use
//!   and cached in `~/.cache/huggingface/`.
//!
//! Without the `candle` feature the crate still compiles, but loading a model
//! returns [`MiniLmError::BackendDisabled`].
//!
//! ## Example Usage
//! ```no_run
//! use encoder::Embedder;
//! use minilm::{MiniLmEmbedder, ModelSource};
//!
//! let embedder = MiniLmEmbedder::load(&ModelSource::default())?;
//! let vector = embedder.embed("late night jazz with soft piano")?;
//! assert_eq!(vector.len(), minilm::EMBEDDING_DIM);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[cfg(feature = "candle")]
mod candle_backend;

use std::path::{Path, PathBuf};

use encoder::{Embedder, EncodingError};
use thiserror::Error;
use tracing::info;

/// Embedding dimension of all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// Model identifier on the HuggingFace Hub.
pub const MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Hub revision to download.
pub const MODEL_REVISION: &str = "main";

/// Files a model directory must contain.
pub const CONFIG_FILE: &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";

const BACKEND: &str = "minilm";

#[derive(Error, Debug)]
pub enum MiniLmError {
    #[error("Model file not found: {path}")]
    MissingFile { path: String },

    #[error("Failed to fetch {file} from {repo}: {reason}")]
    Download {
        repo: String,
        file: String,
        reason: String,
    },

    #[error("Invalid model config: {0}")]
    Config(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("No MiniLM backend compiled in; enable the `candle` feature")]
    BackendDisabled,
}

pub type Result<T> = std::result::Result<T, MiniLmError>;

/// Where the model files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Download (or reuse the cached copy) from the HuggingFace Hub.
    Hub { repo: String, revision: String },
    /// A local directory holding `config.json`, `tokenizer.json` and
    /// `model.safetensors`.
    Directory(PathBuf),
}

impl Default for ModelSource {
    fn default() -> Self {
        Self::Hub {
            repo: MODEL_ID.to_string(),
            revision: MODEL_REVISION.to_string(),
        }
    }
}

/// Resolved paths of the three model files.
#[derive(Debug, Clone)]
pub(crate) struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelSource {
    pub(crate) fn resolve(&self) -> Result<ModelFiles> {
        match self {
            Self::Directory(dir) => Ok(ModelFiles {
                config: existing(dir, CONFIG_FILE)?,
                tokenizer: existing(dir, TOKENIZER_FILE)?,
                weights: existing(dir, WEIGHTS_FILE)?,
            }),
            #[cfg(feature = "candle")]
            Self::Hub { repo, revision } => candle_backend::fetch(repo, revision),
            #[cfg(not(feature = "candle"))]
            Self::Hub { .. } => Err(MiniLmError::BackendDisabled),
        }
    }
}

fn existing(dir: &Path, file: &str) -> Result<PathBuf> {
    let path = dir.join(file);
    if path.is_file() {
        Ok(path)
    } else {
        Err(MiniLmError::MissingFile {
            path: path.display().to_string(),
        })
    }
}

/// Pretrained sentence embedder running in-process.
///
/// Loaded once; `embed` takes `&self` so one instance can serve the parallel
/// catalog load and every later query.
pub struct MiniLmEmbedder {
    #[cfg(feature = "candle")]
    inner: candle_backend::CandleBackend,
}

impl MiniLmEmbedder {
    /// Load the model from `source`.
    ///
    /// The first Hub load downloads about 90MB; later loads use the cache.
    pub fn load(source: &ModelSource) -> Result<Self> {
        let files = source.resolve()?;
        info!("Loading MiniLM weights from {}", files.weights.display());

        #[cfg(feature = "candle")]
        {
            let inner = candle_backend::CandleBackend::load(&files)?;
            Ok(Self { inner })
        }
        #[cfg(not(feature = "candle"))]
        {
            let _ = files;
            Err(MiniLmError::BackendDisabled)
        }
    }
}

impl Embedder for MiniLmEmbedder {
    fn name(&self) -> &str {
        BACKEND
    }

    fn embed(&self, text: &str) -> encoder::Result<Vec<f32>> {
        #[cfg(feature = "candle")]
        {
            self.inner
                .embed(text)
                .map_err(|e| EncodingError::unavailable(BACKEND, e.to_string()))
        }
        #[cfg(not(feature = "candle"))]
        {
            let _ = text;
            Err(EncodingError::unavailable(
                BACKEND,
                MiniLmError::BackendDisabled.to_string(),
            ))
        }
    }
}
