//! Embedding client for the remote sentence-embedding service.
//!
//! This crate provides a Rust client to call the embedding service over
//! gRPC. It handles:
//! - Connection management to the service
//! - Sending text and receiving vectors
//! - Validating the returned vector length
//! - A blocking [`Embedder`] adapter for the synchronous core

pub mod proto;

use std::time::Duration;

use encoder::{Embedder, EncodingError};
use thiserror::Error;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, error, info};

use proto::{EmbedRequest, EmbedResponse, EMBED_PATH};

/// Default address of the embedding service.
pub const DEFAULT_ADDR: &str = "http://localhost:50052";

/// Errors that can occur when interacting with the embedding service
#[derive(Error, Debug)]
pub enum EmbedClientError {
    #[error("Invalid embedding service address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("Failed to connect to embedding service: {0}")]
    ConnectionError(String),

    #[error("Failed to embed text: {0}")]
    EmbeddingError(String),

    #[error("Invalid response from embedding service: {0}")]
    InvalidResponse(String),

    #[error("Failed to start client runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Async client for the embedding service.
///
/// Cheap to clone; clones share the underlying connection.
#[derive(Clone)]
pub struct EmbeddingClient {
    grpc: tonic::client::Grpc<Channel>,
    service_addr: String,
}

impl EmbeddingClient {
    /// Connect to the embedding service.
    ///
    /// # Arguments
    /// * `addr` - Address of the gRPC service (e.g., "http://localhost:50052")
    /// * `timeout` - Applied both to connecting and to each request
    pub async fn connect(
        addr: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EmbedClientError> {
        let addr = addr.into();
        info!("Connecting to embedding service at {}", addr);

        let endpoint = Endpoint::from_shared(addr.clone())
            .map_err(|e| EmbedClientError::InvalidAddress {
                addr: addr.clone(),
                reason: e.to_string(),
            })?
            .connect_timeout(timeout)
            .timeout(timeout);

        let channel = endpoint.connect().await.map_err(|e| {
            error!("Connection to {} failed: {}", addr, e);
            EmbedClientError::ConnectionError(e.to_string())
        })?;

        Ok(Self {
            grpc: tonic::client::Grpc::new(channel),
            service_addr: addr,
        })
    }

    /// Embed one piece of text.
    ///
    /// # Returns
    /// The embedding vector; an empty vector is reported as an invalid
    /// response rather than returned.
    pub async fn embed(&mut self, text: &str) -> Result<Vec<f32>, EmbedClientError> {
        debug!("Embedding {} chars via {}", text.len(), self.service_addr);

        self.grpc
            .ready()
            .await
            .map_err(|e| EmbedClientError::ConnectionError(e.to_string()))?;

        let request = tonic::Request::new(EmbedRequest {
            text: text.to_string(),
        });
        let codec: ProstCodec<EmbedRequest, EmbedResponse> = ProstCodec::default();

        let response = self
            .grpc
            .unary(request, PathAndQuery::from_static(EMBED_PATH), codec)
            .await
            .map_err(|status| {
                error!("gRPC error while embedding: {}", status);
                EmbedClientError::EmbeddingError(status.to_string())
            })?;

        let values = response.into_inner().values;
        if values.is_empty() {
            return Err(EmbedClientError::InvalidResponse(
                "service returned an empty vector".into(),
            ));
        }
        Ok(values)
    }

    /// Get the address of the embedding service this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}

/// Blocking [`Embedder`] backed by the remote service.
///
/// Owns its own tokio runtime, so it must not be used from inside another
/// runtime (`block_on` would panic there). Concurrent callers each get a
/// clone of the client and share one connection.
pub struct RemoteEmbedder {
    runtime: tokio::runtime::Runtime,
    client: EmbeddingClient,
    expected_dimensions: Option<usize>,
}

impl RemoteEmbedder {
    /// Start a runtime and connect to `addr`.
    pub fn connect(addr: impl Into<String>, timeout: Duration) -> Result<Self, EmbedClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("embed-client")
            .enable_all()
            .build()?;

        let client = runtime.block_on(EmbeddingClient::connect(addr, timeout))?;
        Ok(Self {
            runtime,
            client,
            expected_dimensions: None,
        })
    }

    /// Reject vectors whose length differs from `dimensions`.
    pub fn with_expected_dimensions(mut self, dimensions: usize) -> Self {
        self.expected_dimensions = Some(dimensions);
        self
    }

    pub fn service_address(&self) -> &str {
        self.client.service_address()
    }
}

impl Embedder for RemoteEmbedder {
    fn name(&self) -> &str {
        "remote"
    }

    fn embed(&self, text: &str) -> encoder::Result<Vec<f32>> {
        let mut client = self.client.clone();
        let values = self
            .runtime
            .block_on(client.embed(text))
            .map_err(|e| EncodingError::unavailable(self.name(), e.to_string()))?;

        check_dimensions(self.name(), values, self.expected_dimensions)
    }
}

fn check_dimensions(
    backend: &str,
    values: Vec<f32>,
    expected: Option<usize>,
) -> encoder::Result<Vec<f32>> {
    match expected {
        Some(expected) if values.len() != expected => Err(EncodingError::DimensionMismatch {
            backend: backend.to_string(),
            expected,
            found: values.len(),
        }),
        _ => Ok(values),
    }
}
