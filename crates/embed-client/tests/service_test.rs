//! Round trips against an in-process embedding service.
//!
//! The service below answers `songscout.Embedder/Embed` with a fixed
//! behaviour per test: echo a vector, return an empty one, or fail.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use embed_client::proto::{EMBED_PATH, EmbedRequest, EmbedResponse};
use embed_client::{EmbedClientError, EmbeddingClient, RemoteEmbedder};
use encoder::{Embedder, EncodingError};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::ProstCodec;
use tonic::codegen::{Body, BoxFuture, Context, Poll, Service, StdError, empty_body, http};
use tonic::server::{NamedService, UnaryService};
use tonic::{Request, Response, Status};

// ============================================================================
// Test Service
// ============================================================================

#[derive(Clone, Copy)]
enum Reply {
    /// `[chars in text, 0.5, -0.5]`
    Echo,
    Empty,
    Unavailable,
}

struct EmbedHandler(Reply);

impl UnaryService<EmbedRequest> for EmbedHandler {
    type Response = EmbedResponse;
    type Future = BoxFuture<Response<EmbedResponse>, Status>;

    fn call(&mut self, request: Request<EmbedRequest>) -> Self::Future {
        let reply = self.0;
        Box::pin(async move {
            let text = request.into_inner().text;
            match reply {
                Reply::Echo => Ok(Response::new(EmbedResponse {
                    values: vec![text.chars().count() as f32, 0.5, -0.5],
                })),
                Reply::Empty => Ok(Response::new(EmbedResponse { values: vec![] })),
                Reply::Unavailable => Err(Status::unavailable("model is still loading")),
            }
        })
    }
}

#[derive(Clone)]
struct TestEmbedderService {
    reply: Reply,
}

impl<B> Service<http::Request<B>> for TestEmbedderService
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let reply = self.reply;
        if req.uri().path() == EMBED_PATH {
            Box::pin(async move {
                let codec: ProstCodec<EmbedResponse, EmbedRequest> = ProstCodec::default();
                let mut grpc = tonic::server::Grpc::new(codec);
                Ok(grpc.unary(EmbedHandler(reply), req).await)
            })
        } else {
            Box::pin(async move {
                Ok(http::Response::builder()
                    .status(200)
                    .header("grpc-status", "12")
                    .header("content-type", "application/grpc")
                    .body(empty_body())
                    .unwrap())
            })
        }
    }
}

impl NamedService for TestEmbedderService {
    const NAME: &'static str = "songscout.Embedder";
}

async fn serve(reply: Reply) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(
        tonic::transport::Server::builder()
            .add_service(TestEmbedderService { reply })
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );
    addr
}

/// Run the service on its own runtime so the blocking adapter can be driven
/// from a plain test thread.
fn serve_in_background(reply: Reply) -> (tokio::runtime::Runtime, String) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let addr = runtime.block_on(serve(reply));
    (runtime, format!("http://{addr}"))
}

const TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Async client
// ============================================================================

#[tokio::test]
async fn test_client_round_trip() {
    let addr = serve(Reply::Echo).await;
    let mut client = EmbeddingClient::connect(format!("http://{addr}"), TIMEOUT)
        .await
        .unwrap();

    assert_eq!(client.embed("jazz").await.unwrap(), vec![4.0, 0.5, -0.5]);
}

#[tokio::test]
async fn test_client_rejects_empty_vector() {
    let addr = serve(Reply::Empty).await;
    let mut client = EmbeddingClient::connect(format!("http://{addr}"), TIMEOUT)
        .await
        .unwrap();

    assert!(matches!(
        client.embed("jazz").await,
        Err(EmbedClientError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_client_reports_status() {
    let addr = serve(Reply::Unavailable).await;
    let mut client = EmbeddingClient::connect(format!("http://{addr}"), TIMEOUT)
        .await
        .unwrap();

    match client.embed("jazz").await {
        Err(EmbedClientError::EmbeddingError(message)) => {
            assert!(message.contains("model is still loading"))
        }
        other => panic!("expected EmbeddingError, got {other:?}"),
    }
}

// ============================================================================
// Blocking adapter
// ============================================================================

#[test]
fn test_remote_embedder_returns_vector() {
    let (_server, addr) = serve_in_background(Reply::Echo);
    let embedder = RemoteEmbedder::connect(addr, TIMEOUT)
        .unwrap()
        .with_expected_dimensions(3);

    assert_eq!(embedder.name(), "remote");
    assert_eq!(embedder.embed("late night").unwrap(), vec![10.0, 0.5, -0.5]);
}

#[test]
fn test_remote_embedder_checks_dimensions() {
    let (_server, addr) = serve_in_background(Reply::Echo);
    let embedder = RemoteEmbedder::connect(addr, TIMEOUT)
        .unwrap()
        .with_expected_dimensions(384);

    assert_eq!(
        embedder.embed("jazz").unwrap_err(),
        EncodingError::DimensionMismatch {
            backend: "remote".to_string(),
            expected: 384,
            found: 3,
        }
    );
}

#[test]
fn test_remote_embedder_empty_vector_is_unavailable() {
    let (_server, addr) = serve_in_background(Reply::Empty);
    let embedder = RemoteEmbedder::connect(addr, TIMEOUT).unwrap();

    assert!(matches!(
        embedder.embed("jazz"),
        Err(EncodingError::Unavailable { .. })
    ));
}

#[test]
fn test_remote_embedder_status_is_unavailable() {
    let (_server, addr) = serve_in_background(Reply::Unavailable);
    let embedder = RemoteEmbedder::connect(addr, TIMEOUT).unwrap();

    match embedder.embed("jazz") {
        Err(EncodingError::Unavailable { backend, reason }) => {
            assert_eq!(backend, "remote");
            assert!(reason.contains("model is still loading"));
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}
