//! Wire messages for the embedding service.
//!
//! Mirrors this service definition:
//!
//! ```protobuf
//! syntax = "proto3";
//! package songscout;
//!
//! service Embedder {
//!   rpc Embed(EmbedRequest) returns (EmbedResponse);
//! }
//!
//! message EmbedRequest { string text = 1; }
//! message EmbedResponse { repeated float values = 1; }
//! ```

/// Fully qualified gRPC method path of `Embedder.Embed`.
pub const EMBED_PATH: &str = "/songscout.Embedder/Embed";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EmbedRequest {
    #[prost(string, tag = "1")]
    pub text: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EmbedResponse {
    #[prost(float, repeated, tag = "1")]
    pub values: ::prost::alloc::vec::Vec<f32>,
}
