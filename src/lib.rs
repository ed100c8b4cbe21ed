//! Chunked large-file uploads to Sitecore Content Hub.
//!
//! The Content Hub upload API does not accept large bodies in a single
//! request. This crate drives its v2.0 chunked protocol end to end: an
//! upload session is created for the asset, the decoded payload is posted
//! as ordered fixed-size chunks to the session location, the chunk stream
//! is closed, and the session is finalized into a durable asset. Each
//! upload is a single disposable transaction with no retries and no state
//! across invocations.

pub mod chunk;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod rest_types;
pub mod trigger;
pub mod upload;

pub use client::{ContentHubClient, UploadSession};
pub use error::UploadError;
pub use request::LargeUploadRequest;
pub use upload::UploadOutcome;
