//! HTTP transport layer: request pacing, signing, envelope decoding, retry.

mod client;
pub mod retry;

pub use client::PoloniexHttp;
pub use retry::{RetryConfig, RetryPolicy};
