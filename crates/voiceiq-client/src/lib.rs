//! HTTP client for the `VoiceIQ` backend REST API
//!
//! A thin typed wrapper over the backend contract. Every operation decodes
//! the backend's response body or propagates the transport/HTTP error for
//! the caller to interpret; nothing is retried.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod client;

pub use client::ApiClient;
