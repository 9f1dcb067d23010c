//! `VoiceIQ` Web Interface
//!
//! The browser-facing tier of the call quality analysis product: login and
//! signup, a dashboard of uploaded calls, the upload form, and per-call
//! transcript/score/summary views, all backed by the external REST API.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;

// Re-export the main entry points
pub use server::{build_app, build_routes};
pub use state::AppState;
