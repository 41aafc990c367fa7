//! HTTP API layer for the CareSync backend.
//!
//! The backend is an external collaborator reachable over HTTP; this module
//! owns everything about talking to it: configuration, credential storage,
//! the wrapped `reqwest` client with centralized status handling, and the
//! API error taxonomy.

mod client;
mod config;
mod error;
mod token;

pub use client::ApiClient;
pub use config::{ApiConfig, API_VERSION, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use error::ApiError;
pub use token::TokenStore;
