// API module.
// Provides the HTTP client and types for the Simpsons catalog endpoints.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::*;
