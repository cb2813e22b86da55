//! REST API client module for the login endpoint.
//!
//! This module provides the `ApiClient` that posts credentials as JSON and
//! turns the response into either a token or an `ApiError`.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
