//! Core library for the signin client.
//!
//! This crate holds everything except the frontend:
//! - `api`: REST client for the login endpoint
//! - `config`: application configuration
//! - `login`: the login screen model and its submission state machine
//! - `models`: wire types for the login request and response
//! - `router`: navigation seam used after a successful login
//! - `session`: helpers for restoring and clearing the persisted token
//! - `storage`: key-value stores the token is persisted in

pub mod api;
pub mod config;
pub mod login;
pub mod models;
pub mod router;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use login::{LoginError, LoginScreen, LoginState, Node, TestId};
pub use models::{Credentials, LoginResponse};
pub use router::{Navigator, RecordingNavigator, Route, RouteParams};
pub use storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore, StoreError};

/// Storage key the auth token is persisted under.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
