//! Wire types exchanged with the login endpoint.
//!
//! - `Credentials`: the JSON request body
//! - `LoginResponse`: the decoded response, either a token or an error message

pub mod login;

pub use login::{Credentials, LoginResponse};
