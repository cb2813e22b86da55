//! Login screen model.
//!
//! `LoginScreen` owns the form fields and the submission state machine. It
//! posts the credentials through `ApiClient`, persists the returned token in
//! the injected `KeyValueStore`, and hands off to the injected `Navigator`.
//! Nothing is rendered here; callers drive and observe the screen through
//! `TestId`s.

pub mod form;
pub mod screen;

use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StoreError;

pub use form::{LoginState, Node, TestId, MAX_EMAIL_LENGTH, MAX_PASSWORD_LENGTH};
pub use screen::LoginScreen;

/// Shown when the form is submitted with an empty field
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password required";

/// Shown when the token could not be persisted
pub const STORAGE_FAILED_MESSAGE: &str = "Could not save your session. Please try again.";

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Email and password required")]
    MissingCredentials,

    #[error("A sign-in request is already in progress")]
    SubmissionInFlight,

    #[error("Already signed in")]
    AlreadySignedIn,

    #[error("No sign-in request is in progress")]
    NotSubmitting,

    #[error("Form is locked while signing in")]
    FormLocked,

    #[error("{0} does not accept that action")]
    UnsupportedTarget(TestId),

    #[error("Invalid input for {0}")]
    InvalidInput(TestId),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to persist auth token: {0}")]
    Storage(#[from] StoreError),
}
