use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::Credentials;
use crate::router::{Navigator, Route, RouteParams};
use crate::storage::KeyValueStore;
use crate::AUTH_TOKEN_KEY;

use super::form::{is_valid_field_text, LoginState, Node, TestId};
use super::{LoginError, MISSING_CREDENTIALS_MESSAGE, STORAGE_FAILED_MESSAGE};

/// Login form plus its submission state machine
pub struct LoginScreen<S, N> {
    api: ApiClient,
    store: S,
    navigator: N,

    email: String,
    password: String,
    state: LoginState,
    error: Option<String>,
}

impl<S: KeyValueStore, N: Navigator> LoginScreen<S, N> {
    pub fn new(api: ApiClient, store: S, navigator: N) -> Self {
        Self {
            api,
            store,
            navigator,
            email: String::new(),
            password: String::new(),
            state: LoginState::Idle,
            error: None,
        }
    }

    /// Prefill the email field, e.g. with the last address that signed in.
    /// A value the email field would not accept is dropped.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        if is_valid_field_text(TestId::EmailInput, &email) {
            self.email = email;
        } else {
            warn!(len = email.len(), "Ignoring invalid email prefill");
        }
        self
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Message behind the error indicator
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.state.accepts_submit()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    // =========================================================================
    // Driving the form
    // =========================================================================

    /// Replace the text of the email or password field
    pub fn change_text(&mut self, id: TestId, text: &str) -> Result<(), LoginError> {
        if !self.state.accepts_submit() {
            return Err(LoginError::FormLocked);
        }

        let field = match id {
            TestId::EmailInput => &mut self.email,
            TestId::PasswordInput => &mut self.password,
            TestId::SubmitButton | TestId::SignInError => {
                return Err(LoginError::UnsupportedTarget(id));
            }
        };

        if !is_valid_field_text(id, text) {
            return Err(LoginError::InvalidInput(id));
        }

        field.clear();
        field.push_str(text);
        Ok(())
    }

    /// Press a control. Only the submit button is pressable.
    pub async fn press(&mut self, id: TestId) -> Result<(), LoginError> {
        match id {
            TestId::SubmitButton => self.submit().await,
            _ => Err(LoginError::UnsupportedTarget(id)),
        }
    }

    /// Look up what is currently shown for `id`
    pub fn query(&self, id: TestId) -> Option<Node> {
        let editable = self.state.accepts_submit();
        match id {
            TestId::EmailInput => Some(Node::TextInput {
                value: self.email.clone(),
                editable,
            }),
            TestId::PasswordInput => Some(Node::TextInput {
                value: self.password.clone(),
                editable,
            }),
            TestId::SubmitButton => Some(Node::Button {
                enabled: self.is_submit_enabled(),
            }),
            TestId::SignInError => self.error.as_ref().map(|message| Node::ErrorText {
                message: message.clone(),
            }),
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Submit the form: one login request, then persist and navigate on
    /// success or show the error indicator on failure.
    pub async fn submit(&mut self) -> Result<(), LoginError> {
        let credentials = self.begin_submit()?;
        let result = self.api.login(&credentials).await;
        self.complete(result)
    }

    /// Move to `Submitting` and hand out the credentials to send.
    ///
    /// Frontends that run the request on their own task call this, then
    /// `complete` with the result. While `Submitting`, further submissions
    /// are refused.
    pub fn begin_submit(&mut self) -> Result<Credentials, LoginError> {
        match self.state {
            LoginState::Submitting => return Err(LoginError::SubmissionInFlight),
            LoginState::Success => return Err(LoginError::AlreadySignedIn),
            LoginState::Idle | LoginState::Failed => {}
        }

        let credentials = Credentials::new(self.email.clone(), self.password.clone());
        if !credentials.is_complete() {
            self.error = Some(MISSING_CREDENTIALS_MESSAGE.to_string());
            return Err(LoginError::MissingCredentials);
        }

        self.error = None;
        self.state = LoginState::Submitting;
        Ok(credentials)
    }

    /// Apply the outcome of the request started by `begin_submit`
    pub fn complete(&mut self, result: Result<String, ApiError>) -> Result<(), LoginError> {
        if self.state != LoginState::Submitting {
            return Err(LoginError::NotSubmitting);
        }

        let token = match result {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "Login failed");
                self.fail(e.user_message());
                return Err(e.into());
            }
        };

        // Persist before navigating; a token that was not saved is a failed login
        if let Err(e) = self.store.set_item(AUTH_TOKEN_KEY, &token) {
            warn!(error = %e, "Failed to persist auth token");
            self.fail(STORAGE_FAILED_MESSAGE.to_string());
            return Err(e.into());
        }

        self.password.clear();
        self.state = LoginState::Success;
        info!("Login successful");
        self.navigator.navigate(Route::Home, RouteParams::new());
        Ok(())
    }

    fn fail(&mut self, message: String) {
        self.state = LoginState::Failed;
        self.error = Some(message);
    }
}

// ============================================================================
// Tests
// ============================================================================
