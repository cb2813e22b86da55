use std::fmt;
use std::str::FromStr;

/// Maximum length for the email field
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for the password field
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Stable identifiers for the parts of the login screen a caller can drive
/// or observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestId {
    EmailInput,
    PasswordInput,
    SubmitButton,
    SignInError,
}

impl TestId {
    pub const ALL: [TestId; 4] = [
        TestId::EmailInput,
        TestId::PasswordInput,
        TestId::SubmitButton,
        TestId::SignInError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestId::EmailInput => "email-input",
            TestId::PasswordInput => "password-input",
            TestId::SubmitButton => "submit-button",
            TestId::SignInError => "sign-in-error",
        }
    }

    /// Max accepted length for text inputs, `None` for everything else
    pub(crate) fn max_length(&self) -> Option<usize> {
        match self {
            TestId::EmailInput => Some(MAX_EMAIL_LENGTH),
            TestId::PasswordInput => Some(MAX_PASSWORD_LENGTH),
            TestId::SubmitButton | TestId::SignInError => None,
        }
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown test id: {}", s))
    }
}

/// What a test id resolves to on the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    TextInput { value: String, editable: bool },
    Button { enabled: bool },
    ErrorText { message: String },
}

/// Submission state of the login screen.
///
/// `Idle -> Submitting -> Success | Failed`, and `Failed -> Submitting` on
/// resubmit. `Success` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    Submitting,
    Success,
    Failed,
}

impl LoginState {
    /// A new submission may start from this state
    pub fn accepts_submit(&self) -> bool {
        matches!(self, LoginState::Idle | LoginState::Failed)
    }
}

/// Check that `text` may be entered into the field behind `id`
pub(crate) fn is_valid_field_text(id: TestId, text: &str) -> bool {
    match id.max_length() {
        Some(max) => text.chars().count() <= max && !text.chars().any(char::is_control),
        None => false,
    }
}
