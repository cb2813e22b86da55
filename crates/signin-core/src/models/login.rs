use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials sent to the login endpoint.
///
/// Field order is the serialization order: `{"email":..,"password":..}`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The email holds something other than whitespace and the password is
    /// non-empty. Passwords are sent as typed, whitespace included.
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body returned by the login endpoint.
///
/// Decoded by shape: a `token` field is a success, an `error` field is a
/// failure. Anything else fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum LoginResponse {
    Success { token: String },
    Failure { error: String },
}

impl LoginResponse {
    pub fn token(&self) -> Option<&str> {
        match self {
            LoginResponse::Success { token } => Some(token),
            LoginResponse::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_body_is_exact() {
        let creds = Credentials::new("eve.holt@reqres.in", "cityslicka");
        assert_eq!(
            serde_json::to_string(&creds).unwrap(),
            r#"{"email":"eve.holt@reqres.in","password":"cityslicka"}"#
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("email@email.com", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("email@email.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_credentials_is_complete() {
        assert!(Credentials::new("a@b.c", "pw").is_complete());
        assert!(!Credentials::new("", "pw").is_complete());
        assert!(!Credentials::new("   ", "pw").is_complete());
        assert!(!Credentials::new("a@b.c", "").is_complete());
        assert!(Credentials::new("a@b.c", "   ").is_complete());
    }

    #[test]
    fn test_decode_success() {
        let resp: LoginResponse = serde_json::from_str(r#"{"token":"QpwL5tke4Pnpja7X4"}"#).unwrap();
        assert_eq!(resp.token(), Some("QpwL5tke4Pnpja7X4"));
    }

    #[test]
    fn test_decode_failure() {
        let resp: LoginResponse = serde_json::from_str(r#"{"error":"user not found"}"#).unwrap();
        assert_eq!(
            resp,
            LoginResponse::Failure {
                error: "user not found".to_string()
            }
        );
        assert_eq!(resp.token(), None);
    }

    #[test]
    fn test_decode_rejects_other_shapes() {
        assert!(serde_json::from_str::<LoginResponse>(r#"{"message":"hi"}"#).is_err());
        assert!(serde_json::from_str::<LoginResponse>(r#"{"token":42}"#).is_err());
        assert!(serde_json::from_str::<LoginResponse>(r#"[]"#).is_err());
    }
}
