use ::keyring::{Entry, Error as KeyringError};
use tracing::debug;

use super::{validate_key, KeyValueStore, StoreError};

/// Keychain service name used when none is given
pub const DEFAULT_SERVICE_NAME: &str = "signin";

/// Store backed by the OS keychain. Each key is one keychain entry under
/// the service name.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        validate_key(key)?;
        Ok(Entry::new(&self.service, key)?)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

impl KeyValueStore for KeyringStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(KeyringError::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry(key)?.set_password(value)?;
        debug!(service = %self.service, key, "Stored value in keychain");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(KeyringError::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_rejected_before_keychain() {
        let store = KeyringStore::default();
        assert!(matches!(
            store.set_item("../auth", "x"),
            Err(StoreError::InvalidKey(_))
        ));
    }
}
