//! Helpers around the persisted auth token.
//!
//! A token is treated as a signed-in session for as long as it is stored;
//! there is no expiry or refresh.

use tracing::{debug, info};

use crate::router::Route;
use crate::storage::{KeyValueStore, StoreError};
use crate::AUTH_TOKEN_KEY;

/// The persisted token, if any
pub fn stored_token<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<String>, StoreError> {
    Ok(store
        .get_item(AUTH_TOKEN_KEY)?
        .filter(|token| !token.is_empty()))
}

/// Where the app should start: `Home` with a stored token, `Login` otherwise
pub fn initial_route<S: KeyValueStore + ?Sized>(store: &S) -> Result<Route, StoreError> {
    let route = if stored_token(store)?.is_some() {
        Route::Home
    } else {
        Route::Login
    };
    debug!(%route, "Resolved initial route");
    Ok(route)
}

/// Forget the persisted token
pub fn sign_out<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), StoreError> {
    store.remove_item(AUTH_TOKEN_KEY)?;
    info!("Signed out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_initial_route_without_token() {
        let store = MemoryStore::new();
        assert_eq!(initial_route(&store).unwrap(), Route::Login);
    }

    #[test]
    fn test_initial_route_with_token() {
        let store = MemoryStore::new();
        store.set_item(AUTH_TOKEN_KEY, "QpwL5tke4Pnpja7X4").unwrap();
        assert_eq!(initial_route(&store).unwrap(), Route::Home);
        assert_eq!(
            stored_token(&store).unwrap().as_deref(),
            Some("QpwL5tke4Pnpja7X4")
        );
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let store = MemoryStore::new();
        store.set_item(AUTH_TOKEN_KEY, "").unwrap();
        assert_eq!(initial_route(&store).unwrap(), Route::Login);
    }

    #[test]
    fn test_sign_out_clears_token() {
        let store = MemoryStore::new();
        store.set_item(AUTH_TOKEN_KEY, "t").unwrap();
        sign_out(&store).unwrap();
        assert_eq!(stored_token(&store).unwrap(), None);
        assert_eq!(initial_route(&store).unwrap(), Route::Login);
    }
}
