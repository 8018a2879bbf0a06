//! Durable storage seam for the session tokens
//!
//! The only durable side effect the session store has besides network calls is
//! writing and removing these two token entries. App shells bridge this store
//! into whatever persistence their platform offers (eframe storage natively,
//! browser storage on the web).

use std::{fmt::Debug, sync::Mutex};

use flight_shared::token::StoredTokens;

pub trait TokenStore: Debug + Send + Sync {
    fn load(&self) -> Option<StoredTokens>;
    fn store(&self, tokens: &StoredTokens);
    fn clear(&self);
}

/// In memory implementation, also what the tests use
#[derive(Debug, Default)]
pub struct MemoryTokenStore(Mutex<Option<StoredTokens>>);

impl MemoryTokenStore {
    pub fn with_tokens(tokens: Option<StoredTokens>) -> Self {
        Self(Mutex::new(tokens))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredTokens> {
        self.0.lock().expect("mutex poisoned").clone()
    }

    fn store(&self, tokens: &StoredTokens) {
        *self.0.lock().expect("mutex poisoned") = Some(tokens.clone());
    }

    fn clear(&self) {
        *self.0.lock().expect("mutex poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trip_and_clear() {
        let store = MemoryTokenStore::default();
        assert!(store.load().is_none());

        let tokens = StoredTokens {
            access: "a-token".to_string().into(),
            refresh: Some("r-token".to_string().into()),
        };
        store.store(&tokens);
        assert_eq!(store.load(), Some(tokens));

        store.clear();
        assert!(store.load().is_none());
        // Clearing twice is fine
        store.clear();
        assert!(store.load().is_none());
    }
}
