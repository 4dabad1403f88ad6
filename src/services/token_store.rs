use std::sync::{PoisonError, RwLock};

/// Single-slot holder for the most recently issued Oura access token.
///
/// Last write wins. There is no expiry: a stale token surfaces as an upstream 401.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: Option<String>);
}

#[derive(Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        assert_eq!(InMemoryTokenStore::default().get(), None);
    }

    #[test]
    fn last_write_wins() {
        let store = InMemoryTokenStore::with_token("first");
        store.set(Some("second".into()));
        assert_eq!(store.get().as_deref(), Some("second"));
    }

    #[test]
    fn set_none_clears_token() {
        let store = InMemoryTokenStore::with_token("first");
        store.set(None);
        assert_eq!(store.get(), None);
    }
}
