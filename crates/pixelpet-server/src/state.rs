//! Shared server state.

use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::store::UserStore;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn UserStore>,
    pub tokens: Arc<TokenKeys>,
}

impl ServerState {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenKeys) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
        }
    }
}
