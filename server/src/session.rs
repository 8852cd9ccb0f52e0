//! Ephemeral unlock sessions.
//!
//! A successful passcode check mints a token that lives only in process
//! memory; nothing is persisted and a restart clears the board.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct Sessions {
    tokens: Arc<Mutex<HashSet<String>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new session token after a successful unlock.
    pub fn grant(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens
            .lock()
            .expect("session lock poisoned")
            .insert(token.clone());
        token
    }

    /// Whether a token was granted by this process.
    pub fn is_valid(&self, token: &str) -> bool {
        self.tokens
            .lock()
            .expect("session lock poisoned")
            .contains(token)
    }
}
