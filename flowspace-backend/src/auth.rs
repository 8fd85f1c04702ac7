//! Bearer-token identity resolution.
//!
//! The backend identifies callers by an `Authorization: Bearer <token>`
//! header. A token either appears in the configured token table or, when
//! self-identifying tokens are enabled (the default, used by tests and
//! local development), takes the form `user:<id>` and names its own user.

use std::collections::HashMap;

/// Prefix for self-identifying tokens (`user:<id>`).
const USER_TOKEN_PREFIX: &str = "user:";

/// Resolves bearer tokens to user identifiers.
pub struct TokenAuth {
    tokens: HashMap<String, String>,
    allow_user_tokens: bool,
}

impl TokenAuth {
    /// Creates a resolver from a configured token table.
    #[must_use]
    pub const fn new(tokens: HashMap<String, String>, allow_user_tokens: bool) -> Self {
        Self {
            tokens,
            allow_user_tokens,
        }
    }

    /// Resolves the value of an `Authorization` header to a user id.
    ///
    /// Returns `None` for missing/malformed headers and unknown tokens.
    #[must_use]
    pub fn resolve(&self, authorization: Option<&str>) -> Option<String> {
        let token = authorization?.strip_prefix("Bearer ")?;
        if let Some(user_id) = self.tokens.get(token) {
            return Some(user_id.clone());
        }
        if self.allow_user_tokens {
            if let Some(user_id) = token.strip_prefix(USER_TOKEN_PREFIX) {
                if !user_id.is_empty() {
                    return Some(user_id.to_string());
                }
            }
        }
        None
    }
}
