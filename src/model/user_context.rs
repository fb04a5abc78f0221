use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_ID: &str = "default-user";

/// Tenant identity extracted from request headers.
///
/// Every store call takes the user id explicitly; nothing reads it from
/// ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// Used when the caller sent no X-User-Id header
    pub fn default_user() -> Self {
        Self::new(DEFAULT_USER_ID)
    }

    pub fn id(&self) -> &str {
        &self.user_id
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self::default_user()
    }
}
