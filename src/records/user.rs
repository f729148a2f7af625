use serde::Deserialize;

use super::value::{lenient, Amount, CompanyId};

pub const DEFAULT_NAME: &str = "Unknown";
pub const DEFAULT_EMAIL: &str = "No Email";

/// A user entry from `users.json`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub company_id: Option<CompanyId>,
    #[serde(default, deserialize_with = "lenient")]
    pub active_status: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tokens: Option<Amount>,
    #[serde(default, deserialize_with = "lenient")]
    pub email_status: Option<bool>,
}

impl UserRecord {
    pub fn active_status(&self) -> bool {
        self.active_status.unwrap_or(false)
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    /// Ordering key: a missing last name sorts before every other name.
    pub fn sort_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or("")
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_EMAIL)
    }

    pub fn tokens(&self) -> Amount {
        self.tokens.unwrap_or_default()
    }

    pub fn email_status(&self) -> bool {
        self.email_status.unwrap_or(false)
    }
}
