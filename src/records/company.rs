use serde::Deserialize;

use super::value::{lenient, Amount, CompanyId};

pub const DEFAULT_COMPANY_NAME: &str = "Unknown Company";

/// A company entry from `companies.json`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CompanyRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<CompanyId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub top_up: Option<Amount>,
    #[serde(default, deserialize_with = "lenient")]
    pub email_status: Option<bool>,
}

impl CompanyRecord {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_COMPANY_NAME)
    }

    pub fn top_up(&self) -> Amount {
        self.top_up.unwrap_or_default()
    }

    pub fn email_status(&self) -> bool {
        self.email_status.unwrap_or(false)
    }
}
