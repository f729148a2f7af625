use serde::Serialize;

use crate::records::{Amount, CompanyId, UserRecord};

/// One active user's line in a company section
#[derive(Debug, Clone, Serialize)]
pub struct UserEntry {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub previous_balance: Amount,
    pub new_balance: Amount,
}

impl UserEntry {
    pub fn new(user: &UserRecord, top_up: Amount) -> Self {
        let previous_balance = user.tokens();
        Self {
            last_name: user.last_name().to_string(),
            first_name: user.first_name().to_string(),
            email: user.email().to_string(),
            previous_balance,
            new_balance: previous_balance + top_up,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    fn lines(&self) -> [String; 3] {
        [
            format!("{}, {}", self.display_name(), self.email),
            format!("  Previous Token Balance, {}", self.previous_balance),
            format!("  New Token Balance {}", self.new_balance),
        ]
    }
}

/// Report block for a single company
#[derive(Debug, Clone, Serialize)]
pub struct CompanySection {
    pub id: CompanyId,
    pub name: String,
    pub users_emailed: Vec<UserEntry>,
    pub users_not_emailed: Vec<UserEntry>,
    pub total_top_up: Amount,
}

impl CompanySection {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Company Id: {}", self.id),
            format!("Company Name: {}", self.name),
        ];

        if !self.users_emailed.is_empty() {
            lines.push("Users Emailed:".to_string());
            lines.extend(self.users_emailed.iter().flat_map(UserEntry::lines));
        }

        if !self.users_not_emailed.is_empty() {
            lines.push("Users Not Emailed:".to_string());
            lines.extend(self.users_not_emailed.iter().flat_map(UserEntry::lines));
        }

        lines.push(format!(
            "Total amount of top ups for {}: {}",
            self.name, self.total_top_up
        ));
        lines.push(String::new());
        lines
    }

    pub fn summary(&self) -> CompanySummary {
        CompanySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            active_users: self.users_emailed.len() + self.users_not_emailed.len(),
            emailed_users: self.users_emailed.len(),
            total_top_up: self.total_top_up,
        }
    }
}

/// Condensed per-company figures for tabular listings
#[derive(Debug, Clone, Serialize)]
pub struct CompanySummary {
    pub id: CompanyId,
    pub name: String,
    pub active_users: usize,
    pub emailed_users: usize,
    pub total_top_up: Amount,
}
