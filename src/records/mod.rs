mod company;
mod user;
mod value;

pub use company::{CompanyRecord, DEFAULT_COMPANY_NAME};
pub use user::{UserRecord, DEFAULT_EMAIL, DEFAULT_NAME};
pub use value::{Amount, CompanyId, JoinKey};

use crate::error::{Result, TopupError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Decode a JSON array of objects. Each object goes through the record's
/// lenient field decoding, so only the outer shape can fail.
fn parse_records<T: DeserializeOwned>(content: &str) -> serde_json::Result<Vec<T>> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(content)?;
    objects
        .into_iter()
        .map(|object| serde_json::from_value(Value::Object(object)))
        .collect()
}

pub fn parse_companies(content: &str) -> serde_json::Result<Vec<CompanyRecord>> {
    parse_records(content)
}

pub fn parse_users(content: &str) -> serde_json::Result<Vec<UserRecord>> {
    parse_records(content)
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(TopupError::InputNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let records = parse_records(&content).map_err(|e| TopupError::InputParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Load companies.json
pub fn load_companies(path: &Path) -> Result<Vec<CompanyRecord>> {
    load_records(path)
}

/// Load users.json
pub fn load_users(path: &Path) -> Result<Vec<UserRecord>> {
    load_records(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let companies = parse_companies(r#"[{"id": 4}]"#).unwrap();
        assert_eq!(companies[0].name(), "Unknown Company");
        assert_eq!(companies[0].top_up(), Amount::Int(0));
        assert!(!companies[0].email_status());

        let users = parse_users(r#"[{"company_id": 4}]"#).unwrap();
        let user = &users[0];
        assert!(!user.active_status());
        assert_eq!(user.last_name(), "Unknown");
        assert_eq!(user.sort_name(), "");
        assert_eq!(user.first_name(), "Unknown");
        assert_eq!(user.email(), "No Email");
        assert_eq!(user.tokens(), Amount::Int(0));
        assert!(!user.email_status());
    }

    #[test]
    fn test_wrong_shaped_fields_degrade_per_field() {
        let users = parse_users(
            r#"[{"company_id": 1, "active_status": "yes", "last_name": 42,
                 "first_name": "Jo", "tokens": "many", "email": null, "extra": [1, 2]}]"#,
        )
        .unwrap();
        let user = &users[0];
        assert!(!user.active_status());
        assert_eq!(user.last_name(), "Unknown");
        assert_eq!(user.first_name(), "Jo");
        assert_eq!(user.tokens(), Amount::Int(0));
        assert_eq!(user.email(), "No Email");
    }

    #[test]
    fn test_non_object_entries_are_rejected() {
        assert!(parse_companies("[1, 2]").is_err());
        assert!(parse_companies(r#"{"id": 1}"#).is_err());
        assert!(parse_users("[[1, true]]").is_err());
        assert!(parse_users("not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_companies(&dir.path().join("companies.json")).unwrap_err();
        assert!(matches!(err, TopupError::InputNotFound(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "[{\"company_id\": 1,").unwrap();
        let err = load_users(&path).unwrap_err();
        assert!(matches!(err, TopupError::InputParse { .. }));
        assert!(err.to_string().contains("JSON parsing failed"));
    }
}
