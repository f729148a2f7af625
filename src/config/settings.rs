use serde::{Deserialize, Serialize};

use crate::report::ReportFormat;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct InputSettings {
    pub companies: String,
    pub users: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            companies: "companies.json".to_string(),
            users: "users.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    pub path: String,
    pub format: ReportFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: "output.txt".to_string(),
            format: ReportFormat::Text,
        }
    }
}
