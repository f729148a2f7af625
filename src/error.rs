use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopupError {
    #[error("One or more JSON files could not be found: {0}")]
    InputNotFound(PathBuf),

    #[error("JSON parsing failed for {path}. Please check the format of the input files: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config file already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TopupError>;
