use std::path::PathBuf;
use thiserror::Error;

use crate::client::ClientError;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Entity store error: {0}")]
    Client(#[from] ClientError),
}

/// Failures raised while projecting between an entity document and a UI model.
///
/// All of these are deterministic for a given input; retrying without
/// correcting the input yields the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Malformed duration '{value}', expected <unit>(<quantity>)")]
    MalformedDuration { value: String },

    #[error("Tags '{tags}' do not resolve to a known job sub-type")]
    UnknownSubtype { tags: String },

    #[error("Required field '{field}' has no value")]
    MissingRequiredField { field: String },

    #[error("Property '{field}' has non-numeric value '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Invalid date '{value}', expected YYYY-MM-DDTHH:MMZ")]
    InvalidDate { value: String },

    #[error("Unsupported timezone '{value}', expected UTC or GMT+HH:MM")]
    InvalidTimezone { value: String },

    #[error("Expected a {expected} entity, found '{found}'")]
    UnexpectedEntityType { expected: String, found: String },
}

impl MappingError {
    pub fn missing(field: impl Into<String>) -> Self {
        MappingError::MissingRequiredField {
            field: field.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Failed to parse XML at position {position}: {message}")]
    Parse { position: u64, message: String },

    #[error("Failed to write XML: {0}")]
    Write(String),

    #[error("Document has no root element")]
    NoRoot,

    #[error("Invalid UTF-8 in element or attribute name")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("No default config directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, MirrorError>;
