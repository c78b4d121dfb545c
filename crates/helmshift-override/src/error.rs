//! Override error types

use thiserror::Error;

use helmshift_values::ValuesError;

#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("invalid image reference: registry and repository are required")]
    NilImageReference,

    #[error("failed to place override value: {0}")]
    Values(#[from] ValuesError),

    #[error("failed to marshal overrides to YAML: {0}")]
    MarshalOverrides(#[from] serde_yaml::Error),

    #[error("failed to marshal overrides to JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid output format: {format}")]
    InvalidFormat { format: String },

    #[error("empty subchart path")]
    EmptySubchartPath,
}

pub type Result<T> = std::result::Result<T, OverrideError>;
