//! Error types for sparnet-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("unsupported unit suffix '{suffix}' in value '{value}'")]
    UnsupportedUnitSuffix { value: String, suffix: String },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invalid net identifier: {0}")]
    InvalidNet(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
