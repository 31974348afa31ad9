use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveError {
    #[error("Invalid surface: {reason}")]
    InvalidSurface { reason: String },

    #[error("Invalid setting '{field}': {reason}")]
    InvalidSettings { field: &'static str, reason: String },

    #[error("Shape load failed: {reason}")]
    ShapeLoad { reason: String },
}

impl WaveError {
    pub fn invalid_surface(reason: impl Into<String>) -> Self {
        WaveError::InvalidSurface { reason: reason.into() }
    }

    pub fn invalid_settings(field: &'static str, reason: impl Into<String>) -> Self {
        WaveError::InvalidSettings { field, reason: reason.into() }
    }
}

pub type WaveResult<T> = Result<T, WaveError>;
