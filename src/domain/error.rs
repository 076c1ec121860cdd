//! Domain error types.

/// Top-level error type for backsim.
#[derive(Debug, thiserror::Error)]
pub enum BacksimError {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid data: {reason}")]
    InvalidData { reason: String },

    #[error("indicator '{label}' has length {actual}, price series has length {expected}")]
    ShapeMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("insufficient history: need {needed} trailing values, have {available}")]
    InsufficientHistory { needed: usize, available: usize },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BacksimError> for std::process::ExitCode {
    fn from(err: &BacksimError) -> Self {
        let code: u8 = match err {
            BacksimError::Io(_) => 1,
            BacksimError::InvalidConfig { .. }
            | BacksimError::ConfigParse { .. }
            | BacksimError::ConfigMissing { .. }
            | BacksimError::ConfigInvalid { .. } => 2,
            BacksimError::InvalidData { .. } | BacksimError::Data { .. } => 3,
            BacksimError::ShapeMismatch { .. } | BacksimError::InsufficientHistory { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
