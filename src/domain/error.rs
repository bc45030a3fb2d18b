//! Domain error types.

/// Top-level error type for tickscope.
#[derive(Debug, thiserror::Error)]
pub enum TickscopeError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("parse error at line {line}: {reason}")]
    DataParse { line: u64, reason: String },

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

    #[error("invalid window {window}: moving average window must be at least 1")]
    InvalidWindow { window: usize },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("no data for product {product}")]
    NoData { product: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TickscopeError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            TickscopeError::Io(_) | TickscopeError::Report { .. } => 1,
            TickscopeError::ConfigParse { .. }
            | TickscopeError::ConfigMissing { .. }
            | TickscopeError::ConfigInvalid { .. } => 2,
            TickscopeError::Data { .. } | TickscopeError::DataParse { .. } => 3,
            TickscopeError::InvalidWindow { .. } | TickscopeError::InvalidParameter { .. } => 4,
            TickscopeError::NoData { .. } => 5,
        }
    }
}

impl From<&TickscopeError> for std::process::ExitCode {
    fn from(err: &TickscopeError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
