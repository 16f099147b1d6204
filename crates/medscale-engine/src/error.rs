use thiserror::Error;

/// Rejected edits and lookups. The evaluation pipeline itself never fails.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown scale: {0}")]
    UnknownScale(String),

    #[error("unknown field '{field}' for scale '{scale_id}'")]
    UnknownField { scale_id: String, field: String },

    #[error("unknown option '{value}' for field '{field}' of scale '{scale_id}'")]
    UnknownOption {
        scale_id: String,
        field: String,
        value: String,
    },

    #[error("cannot {change} field '{field}' of scale '{scale_id}'")]
    UnsupportedChange {
        scale_id: String,
        field: String,
        change: &'static str,
    },
}
