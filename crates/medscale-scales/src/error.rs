use thiserror::Error;

use crate::validate::DefinitionError;

#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("unknown scale: {0}")]
    UnknownScale(String),

    #[error("invalid scale definition: {0}")]
    InvalidDefinition(#[from] DefinitionError),
}
