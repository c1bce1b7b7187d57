use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown cargo category: {0}")]
    UnknownCategory(String),
    #[error("unknown route category: {0}")]
    UnknownRouteCategory(String),
    #[error("unknown record field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
