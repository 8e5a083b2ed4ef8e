use meetlog_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid meeting: {0}")]
    Core(#[from] CoreError),
    #[error("meeting not found: {0}")]
    NotFound(String),
    #[error("duplicate meeting id: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Core,
    NotFound,
    DuplicateId,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Core(_) => StoreErrorKind::Core,
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::DuplicateId(_) => StoreErrorKind::DuplicateId,
        }
    }
}
