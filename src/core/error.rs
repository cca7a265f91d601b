use thiserror::Error;

/// Errors raised by a statement executor: parsing, catalog lookups,
/// constraint checks and anything else the database reports.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Table '{0}' already exists")]
    TableExists(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Column '{0}' not found in table '{1}'")]
    ColumnNotFound(String, String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Execution error: {0}")]
    ExecutionError(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type DbResult<T> = std::result::Result<T, DbError>;

impl<T> From<std::sync::PoisonError<T>> for DbError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

/// Errors surfaced by the mapping layer and the entity manager.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrmError {
    /// The entity type cannot be mapped, or a row cannot be turned back
    /// into an instance.
    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Passed through unchanged from the statement executor.
    #[error(transparent)]
    Execution(#[from] DbError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl OrmError {
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }
}

pub type Result<T> = std::result::Result<T, OrmError>;
