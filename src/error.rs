use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    TaskNotFound,
    AmbiguousRef,
    IndexOutOfRange,
    ValidationError,
    PersistenceError,
    MalformedLoadData,
    ConfigError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::IndexOutOfRange => "INDEX_OUT_OF_RANGE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::PersistenceError => "PERSISTENCE_ERROR",
            Self::MalformedLoadData => "MALFORMED_LOAD_DATA",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Stale or unknown references are dropped silently by the controller.
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Self::TaskNotFound | Self::IndexOutOfRange)
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TasklistError {
    pub code: ErrorCode,
    pub message: String,
}

impl TasklistError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "tasklist is not initialized. Run `tasklist init` first.",
        )
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn index_out_of_range(position: usize, len: usize) -> Self {
        Self::new(
            ErrorCode::IndexOutOfRange,
            format!("Position {position} is out of range for {len} task(s)"),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceError, message)
    }

    pub fn malformed_load_data(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedLoadData, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

impl From<rusqlite::Error> for TasklistError {
    fn from(e: rusqlite::Error) -> Self {
        Self::persistence(e.to_string())
    }
}
