use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("empty path: at least one component is required")]
    EmptyPath,

    #[error("duplicate rename for {original}: already renamed to {existing}, cannot also rename to {attempted}")]
    DuplicateRename {
        original: String,
        existing: String,
        attempted: String,
    },

    #[error("invalid identifier {identifier:?}: {reason}")]
    InvalidIdentifierFormat { identifier: String, reason: String },

    #[error("identifier collision on {identifier}: {conflicting_original} conflicts with {existing_original}")]
    IdentifierCollision {
        identifier: String,
        existing_original: String,
        conflicting_original: String,
    },

    #[error("renames never applied: {}", .0.join(", "))]
    UnusedRenames(Vec<String>),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    EMPTY_PATH,
    DUPLICATE_RENAME,
    INVALID_IDENTIFIER_FORMAT,
    IDENTIFIER_COLLISION,
    UNUSED_RENAMES,
    INVALID_INPUT,
    IO,
    JSON,
    CSV,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EMPTY_PATH => "EMPTY_PATH",
            ErrorKind::DUPLICATE_RENAME => "DUPLICATE_RENAME",
            ErrorKind::INVALID_IDENTIFIER_FORMAT => "INVALID_IDENTIFIER_FORMAT",
            ErrorKind::IDENTIFIER_COLLISION => "IDENTIFIER_COLLISION",
            ErrorKind::UNUSED_RENAMES => "UNUSED_RENAMES",
            ErrorKind::INVALID_INPUT => "INVALID_INPUT",
            ErrorKind::IO => "IO",
            ErrorKind::JSON => "JSON",
            ErrorKind::CSV => "CSV",
        }
    }
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::EmptyPath => ErrorKind::EMPTY_PATH,
            CoreError::DuplicateRename { .. } => ErrorKind::DUPLICATE_RENAME,
            CoreError::InvalidIdentifierFormat { .. } => ErrorKind::INVALID_IDENTIFIER_FORMAT,
            CoreError::IdentifierCollision { .. } => ErrorKind::IDENTIFIER_COLLISION,
            CoreError::UnusedRenames(_) => ErrorKind::UNUSED_RENAMES,
            CoreError::InvalidInput(_) => ErrorKind::INVALID_INPUT,
            CoreError::Io(_) => ErrorKind::IO,
            CoreError::Json(_) => ErrorKind::JSON,
            CoreError::Csv(_) => ErrorKind::CSV,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
