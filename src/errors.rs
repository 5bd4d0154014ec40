use thiserror::Error;

/// Phase of a backup run, used to label hard failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Retention,
    Snapshot,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Retention => write!(f, "retention sweep"),
            Phase::Snapshot => write!(f, "snapshot pass"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// Listing the catalog failed; aborts the whole run.
    #[error("Catalog enumeration failed during {phase}")]
    Catalog {
        phase: Phase,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
