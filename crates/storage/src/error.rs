use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Schedule not found")]
    ScheduleNotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Balance(#[from] BalanceError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}

/// Input validation failures of the team balancer. Both are deterministic:
/// retrying with the same roster and team count fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("Team count must be between 2 and 4, got {requested}")]
    InvalidTeamCount { requested: i64 },

    #[error("{participants} attendees cannot fill {team_count} teams")]
    InsufficientParticipants {
        participants: usize,
        team_count: usize,
    },
}

impl BalanceError {
    /// Stable identifier exposed to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTeamCount { .. } => "InvalidTeamCount",
            Self::InsufficientParticipants { .. } => "InsufficientParticipants",
        }
    }
}
