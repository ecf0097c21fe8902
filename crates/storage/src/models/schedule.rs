use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Attendance cap applied to guest sign-ups when a schedule sets none.
pub const DEFAULT_MAX_PARTICIPANTS: i64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub schedule_id: Uuid,
    pub title: String,
    pub scheduled_at: NaiveDateTime,
    pub location: String,
    pub description: Option<String>,
    pub max_participants: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl Schedule {
    pub fn capacity(&self) -> i64 {
        self.max_participants
            .map(i64::from)
            .unwrap_or(DEFAULT_MAX_PARTICIPANTS)
    }
}
