use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted team of one schedule's partition.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub schedule_id: Uuid,
    pub team_number: i32,
    pub total_score: i32,
    pub strategy: String,
    pub created_at: NaiveDateTime,
}
