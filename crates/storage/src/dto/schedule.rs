use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Schedule with the number of confirmed attendees
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleResponse {
    pub schedule_id: Uuid,
    pub title: String,
    pub scheduled_at: NaiveDateTime,
    pub location: String,
    pub description: Option<String>,
    pub max_participants: Option<i32>,
    pub attending_count: i64,
    pub has_teams: bool,
    pub created_at: NaiveDateTime,
}

/// Request payload for creating a new schedule
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateScheduleRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    pub scheduled_at: NaiveDateTime,

    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(range(min = 2, max = 100, message = "Capacity must be between 2 and 100"))]
    pub max_participants: Option<i32>,
}

/// Request payload for editing a schedule. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateScheduleRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,

    pub scheduled_at: Option<NaiveDateTime>,

    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(range(min = 2, max = 100, message = "Capacity must be between 2 and 100"))]
    pub max_participants: Option<i32>,
}
