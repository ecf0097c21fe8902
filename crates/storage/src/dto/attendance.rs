use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::AttendanceStatus;

/// Roster entry with member and inviter names resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceResponse {
    pub attendance_id: Uuid,
    pub member_id: Option<Uuid>,
    pub name: String,
    /// Member level, or the guest level exactly as entered
    pub level: Option<String>,
    pub is_guest: bool,
    pub invited_by: Option<Uuid>,
    pub inviter_name: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,
    pub updated_at: NaiveDateTime,
}

/// A member's own attendance vote
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VoteRequest {
    pub member_id: Uuid,
    pub status: AttendanceStatus,
}

/// Request payload for bringing a guest
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddGuestRequest {
    pub invited_by: Uuid,

    #[validate(length(min = 1, max = 100, message = "Guest name must be between 1 and 100 characters"))]
    pub guest_name: String,

    /// Free text; unrecognized levels are kept and scored as the lowest level
    #[validate(length(max = 32))]
    pub guest_level: Option<String>,

    #[serde(default)]
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RemoveGuestParams {
    /// Member asking for the removal: the inviter or an admin
    pub requested_by: Uuid,
}
