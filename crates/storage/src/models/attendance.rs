use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One roster entry of a schedule: either a member's own vote or a guest
/// brought by a member. Exactly one of `member_id` and `guest_name` is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attendance {
    pub attendance_id: Uuid,
    pub schedule_id: Uuid,
    pub member_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_level: Option<String>,
    pub invited_by: Option<Uuid>,
    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Attendance {
    pub fn is_guest(&self) -> bool {
        self.guest_name.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Attend,
    Absent,
    Pending,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Attend => "ATTEND",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::Pending => "PENDING",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown attendance status '{0}'")]
pub struct ParseAttendanceStatusError(pub String);

impl FromStr for AttendanceStatus {
    type Err = ParseAttendanceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATTEND" => Ok(AttendanceStatus::Attend),
            "ABSENT" => Ok(AttendanceStatus::Absent),
            "PENDING" => Ok(AttendanceStatus::Pending),
            other => Err(ParseAttendanceStatusError(other.to_string())),
        }
    }
}

impl TryFrom<String> for AttendanceStatus {
    type Error = ParseAttendanceStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
