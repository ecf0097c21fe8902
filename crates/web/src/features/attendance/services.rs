use sqlx::PgPool;
use storage::{
    dto::attendance::{AddGuestRequest, AttendanceResponse, VoteRequest},
    error::Result,
    models::Attendance,
    services::attendance,
};
use uuid::Uuid;

pub async fn list_attendance(pool: &PgPool, schedule_id: Uuid) -> Result<Vec<AttendanceResponse>> {
    attendance::list_attendance(pool, schedule_id).await
}

pub async fn vote(pool: &PgPool, schedule_id: Uuid, request: &VoteRequest) -> Result<Attendance> {
    attendance::vote(pool, schedule_id, request).await
}

pub async fn add_guest(
    pool: &PgPool,
    schedule_id: Uuid,
    request: &AddGuestRequest,
) -> Result<Attendance> {
    attendance::add_guest(pool, schedule_id, request).await
}

pub async fn remove_guest(
    pool: &PgPool,
    schedule_id: Uuid,
    attendance_id: Uuid,
    requested_by: Uuid,
) -> Result<()> {
    attendance::remove_guest(pool, schedule_id, attendance_id, requested_by).await
}
