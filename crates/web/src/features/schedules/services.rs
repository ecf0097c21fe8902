use sqlx::PgPool;
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        schedule::{CreateScheduleRequest, ScheduleResponse, UpdateScheduleRequest},
    },
    error::Result,
    models::Schedule,
    repository::schedule::ScheduleRepository,
};
use uuid::Uuid;

pub async fn list_schedules(
    pool: &PgPool,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<ScheduleResponse>> {
    let (schedules, total_items) = ScheduleRepository::new(pool).list(pagination).await?;
    Ok(PaginatedResponse::new(schedules, pagination, total_items))
}

pub async fn get_schedule(pool: &PgPool, schedule_id: Uuid) -> Result<ScheduleResponse> {
    ScheduleRepository::new(pool).find_summary(schedule_id).await
}

/// Create a schedule and return its summary, which starts with no votes.
pub async fn create_schedule(
    pool: &PgPool,
    request: &CreateScheduleRequest,
) -> Result<ScheduleResponse> {
    let repo = ScheduleRepository::new(pool);
    let schedule: Schedule = repo.create(request).await?;
    tracing::info!(
        "Created schedule {} on {} (capacity {})",
        schedule.schedule_id,
        schedule.scheduled_at,
        schedule.capacity()
    );
    repo.find_summary(schedule.schedule_id).await
}

pub async fn update_schedule(
    pool: &PgPool,
    schedule_id: Uuid,
    request: &UpdateScheduleRequest,
) -> Result<ScheduleResponse> {
    let repo = ScheduleRepository::new(pool);
    let schedule = repo.update(schedule_id, request).await?;
    tracing::info!("Updated schedule {}", schedule.schedule_id);
    repo.find_summary(schedule.schedule_id).await
}

pub async fn delete_schedule(pool: &PgPool, schedule_id: Uuid) -> Result<()> {
    ScheduleRepository::new(pool).delete(schedule_id).await?;
    tracing::info!("Deleted schedule {}", schedule_id);
    Ok(())
}
