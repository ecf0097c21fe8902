use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::attendance::{AddGuestRequest, AttendanceResponse, VoteRequest};
use crate::error::{Result, StorageError};
use crate::models::{Attendance, AttendanceStatus};
use crate::repository::attendance::AttendanceRepository;
use crate::repository::member::MemberRepository;
use crate::repository::schedule::ScheduleRepository;
use crate::services::team_formation;

pub async fn list_attendance(pool: &PgPool, schedule_id: Uuid) -> Result<Vec<AttendanceResponse>> {
    if !ScheduleRepository::new(pool).exists(schedule_id).await? {
        return Err(StorageError::ScheduleNotFound);
    }

    AttendanceRepository::new(pool)
        .list_for_schedule(schedule_id)
        .await
}

/// Record or change a member's own vote
pub async fn vote(pool: &PgPool, schedule_id: Uuid, req: &VoteRequest) -> Result<Attendance> {
    let mut tx = pool.begin().await?;

    ScheduleRepository::new(pool).lock(&mut tx, schedule_id).await?;

    let attendance = AttendanceRepository::new(pool)
        .upsert_vote(&mut tx, schedule_id, req.member_id, req.status)
        .await?;
    team_formation::invalidate(pool, &mut tx, schedule_id).await?;

    tx.commit().await?;

    info!(
        "Member {} voted {} for schedule {}",
        req.member_id,
        req.status.as_str(),
        schedule_id
    );
    Ok(attendance)
}

/// Sign up a guest on behalf of a member. Attending guests count against
/// the schedule capacity.
pub async fn add_guest(
    pool: &PgPool,
    schedule_id: Uuid,
    req: &AddGuestRequest,
) -> Result<Attendance> {
    let status = req.status.unwrap_or(AttendanceStatus::Attend);
    let repo = AttendanceRepository::new(pool);
    let mut tx = pool.begin().await?;

    let schedule = ScheduleRepository::new(pool).lock(&mut tx, schedule_id).await?;

    if status == AttendanceStatus::Attend {
        let attending = repo.count_attending(&mut tx, schedule_id).await?;
        if attending >= schedule.capacity() {
            return Err(StorageError::ConstraintViolation(format!(
                "Schedule is full ({} of {} places taken)",
                attending,
                schedule.capacity()
            )));
        }
    }

    let attendance = repo
        .insert_guest(
            &mut tx,
            schedule_id,
            req.invited_by,
            req.guest_name.trim(),
            req.guest_level.as_deref().map(str::trim),
            status,
        )
        .await?;
    team_formation::invalidate(pool, &mut tx, schedule_id).await?;

    tx.commit().await?;

    info!(
        "Guest {} invited by {} added to schedule {}",
        attendance.attendance_id, req.invited_by, schedule_id
    );
    Ok(attendance)
}

/// Remove a guest entry. Only the inviting member or an admin may do so;
/// member entries are changed by voting, never removed.
pub async fn remove_guest(
    pool: &PgPool,
    schedule_id: Uuid,
    attendance_id: Uuid,
    requested_by: Uuid,
) -> Result<()> {
    let repo = AttendanceRepository::new(pool);
    let mut tx = pool.begin().await?;

    ScheduleRepository::new(pool).lock(&mut tx, schedule_id).await?;

    let attendance = repo.find_by_id(&mut tx, attendance_id).await?;
    if attendance.schedule_id != schedule_id {
        return Err(StorageError::InvalidOperation(
            "Attendance does not belong to this schedule".to_string(),
        ));
    }
    if !attendance.is_guest() {
        return Err(StorageError::InvalidOperation(
            "Member attendance cannot be removed".to_string(),
        ));
    }

    let requester = MemberRepository::new(pool).find_by_id(requested_by).await?;
    if !requester.is_admin() && attendance.invited_by != Some(requested_by) {
        return Err(StorageError::Forbidden(
            "Only the inviting member or an admin can remove this guest".to_string(),
        ));
    }

    repo.delete(&mut tx, attendance_id).await?;
    team_formation::invalidate(pool, &mut tx, schedule_id).await?;

    tx.commit().await?;

    info!(
        "Guest {} removed from schedule {} by {}",
        attendance_id, schedule_id, requested_by
    );
    Ok(())
}
