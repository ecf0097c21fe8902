use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::schedule::{CreateScheduleRequest, ScheduleResponse, UpdateScheduleRequest};
use crate::error::{Result, StorageError};
use crate::models::Schedule;

const SCHEDULE_SUMMARY_SELECT: &str = r#"
    SELECT s.schedule_id, s.title, s.scheduled_at, s.location, s.description,
           s.max_participants, s.created_at,
           (SELECT COUNT(*) FROM attendances a
             WHERE a.schedule_id = s.schedule_id AND a.status = 'ATTEND') AS attending_count,
           EXISTS(SELECT 1 FROM teams t WHERE t.schedule_id = s.schedule_id) AS has_teams
    FROM schedules s
"#;

pub struct ScheduleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScheduleRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Schedules ordered by date, most recent first
    pub async fn list(&self, pagination: &PaginationParams) -> Result<(Vec<ScheduleResponse>, i64)> {
        let total_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules")
            .fetch_one(self.pool)
            .await?;

        let schedules = sqlx::query_as::<_, ScheduleResponse>(&format!(
            "{SCHEDULE_SUMMARY_SELECT} ORDER BY s.scheduled_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((schedules, total_items))
    }

    pub async fn find_summary(&self, id: Uuid) -> Result<ScheduleResponse> {
        sqlx::query_as::<_, ScheduleResponse>(&format!(
            "{SCHEDULE_SUMMARY_SELECT} WHERE s.schedule_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::ScheduleNotFound)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM schedules WHERE schedule_id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Lock the schedule row for the rest of the transaction. Every write to a
    /// schedule's attendances or teams goes through this lock first.
    pub async fn lock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Schedule> {
        sqlx::query_as::<_, Schedule>(
            r#"
            SELECT schedule_id, title, scheduled_at, location, description,
                   max_participants, created_at
            FROM schedules
            WHERE schedule_id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StorageError::ScheduleNotFound)
    }

    pub async fn create(&self, req: &CreateScheduleRequest) -> Result<Schedule> {
        let schedule = sqlx::query_as::<_, Schedule>(
            r#"
            INSERT INTO schedules (title, scheduled_at, location, description, max_participants)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING schedule_id, title, scheduled_at, location, description,
                      max_participants, created_at
            "#,
        )
        .bind(&req.title)
        .bind(req.scheduled_at)
        .bind(&req.location)
        .bind(&req.description)
        .bind(req.max_participants)
        .fetch_one(self.pool)
        .await?;

        Ok(schedule)
    }

    /// Delete a schedule together with its attendances and teams
    /// Apply the fields present in `req`; the rest keep their value.
    pub async fn update(&self, id: Uuid, req: &UpdateScheduleRequest) -> Result<Schedule> {
        sqlx::query_as::<_, Schedule>(
            r#"
            UPDATE schedules
            SET title = COALESCE($2, title),
                scheduled_at = COALESCE($3, scheduled_at),
                location = COALESCE($4, location),
                description = COALESCE($5, description),
                max_participants = COALESCE($6, max_participants)
            WHERE schedule_id = $1
            RETURNING schedule_id, title, scheduled_at, location, description,
                      max_participants, created_at
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(req.scheduled_at)
        .bind(&req.location)
        .bind(&req.description)
        .bind(req.max_participants)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::ScheduleNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM schedules WHERE schedule_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::ScheduleNotFound);
        }

        Ok(())
    }
}
