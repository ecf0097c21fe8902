use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::attendance::AttendanceResponse;
use crate::error::{Result, StorageError};
use crate::models::{Attendance, AttendanceStatus, SkillLevel};
use crate::services::team_balancer::{Participant, ParticipantIdentity};

const ATTENDANCE_COLUMNS: &str = "attendance_id, schedule_id, member_id, guest_name, guest_level, \
     invited_by, status, created_at, updated_at";

#[derive(FromRow)]
struct RosterRow {
    attendance_id: Uuid,
    member_id: Option<Uuid>,
    member_name: Option<String>,
    member_level: Option<String>,
    guest_name: Option<String>,
    guest_level: Option<String>,
    invited_by: Option<Uuid>,
}

impl RosterRow {
    fn into_participant(self) -> Option<Participant> {
        match (self.member_id, self.guest_name) {
            (Some(member_id), _) => Some(Participant {
                attendance_id: self.attendance_id,
                identity: ParticipantIdentity::Member { member_id },
                name: self.member_name.unwrap_or_default(),
                level: SkillLevel::parse_lenient(self.member_level.as_deref()),
            }),
            (None, Some(guest_name)) => Some(Participant::guest(
                self.attendance_id,
                guest_name,
                self.guest_level.as_deref(),
                self.invited_by,
            )),
            (None, None) => None,
        }
    }
}

pub struct AttendanceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttendanceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All attendance entries of a schedule, in sign-up order
    pub async fn list_for_schedule(&self, schedule_id: Uuid) -> Result<Vec<AttendanceResponse>> {
        let entries = sqlx::query_as::<_, AttendanceResponse>(
            r#"
            SELECT a.attendance_id,
                   a.member_id,
                   COALESCE(m.name, a.guest_name, '') AS name,
                   COALESCE(m.level, a.guest_level) AS level,
                   a.guest_name IS NOT NULL AS is_guest,
                   a.invited_by,
                   i.name AS inviter_name,
                   a.status,
                   a.updated_at
            FROM attendances a
            LEFT JOIN members m ON m.member_id = a.member_id
            LEFT JOIN members i ON i.member_id = a.invited_by
            WHERE a.schedule_id = $1
            ORDER BY a.created_at, a.attendance_id
            "#,
        )
        .bind(schedule_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Confirmed attendees of a schedule as balancer input. Members carry
    /// their current level from `members`, not a copy.
    pub async fn load_roster(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule_id: Uuid,
    ) -> Result<Vec<Participant>> {
        let rows = sqlx::query_as::<_, RosterRow>(
            r#"
            SELECT a.attendance_id, a.member_id, m.name AS member_name, m.level AS member_level,
                   a.guest_name, a.guest_level, a.invited_by
            FROM attendances a
            LEFT JOIN members m ON m.member_id = a.member_id
            WHERE a.schedule_id = $1 AND a.status = 'ATTEND'
            ORDER BY a.created_at, a.attendance_id
            "#,
        )
        .bind(schedule_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let attendance_id = row.attendance_id;
                let participant = row.into_participant();
                if participant.is_none() {
                    tracing::warn!(
                        "Skipping attendance {} with neither member nor guest",
                        attendance_id
                    );
                }
                participant
            })
            .collect())
    }

    pub async fn count_attending(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule_id: Uuid,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendances WHERE schedule_id = $1 AND status = 'ATTEND'",
        )
        .bind(schedule_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count)
    }

    pub async fn find_by_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        attendance_id: Uuid,
    ) -> Result<Attendance> {
        sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances WHERE attendance_id = $1"
        ))
        .bind(attendance_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Record a member's own vote, replacing any earlier one
    pub async fn upsert_vote(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule_id: Uuid,
        member_id: Uuid,
        status: AttendanceStatus,
    ) -> Result<Attendance> {
        let attendance = sqlx::query_as::<_, Attendance>(&format!(
            r#"
            INSERT INTO attendances (schedule_id, member_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (schedule_id, member_id) WHERE member_id IS NOT NULL
            DO UPDATE SET status = EXCLUDED.status, updated_at = CURRENT_TIMESTAMP
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(schedule_id)
        .bind(member_id)
        .bind(status.as_str())
        .fetch_one(&mut **tx)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                StorageError::NotFound
            } else {
                e
            }
        })?;

        Ok(attendance)
    }

    pub async fn insert_guest(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule_id: Uuid,
        invited_by: Uuid,
        guest_name: &str,
        guest_level: Option<&str>,
        status: AttendanceStatus,
    ) -> Result<Attendance> {
        let attendance = sqlx::query_as::<_, Attendance>(&format!(
            r#"
            INSERT INTO attendances (schedule_id, guest_name, guest_level, invited_by, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(schedule_id)
        .bind(guest_name)
        .bind(guest_level)
        .bind(invited_by)
        .bind(status.as_str())
        .fetch_one(&mut **tx)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                StorageError::NotFound
            } else {
                e
            }
        })?;

        Ok(attendance)
    }

    pub async fn delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        attendance_id: Uuid,
    ) -> Result<()> {
        let result = sqlx::query("DELETE FROM attendances WHERE attendance_id = $1")
            .bind(attendance_id)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RosterRow {
        RosterRow {
            attendance_id: Uuid::new_v4(),
            member_id: None,
            member_name: None,
            member_level: None,
            guest_name: None,
            guest_level: None,
            invited_by: None,
        }
    }

    #[test]
    fn test_member_row_uses_joined_level() {
        let member_id = Uuid::new_v4();
        let participant = RosterRow {
            member_id: Some(member_id),
            member_name: Some("Kim".to_string()),
            member_level: Some("AMATEUR_2".to_string()),
            ..row()
        }
        .into_participant()
        .unwrap();

        assert_eq!(participant.member_id(), Some(member_id));
        assert_eq!(participant.level, Some(SkillLevel::Amateur2));
        assert_eq!(participant.score(), 8);
    }

    #[test]
    fn test_guest_row_keeps_inviter_and_degrades_level() {
        let inviter = Uuid::new_v4();
        let participant = RosterRow {
            guest_name: Some("Lee".to_string()),
            guest_level: Some("SUPERSTAR".to_string()),
            invited_by: Some(inviter),
            ..row()
        }
        .into_participant()
        .unwrap();

        assert!(participant.is_guest());
        assert_eq!(participant.invited_by(), Some(inviter));
        assert_eq!(participant.name, "Lee");
        assert_eq!(participant.score(), 1);
    }

    #[test]
    fn test_row_without_identity_is_skipped() {
        assert!(row().into_participant().is_none());
    }
}
