use std::collections::HashMap;

use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::team::{TeamMemberResponse, TeamResponse, TeamsResponse};
use crate::error::Result;
use crate::models::Team;
use crate::services::team_balancer::{BalanceStrategy, Partition};

#[derive(FromRow)]
struct TeamMemberRow {
    team_id: Uuid,
    attendance_id: Uuid,
    member_id: Option<Uuid>,
    member_name: Option<String>,
    member_level: Option<String>,
    guest_name: Option<String>,
    guest_level: Option<String>,
    invited_by: Option<Uuid>,
    level_score: i32,
}

impl From<TeamMemberRow> for TeamMemberResponse {
    fn from(row: TeamMemberRow) -> Self {
        let is_guest = row.member_id.is_none();
        Self {
            attendance_id: row.attendance_id,
            member_id: row.member_id,
            name: row.member_name.or(row.guest_name).unwrap_or_default(),
            level: if is_guest { row.guest_level } else { row.member_level },
            score: row.level_score,
            is_guest,
            invited_by: row.invited_by,
        }
    }
}

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The stored partition of a schedule, teams ordered by number and
    /// members in draft order. Member names and levels are the current ones.
    pub async fn find_for_schedule(&self, schedule_id: Uuid) -> Result<TeamsResponse> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, schedule_id, team_number, total_score, strategy, created_at
            FROM teams
            WHERE schedule_id = $1
            ORDER BY team_number
            "#,
        )
        .bind(schedule_id)
        .fetch_all(self.pool)
        .await?;

        let rows = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT tm.team_id, tm.attendance_id, tm.member_id,
                   m.name AS member_name, m.level AS member_level,
                   tm.guest_name, tm.guest_level, tm.invited_by, tm.level_score
            FROM team_members tm
            JOIN teams t ON t.team_id = tm.team_id
            LEFT JOIN members m ON m.member_id = tm.member_id
            WHERE t.schedule_id = $1
            ORDER BY t.team_number, tm.draft_order
            "#,
        )
        .bind(schedule_id)
        .fetch_all(self.pool)
        .await?;

        let mut members_by_team: HashMap<Uuid, Vec<TeamMemberResponse>> = HashMap::new();
        for row in rows {
            members_by_team
                .entry(row.team_id)
                .or_default()
                .push(TeamMemberResponse::from(row));
        }

        let strategy = teams
            .first()
            .and_then(|team| team.strategy.parse::<BalanceStrategy>().ok());

        let teams = teams
            .into_iter()
            .map(|team| {
                let members = members_by_team.remove(&team.team_id).unwrap_or_default();
                TeamResponse::new(team.team_number, team.total_score, members)
            })
            .collect();

        Ok(TeamsResponse {
            schedule_id,
            strategy,
            teams,
        })
    }

    /// Delete the stored partition of a schedule. Team members cascade.
    pub async fn clear(&self, tx: &mut Transaction<'_, Postgres>, schedule_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM teams WHERE schedule_id = $1")
            .bind(schedule_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    /// Insert every team, then its members. Callers clear the old partition
    /// first in the same transaction.
    pub async fn insert_partition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule_id: Uuid,
        partition: &Partition,
    ) -> Result<()> {
        for team in partition.teams() {
            let team_id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO teams (schedule_id, team_number, total_score, strategy)
                VALUES ($1, $2, $3, $4)
                RETURNING team_id
                "#,
            )
            .bind(schedule_id)
            .bind(team.team_number() as i32)
            .bind(team.total_score() as i32)
            .bind(partition.strategy().as_str())
            .fetch_one(&mut **tx)
            .await?;

            for (draft_order, participant) in team.members().iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO team_members
                        (team_id, attendance_id, member_id, guest_name, guest_level,
                         invited_by, level_score, draft_order)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    "#,
                )
                .bind(team_id)
                .bind(participant.attendance_id)
                .bind(participant.member_id())
                .bind(participant.is_guest().then(|| participant.name.as_str()))
                .bind(participant.is_guest().then(|| participant.level_label()).flatten())
                .bind(participant.invited_by())
                .bind(participant.score() as i32)
                .bind(draft_order as i32)
                .execute(&mut **tx)
                .await?;
            }
        }

        Ok(())
    }
}
