use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::dto::team::TeamsResponse;
use crate::error::{Result, StorageError};
use crate::repository::attendance::AttendanceRepository;
use crate::repository::schedule::ScheduleRepository;
use crate::repository::team::TeamRepository;
use crate::services::team_balancer::{self, BalanceStrategy};

/// Draft new teams for a schedule and replace the stored partition.
///
/// The schedule row stays locked from roster load to commit, so a concurrent
/// attendance change either lands before (and is drafted) or after (and
/// clears the result). A rejected request leaves the old partition in place.
pub async fn form_teams(
    pool: &PgPool,
    schedule_id: Uuid,
    team_count: i64,
    strategy: BalanceStrategy,
) -> Result<TeamsResponse> {
    let mut tx = pool.begin().await?;

    ScheduleRepository::new(pool).lock(&mut tx, schedule_id).await?;
    let team_count = team_balancer::parse_team_count(team_count)?;

    let roster = AttendanceRepository::new(pool)
        .load_roster(&mut tx, schedule_id)
        .await?;

    info!(
        "Forming {} teams from {} attendees for schedule {} ({})",
        team_count,
        roster.len(),
        schedule_id,
        strategy
    );

    let partition = team_balancer::balance_teams(&roster, team_count, strategy)?;

    let teams = TeamRepository::new(pool);
    let replaced = teams.clear(&mut tx, schedule_id).await?;
    teams.insert_partition(&mut tx, schedule_id, &partition).await?;

    tx.commit().await?;

    info!(
        "Stored {} teams for schedule {} (replaced {})",
        partition.teams().len(),
        schedule_id,
        replaced
    );

    Ok(TeamsResponse::from_partition(schedule_id, &partition))
}

/// The stored partition, or an empty team list when none exists.
pub async fn get_teams(pool: &PgPool, schedule_id: Uuid) -> Result<TeamsResponse> {
    if !ScheduleRepository::new(pool).exists(schedule_id).await? {
        return Err(StorageError::ScheduleNotFound);
    }

    TeamRepository::new(pool).find_for_schedule(schedule_id).await
}

/// Drop the stored partition. Succeeds when there is nothing to drop.
pub async fn clear_teams(pool: &PgPool, schedule_id: Uuid) -> Result<u64> {
    let mut tx = pool.begin().await?;

    ScheduleRepository::new(pool).lock(&mut tx, schedule_id).await?;
    let cleared = TeamRepository::new(pool).clear(&mut tx, schedule_id).await?;

    tx.commit().await?;

    info!("Cleared {} teams for schedule {}", cleared, schedule_id);
    Ok(cleared)
}

/// Discard a partition made stale by an attendance change. Runs inside the
/// caller's transaction, after the schedule row has been locked.
pub async fn invalidate(
    pool: &PgPool,
    tx: &mut Transaction<'_, Postgres>,
    schedule_id: Uuid,
) -> Result<()> {
    let cleared = TeamRepository::new(pool).clear(tx, schedule_id).await?;
    if cleared > 0 {
        info!(
            "Attendance changed, discarded {} teams for schedule {}",
            cleared, schedule_id
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::dto::attendance::AddGuestRequest;
    use crate::error::BalanceError;
    use crate::services::{attendance, fixtures};

    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_rejected_team_count_keeps_previous_teams(pool: PgPool) {
        let schedule_id = fixtures::schedule(&pool, None).await;
        fixtures::attending_members(&pool, schedule_id, 6).await;
        let formed = form_teams(&pool, schedule_id, 3, BalanceStrategy::SnakeDraft)
            .await
            .unwrap();

        for requested in [5, -1] {
            let result =
                form_teams(&pool, schedule_id, requested, BalanceStrategy::SnakeDraft).await;
            assert!(matches!(
                result,
                Err(StorageError::Balance(BalanceError::InvalidTeamCount { requested: r }))
                    if r == requested
            ));
        }

        let stored = get_teams(&pool, schedule_id).await.unwrap();
        assert_eq!(stored.teams.len(), 3);
        for (kept, original) in stored.teams.iter().zip(&formed.teams) {
            assert_eq!(kept.team_number, original.team_number);
            assert_eq!(kept.total_score, original.total_score);
            assert_eq!(kept.member_count, original.member_count);
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_too_few_attendees_keeps_previous_teams(pool: PgPool) {
        let schedule_id = fixtures::schedule(&pool, None).await;
        fixtures::attending_members(&pool, schedule_id, 3).await;
        form_teams(&pool, schedule_id, 2, BalanceStrategy::SnakeDraft)
            .await
            .unwrap();

        let result = form_teams(&pool, schedule_id, 4, BalanceStrategy::SnakeDraft).await;

        assert!(matches!(
            result,
            Err(StorageError::Balance(BalanceError::InsufficientParticipants { .. }))
        ));
        assert_eq!(get_teams(&pool, schedule_id).await.unwrap().teams.len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_clearing_without_teams_succeeds(pool: PgPool) {
        let schedule_id = fixtures::schedule(&pool, None).await;

        assert_eq!(clear_teams(&pool, schedule_id).await.unwrap(), 0);
        assert!(get_teams(&pool, schedule_id).await.unwrap().teams.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_missing_schedule_is_reported(pool: PgPool) {
        let missing = Uuid::new_v4();

        let formed = form_teams(&pool, missing, 2, BalanceStrategy::SnakeDraft).await;
        assert!(matches!(formed, Err(StorageError::ScheduleNotFound)));
        assert!(matches!(
            clear_teams(&pool, missing).await,
            Err(StorageError::ScheduleNotFound)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_stored_teams_keep_guest_level_as_entered(pool: PgPool) {
        let schedule_id = fixtures::schedule(&pool, None).await;
        let members = fixtures::attending_members(&pool, schedule_id, 3).await;
        attendance::add_guest(
            &pool,
            schedule_id,
            &AddGuestRequest {
                invited_by: members[0],
                guest_name: "Choi".to_string(),
                guest_level: Some(" WORLD_CLASS ".to_string()),
                status: None,
            },
        )
        .await
        .unwrap();

        let formed = form_teams(&pool, schedule_id, 2, BalanceStrategy::InviterAffinity)
            .await
            .unwrap();
        let stored = get_teams(&pool, schedule_id).await.unwrap();

        for response in [&formed, &stored] {
            let guest = response
                .teams
                .iter()
                .flat_map(|team| &team.members)
                .find(|member| member.is_guest)
                .unwrap();
            assert_eq!(guest.level.as_deref(), Some("WORLD_CLASS"));
            assert_eq!(guest.score, 1);
        }
        assert_eq!(stored.strategy, Some(BalanceStrategy::InviterAffinity));
    }
}
