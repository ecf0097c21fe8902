use sqlx::PgPool;
use storage::{
    dto::team::{ClearTeamsResponse, TeamsResponse},
    error::Result,
    services::{team_balancer::BalanceStrategy, team_formation},
};
use uuid::Uuid;

pub async fn get_teams(pool: &PgPool, schedule_id: Uuid) -> Result<TeamsResponse> {
    team_formation::get_teams(pool, schedule_id).await
}

pub async fn form_teams(
    pool: &PgPool,
    schedule_id: Uuid,
    team_count: i64,
    strategy: BalanceStrategy,
) -> Result<TeamsResponse> {
    team_formation::form_teams(pool, schedule_id, team_count, strategy).await
}

pub async fn clear_teams(pool: &PgPool, schedule_id: Uuid) -> Result<ClearTeamsResponse> {
    let cleared = team_formation::clear_teams(pool, schedule_id).await?;
    Ok(ClearTeamsResponse {
        schedule_id,
        cleared,
    })
}
