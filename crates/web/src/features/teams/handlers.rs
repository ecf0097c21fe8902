use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::team::{BalanceTeamsRequest, ClearTeamsResponse, TeamsResponse},
};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::TeamSettings;

use super::services;

#[utoipa::path(
    get,
    path = "/api/schedules/{schedule_id}/teams",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Stored teams; empty when none have been formed", body = TeamsResponse),
        (status = 404, description = "Schedule not found")
    ),
    tag = "teams"
)]
pub async fn get_teams(
    State(db): State<Database>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let teams = services::get_teams(db.pool(), schedule_id).await?;

    Ok(Json(teams).into_response())
}

/// Draft balanced teams from the schedule's attending roster, replacing any
/// stored teams. The configured default strategy applies when none is given.
#[utoipa::path(
    post,
    path = "/api/schedules/{schedule_id}/teams",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID")
    ),
    request_body = BalanceTeamsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Teams formed", body = TeamsResponse),
        (status = 400, description = "Invalid team count or too few attendees"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "teams"
)]
pub async fn form_teams(
    State(db): State<Database>,
    State(settings): State<TeamSettings>,
    Path(schedule_id): Path<Uuid>,
    Json(req): Json<BalanceTeamsRequest>,
) -> Result<Response, WebError> {
    let strategy = req.strategy.unwrap_or(settings.default_strategy);

    let teams = services::form_teams(db.pool(), schedule_id, req.team_count, strategy).await?;

    Ok(Json(teams).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{schedule_id}/teams",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Stored teams removed", body = ClearTeamsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "teams"
)]
pub async fn clear_teams(
    State(db): State<Database>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let response = services::clear_teams(db.pool(), schedule_id).await?;

    Ok(Json(response).into_response())
}
