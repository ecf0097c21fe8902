use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        schedule::{CreateScheduleRequest, ScheduleResponse, UpdateScheduleRequest},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/schedules",
    params(PaginationParams),
    responses(
        (status = 200, description = "Schedules, most recent first", body = PaginatedResponse<ScheduleResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "schedules"
)]
pub async fn list_schedules(
    State(db): State<Database>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let response = services::list_schedules(db.pool(), &pagination).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/schedules/{schedule_id}",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule found", body = ScheduleResponse),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn get_schedule(
    State(db): State<Database>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let schedule = services::get_schedule(db.pool(), schedule_id).await?;

    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = CreateScheduleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Schedule created successfully", body = ScheduleResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "schedules"
)]
pub async fn create_schedule(
    State(db): State<Database>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let schedule = services::create_schedule(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(schedule)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/schedules/{schedule_id}",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID")
    ),
    request_body = UpdateScheduleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn update_schedule(
    State(db): State<Database>,
    Path(schedule_id): Path<Uuid>,
    Json(req): Json<UpdateScheduleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let schedule = services::update_schedule(db.pool(), schedule_id, &req).await?;

    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{schedule_id}",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Schedule deleted with its attendance and teams"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn delete_schedule(
    State(db): State<Database>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_schedule(db.pool(), schedule_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
