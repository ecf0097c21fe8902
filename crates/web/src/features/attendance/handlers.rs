use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::attendance::{AddGuestRequest, AttendanceResponse, RemoveGuestParams, VoteRequest},
    models::Attendance,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/schedules/{schedule_id}/attendance",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Votes and guests of the schedule", body = Vec<AttendanceResponse>),
        (status = 404, description = "Schedule not found")
    ),
    tag = "attendance"
)]
pub async fn list_attendance(
    State(db): State<Database>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let attendance = services::list_attendance(db.pool(), schedule_id).await?;

    Ok(Json(attendance).into_response())
}

#[utoipa::path(
    post,
    path = "/api/schedules/{schedule_id}/attendance",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID")
    ),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded; stored teams are cleared", body = Attendance),
        (status = 404, description = "Schedule or member not found")
    ),
    tag = "attendance"
)]
pub async fn vote(
    State(db): State<Database>,
    Path(schedule_id): Path<Uuid>,
    Json(req): Json<VoteRequest>,
) -> Result<Response, WebError> {
    let attendance = services::vote(db.pool(), schedule_id, &req).await?;

    Ok(Json(attendance).into_response())
}

#[utoipa::path(
    post,
    path = "/api/schedules/{schedule_id}/guests",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID")
    ),
    request_body = AddGuestRequest,
    responses(
        (status = 201, description = "Guest added; stored teams are cleared", body = Attendance),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Schedule or inviting member not found"),
        (status = 409, description = "Schedule is full")
    ),
    tag = "attendance"
)]
pub async fn add_guest(
    State(db): State<Database>,
    Path(schedule_id): Path<Uuid>,
    Json(req): Json<AddGuestRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let attendance = services::add_guest(db.pool(), schedule_id, &req).await?;

    Ok((StatusCode::CREATED, Json(attendance)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{schedule_id}/guests/{attendance_id}",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule ID"),
        ("attendance_id" = Uuid, Path, description = "Guest attendance ID"),
        RemoveGuestParams
    ),
    responses(
        (status = 204, description = "Guest removed; stored teams are cleared"),
        (status = 400, description = "Entry is not a guest of this schedule"),
        (status = 403, description = "Requester is neither the inviter nor an admin"),
        (status = 404, description = "Schedule, guest or requester not found")
    ),
    tag = "attendance"
)]
pub async fn remove_guest(
    State(db): State<Database>,
    Path((schedule_id, attendance_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<RemoveGuestParams>,
) -> Result<Response, WebError> {
    services::remove_guest(db.pool(), schedule_id, attendance_id, params.requested_by).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
