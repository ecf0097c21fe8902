use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::member::{CreateMemberRequest, MemberResponse, UpdateMemberRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/members",
    responses(
        (status = 200, description = "List all members, strongest first", body = Vec<MemberResponse>)
    ),
    tag = "members"
)]
pub async fn list_members(State(db): State<Database>) -> Result<Response, WebError> {
    let members = services::list_members(db.pool()).await?;

    let response: Vec<MemberResponse> = members.into_iter().map(MemberResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/members/{member_id}",
    params(
        ("member_id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 404, description = "Member not found")
    ),
    tag = "members"
)]
pub async fn get_member(
    State(db): State<Database>,
    Path(member_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let member = services::get_member(db.pool(), member_id).await?;

    Ok(Json(MemberResponse::from(member)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = CreateMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Member created successfully", body = MemberResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "members"
)]
pub async fn create_member(
    State(db): State<Database>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let member = services::create_member(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/members/{member_id}",
    params(
        ("member_id" = Uuid, Path, description = "Member ID")
    ),
    request_body = UpdateMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Member not found")
    ),
    tag = "members"
)]
pub async fn update_member(
    State(db): State<Database>,
    Path(member_id): Path<Uuid>,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<Response, WebError> {
    let member = services::update_member(db.pool(), member_id, &req).await?;

    Ok(Json(MemberResponse::from(member)).into_response())
}
