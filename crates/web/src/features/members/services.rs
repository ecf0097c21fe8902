use sqlx::PgPool;
use storage::{
    dto::member::{CreateMemberRequest, UpdateMemberRequest},
    error::Result,
    models::Member,
    repository::member::MemberRepository,
};
use uuid::Uuid;

/// List all members
pub async fn list_members(pool: &PgPool) -> Result<Vec<Member>> {
    MemberRepository::new(pool).list().await
}

pub async fn get_member(pool: &PgPool, member_id: Uuid) -> Result<Member> {
    MemberRepository::new(pool).find_by_id(member_id).await
}

pub async fn create_member(pool: &PgPool, request: &CreateMemberRequest) -> Result<Member> {
    let member = MemberRepository::new(pool).create(request).await?;
    tracing::info!("Registered member {} ({})", member.member_id, member.level);
    Ok(member)
}

pub async fn update_member(
    pool: &PgPool,
    member_id: Uuid,
    request: &UpdateMemberRequest,
) -> Result<Member> {
    let member = MemberRepository::new(pool).update(member_id, request).await?;
    tracing::info!(
        "Updated member {}: level {}, role {}",
        member.member_id,
        member.level,
        member.role.as_str()
    );
    Ok(member)
}
