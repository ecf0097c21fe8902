use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Member, MemberRole, SkillLevel};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub member_id: Uuid,
    pub name: String,
    pub level: SkillLevel,
    pub score: u32,
    pub role: MemberRole,
    pub created_at: NaiveDateTime,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            member_id: member.member_id,
            name: member.name,
            score: member.level.score(),
            level: member.level,
            role: member.role,
            created_at: member.created_at,
        }
    }
}

/// Request payload for registering a club member
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    pub level: Option<SkillLevel>,

    #[serde(default)]
    pub role: Option<MemberRole>,
}

/// Admin edit of a member. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMemberRequest {
    #[serde(default)]
    pub level: Option<SkillLevel>,

    #[serde(default)]
    pub role: Option<MemberRole>,
}
