use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::SkillLevel;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub member_id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub level: SkillLevel,
    #[sqlx(try_from = "String")]
    pub role: MemberRole,
    pub created_at: NaiveDateTime,
}

impl Member {
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberRole::Admin => "ADMIN",
            MemberRole::Member => "MEMBER",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown member role '{0}'")]
pub struct ParseMemberRoleError(pub String);

impl FromStr for MemberRole {
    type Err = ParseMemberRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(MemberRole::Admin),
            "MEMBER" => Ok(MemberRole::Member),
            other => Err(ParseMemberRoleError(other.to_string())),
        }
    }
}

impl TryFrom<String> for MemberRole {
    type Error = ParseMemberRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
