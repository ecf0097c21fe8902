use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::member::{CreateMemberRequest, UpdateMemberRequest};
use crate::error::{Result, StorageError};
use crate::models::{Member, MemberRole, SkillLevel};

pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all members, strongest first
    pub async fn list(&self) -> Result<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, name, level, role, created_at
            FROM members
            ORDER BY array_position(ARRAY[
                'PRO', 'SEMI_PRO_1', 'SEMI_PRO_2', 'SEMI_PRO_3',
                'AMATEUR_1', 'AMATEUR_2', 'AMATEUR_3', 'AMATEUR_4', 'AMATEUR_5',
                'BEGINNER_1', 'BEGINNER_2', 'BEGINNER_3', 'ROOKIE'
            ], level), name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Member> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, name, level, role, created_at
            FROM members
            WHERE member_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(member)
    }

    pub async fn create(&self, req: &CreateMemberRequest) -> Result<Member> {
        let level = req.level.unwrap_or(SkillLevel::Rookie);
        let role = req.role.unwrap_or(MemberRole::Member);

        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (name, level, role)
            VALUES ($1, $2, $3)
            RETURNING member_id, name, level, role, created_at
            "#,
        )
        .bind(&req.name)
        .bind(level.as_str())
        .bind(role.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(member)
    }

    /// Change a member's level and/or role. Stored partitions keep the score
    /// used when they were drafted.
    pub async fn update(&self, id: Uuid, req: &UpdateMemberRequest) -> Result<Member> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET level = COALESCE($2, level),
                role = COALESCE($3, role)
            WHERE member_id = $1
            RETURNING member_id, name, level, role, created_at
            "#,
        )
        .bind(id)
        .bind(req.level.map(SkillLevel::as_str))
        .bind(req.role.map(MemberRole::as_str))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(member)
    }
}
