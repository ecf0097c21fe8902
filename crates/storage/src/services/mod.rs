pub mod attendance;
pub mod team_balancer;
pub mod team_formation;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::dto::attendance::VoteRequest;
    use crate::dto::member::CreateMemberRequest;
    use crate::dto::schedule::CreateScheduleRequest;
    use crate::models::{AttendanceStatus, MemberRole, SkillLevel};
    use crate::repository::member::MemberRepository;
    use crate::repository::schedule::ScheduleRepository;

    pub async fn schedule(pool: &PgPool, max_participants: Option<i32>) -> Uuid {
        let scheduled_at = NaiveDate::from_ymd_opt(2026, 11, 7)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        ScheduleRepository::new(pool)
            .create(&CreateScheduleRequest {
                title: "Saturday game".to_string(),
                scheduled_at,
                location: "North court".to_string(),
                description: None,
                max_participants,
            })
            .await
            .unwrap()
            .schedule_id
    }

    pub async fn member(pool: &PgPool, name: &str, level: SkillLevel, role: MemberRole) -> Uuid {
        MemberRepository::new(pool)
            .create(&CreateMemberRequest {
                name: name.to_string(),
                level: Some(level),
                role: Some(role),
            })
            .await
            .unwrap()
            .member_id
    }

    /// Register `count` attending members and return their ids.
    pub async fn attending_members(pool: &PgPool, schedule_id: Uuid, count: usize) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let level = SkillLevel::ALL[i % SkillLevel::ALL.len()];
            let member_id = member(pool, &format!("Player {i}"), level, MemberRole::Member).await;
            super::attendance::vote(
                pool,
                schedule_id,
                &VoteRequest {
                    member_id,
                    status: AttendanceStatus::Attend,
                },
            )
            .await
            .unwrap();
            ids.push(member_id);
        }
        ids
    }
}
