use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::services::team_balancer::{BalanceStrategy, BalancedTeam, Participant, Partition};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BalanceTeamsRequest {
    /// Number of teams, 2 to 4. Any other integer is rejected with
    /// `InvalidTeamCount`.
    pub team_count: i64,
    /// Guest placement; the server default applies when omitted
    #[serde(default)]
    pub strategy: Option<BalanceStrategy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamMemberResponse {
    pub attendance_id: Uuid,
    pub member_id: Option<Uuid>,
    pub name: String,
    pub level: Option<String>,
    pub score: i32,
    pub is_guest: bool,
    pub invited_by: Option<Uuid>,
}

impl From<&Participant> for TeamMemberResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            attendance_id: participant.attendance_id,
            member_id: participant.member_id(),
            name: participant.name.clone(),
            level: participant.level_label(),
            score: participant.score() as i32,
            is_guest: participant.is_guest(),
            invited_by: participant.invited_by(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_number: i32,
    pub total_score: i32,
    pub average_score: Decimal,
    pub member_count: usize,
    pub members: Vec<TeamMemberResponse>,
}

impl TeamResponse {
    pub fn new(team_number: i32, total_score: i32, members: Vec<TeamMemberResponse>) -> Self {
        let average_score = if members.is_empty() {
            Decimal::ZERO
        } else {
            (Decimal::from(total_score) / Decimal::from(members.len() as u64)).round_dp(2)
        };

        Self {
            team_number,
            total_score,
            average_score,
            member_count: members.len(),
            members,
        }
    }
}

impl From<&BalancedTeam> for TeamResponse {
    fn from(team: &BalancedTeam) -> Self {
        Self::new(
            team.team_number() as i32,
            team.total_score() as i32,
            team.members().iter().map(TeamMemberResponse::from).collect(),
        )
    }
}

/// The partition of one schedule. `teams` is empty when none is stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamsResponse {
    pub schedule_id: Uuid,
    pub strategy: Option<BalanceStrategy>,
    pub teams: Vec<TeamResponse>,
}

impl TeamsResponse {
    pub fn from_partition(schedule_id: Uuid, partition: &Partition) -> Self {
        Self {
            schedule_id,
            strategy: Some(partition.strategy()),
            teams: partition.teams().iter().map(TeamResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClearTeamsResponse {
    pub schedule_id: Uuid,
    pub cleared: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillLevel;
    use crate::services::team_balancer::balance_teams;

    #[test]
    fn test_average_is_rounded_to_two_places() {
        let team = TeamResponse::new(
            1,
            28,
            vec![member_response(13), member_response(8), member_response(7)],
        );
        assert_eq!(team.average_score, Decimal::new(933, 2));
        assert_eq!(team.member_count, 3);
    }

    #[test]
    fn test_negative_team_count_reaches_the_balancer() {
        let request: BalanceTeamsRequest =
            serde_json::from_str(r#"{"team_count": -1}"#).unwrap();
        assert_eq!(request.team_count, -1);
        assert_eq!(request.strategy, None);
    }

    #[test]
    fn test_empty_team_averages_zero() {
        let team = TeamResponse::new(2, 0, Vec::new());
        assert_eq!(team.average_score, Decimal::ZERO);
    }

    #[test]
    fn test_partition_response_keeps_team_order_and_totals() {
        let roster = vec![
            Participant::member(Uuid::new_v4(), Uuid::new_v4(), "a", SkillLevel::Pro),
            Participant::member(Uuid::new_v4(), Uuid::new_v4(), "b", SkillLevel::Amateur1),
            Participant::guest(Uuid::new_v4(), "c", Some("???"), None),
        ];
        let partition = balance_teams(&roster, 2, BalanceStrategy::SnakeDraft).unwrap();
        let response = TeamsResponse::from_partition(Uuid::nil(), &partition);

        assert_eq!(response.strategy, Some(BalanceStrategy::SnakeDraft));
        assert_eq!(response.teams.len(), 2);
        assert_eq!(response.teams[0].team_number, 1);
        assert_eq!(response.teams[1].team_number, 2);
        let total: i32 = response.teams.iter().map(|t| t.total_score).sum();
        assert_eq!(total, 13 + 9 + 1);

        let guest = response
            .teams
            .iter()
            .flat_map(|t| t.members.iter())
            .find(|m| m.is_guest)
            .unwrap();
        assert_eq!(guest.level.as_deref(), Some("???"));
        assert_eq!(guest.score, 1);

        let member = response
            .teams
            .iter()
            .flat_map(|t| t.members.iter())
            .find(|m| m.name == "b")
            .unwrap();
        assert_eq!(member.level.as_deref(), Some("AMATEUR_1"));
    }

    fn member_response(score: i32) -> TeamMemberResponse {
        TeamMemberResponse {
            attendance_id: Uuid::new_v4(),
            member_id: Some(Uuid::new_v4()),
            name: format!("m{score}"),
            level: None,
            score,
            is_guest: false,
            invited_by: None,
        }
    }
}
