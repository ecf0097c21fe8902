use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::BalanceError;
use crate::models::SkillLevel;

pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 4;

/// How guests are placed when a roster is split into teams.
///
/// `SnakeDraft` treats guests exactly like members. `InviterAffinity` drafts
/// members only and then seats every guest on the team of the member who
/// invited them, falling back to the team with the lowest total score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStrategy {
    #[default]
    SnakeDraft,
    InviterAffinity,
}

impl BalanceStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            BalanceStrategy::SnakeDraft => "snake_draft",
            BalanceStrategy::InviterAffinity => "inviter_affinity",
        }
    }
}

impl fmt::Display for BalanceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BalanceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake_draft" => Ok(BalanceStrategy::SnakeDraft),
            "inviter_affinity" => Ok(BalanceStrategy::InviterAffinity),
            other => Err(format!(
                "unknown balance strategy '{other}', expected snake_draft or inviter_affinity"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantIdentity {
    Member { member_id: Uuid },
    Guest {
        invited_by: Option<Uuid>,
        /// Level text as entered, kept even when it is not a known level.
        raw_level: Option<String>,
    },
}

/// One confirmed attendee, as seen by the balancer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub attendance_id: Uuid,
    pub identity: ParticipantIdentity,
    pub name: String,
    /// `None` when the level was missing or unrecognized.
    pub level: Option<SkillLevel>,
}

impl Participant {
    pub fn member(
        attendance_id: Uuid,
        member_id: Uuid,
        name: impl Into<String>,
        level: SkillLevel,
    ) -> Self {
        Self {
            attendance_id,
            identity: ParticipantIdentity::Member { member_id },
            name: name.into(),
            level: Some(level),
        }
    }

    pub fn guest(
        attendance_id: Uuid,
        name: impl Into<String>,
        raw_level: Option<&str>,
        invited_by: Option<Uuid>,
    ) -> Self {
        Self {
            attendance_id,
            identity: ParticipantIdentity::Guest {
                invited_by,
                raw_level: raw_level.map(|level| level.trim().to_string()),
            },
            name: name.into(),
            level: SkillLevel::parse_lenient(raw_level),
        }
    }

    pub fn score(&self) -> u32 {
        SkillLevel::score_or_fallback(self.level)
    }

    pub fn is_guest(&self) -> bool {
        matches!(self.identity, ParticipantIdentity::Guest { .. })
    }

    pub fn member_id(&self) -> Option<Uuid> {
        match self.identity {
            ParticipantIdentity::Member { member_id } => Some(member_id),
            ParticipantIdentity::Guest { .. } => None,
        }
    }

    pub fn invited_by(&self) -> Option<Uuid> {
        match self.identity {
            ParticipantIdentity::Member { .. } => None,
            ParticipantIdentity::Guest { invited_by, .. } => invited_by,
        }
    }

    /// Level as shown to clients: the identifier for members, the entered
    /// text for guests.
    pub fn level_label(&self) -> Option<String> {
        match &self.identity {
            ParticipantIdentity::Member { .. } => self.level.map(|l| l.as_str().to_string()),
            ParticipantIdentity::Guest { raw_level, .. } => raw_level.clone(),
        }
    }
}

/// A team under construction. The total score only changes through
/// [`BalancedTeam::push`], so it always equals the sum of member scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancedTeam {
    team_number: u32,
    members: Vec<Participant>,
    total_score: u32,
}

impl BalancedTeam {
    fn new(team_number: u32) -> Self {
        Self {
            team_number,
            members: Vec::new(),
            total_score: 0,
        }
    }

    fn push(&mut self, participant: Participant) {
        self.total_score += participant.score();
        self.members.push(participant);
    }

    pub fn team_number(&self) -> u32 {
        self.team_number
    }

    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Mean member score; an empty team averages 0.
    pub fn average_score(&self) -> f64 {
        if self.members.is_empty() {
            0.0
        } else {
            f64::from(self.total_score) / self.members.len() as f64
        }
    }

    fn contains_member(&self, member_id: Uuid) -> bool {
        self.members.iter().any(|p| p.member_id() == Some(member_id))
    }

    /// Exact comparison of average scores by cross-multiplication.
    fn cmp_average(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.total_score) * other.members.len().max(1) as u64;
        let rhs = u64::from(other.total_score) * self.members.len().max(1) as u64;
        lhs.cmp(&rhs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    strategy: BalanceStrategy,
    teams: Vec<BalancedTeam>,
}

impl Partition {
    pub fn strategy(&self) -> BalanceStrategy {
        self.strategy
    }

    pub fn teams(&self) -> &[BalancedTeam] {
        &self.teams
    }

    pub fn into_teams(self) -> Vec<BalancedTeam> {
        self.teams
    }

    pub fn participant_count(&self) -> usize {
        self.teams.iter().map(BalancedTeam::len).sum()
    }

    pub fn total_score(&self) -> u32 {
        self.teams.iter().map(BalancedTeam::total_score).sum()
    }
}

/// Narrow a client-supplied team count. Negative and oversized values are
/// rejected the same way as any other count outside 2..=4.
pub fn parse_team_count(requested: i64) -> Result<usize, BalanceError> {
    usize::try_from(requested)
        .ok()
        .filter(|count| (MIN_TEAMS..=MAX_TEAMS).contains(count))
        .ok_or(BalanceError::InvalidTeamCount { requested })
}

pub fn validate_request(participants: usize, team_count: usize) -> Result<(), BalanceError> {
    if !(MIN_TEAMS..=MAX_TEAMS).contains(&team_count) {
        return Err(BalanceError::InvalidTeamCount {
            requested: i64::try_from(team_count).unwrap_or(i64::MAX),
        });
    }
    if participants < team_count {
        return Err(BalanceError::InsufficientParticipants {
            participants,
            team_count,
        });
    }
    Ok(())
}

/// Split `roster` into `team_count` teams of comparable strength.
///
/// The function is pure: the same roster in the same order always yields the
/// same partition. Persisting the result is up to the caller.
pub fn balance_teams(
    roster: &[Participant],
    team_count: usize,
    strategy: BalanceStrategy,
) -> Result<Partition, BalanceError> {
    validate_request(roster.len(), team_count)?;

    let mut teams: Vec<BalancedTeam> = (1..=team_count as u32).map(BalancedTeam::new).collect();

    match strategy {
        BalanceStrategy::SnakeDraft => {
            draft(&mut teams, roster.iter().collect());
        }
        BalanceStrategy::InviterAffinity => {
            let (guests, members): (Vec<&Participant>, Vec<&Participant>) =
                roster.iter().partition(|p| p.is_guest());
            draft(&mut teams, members);
            seat_guests(&mut teams, guests);
        }
    }

    for team in &teams {
        tracing::debug!(
            "Team {}: {} players, total {}, average {:.2}",
            team.team_number,
            team.len(),
            team.total_score,
            team.average_score()
        );
    }

    Ok(Partition { strategy, teams })
}

/// Team index of the `pick`-th draft pick: 0..k-1, then k-1..0, and so on.
fn snake_slot(pick: usize, team_count: usize) -> usize {
    let position = pick % team_count;
    if (pick / team_count) % 2 == 0 {
        position
    } else {
        team_count - 1 - position
    }
}

fn sort_by_score_desc(participants: &mut [&Participant]) {
    // Stable: equal scores keep roster order.
    participants.sort_by_key(|p| Reverse(p.score()));
}

fn draft(teams: &mut [BalancedTeam], mut pool: Vec<&Participant>) {
    sort_by_score_desc(&mut pool);

    let team_count = teams.len();
    let base = pool.len() / team_count;
    let extra = pool.len() % team_count;
    tracing::debug!(
        "Drafting {} players into {} teams: {} each, {} extra",
        pool.len(),
        team_count,
        base,
        extra
    );

    let (drafted, leftover) = pool.split_at(base * team_count);

    for (pick, participant) in drafted.iter().enumerate() {
        teams[snake_slot(pick, team_count)].push((*participant).clone());
    }

    for participant in leftover {
        let target = weakest_unextended_team(teams, base);
        tracing::debug!(
            "Extra player {} ({}) -> team {}",
            participant.name,
            participant.score(),
            teams[target].team_number
        );
        teams[target].push((*participant).clone());
    }
}

/// Lowest-average team among those still at `base` members; ties go to the
/// lowest index. There are fewer leftovers than teams, so one always exists.
fn weakest_unextended_team(teams: &[BalancedTeam], base: usize) -> usize {
    teams
        .iter()
        .enumerate()
        .filter(|(_, team)| team.len() == base)
        .min_by(|(_, a), (_, b)| a.cmp_average(b))
        .map_or(0, |(index, _)| index)
}

fn seat_guests(teams: &mut [BalancedTeam], mut guests: Vec<&Participant>) {
    sort_by_score_desc(&mut guests);

    for guest in guests {
        let inviter_team = guest
            .invited_by()
            .and_then(|inviter| teams.iter().position(|t| t.contains_member(inviter)));

        let target = match inviter_team {
            Some(index) => index,
            None => {
                let index = lowest_total_team(teams);
                tracing::debug!(
                    "Inviter of guest {} not drafted, seating on team {}",
                    guest.name,
                    teams[index].team_number
                );
                index
            }
        };

        teams[target].push(guest.clone());
    }
}

fn lowest_total_team(teams: &[BalancedTeam]) -> usize {
    teams
        .iter()
        .enumerate()
        .min_by_key(|(_, team)| team.total_score)
        .map_or(0, |(index, _)| index)
}
