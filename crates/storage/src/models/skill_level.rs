use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Playing strength of a member or guest, strongest first.
/// Serialized names are the identifiers returned by [`SkillLevel::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Pro,
    #[serde(rename = "SEMI_PRO_1")]
    SemiPro1,
    #[serde(rename = "SEMI_PRO_2")]
    SemiPro2,
    #[serde(rename = "SEMI_PRO_3")]
    SemiPro3,
    #[serde(rename = "AMATEUR_1")]
    Amateur1,
    #[serde(rename = "AMATEUR_2")]
    Amateur2,
    #[serde(rename = "AMATEUR_3")]
    Amateur3,
    #[serde(rename = "AMATEUR_4")]
    Amateur4,
    #[serde(rename = "AMATEUR_5")]
    Amateur5,
    #[serde(rename = "BEGINNER_1")]
    Beginner1,
    #[serde(rename = "BEGINNER_2")]
    Beginner2,
    #[serde(rename = "BEGINNER_3")]
    Beginner3,
    Rookie,
}

/// Score of a participant whose level is missing or unrecognized.
pub const FALLBACK_SCORE: u32 = 1;

/// Level to score mapping, in declaration order of [`SkillLevel`].
static SCORE_TABLE: [(SkillLevel, u32); 13] = [
    (SkillLevel::Pro, 13),
    (SkillLevel::SemiPro1, 12),
    (SkillLevel::SemiPro2, 11),
    (SkillLevel::SemiPro3, 10),
    (SkillLevel::Amateur1, 9),
    (SkillLevel::Amateur2, 8),
    (SkillLevel::Amateur3, 7),
    (SkillLevel::Amateur4, 6),
    (SkillLevel::Amateur5, 5),
    (SkillLevel::Beginner1, 4),
    (SkillLevel::Beginner2, 3),
    (SkillLevel::Beginner3, 2),
    (SkillLevel::Rookie, 1),
];

impl SkillLevel {
    pub const ALL: [SkillLevel; 13] = [
        SkillLevel::Pro,
        SkillLevel::SemiPro1,
        SkillLevel::SemiPro2,
        SkillLevel::SemiPro3,
        SkillLevel::Amateur1,
        SkillLevel::Amateur2,
        SkillLevel::Amateur3,
        SkillLevel::Amateur4,
        SkillLevel::Amateur5,
        SkillLevel::Beginner1,
        SkillLevel::Beginner2,
        SkillLevel::Beginner3,
        SkillLevel::Rookie,
    ];

    pub fn score(self) -> u32 {
        SCORE_TABLE[self as usize].1
    }

    /// Score for an optional level, falling back to the lowest score.
    pub fn score_or_fallback(level: Option<SkillLevel>) -> u32 {
        level.map_or(FALLBACK_SCORE, SkillLevel::score)
    }

    /// Lenient parse used for guest levels, which are free input.
    pub fn parse_lenient(raw: Option<&str>) -> Option<SkillLevel> {
        raw.and_then(|s| s.trim().parse().ok())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Pro => "PRO",
            SkillLevel::SemiPro1 => "SEMI_PRO_1",
            SkillLevel::SemiPro2 => "SEMI_PRO_2",
            SkillLevel::SemiPro3 => "SEMI_PRO_3",
            SkillLevel::Amateur1 => "AMATEUR_1",
            SkillLevel::Amateur2 => "AMATEUR_2",
            SkillLevel::Amateur3 => "AMATEUR_3",
            SkillLevel::Amateur4 => "AMATEUR_4",
            SkillLevel::Amateur5 => "AMATEUR_5",
            SkillLevel::Beginner1 => "BEGINNER_1",
            SkillLevel::Beginner2 => "BEGINNER_2",
            SkillLevel::Beginner3 => "BEGINNER_3",
            SkillLevel::Rookie => "ROOKIE",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown skill level '{0}'")]
pub struct ParseSkillLevelError(pub String);

impl FromStr for SkillLevel {
    type Err = ParseSkillLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseSkillLevelError(s.to_string()))
    }
}

impl TryFrom<String> for SkillLevel {
    type Error = ParseSkillLevelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table_matches_declaration_order() {
        for (index, (level, _)) in SCORE_TABLE.iter().enumerate() {
            assert_eq!(*level as usize, index);
            assert_eq!(SkillLevel::ALL[index], *level);
        }
    }

    #[test]
    fn test_scores_descend_by_one_from_thirteen() {
        let scores: Vec<u32> = SkillLevel::ALL.iter().map(|l| l.score()).collect();
        assert_eq!(scores, (1..=13).rev().collect::<Vec<u32>>());
    }

    #[test]
    fn test_pro_beats_every_other_level() {
        for level in SkillLevel::ALL.into_iter().skip(1) {
            assert!(SkillLevel::Pro.score() > level.score());
        }
        assert_eq!(SkillLevel::Rookie.score(), 1);
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("PRO".parse::<SkillLevel>().unwrap(), SkillLevel::Pro);
        assert_eq!(
            "SEMI_PRO_2".parse::<SkillLevel>().unwrap(),
            SkillLevel::SemiPro2
        );
        assert_eq!("ROOKIE".parse::<SkillLevel>().unwrap(), SkillLevel::Rookie);
        assert!("pro".parse::<SkillLevel>().is_err());
        assert!("LEGEND".parse::<SkillLevel>().is_err());
    }

    #[test]
    fn test_serde_uses_identifiers() {
        let json = serde_json::to_string(&SkillLevel::Amateur3).unwrap();
        assert_eq!(json, "\"AMATEUR_3\"");
        let level: SkillLevel = serde_json::from_str("\"BEGINNER_1\"").unwrap();
        assert_eq!(level, SkillLevel::Beginner1);
    }

    #[test]
    fn test_serde_matches_identifier_for_every_level() {
        for level in SkillLevel::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.as_str()));
            let parsed: SkillLevel = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, level);
        }
        assert!(serde_json::from_str::<SkillLevel>("\"SEMI_PRO1\"").is_err());
    }

    #[test]
    fn test_unknown_level_falls_back_to_lowest_score() {
        assert_eq!(SkillLevel::parse_lenient(Some("WIZARD")), None);
        assert_eq!(SkillLevel::parse_lenient(None), None);
        assert_eq!(
            SkillLevel::parse_lenient(Some(" AMATEUR_1 ")),
            Some(SkillLevel::Amateur1)
        );
        assert_eq!(SkillLevel::score_or_fallback(None), FALLBACK_SCORE);
        assert_eq!(SkillLevel::score_or_fallback(Some(SkillLevel::Pro)), 13);
    }
}
