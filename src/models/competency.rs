use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::assessment::SkillCategory;

/// Four-tier skill level. Variant order is the ordinal order, so `Ord` compares
/// levels the way the ladder ranks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum CompetencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Lower bounds, highest tier first. A score equal to a bound earns that tier.
const LEVEL_LADDER: [(i32, CompetencyLevel); 3] = [
    (90, CompetencyLevel::Expert),
    (75, CompetencyLevel::Advanced),
    (50, CompetencyLevel::Intermediate),
];

impl CompetencyLevel {
    pub fn from_score(score: i32) -> Self {
        LEVEL_LADDER
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, level)| *level)
            .unwrap_or(CompetencyLevel::Beginner)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompetencyLevel::Beginner => "Beginner",
            CompetencyLevel::Intermediate => "Intermediate",
            CompetencyLevel::Advanced => "Advanced",
            CompetencyLevel::Expert => "Expert",
        }
    }
}

impl fmt::Display for CompetencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompetencyLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Beginner" => Ok(CompetencyLevel::Beginner),
            "Intermediate" => Ok(CompetencyLevel::Intermediate),
            "Advanced" => Ok(CompetencyLevel::Advanced),
            "Expert" => Ok(CompetencyLevel::Expert),
            other => Err(Error::Internal(format!("Unknown competency level: {}", other))),
        }
    }
}

/// Current state of one employee on one skill. At most one exists per
/// (employee_id, skill_name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeCompetency {
    pub id: Uuid,
    pub employee_id: String,
    pub skill_name: String,
    pub category: SkillCategory,
    pub score: i32,
    pub level: CompetencyLevel,
    pub assessment_id: Uuid,
    pub assessed_at: DateTime<Utc>,
}

/// Values written by an upsert; the store owns the record id.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetencyUpdate {
    pub employee_id: String,
    pub skill_name: String,
    pub category: SkillCategory,
    pub score: i32,
    pub level: CompetencyLevel,
    pub assessment_id: Uuid,
    pub assessed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_boundaries_resolve_to_higher_tier() {
        assert_eq!(CompetencyLevel::from_score(100), CompetencyLevel::Expert);
        assert_eq!(CompetencyLevel::from_score(90), CompetencyLevel::Expert);
        assert_eq!(CompetencyLevel::from_score(89), CompetencyLevel::Advanced);
        assert_eq!(CompetencyLevel::from_score(75), CompetencyLevel::Advanced);
        assert_eq!(CompetencyLevel::from_score(74), CompetencyLevel::Intermediate);
        assert_eq!(CompetencyLevel::from_score(50), CompetencyLevel::Intermediate);
        assert_eq!(CompetencyLevel::from_score(49), CompetencyLevel::Beginner);
        assert_eq!(CompetencyLevel::from_score(0), CompetencyLevel::Beginner);
    }

    #[test]
    fn level_never_drops_as_score_rises() {
        let mut previous = CompetencyLevel::from_score(0);
        for score in 1..=100 {
            let level = CompetencyLevel::from_score(score);
            assert!(level >= previous, "level dropped at score {}", score);
            previous = level;
        }
    }

    #[test]
    fn level_serializes_as_label() {
        let json = serde_json::to_value(CompetencyLevel::Advanced).unwrap();
        assert_eq!(json, serde_json::json!("Advanced"));
        assert_eq!("Expert".parse::<CompetencyLevel>().unwrap(), CompetencyLevel::Expert);
    }
}
