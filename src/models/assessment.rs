use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    SoftSkills,
    Leadership,
    Compliance,
    Safety,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical",
            SkillCategory::SoftSkills => "soft_skills",
            SkillCategory::Leadership => "leadership",
            SkillCategory::Compliance => "compliance",
            SkillCategory::Safety => "safety",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "technical" => Ok(SkillCategory::Technical),
            "soft_skills" => Ok(SkillCategory::SoftSkills),
            "leadership" => Ok(SkillCategory::Leadership),
            "compliance" => Ok(SkillCategory::Compliance),
            "safety" => Ok(SkillCategory::Safety),
            other => Err(Error::BadRequest(format!("Unknown skill category: {}", other))),
        }
    }
}

/// Grading view of a question. Carries the correct answer and must never be
/// serialized to a test-taker before submission; use [`PublicQuestion`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    #[serde(default)]
    pub id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicQuestion {
    pub id: i32,
    pub question: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.question.clone(),
            options: q.options.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Assessment {
    pub id: Uuid,
    pub skill_name: String,
    pub description: Option<String>,
    pub category: SkillCategory,
    pub questions: Vec<Question>,
    pub passing_score: i32,
    pub time_limit_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display view of an assessment, handed out before the employee submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicAssessment {
    pub id: Uuid,
    pub skill_name: String,
    pub description: Option<String>,
    pub category: SkillCategory,
    pub total_questions: usize,
    pub questions: Vec<PublicQuestion>,
    pub passing_score: i32,
    pub time_limit_minutes: i32,
}

impl Assessment {
    pub fn public_view(&self) -> PublicAssessment {
        PublicAssessment {
            id: self.id,
            skill_name: self.skill_name.clone(),
            description: self.description.clone(),
            category: self.category,
            total_questions: self.questions.len(),
            questions: self.questions.iter().map(PublicQuestion::from).collect(),
            passing_score: self.passing_score,
            time_limit_minutes: self.time_limit_minutes,
        }
    }

    pub fn question(&self, id: i32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Checks the invariants an assessment must hold before it is stored.
    pub fn check_definition(&self) -> Result<()> {
        if self.skill_name.trim().is_empty() {
            return Err(Error::BadRequest("skill_name must not be empty".into()));
        }
        if !(0..=100).contains(&self.passing_score) {
            return Err(Error::BadRequest(
                "passing_score must be between 0 and 100".into(),
            ));
        }
        if self.time_limit_minutes <= 0 {
            return Err(Error::BadRequest(
                "time_limit_minutes must be positive".into(),
            ));
        }
        if self.questions.is_empty() {
            return Err(Error::BadRequest(
                "an assessment needs at least one question".into(),
            ));
        }
        for q in &self.questions {
            if q.question.trim().is_empty() {
                return Err(Error::BadRequest(format!("question {} has no text", q.id)));
            }
            if q.options.len() < 2 {
                return Err(Error::BadRequest(format!(
                    "question {} needs at least two options",
                    q.id
                )));
            }
            if q.options.iter().any(|o| o.trim().is_empty()) {
                return Err(Error::BadRequest(format!(
                    "question {} has a blank option",
                    q.id
                )));
            }
            // A missing answer grades as "", so "" can never be a key.
            if q.correct_answer.trim().is_empty() {
                return Err(Error::BadRequest(format!(
                    "question {} has a blank correct_answer",
                    q.id
                )));
            }
            if !q.options.contains(&q.correct_answer) {
                return Err(Error::BadRequest(format!(
                    "question {}: correct_answer is not one of its options",
                    q.id
                )));
            }
        }
        Ok(())
    }
}

/// Numbers questions 1..=n in display order.
pub fn assign_question_ids(questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .enumerate()
        .map(|(idx, q)| Question {
            id: (idx as i32) + 1,
            ..q
        })
        .collect()
}
