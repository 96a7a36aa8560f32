use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::competency::CompetencyLevel;

/// One line of the post-grading breakdown. This is the only shape that
/// exposes a question's correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GradedAnswer {
    pub question_id: i32,
    pub question_text: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Immutable record of a single submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub employee_id: String,
    pub assessment_id: Uuid,
    pub skill_name: String,
    pub answers: Vec<GradedAnswer>,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub passed: bool,
    pub level: CompetencyLevel,
    pub time_taken_seconds: Option<i32>,
    pub submitted_at: DateTime<Utc>,
}
