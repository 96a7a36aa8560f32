use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::assessment_result::GradedAnswer;
use crate::models::competency::{CompetencyLevel, EmployeeCompetency};
use crate::services::submission_service::Submission;

/// Answers keyed by question id. Unanswered questions are simply left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitAssessmentRequest {
    #[serde(default)]
    pub answers: HashMap<i32, String>,
    #[validate(range(min = 0))]
    pub time_taken_seconds: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitAssessmentResponse {
    pub result_id: Uuid,
    pub assessment_id: Uuid,
    pub skill_name: String,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub passed: bool,
    pub level: CompetencyLevel,
    pub passing_score: i32,
    pub breakdown: Vec<GradedAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompetencyStateResponse {
    Assessed {
        competency: EmployeeCompetency,
    },
    NotAssessed {
        employee_id: String,
        skill_name: String,
    },
}

impl CompetencyStateResponse {
    pub fn from_state(
        employee_id: &str,
        skill_name: &str,
        state: Option<EmployeeCompetency>,
    ) -> Self {
        match state {
            Some(competency) => CompetencyStateResponse::Assessed { competency },
            None => CompetencyStateResponse::NotAssessed {
                employee_id: employee_id.to_string(),
                skill_name: skill_name.to_string(),
            },
        }
    }
}

impl From<Submission> for SubmitAssessmentResponse {
    fn from(submission: Submission) -> Self {
        let result = submission.result;
        Self {
            result_id: result.id,
            assessment_id: result.assessment_id,
            skill_name: result.skill_name,
            score: result.score,
            total_questions: result.total_questions,
            correct_answers: result.correct_answers,
            passed: result.passed,
            level: result.level,
            passing_score: submission.passing_score,
            breakdown: result.answers,
        }
    }
}
