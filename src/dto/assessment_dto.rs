use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::assessment::{Question, SkillCategory};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateQuestion {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 2))]
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl From<CreateQuestion> for Question {
    fn from(q: CreateQuestion) -> Self {
        Question {
            id: 0,
            question: q.question,
            options: q.options,
            correct_answer: q.correct_answer,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAssessmentPayload {
    #[validate(length(min = 1))]
    pub skill_name: String,
    pub description: Option<String>,
    pub category: SkillCategory,
    #[validate(length(min = 1))]
    pub questions: Vec<CreateQuestion>,
    #[validate(range(min = 0, max = 100))]
    pub passing_score: i32,
    #[validate(range(min = 1))]
    pub time_limit_minutes: i32,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAssessmentPayload {
    #[validate(length(min = 1))]
    pub skill_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<SkillCategory>,
    #[validate(length(min = 1))]
    pub questions: Option<Vec<CreateQuestion>>,
    #[validate(range(min = 0, max = 100))]
    pub passing_score: Option<i32>,
    #[validate(range(min = 1))]
    pub time_limit_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssessmentListQuery {
    pub is_active: Option<bool>,
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogueQuery {
    pub category: Option<SkillCategory>,
}
