use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::store::Store;
use crate::dto::submission_dto::SubmitAssessmentRequest;
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::assessment_result::AssessmentResult;
use crate::models::competency::{CompetencyUpdate, EmployeeCompetency};
use crate::services::assessment_service::AssessmentService;
use crate::services::competency_service::CompetencyService;
use crate::services::grading_service::GradingService;

#[derive(Debug, Clone)]
pub struct Submission {
    pub result: AssessmentResult,
    pub competency: EmployeeCompetency,
    pub passing_score: i32,
}

/// Runs one submission end to end: load, grade, append the result, upsert
/// the competency.
#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn Store>,
    assessments: AssessmentService,
    competencies: CompetencyService,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            assessments: AssessmentService::new(store.clone()),
            competencies: CompetencyService::new(store.clone()),
            store,
        }
    }

    pub async fn submit(
        &self,
        employee_id: &str,
        assessment_id: Uuid,
        req: SubmitAssessmentRequest,
    ) -> Result<Submission> {
        if employee_id.trim().is_empty() {
            return Err(Error::Unauthorized("missing employee identity".into()));
        }
        if req.time_taken_seconds.is_some_and(|t| t < 0) {
            return Err(Error::BadRequest(
                "time_taken_seconds must not be negative".into(),
            ));
        }

        let assessment = self.assessments.get_active_assessment(assessment_id).await?;
        check_answers(&assessment, &req.answers)?;

        let outcome = GradingService::grade(&assessment, &req.answers);
        let submitted_at = Utc::now();

        let result = AssessmentResult {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            assessment_id: assessment.id,
            skill_name: assessment.skill_name.clone(),
            answers: outcome.breakdown,
            score: outcome.score,
            total_questions: outcome.total_questions,
            correct_answers: outcome.correct_answers,
            passed: outcome.passed,
            level: outcome.level,
            time_taken_seconds: req.time_taken_seconds,
            submitted_at,
        };
        self.store.insert_result(&result).await?;

        let competency = self
            .competencies
            .record(CompetencyUpdate {
                employee_id: employee_id.to_string(),
                skill_name: assessment.skill_name.clone(),
                category: assessment.category,
                score: outcome.score,
                level: outcome.level,
                assessment_id: assessment.id,
                assessed_at: submitted_at,
            })
            .await?;

        tracing::info!(
            result_id = %result.id,
            employee_id = %employee_id,
            assessment_id = %assessment.id,
            score = result.score,
            passed = result.passed,
            "assessment graded"
        );

        Ok(Submission {
            result,
            competency,
            passing_score: outcome.passing_score,
        })
    }

    pub async fn results_for(&self, employee_id: &str) -> Result<Vec<AssessmentResult>> {
        self.store.list_results(employee_id).await
    }
}

/// Every answer must target a question of this assessment and pick one of its
/// options. An empty string counts as unanswered.
fn check_answers(assessment: &Assessment, answers: &HashMap<i32, String>) -> Result<()> {
    for (question_id, selected) in answers {
        let Some(question) = assessment.question(*question_id) else {
            return Err(Error::BadRequest(format!(
                "question {} is not part of this assessment",
                question_id
            )));
        };
        if !selected.is_empty() && !question.options.contains(selected) {
            return Err(Error::BadRequest(format!(
                "answer to question {} is not one of its options",
                question_id
            )));
        }
    }
    Ok(())
}
