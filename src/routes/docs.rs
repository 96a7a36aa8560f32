use axum::Json;
use utoipa::OpenApi;

use crate::dto::assessment_dto::{CreateAssessmentPayload, CreateQuestion, UpdateAssessmentPayload};
use crate::dto::submission_dto::{
    CompetencyStateResponse, SubmitAssessmentRequest, SubmitAssessmentResponse,
};
use crate::models::assessment::{Assessment, PublicAssessment, PublicQuestion, Question, SkillCategory};
use crate::models::assessment_result::{AssessmentResult, GradedAnswer};
use crate::models::competency::{CompetencyLevel, EmployeeCompetency};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::assessments::list_assessments,
        super::assessments::get_assessment,
        super::assessments::submit_assessment,
        super::competencies::list_my_competencies,
        super::competencies::get_my_competency,
        super::competencies::list_my_results,
        super::admin::create_assessment,
        super::admin::list_assessments,
        super::admin::get_assessment,
        super::admin::update_assessment,
        super::admin::employee_competencies,
        super::admin::employee_results,
        super::admin::export_competencies,
    ),
    components(schemas(
        Assessment,
        PublicAssessment,
        Question,
        PublicQuestion,
        SkillCategory,
        AssessmentResult,
        GradedAnswer,
        CompetencyLevel,
        EmployeeCompetency,
        CreateAssessmentPayload,
        CreateQuestion,
        UpdateAssessmentPayload,
        SubmitAssessmentRequest,
        SubmitAssessmentResponse,
        CompetencyStateResponse,
    )),
    tags((name = "competency-backend", description = "Competency assessments and skill levels"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
