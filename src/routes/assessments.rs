use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        assessment_dto::CatalogueQuery,
        submission_dto::{SubmitAssessmentRequest, SubmitAssessmentResponse},
    },
    error::Result,
    middleware::auth::Claims,
    routes::extract::{ApiJson, ApiPath, ApiQuery},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/assessments",
    params(CatalogueQuery),
    responses(
        (status = 200, description = "Active assessments, without answer keys", body = [crate::models::assessment::PublicAssessment]),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
#[axum::debug_handler]
pub async fn list_assessments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CatalogueQuery>,
) -> Result<impl IntoResponse> {
    let assessments = state
        .assessment_service
        .list_public_assessments(query.category)
        .await?;
    Ok(Json(assessments))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{id}",
    params(
        ("id" = Uuid, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Assessment ready to be taken", body = crate::models::assessment::PublicAssessment),
        (status = 403, description = "Assessment is inactive"),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.get_public_assessment(id).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    post,
    path = "/api/assessments/{id}/submit",
    params(
        ("id" = Uuid, Path, description = "Assessment ID")
    ),
    request_body = SubmitAssessmentRequest,
    responses(
        (status = 200, description = "Submission graded", body = SubmitAssessmentResponse),
        (status = 400, description = "Malformed submission"),
        (status = 403, description = "Assessment is inactive"),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn submit_assessment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<SubmitAssessmentRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let submission = state
        .submission_service
        .submit(&claims.sub, id, req)
        .await?;
    Ok(Json(SubmitAssessmentResponse::from(submission)))
}
