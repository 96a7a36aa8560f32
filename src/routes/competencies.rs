use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::submission_dto::CompetencyStateResponse,
    error::Result,
    middleware::auth::Claims,
    routes::extract::ApiPath,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/competencies",
    responses(
        (status = 200, description = "Caller's competency records", body = [crate::models::competency::EmployeeCompetency])
    )
)]
#[axum::debug_handler]
pub async fn list_my_competencies(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let competencies = state
        .competency_service
        .list_for_employee(&claims.sub)
        .await?;
    Ok(Json(competencies))
}

#[utoipa::path(
    get,
    path = "/api/competencies/{skill_name}",
    params(
        ("skill_name" = String, Path, description = "Skill name")
    ),
    responses(
        (status = 200, description = "Current state, or not_assessed", body = CompetencyStateResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_my_competency(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(skill_name): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let current = state
        .competency_service
        .current_state(&claims.sub, &skill_name)
        .await?;
    Ok(Json(CompetencyStateResponse::from_state(
        &claims.sub,
        &skill_name,
        current,
    )))
}

#[utoipa::path(
    get,
    path = "/api/results",
    responses(
        (status = 200, description = "Caller's submissions, newest first", body = [crate::models::assessment_result::AssessmentResult])
    )
)]
#[axum::debug_handler]
pub async fn list_my_results(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let results = state.submission_service.results_for(&claims.sub).await?;
    Ok(Json(results))
}
