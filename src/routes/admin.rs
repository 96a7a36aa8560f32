use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    database::store::AssessmentFilter,
    dto::assessment_dto::{AssessmentListQuery, CreateAssessmentPayload, UpdateAssessmentPayload},
    error::Result,
    routes::extract::{ApiJson, ApiPath, ApiQuery},
    services::export_service::ExportService,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/admin/assessments",
    request_body = CreateAssessmentPayload,
    responses(
        (status = 201, description = "Assessment created", body = crate::models::assessment::Assessment),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not hr/admin")
    )
)]
#[axum::debug_handler]
pub async fn create_assessment(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let assessment = state.assessment_service.create_assessment(payload).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

#[utoipa::path(
    get,
    path = "/api/admin/assessments",
    operation_id = "admin_list_assessments",
    params(AssessmentListQuery),
    responses(
        (status = 200, description = "Assessments with answer keys", body = [crate::models::assessment::Assessment])
    )
)]
#[axum::debug_handler]
pub async fn list_assessments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AssessmentListQuery>,
) -> Result<impl IntoResponse> {
    let assessments = state
        .assessment_service
        .list_assessments(AssessmentFilter {
            is_active: query.is_active,
            category: query.category,
        })
        .await?;
    Ok(Json(assessments))
}

#[utoipa::path(
    get,
    path = "/api/admin/assessments/{id}",
    operation_id = "admin_get_assessment",
    params(
        ("id" = Uuid, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Assessment with answer keys", body = crate::models::assessment::Assessment),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.get_assessment(id).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    patch,
    path = "/api/admin/assessments/{id}",
    params(
        ("id" = Uuid, Path, description = "Assessment ID")
    ),
    request_body = UpdateAssessmentPayload,
    responses(
        (status = 200, description = "Assessment updated", body = crate::models::assessment::Assessment),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn update_assessment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let assessment = state.assessment_service.update_assessment(id, payload).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    get,
    path = "/api/admin/employees/{employee_id}/competencies",
    params(
        ("employee_id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee's competency records", body = [crate::models::competency::EmployeeCompetency])
    )
)]
#[axum::debug_handler]
pub async fn employee_competencies(
    State(state): State<AppState>,
    ApiPath(employee_id): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let competencies = state
        .competency_service
        .list_for_employee(&employee_id)
        .await?;
    Ok(Json(competencies))
}

#[utoipa::path(
    get,
    path = "/api/admin/employees/{employee_id}/results",
    params(
        ("employee_id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee's submissions, newest first", body = [crate::models::assessment_result::AssessmentResult])
    )
)]
#[axum::debug_handler]
pub async fn employee_results(
    State(state): State<AppState>,
    ApiPath(employee_id): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let results = state.submission_service.results_for(&employee_id).await?;
    Ok(Json(results))
}

/// Export every competency record as XLSX
#[utoipa::path(
    get,
    path = "/api/admin/competencies/export",
    responses(
        (status = 200, description = "XLSX workbook attachment")
    )
)]
#[axum::debug_handler]
pub async fn export_competencies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let competencies = state.competency_service.list_all().await?;
    let buffer = ExportService::generate_competencies_xlsx(&competencies)?;
    let filename = format!(
        "competencies_{}.xlsx",
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
