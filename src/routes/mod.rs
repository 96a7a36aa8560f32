pub mod admin;
pub mod assessments;
pub mod competencies;
pub mod docs;
pub mod extract;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{
    auth::{require_bearer_auth, require_hr_or_admin},
    rate_limit::{new_rps_state, rps_middleware},
};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let employee_api = Router::new()
        .route("/api/assessments", get(assessments::list_assessments))
        .route("/api/assessments/:id", get(assessments::get_assessment))
        .route(
            "/api/assessments/:id/submit",
            post(assessments::submit_assessment),
        )
        .route("/api/competencies", get(competencies::list_my_competencies))
        .route(
            "/api/competencies/:skill_name",
            get(competencies::get_my_competency),
        )
        .route("/api/results", get(competencies::list_my_results))
        .layer(from_fn_with_state(state.clone(), require_bearer_auth))
        .layer(from_fn_with_state(
            new_rps_state(state.config.public_rps),
            rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/assessments",
            get(admin::list_assessments).post(admin::create_assessment),
        )
        .route(
            "/api/admin/assessments/:id",
            get(admin::get_assessment).patch(admin::update_assessment),
        )
        .route(
            "/api/admin/employees/:employee_id/competencies",
            get(admin::employee_competencies),
        )
        .route(
            "/api/admin/employees/:employee_id/results",
            get(admin::employee_results),
        )
        .route(
            "/api/admin/competencies/export",
            get(admin::export_competencies),
        )
        .layer(from_fn_with_state(state.clone(), require_hr_or_admin))
        .layer(from_fn_with_state(
            new_rps_state(state.config.admin_rps),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(docs::openapi_json))
        .merge(employee_api)
        .merge(admin_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
}
