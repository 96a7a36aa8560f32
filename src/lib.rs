pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::database::store::Store;
use crate::services::{
    assessment_service::AssessmentService, competency_service::CompetencyService,
    submission_service::SubmissionService,
};
use std::sync::Arc;

pub use crate::routes::router;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub assessment_service: AssessmentService,
    pub competency_service: CompetencyService,
    pub submission_service: SubmissionService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        let assessment_service = AssessmentService::new(store.clone());
        let competency_service = CompetencyService::new(store.clone());
        let submission_service = SubmissionService::new(store);

        Self {
            config: Arc::new(config),
            assessment_service,
            competency_service,
            submission_service,
        }
    }
}
