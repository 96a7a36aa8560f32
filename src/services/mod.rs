pub mod assessment_service;
pub mod competency_service;
pub mod export_service;
pub mod grading_service;
pub mod submission_service;
