pub mod assessment;
pub mod assessment_result;
pub mod competency;
