use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::assessment::{Assessment, SkillCategory};
use crate::models::assessment_result::AssessmentResult;
use crate::models::competency::{CompetencyUpdate, EmployeeCompetency};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentFilter {
    pub is_active: Option<bool>,
    pub category: Option<SkillCategory>,
}

/// Persistence seam shared by the services. Implementations must make
/// `upsert_competency` a single atomic insert-or-replace keyed by
/// (employee_id, skill_name).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_assessment(&self, assessment: &Assessment) -> Result<()>;

    /// Replaces a stored assessment. `NotFound` if the id is unknown.
    async fn update_assessment(&self, assessment: &Assessment) -> Result<()>;

    async fn get_assessment(&self, id: Uuid) -> Result<Option<Assessment>>;

    /// Newest first.
    async fn list_assessments(&self, filter: &AssessmentFilter) -> Result<Vec<Assessment>>;

    async fn insert_result(&self, result: &AssessmentResult) -> Result<()>;

    /// Newest first.
    async fn list_results(&self, employee_id: &str) -> Result<Vec<AssessmentResult>>;

    async fn upsert_competency(&self, update: &CompetencyUpdate) -> Result<EmployeeCompetency>;

    async fn get_competency(
        &self,
        employee_id: &str,
        skill_name: &str,
    ) -> Result<Option<EmployeeCompetency>>;

    /// Ordered by skill name.
    async fn list_competencies(&self, employee_id: &str) -> Result<Vec<EmployeeCompetency>>;

    /// Ordered by employee id, then skill name.
    async fn list_all_competencies(&self) -> Result<Vec<EmployeeCompetency>>;
}
