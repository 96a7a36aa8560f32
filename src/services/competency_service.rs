use std::sync::Arc;

use crate::database::store::Store;
use crate::error::Result;
use crate::models::competency::{CompetencyUpdate, EmployeeCompetency};

/// Owns the per-(employee, skill) current-state records.
#[derive(Clone)]
pub struct CompetencyService {
    store: Arc<dyn Store>,
}

impl CompetencyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Insert-or-replace in a single store call; the previous state is discarded.
    pub async fn record(&self, update: CompetencyUpdate) -> Result<EmployeeCompetency> {
        let competency = self.store.upsert_competency(&update).await?;
        tracing::info!(
            employee_id = %competency.employee_id,
            skill = %competency.skill_name,
            score = competency.score,
            level = %competency.level,
            "competency recorded"
        );
        Ok(competency)
    }

    pub async fn current_state(
        &self,
        employee_id: &str,
        skill_name: &str,
    ) -> Result<Option<EmployeeCompetency>> {
        self.store.get_competency(employee_id, skill_name).await
    }

    pub async fn list_for_employee(&self, employee_id: &str) -> Result<Vec<EmployeeCompetency>> {
        self.store.list_competencies(employee_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<EmployeeCompetency>> {
        self.store.list_all_competencies().await
    }
}
