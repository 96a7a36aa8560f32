use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{AssessmentFilter, Store};
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::assessment_result::AssessmentResult;
use crate::models::competency::{CompetencyUpdate, EmployeeCompetency};

#[derive(Debug, Default)]
struct Tables {
    assessments: HashMap<Uuid, Assessment>,
    results: Vec<AssessmentResult>,
    competencies: HashMap<(String, String), EmployeeCompetency>,
}

/// Process-local store used by tests and by deployments without `DATABASE_URL`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_assessment(&self, assessment: &Assessment) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.assessments.contains_key(&assessment.id) {
            return Err(Error::BadRequest(format!(
                "Assessment {} already exists",
                assessment.id
            )));
        }
        tables.assessments.insert(assessment.id, assessment.clone());
        Ok(())
    }

    async fn update_assessment(&self, assessment: &Assessment) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.assessments.get_mut(&assessment.id) {
            Some(existing) => {
                *existing = assessment.clone();
                Ok(())
            }
            None => Err(Error::NotFound("Assessment not found".into())),
        }
    }

    async fn get_assessment(&self, id: Uuid) -> Result<Option<Assessment>> {
        Ok(self.tables.read().await.assessments.get(&id).cloned())
    }

    async fn list_assessments(&self, filter: &AssessmentFilter) -> Result<Vec<Assessment>> {
        let tables = self.tables.read().await;
        let mut found: Vec<Assessment> = tables
            .assessments
            .values()
            .filter(|a| filter.is_active.map_or(true, |active| a.is_active == active))
            .filter(|a| filter.category.map_or(true, |c| a.category == c))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn insert_result(&self, result: &AssessmentResult) -> Result<()> {
        self.tables.write().await.results.push(result.clone());
        Ok(())
    }

    async fn list_results(&self, employee_id: &str) -> Result<Vec<AssessmentResult>> {
        let tables = self.tables.read().await;
        // Pushed in submission order; reverse for newest first.
        Ok(tables
            .results
            .iter()
            .rev()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn upsert_competency(&self, update: &CompetencyUpdate) -> Result<EmployeeCompetency> {
        let mut tables = self.tables.write().await;
        let key = (update.employee_id.clone(), update.skill_name.clone());
        let record = tables
            .competencies
            .entry(key)
            .and_modify(|c| {
                c.category = update.category;
                c.score = update.score;
                c.level = update.level;
                c.assessment_id = update.assessment_id;
                c.assessed_at = update.assessed_at;
            })
            .or_insert_with(|| EmployeeCompetency {
                id: Uuid::new_v4(),
                employee_id: update.employee_id.clone(),
                skill_name: update.skill_name.clone(),
                category: update.category,
                score: update.score,
                level: update.level,
                assessment_id: update.assessment_id,
                assessed_at: update.assessed_at,
            });
        Ok(record.clone())
    }

    async fn get_competency(
        &self,
        employee_id: &str,
        skill_name: &str,
    ) -> Result<Option<EmployeeCompetency>> {
        let tables = self.tables.read().await;
        Ok(tables
            .competencies
            .get(&(employee_id.to_string(), skill_name.to_string()))
            .cloned())
    }

    async fn list_competencies(&self, employee_id: &str) -> Result<Vec<EmployeeCompetency>> {
        let tables = self.tables.read().await;
        let mut found: Vec<EmployeeCompetency> = tables
            .competencies
            .values()
            .filter(|c| c.employee_id == employee_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.skill_name.cmp(&b.skill_name));
        Ok(found)
    }

    async fn list_all_competencies(&self) -> Result<Vec<EmployeeCompetency>> {
        let tables = self.tables.read().await;
        let mut found: Vec<EmployeeCompetency> = tables.competencies.values().cloned().collect();
        found.sort_by(|a, b| {
            a.employee_id
                .cmp(&b.employee_id)
                .then_with(|| a.skill_name.cmp(&b.skill_name))
        });
        Ok(found)
    }
}
