use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::store::{AssessmentFilter, Store};
use crate::dto::assessment_dto::{CreateAssessmentPayload, UpdateAssessmentPayload};
use crate::error::{Error, Result};
use crate::models::assessment::{
    assign_question_ids, Assessment, PublicAssessment, Question, SkillCategory,
};

#[derive(Clone)]
pub struct AssessmentService {
    store: Arc<dyn Store>,
}

impl AssessmentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create_assessment(&self, payload: CreateAssessmentPayload) -> Result<Assessment> {
        let now = Utc::now();
        let assessment = Assessment {
            id: Uuid::new_v4(),
            skill_name: payload.skill_name.trim().to_string(),
            description: payload.description.and_then(non_blank),
            category: payload.category,
            questions: assign_question_ids(
                payload.questions.into_iter().map(Question::from).collect(),
            ),
            passing_score: payload.passing_score,
            time_limit_minutes: payload.time_limit_minutes,
            is_active: payload.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        assessment.check_definition()?;

        self.store.insert_assessment(&assessment).await?;
        tracing::info!(
            assessment_id = %assessment.id,
            skill = %assessment.skill_name,
            questions = assessment.questions.len(),
            "assessment created"
        );
        Ok(assessment)
    }

    pub async fn update_assessment(
        &self,
        id: Uuid,
        payload: UpdateAssessmentPayload,
    ) -> Result<Assessment> {
        let mut assessment = self.get_assessment(id).await?;

        if let Some(skill_name) = payload.skill_name {
            assessment.skill_name = skill_name.trim().to_string();
        }
        // An empty string clears the description.
        if let Some(description) = payload.description {
            assessment.description = non_blank(description);
        }
        if let Some(category) = payload.category {
            assessment.category = category;
        }
        if let Some(questions) = payload.questions {
            assessment.questions =
                assign_question_ids(questions.into_iter().map(Question::from).collect());
        }
        if let Some(passing_score) = payload.passing_score {
            assessment.passing_score = passing_score;
        }
        if let Some(minutes) = payload.time_limit_minutes {
            assessment.time_limit_minutes = minutes;
        }
        if let Some(is_active) = payload.is_active {
            assessment.is_active = is_active;
        }
        assessment.updated_at = Utc::now();
        assessment.check_definition()?;

        self.store.update_assessment(&assessment).await?;
        tracing::info!(assessment_id = %id, is_active = assessment.is_active, "assessment updated");
        Ok(assessment)
    }

    /// Grading view, for administrators and the grader.
    pub async fn get_assessment(&self, id: Uuid) -> Result<Assessment> {
        self.store
            .get_assessment(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Assessment {} not found", id)))
    }

    /// Grading view that also refuses disabled assessments.
    pub async fn get_active_assessment(&self, id: Uuid) -> Result<Assessment> {
        let assessment = self.get_assessment(id).await?;
        if !assessment.is_active {
            return Err(Error::Inactive(assessment.skill_name));
        }
        Ok(assessment)
    }

    pub async fn get_public_assessment(&self, id: Uuid) -> Result<PublicAssessment> {
        Ok(self.get_active_assessment(id).await?.public_view())
    }

    pub async fn list_assessments(&self, filter: AssessmentFilter) -> Result<Vec<Assessment>> {
        self.store.list_assessments(&filter).await
    }

    pub async fn list_public_assessments(
        &self,
        category: Option<SkillCategory>,
    ) -> Result<Vec<PublicAssessment>> {
        let filter = AssessmentFilter {
            is_active: Some(true),
            category,
        };
        Ok(self
            .store
            .list_assessments(&filter)
            .await?
            .iter()
            .map(Assessment::public_view)
            .collect())
    }
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::dto::assessment_dto::CreateQuestion;

    fn payload() -> CreateAssessmentPayload {
        CreateAssessmentPayload {
            skill_name: " Conflict Resolution ".into(),
            description: Some("Handling disagreements".into()),
            category: SkillCategory::SoftSkills,
            questions: vec![
                CreateQuestion {
                    question: "First step?".into(),
                    options: vec!["Listen".into(), "Escalate".into()],
                    correct_answer: "Listen".into(),
                },
                CreateQuestion {
                    question: "Tone?".into(),
                    options: vec!["Calm".into(), "Loud".into(), "Silent".into()],
                    correct_answer: "Calm".into(),
                },
            ],
            passing_score: 60,
            time_limit_minutes: 20,
            is_active: None,
        }
    }

    fn service() -> AssessmentService {
        AssessmentService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn create_assigns_ids_and_defaults_active() {
        let svc = service();
        let created = svc.create_assessment(payload()).await.unwrap();
        assert_eq!(created.skill_name, "Conflict Resolution");
        assert!(created.is_active);
        let ids: Vec<i32> = created.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let fetched = svc.get_assessment(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_rejects_key_outside_options() {
        let svc = service();
        let mut bad = payload();
        bad.questions[0].correct_answer = "Shout".into();
        assert!(matches!(
            svc.create_assessment(bad).await,
            Err(Error::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn deactivated_assessment_is_hidden_from_employees() {
        let svc = service();
        let created = svc.create_assessment(payload()).await.unwrap();
        svc.update_assessment(
            created.id,
            UpdateAssessmentPayload {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(matches!(
            svc.get_public_assessment(created.id).await,
            Err(Error::Inactive(_))
        ));
        assert!(svc.list_public_assessments(None).await.unwrap().is_empty());
        assert_eq!(
            svc.list_assessments(AssessmentFilter::default())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn empty_description_clears_it() {
        let svc = service();
        let created = svc.create_assessment(payload()).await.unwrap();
        assert!(created.description.is_some());

        let kept = svc
            .update_assessment(created.id, UpdateAssessmentPayload::default())
            .await
            .unwrap();
        assert_eq!(kept.description, created.description);

        let cleared = svc
            .update_assessment(
                created.id,
                UpdateAssessmentPayload {
                    description: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.description, None);
    }

    #[tokio::test]
    async fn unknown_assessment_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.get_public_assessment(Uuid::new_v4()).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn category_filter_applies_to_catalogue() {
        let svc = service();
        svc.create_assessment(payload()).await.unwrap();
        let mut technical = payload();
        technical.skill_name = "Git".into();
        technical.category = SkillCategory::Technical;
        svc.create_assessment(technical).await.unwrap();

        let listed = svc
            .list_public_assessments(Some(SkillCategory::Technical))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].skill_name, "Git");
    }
}
