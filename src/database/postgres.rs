use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::store::{AssessmentFilter, Store};
use crate::error::{Error, Result};
use crate::models::assessment::{Assessment, Question};
use crate::models::assessment_result::{AssessmentResult, GradedAnswer};
use crate::models::competency::{CompetencyUpdate, EmployeeCompetency};

const ASSESSMENT_COLUMNS: &str = r#"
    id, skill_name, description, category, questions,
    passing_score, time_limit_minutes, is_active, created_at, updated_at
"#;

const RESULT_COLUMNS: &str = r#"
    id, employee_id, assessment_id, skill_name, answers, score,
    total_questions, correct_answers, passed, level, time_taken_seconds, submitted_at
"#;

const COMPETENCY_COLUMNS: &str = r#"
    id, employee_id, skill_name, category, score, level, assessment_id, assessed_at
"#;

#[derive(Debug, FromRow)]
struct AssessmentRow {
    id: Uuid,
    skill_name: String,
    description: Option<String>,
    category: String,
    questions: Json<Vec<Question>>,
    passing_score: i32,
    time_limit_minutes: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AssessmentRow> for Assessment {
    type Error = Error;

    fn try_from(row: AssessmentRow) -> Result<Self> {
        Ok(Assessment {
            id: row.id,
            skill_name: row.skill_name,
            description: row.description,
            category: row.category.parse()?,
            questions: row.questions.0,
            passing_score: row.passing_score,
            time_limit_minutes: row.time_limit_minutes,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ResultRow {
    id: Uuid,
    employee_id: String,
    assessment_id: Uuid,
    skill_name: String,
    answers: Json<Vec<GradedAnswer>>,
    score: i32,
    total_questions: i32,
    correct_answers: i32,
    passed: bool,
    level: String,
    time_taken_seconds: Option<i32>,
    submitted_at: DateTime<Utc>,
}

impl TryFrom<ResultRow> for AssessmentResult {
    type Error = Error;

    fn try_from(row: ResultRow) -> Result<Self> {
        Ok(AssessmentResult {
            id: row.id,
            employee_id: row.employee_id,
            assessment_id: row.assessment_id,
            skill_name: row.skill_name,
            answers: row.answers.0,
            score: row.score,
            total_questions: row.total_questions,
            correct_answers: row.correct_answers,
            passed: row.passed,
            level: row.level.parse()?,
            time_taken_seconds: row.time_taken_seconds,
            submitted_at: row.submitted_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CompetencyRow {
    id: Uuid,
    employee_id: String,
    skill_name: String,
    category: String,
    score: i32,
    level: String,
    assessment_id: Uuid,
    assessed_at: DateTime<Utc>,
}

impl TryFrom<CompetencyRow> for EmployeeCompetency {
    type Error = Error;

    fn try_from(row: CompetencyRow) -> Result<Self> {
        Ok(EmployeeCompetency {
            id: row.id,
            employee_id: row.employee_id,
            skill_name: row.skill_name,
            category: row.category.parse()?,
            score: row.score,
            level: row.level.parse()?,
            assessment_id: row.assessment_id,
            assessed_at: row.assessed_at,
        })
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = Error>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_assessment(&self, assessment: &Assessment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assessments (
                id, skill_name, description, category, questions,
                passing_score, time_limit_minutes, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(assessment.id)
        .bind(&assessment.skill_name)
        .bind(&assessment.description)
        .bind(assessment.category.as_str())
        .bind(Json(&assessment.questions))
        .bind(assessment.passing_score)
        .bind(assessment.time_limit_minutes)
        .bind(assessment.is_active)
        .bind(assessment.created_at)
        .bind(assessment.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_assessment(&self, assessment: &Assessment) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE assessments
            SET skill_name = $1,
                description = $2,
                category = $3,
                questions = $4,
                passing_score = $5,
                time_limit_minutes = $6,
                is_active = $7,
                updated_at = $8
            WHERE id = $9
            "#,
        )
        .bind(&assessment.skill_name)
        .bind(&assessment.description)
        .bind(assessment.category.as_str())
        .bind(Json(&assessment.questions))
        .bind(assessment.passing_score)
        .bind(assessment.time_limit_minutes)
        .bind(assessment.is_active)
        .bind(assessment.updated_at)
        .bind(assessment.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Assessment not found".into()));
        }
        Ok(())
    }

    async fn get_assessment(&self, id: Uuid) -> Result<Option<Assessment>> {
        let row = sqlx::query_as::<_, AssessmentRow>(&format!(
            "SELECT {} FROM assessments WHERE id = $1",
            ASSESSMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Assessment::try_from).transpose()
    }

    async fn list_assessments(&self, filter: &AssessmentFilter) -> Result<Vec<Assessment>> {
        let rows = sqlx::query_as::<_, AssessmentRow>(&format!(
            r#"
            SELECT {}
            FROM assessments
            WHERE ($1::BOOLEAN IS NULL OR is_active = $1)
              AND ($2::TEXT IS NULL OR category = $2)
            ORDER BY created_at DESC, id
            "#,
            ASSESSMENT_COLUMNS
        ))
        .bind(filter.is_active)
        .bind(filter.category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn insert_result(&self, result: &AssessmentResult) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assessment_results (
                id, employee_id, assessment_id, skill_name, answers, score,
                total_questions, correct_answers, passed, level, time_taken_seconds, submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(result.id)
        .bind(&result.employee_id)
        .bind(result.assessment_id)
        .bind(&result.skill_name)
        .bind(Json(&result.answers))
        .bind(result.score)
        .bind(result.total_questions)
        .bind(result.correct_answers)
        .bind(result.passed)
        .bind(result.level.as_str())
        .bind(result.time_taken_seconds)
        .bind(result.submitted_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_results(&self, employee_id: &str) -> Result<Vec<AssessmentResult>> {
        let rows = sqlx::query_as::<_, ResultRow>(&format!(
            "SELECT {} FROM assessment_results WHERE employee_id = $1 ORDER BY submitted_at DESC",
            RESULT_COLUMNS
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn upsert_competency(&self, update: &CompetencyUpdate) -> Result<EmployeeCompetency> {
        let row = sqlx::query_as::<_, CompetencyRow>(&format!(
            r#"
            INSERT INTO employee_competencies (
                id, employee_id, skill_name, category, score, level, assessment_id, assessed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (employee_id, skill_name) DO UPDATE
            SET category = EXCLUDED.category,
                score = EXCLUDED.score,
                level = EXCLUDED.level,
                assessment_id = EXCLUDED.assessment_id,
                assessed_at = EXCLUDED.assessed_at,
                updated_at = NOW()
            RETURNING {}
            "#,
            COMPETENCY_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&update.employee_id)
        .bind(&update.skill_name)
        .bind(update.category.as_str())
        .bind(update.score)
        .bind(update.level.as_str())
        .bind(update.assessment_id)
        .bind(update.assessed_at)
        .fetch_one(&self.pool)
        .await?;
        EmployeeCompetency::try_from(row)
    }

    async fn get_competency(
        &self,
        employee_id: &str,
        skill_name: &str,
    ) -> Result<Option<EmployeeCompetency>> {
        let row = sqlx::query_as::<_, CompetencyRow>(&format!(
            "SELECT {} FROM employee_competencies WHERE employee_id = $1 AND skill_name = $2",
            COMPETENCY_COLUMNS
        ))
        .bind(employee_id)
        .bind(skill_name)
        .fetch_optional(&self.pool)
        .await?;
        row.map(EmployeeCompetency::try_from).transpose()
    }

    async fn list_competencies(&self, employee_id: &str) -> Result<Vec<EmployeeCompetency>> {
        let rows = sqlx::query_as::<_, CompetencyRow>(&format!(
            "SELECT {} FROM employee_competencies WHERE employee_id = $1 ORDER BY skill_name",
            COMPETENCY_COLUMNS
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn list_all_competencies(&self) -> Result<Vec<EmployeeCompetency>> {
        let rows = sqlx::query_as::<_, CompetencyRow>(&format!(
            "SELECT {} FROM employee_competencies ORDER BY employee_id, skill_name",
            COMPETENCY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }
}
