use crate::models::assessment::Assessment;
use crate::models::assessment_result::GradedAnswer;
use crate::models::competency::CompetencyLevel;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct GradeOutcome {
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub passed: bool,
    pub level: CompetencyLevel,
    pub passing_score: i32,
    pub breakdown: Vec<GradedAnswer>,
}

pub struct GradingService;

impl GradingService {
    /// Grades every question of `assessment` against `answers`. Unanswered
    /// questions count as wrong. Has no side effects.
    pub fn grade(assessment: &Assessment, answers: &HashMap<i32, String>) -> GradeOutcome {
        let mut breakdown = Vec::with_capacity(assessment.questions.len());
        let mut correct = 0usize;

        for q in &assessment.questions {
            let selected = answers.get(&q.id).cloned().unwrap_or_default();
            let is_correct = selected == q.correct_answer;
            if is_correct {
                correct += 1;
            }
            breakdown.push(GradedAnswer {
                question_id: q.id,
                question_text: q.question.clone(),
                selected_answer: selected,
                correct_answer: q.correct_answer.clone(),
                is_correct,
            });
        }

        let score = Self::percentage(correct, assessment.questions.len());
        GradeOutcome {
            score,
            total_questions: assessment.questions.len() as i32,
            correct_answers: correct as i32,
            passed: score >= assessment.passing_score,
            level: CompetencyLevel::from_score(score),
            passing_score: assessment.passing_score,
            breakdown,
        }
    }

    /// `round(100 * correct / total)` with halves rounded up, in integers.
    pub fn percentage(correct: usize, total: usize) -> i32 {
        if total == 0 {
            return 0;
        }
        let correct = correct.min(total);
        ((200 * correct + total) / (2 * total)) as i32
    }
}
