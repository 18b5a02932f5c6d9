use serde::{Deserialize, Serialize};

use crate::model::answer::{Answer, AnswerSheet, rounded_percent};
use crate::model::follow_up::{FollowUpKind, FollowUpTask};
use crate::model::question::{AnswerValue, Question};
use crate::model::wire;
use crate::model::{CategoryId, QuestionId};

/// Icons cycled over categories in template order.
pub const CATEGORY_ICONS: [&str; 6] = ["🧼", "🍳", "😊", "🔥", "📋", "📦"];

/// A template as returned by `get_checklist_template`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    #[serde(default, deserialize_with = "wire::list")]
    pub categories: Vec<TemplateCategory>,
}

/// A category inside a checklist template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, deserialize_with = "wire::list")]
    pub questions: Vec<Question>,
}

/// Group of questions answered together in one guided session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: &'static str,
    pub questions: Vec<Question>,
    pub completed: bool,
}

impl Category {
    /// True when every question of the category has an answer.
    #[must_use]
    pub fn is_fully_answered(&self, answers: &AnswerSheet) -> bool {
        self.questions.iter().all(|q| answers.contains(&q.id))
    }

    #[must_use]
    pub fn answered_in(&self, answers: &AnswerSheet) -> usize {
        self.questions
            .iter()
            .filter(|q| answers.contains(&q.id))
            .count()
    }
}

/// Bucket used to colour the score ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    #[must_use]
    pub fn from_percent(percent: u32) -> Self {
        if percent < 50 {
            Self::Low
        } else if percent < 80 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Row of the JSON-encoded `answers` field sent to `submit_audit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRow {
    pub question_id: QuestionId,
    pub answer_value: AnswerValue,
    pub answer_comment: String,
    pub image_data: String,
    pub selected_options: Vec<String>,
    pub category: Option<CategoryId>,
}

/// The checklist being audited: categories in template order plus the answers so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditChecklist {
    categories: Vec<Category>,
    answers: AnswerSheet,
}

impl AuditChecklist {
    /// Flatten templates into one ordered list of categories.
    #[must_use]
    pub fn from_templates(templates: Vec<ChecklistTemplate>) -> Self {
        let categories = templates
            .into_iter()
            .enumerate()
            .flat_map(|(t_index, template)| {
                template
                    .categories
                    .into_iter()
                    .enumerate()
                    .map(move |(c_index, cat)| Category {
                        id: cat.id,
                        name: cat.name,
                        icon: CATEGORY_ICONS[(t_index + c_index) % CATEGORY_ICONS.len()],
                        questions: cat.questions,
                        completed: false,
                    })
            })
            .collect();

        Self {
            categories,
            answers: AnswerSheet::new(),
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    /// `round(100 × answered / total)`, 0 for an empty checklist.
    #[must_use]
    pub fn completion_percent(&self) -> u32 {
        let answered = u32::try_from(self.answers.len()).unwrap_or(u32::MAX);
        let total = u32::try_from(self.total_questions()).unwrap_or(u32::MAX);
        rounded_percent(answered, total)
    }

    #[must_use]
    pub fn score_percent(&self) -> u32 {
        self.answers.score_percent()
    }

    #[must_use]
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_percent(self.score_percent())
    }

    /// Submitting is allowed once every question has an answer.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.total_questions() > 0 && self.completion_percent() >= 100
    }

    #[must_use]
    pub fn category_of(&self, question: &QuestionId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.questions.iter().any(|q| &q.id == question))
    }

    /// Store an answer for a question.
    pub fn record_answer(&mut self, question: QuestionId, answer: Answer) {
        self.answers.insert(question, answer);
    }

    /// Merge a follow-up value into the answer it belongs to.
    ///
    /// Returns `false` when the value is empty or the question has no answer,
    /// in which case nothing changes.
    pub fn merge_follow_up(&mut self, task: &FollowUpTask, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        let Some(answer) = self.answers.get_mut(&task.for_question) else {
            return false;
        };
        match task.kind {
            FollowUpKind::Image => answer.image_data = value.to_string(),
            FollowUpKind::Comment => answer.comment = value.to_string(),
        }
        true
    }

    /// Recompute a category's completion flag from the answers.
    ///
    /// Returns the new flag, or `None` for an unknown category.
    pub fn settle_category(&mut self, id: &CategoryId) -> Option<bool> {
        let answers = &self.answers;
        let category = self.categories.iter_mut().find(|c| &c.id == id)?;
        category.completed = category.is_fully_answered(answers);
        Some(category.completed)
    }

    /// Rows for the `answers` field of `submit_audit`.
    #[must_use]
    pub fn submission_rows(&self) -> Vec<SubmissionRow> {
        self.answers
            .iter()
            .map(|(question_id, answer)| SubmissionRow {
                question_id: question_id.clone(),
                answer_value: answer.value,
                answer_comment: answer.comment.clone(),
                image_data: answer.image_data.clone(),
                selected_options: answer.selected_options.iter().cloned().collect(),
                category: self.category_of(question_id).map(|c| c.id.clone()),
            })
            .collect()
    }
}
