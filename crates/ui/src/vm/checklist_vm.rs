use audit_core::model::{AuditChecklist, CategoryId, ScoreBand};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCardVm {
    pub id: CategoryId,
    pub name: String,
    pub icon: &'static str,
    pub answered: usize,
    pub total: usize,
    pub completed: bool,
}

impl CategoryCardVm {
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.answered, self.total)
    }
}

/// Progress and score panel of the audit page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditSummaryVm {
    pub answered: usize,
    pub total: usize,
    pub completion: u32,
    pub score: u32,
    pub score_class: &'static str,
    pub can_submit: bool,
}

impl From<&AuditChecklist> for AuditSummaryVm {
    fn from(checklist: &AuditChecklist) -> Self {
        Self {
            answered: checklist.answers().answered_count(),
            total: checklist.total_questions(),
            completion: checklist.completion_percent(),
            score: checklist.score_percent(),
            score_class: score_class(checklist.score_band()),
            can_submit: checklist.can_submit(),
        }
    }
}

#[must_use]
pub fn score_class(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Low => "score low",
        ScoreBand::Medium => "score medium",
        ScoreBand::High => "score high",
    }
}

#[must_use]
pub fn map_category_cards(checklist: &AuditChecklist) -> Vec<CategoryCardVm> {
    let answers = checklist.answers();
    checklist
        .categories()
        .iter()
        .map(|category| CategoryCardVm {
            id: category.id.clone(),
            name: category.name.clone(),
            icon: category.icon,
            answered: category.answered_in(answers),
            total: category.questions.len(),
            completed: category.completed,
        })
        .collect()
}
