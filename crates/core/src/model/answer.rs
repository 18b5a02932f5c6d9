use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::question::{AnswerChoice, AnswerValue, MAX_SCORE};
use crate::model::QuestionId;

/// Recorded answer for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub score: u8,
    pub value: AnswerValue,
    pub text: String,
    /// Empty until a comment follow-up supplies one.
    pub comment: String,
    /// Base64 data URL; empty until an image follow-up supplies one.
    pub image_data: String,
    pub selected_options: BTreeSet<String>,
}

impl Answer {
    /// Build an answer from the chosen button and any ticked secondary options.
    #[must_use]
    pub fn from_choice<I>(choice: &AnswerChoice, selected_options: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            score: choice.score,
            value: choice.value,
            text: choice.text.clone(),
            comment: String::new(),
            image_data: String::new(),
            selected_options: selected_options
                .into_iter()
                .map(|opt| opt.trim().to_string())
                .filter(|opt| !opt.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_data.is_empty()
    }
}

/// Answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: BTreeMap<QuestionId, Answer>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an answer, replacing any earlier one for the same question.
    pub fn insert(&mut self, question: QuestionId, answer: Answer) {
        self.answers.insert(question, answer);
    }

    #[must_use]
    pub fn get(&self, question: &QuestionId) -> Option<&Answer> {
        self.answers.get(question)
    }

    pub(crate) fn get_mut(&mut self, question: &QuestionId) -> Option<&mut Answer> {
        self.answers.get_mut(question)
    }

    #[must_use]
    pub fn contains(&self, question: &QuestionId) -> bool {
        self.answers.contains_key(question)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.answers.iter()
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.answers.values().map(|a| u32::from(a.score)).sum()
    }

    /// Share of the maximum possible score over the answered questions only.
    ///
    /// `round(100 × Σscore / (5 × answered))`, or 0 with no answers.
    #[must_use]
    pub fn score_percent(&self) -> u32 {
        let answered = u32::try_from(self.answers.len()).unwrap_or(u32::MAX);
        let max = answered.saturating_mul(u32::from(MAX_SCORE));
        rounded_percent(self.total_score(), max)
    }
}

/// `round(100 × part / whole)` with halves rounded up; 0 when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part);
    let whole = u64::from(whole);
    u32::try_from((200 * part + whole) / (2 * whole)).unwrap_or(u32::MAX)
}
