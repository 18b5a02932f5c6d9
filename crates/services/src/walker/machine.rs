use std::collections::VecDeque;

use audit_core::model::{
    Answer, AnswerChoice, AuditChecklist, CategoryId, FollowUpTask, FollowUpValue, Question,
    QuestionId, is_image_data_uri,
};

use super::effect::{Effect, QuestionPrompt, WalkerEvent, WalkerPhase};
use crate::error::WalkerError;

/// Bot line shown once every question and follow-up of a category is done.
pub const SECTION_COMPLETE_MESSAGE: &str = "Section complete! Great job.";

/// One audit's questionnaire state.
///
/// Owns the checklist and the answers recorded so far. Every transition
/// returns the effects the host must render; misuse leaves state untouched.
#[derive(Debug, Clone)]
pub struct QuestionnaireWalker {
    checklist: AuditChecklist,
    phase: WalkerPhase,
    current_category: Option<CategoryId>,
    question_queue: VecDeque<Question>,
    follow_up_queue: VecDeque<FollowUpTask>,
    current_question: Option<Question>,
    current_follow_up: Option<FollowUpTask>,
    category_total: usize,
}

impl QuestionnaireWalker {
    #[must_use]
    pub fn new(checklist: AuditChecklist) -> Self {
        Self {
            checklist,
            phase: WalkerPhase::Idle,
            current_category: None,
            question_queue: VecDeque::new(),
            follow_up_queue: VecDeque::new(),
            current_question: None,
            current_follow_up: None,
            category_total: 0,
        }
    }

    #[must_use]
    pub fn checklist(&self) -> &AuditChecklist {
        &self.checklist
    }

    #[must_use]
    pub fn into_checklist(self) -> AuditChecklist {
        self.checklist
    }

    #[must_use]
    pub fn phase(&self) -> WalkerPhase {
        self.phase
    }

    #[must_use]
    pub fn current_category(&self) -> Option<&CategoryId> {
        self.current_category.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    #[must_use]
    pub fn pending_follow_up(&self) -> Option<&FollowUpTask> {
        self.current_follow_up.as_ref()
    }

    #[must_use]
    pub fn queued_questions(&self) -> usize {
        self.question_queue.len()
    }

    #[must_use]
    pub fn queued_follow_ups(&self) -> usize {
        self.follow_up_queue.len()
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Returns `WalkerError` when the event does not fit the current state.
    pub fn handle(&mut self, event: WalkerEvent) -> Result<Vec<Effect>, WalkerError> {
        match event {
            WalkerEvent::OpenCategory(id) => self.open_category(&id),
            WalkerEvent::Answer {
                question,
                choice,
                selected_options,
            } => self.record_answer(&question, &choice, selected_options),
            WalkerEvent::FollowUp { task, value } => self.record_follow_up(&task, value),
            WalkerEvent::Advance => {
                self.ensure_active()?;
                Ok(self.advance())
            }
            WalkerEvent::CloseCategory => self.close_category(),
        }
    }

    /// Load a category's questions, replacing any previous queue, and ask the first one.
    ///
    /// # Errors
    ///
    /// Returns `WalkerError::UnknownCategory` if the checklist has no such category.
    pub fn open_category(&mut self, id: &CategoryId) -> Result<Vec<Effect>, WalkerError> {
        let category = self
            .checklist
            .category(id)
            .ok_or_else(|| WalkerError::UnknownCategory(id.clone()))?;

        let title = format!("{} Audit", category.name);
        self.question_queue = category.questions.iter().cloned().collect();
        self.category_total = self.question_queue.len();
        self.follow_up_queue.clear();
        self.current_question = None;
        self.current_follow_up = None;
        self.current_category = Some(id.clone());
        self.phase = WalkerPhase::CategoryActive;

        let mut effects = vec![Effect::OpenChat { title }];
        effects.extend(self.advance());
        Ok(effects)
    }

    /// Serve the next pending follow-up, else the next question, else finish the category.
    pub fn advance(&mut self) -> Vec<Effect> {
        if self.current_category.is_none() {
            return Vec::new();
        }

        if let Some(task) = self.follow_up_queue.pop_front() {
            self.current_follow_up = Some(task.clone());
            self.phase = WalkerPhase::AskingFollowUp;
            return vec![Effect::AskFollowUp(task)];
        }

        self.current_follow_up = None;
        if let Some(question) = self.question_queue.pop_front() {
            let position = self.category_total - self.question_queue.len();
            let prompt = QuestionPrompt::new(question.clone(), position, self.category_total);
            self.current_question = Some(question);
            self.phase = WalkerPhase::AskingQuestion;
            return vec![Effect::ShowTyping, Effect::AskQuestion(prompt)];
        }

        self.current_question = None;
        self.phase = WalkerPhase::CategoryComplete;
        vec![Effect::SectionComplete]
    }

    /// Record the answer to the question being asked, queue its follow-ups and advance.
    ///
    /// # Errors
    ///
    /// Returns `WalkerError` if no category is open, `question` is not the
    /// current question, or `choice` is not one of its answer buttons.
    pub fn record_answer(
        &mut self,
        question: &QuestionId,
        choice: &AnswerChoice,
        selected_options: Vec<String>,
    ) -> Result<Vec<Effect>, WalkerError> {
        self.ensure_active()?;
        let current = match (&self.phase, &self.current_question) {
            (WalkerPhase::AskingQuestion, Some(current)) if &current.id == question => current,
            _ => {
                return Err(WalkerError::UnexpectedQuestion {
                    got: question.clone(),
                });
            }
        };
        if !current.choices().contains(choice) {
            return Err(WalkerError::InvalidChoice {
                question: question.clone(),
                choice: choice.text.clone(),
            });
        }

        let allow_image = current.allow_image_upload;
        let offered = current.secondary_options();
        let selected: Vec<String> = selected_options
            .into_iter()
            .map(|opt| opt.trim().to_string())
            .filter(|opt| offered.contains(opt))
            .collect();

        let mut effects = vec![Effect::UserReply(choice.text.clone())];
        if !selected.is_empty() {
            effects.push(Effect::UserReply(format!("Selected: {}", selected.join(", "))));
        }

        self.checklist
            .record_answer(question.clone(), Answer::from_choice(choice, selected));

        if allow_image {
            self.follow_up_queue
                .push_back(FollowUpTask::image(question.clone()));
        }
        self.follow_up_queue
            .push_back(FollowUpTask::comment(question.clone()));

        effects.push(Effect::ClearAnswerOptions);
        effects.extend(self.advance());
        Ok(effects)
    }

    /// Attach a photo or comment to an earlier answer, or skip it, then advance.
    ///
    /// An empty or skipped value leaves the answer untouched.
    ///
    /// # Errors
    ///
    /// Returns `WalkerError::UnexpectedFollowUp` if `task` is not the pending
    /// follow-up or `value` is of the other kind, and
    /// `WalkerError::InvalidImage` if a photo is not a base64 image URI.
    pub fn record_follow_up(
        &mut self,
        task: &FollowUpTask,
        value: FollowUpValue,
    ) -> Result<Vec<Effect>, WalkerError> {
        self.ensure_active()?;
        if self.phase != WalkerPhase::AskingFollowUp || self.current_follow_up.as_ref() != Some(task)
        {
            return Err(WalkerError::UnexpectedFollowUp);
        }
        if value.kind().is_some_and(|kind| kind != task.kind) {
            return Err(WalkerError::UnexpectedFollowUp);
        }
        if matches!(value, FollowUpValue::Image(_))
            && value.payload().is_some_and(|uri| !is_image_data_uri(uri))
        {
            return Err(WalkerError::InvalidImage);
        }

        let mut effects = Vec::new();
        if let Some(payload) = value.payload() {
            if self.checklist.merge_follow_up(task, payload) {
                effects.push(Effect::UserReply(task.echo(payload)));
            }
        }
        effects.push(Effect::ClearAnswerOptions);
        effects.extend(self.advance());
        Ok(effects)
    }

    /// Settle the open category's completion flag and return to idle.
    ///
    /// # Errors
    ///
    /// Returns `WalkerError::NotActive` if no category is open.
    pub fn close_category(&mut self) -> Result<Vec<Effect>, WalkerError> {
        let id = self.current_category.take().ok_or(WalkerError::NotActive)?;
        self.checklist.settle_category(&id);
        self.question_queue.clear();
        self.follow_up_queue.clear();
        self.current_question = None;
        self.current_follow_up = None;
        self.category_total = 0;
        self.phase = WalkerPhase::Idle;
        Ok(vec![Effect::CloseChat, Effect::RefreshDashboard])
    }

    fn ensure_active(&self) -> Result<(), WalkerError> {
        if self.current_category.is_some() {
            Ok(())
        } else {
            Err(WalkerError::NotActive)
        }
    }
}
