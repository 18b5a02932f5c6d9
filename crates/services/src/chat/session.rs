use audit_core::model::{AuditChecklist, QuestionId};

use super::delay::{CLOSE_DELAY, DelayCanceller, DelayOutcome, TYPING_DELAY, TypingDelay};
use crate::error::WalkerError;
use crate::walker::{
    Effect, QuestionnaireWalker, SECTION_COMPLETE_MESSAGE, WalkerEvent, WalkerPhase,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Bot,
    User,
}

/// One line of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub body: String,
    /// Set on the bot line that asked a main question.
    pub question: Option<QuestionId>,
}

impl ChatMessage {
    fn bot(body: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            body: body.into(),
            question: None,
        }
    }

    fn user(body: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            body: body.into(),
            question: None,
        }
    }
}

/// A delay the host must sleep through before calling [`ChatSession::finish`].
#[derive(Debug, Clone)]
pub struct Pending {
    pub delay: TypingDelay,
    pub canceller: DelayCanceller,
}

/// Result of [`ChatSession::begin`].
#[derive(Debug, Clone)]
pub struct Playback {
    /// Effects to render right away.
    pub effects: Vec<Effect>,
    pub pending: Option<Pending>,
}

#[derive(Debug, Clone)]
enum Deferred {
    Reveal(Vec<Effect>),
    Close,
}

/// Drives a [`QuestionnaireWalker`] the way the chat modal presents it.
///
/// While a delay is pending the input gate stays closed and new events are
/// refused, so a double click cannot advance the walker twice.
#[derive(Debug, Clone)]
pub struct ChatSession {
    walker: QuestionnaireWalker,
    transcript: Vec<ChatMessage>,
    title: Option<String>,
    typing: TypingDelay,
    close: TypingDelay,
    deferred: Option<Deferred>,
    canceller: Option<DelayCanceller>,
    typing_visible: bool,
}

impl ChatSession {
    /// Session with the interactive delays used by the desktop shell.
    #[must_use]
    pub fn interactive(checklist: AuditChecklist) -> Self {
        Self::with_delays(
            checklist,
            TypingDelay::Interactive(TYPING_DELAY),
            TypingDelay::Interactive(CLOSE_DELAY),
        )
    }

    /// Session that never waits, for tests and non-interactive hosts.
    #[must_use]
    pub fn headless(checklist: AuditChecklist) -> Self {
        Self::with_delays(checklist, TypingDelay::Headless, TypingDelay::Headless)
    }

    #[must_use]
    pub fn with_delays(checklist: AuditChecklist, typing: TypingDelay, close: TypingDelay) -> Self {
        Self {
            walker: QuestionnaireWalker::new(checklist),
            transcript: Vec::new(),
            title: None,
            typing,
            close,
            deferred: None,
            canceller: None,
            typing_visible: false,
        }
    }

    #[must_use]
    pub fn walker(&self) -> &QuestionnaireWalker {
        &self.walker
    }

    #[must_use]
    pub fn checklist(&self) -> &AuditChecklist {
        self.walker.checklist()
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Title of the open chat, `None` when the modal is closed.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.title.is_some()
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing_visible
    }

    /// False while a delay is pending; controls must be disabled.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.deferred.is_none()
    }

    /// Apply `event` and return what to render now plus any delay to wait out.
    ///
    /// # Errors
    ///
    /// Returns `WalkerError::InputLocked` while a delay is pending, or the
    /// walker's error for an event that does not fit its state.
    pub fn begin(&mut self, event: WalkerEvent) -> Result<Playback, WalkerError> {
        if !self.accepts_input() {
            return Err(WalkerError::InputLocked);
        }
        let effects = self.walker.handle(event)?;
        Ok(self.stage(effects))
    }

    /// Release what was held back by the last delay and reopen the input gate.
    ///
    /// Returns no effects when nothing was pending.
    ///
    /// # Errors
    ///
    /// Returns the walker's error if closing the category fails.
    pub fn finish(&mut self) -> Result<Vec<Effect>, WalkerError> {
        self.canceller = None;
        match self.deferred.take() {
            None => Ok(Vec::new()),
            Some(Deferred::Reveal(effects)) => {
                self.typing_visible = false;
                self.apply(&effects);
                Ok(effects)
            }
            Some(Deferred::Close) => {
                let effects = self.walker.close_category()?;
                self.apply(&effects);
                Ok(effects)
            }
        }
    }

    /// Close the chat now, abandoning any pending delay.
    ///
    /// # Errors
    ///
    /// Returns `WalkerError::NotActive` if no category is open.
    pub fn close(&mut self) -> Result<Vec<Effect>, WalkerError> {
        if let Some(canceller) = self.canceller.take() {
            canceller.cancel();
        }
        self.deferred = None;
        self.typing_visible = false;
        let effects = self.walker.close_category()?;
        self.apply(&effects);
        Ok(effects)
    }

    /// Run `begin`, the pending delay and `finish` in one go.
    ///
    /// # Errors
    ///
    /// See [`ChatSession::begin`] and [`ChatSession::finish`].
    pub async fn dispatch(&mut self, event: WalkerEvent) -> Result<Vec<Effect>, WalkerError> {
        let Playback { mut effects, pending } = self.begin(event)?;
        let Some(pending) = pending else {
            return Ok(effects);
        };
        match pending.delay.wait(&pending.canceller).await {
            DelayOutcome::Elapsed => effects.extend(self.finish()?),
            DelayOutcome::Cancelled => {
                if self.walker.phase() != WalkerPhase::Idle {
                    effects.extend(self.close()?);
                }
            }
        }
        Ok(effects)
    }

    fn stage(&mut self, effects: Vec<Effect>) -> Playback {
        let (now, later, delay) =
            if let Some(split) = effects.iter().position(|e| *e == Effect::ShowTyping) {
                let mut now = effects;
                let later = now.split_off(split + 1);
                (now, Some(Deferred::Reveal(later)), self.typing)
            } else if effects.contains(&Effect::SectionComplete) {
                (effects, Some(Deferred::Close), self.close)
            } else {
                (effects, None, self.typing)
            };

        self.apply(&now);
        let pending = later.map(|deferred| {
            let canceller = DelayCanceller::new();
            self.deferred = Some(deferred);
            self.canceller = Some(canceller.clone());
            Pending { delay, canceller }
        });
        Playback {
            effects: now,
            pending,
        }
    }

    fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::OpenChat { title } => {
                    self.title = Some(title.clone());
                    self.transcript.clear();
                }
                Effect::ShowTyping => self.typing_visible = true,
                Effect::AskQuestion(prompt) => {
                    let mut body = prompt.question.text.clone();
                    if let Some(hint) = prompt.hint() {
                        body.push_str(&format!("\nHint: {hint}"));
                    }
                    self.transcript.push(ChatMessage {
                        question: Some(prompt.question.id.clone()),
                        ..ChatMessage::bot(body)
                    });
                }
                Effect::AskFollowUp(task) => self.transcript.push(ChatMessage::bot(task.prompt())),
                Effect::UserReply(text) => self.transcript.push(ChatMessage::user(text.clone())),
                Effect::SectionComplete => {
                    self.transcript.push(ChatMessage::bot(SECTION_COMPLETE_MESSAGE));
                }
                Effect::CloseChat => self.title = None,
                Effect::ClearAnswerOptions | Effect::RefreshDashboard => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_core::model::{
        AnswerType, CategoryId, ChecklistTemplate, FollowUpValue, Question, TemplateCategory,
    };

    fn checklist() -> AuditChecklist {
        AuditChecklist::from_templates(vec![ChecklistTemplate {
            categories: vec![TemplateCategory {
                id: CategoryId::new("hygiene"),
                name: "Hygiene".into(),
                questions: vec![Question {
                    id: QuestionId::new("q1"),
                    text: "Hands washed?".into(),
                    answer_type: AnswerType::YesNo,
                    options: Vec::new(),
                    is_mandatory: true,
                    allow_image_upload: false,
                    comment: Some("Check the sink".into()),
                }],
            }],
        }])
    }

    #[test]
    fn typing_holds_back_the_question_and_locks_input() {
        let mut chat = ChatSession::headless(checklist());
        let playback = chat
            .begin(WalkerEvent::OpenCategory(CategoryId::new("hygiene")))
            .unwrap();
        assert_eq!(playback.effects.last(), Some(&Effect::ShowTyping));
        assert!(playback.pending.is_some());
        assert!(chat.is_typing());
        assert!(!chat.accepts_input());
        assert_eq!(
            chat.begin(WalkerEvent::Advance).unwrap_err(),
            WalkerError::InputLocked
        );

        let released = chat.finish().unwrap();
        assert!(matches!(released[0], Effect::AskQuestion(_)));
        assert!(chat.accepts_input());
        assert_eq!(chat.transcript()[0].body, "Hands washed?\nHint: Check the sink");
        assert_eq!(chat.transcript()[0].question, Some(QuestionId::new("q1")));
    }

    #[tokio::test]
    async fn section_complete_closes_after_delay() {
        let mut chat = ChatSession::headless(checklist());
        chat.dispatch(WalkerEvent::OpenCategory(CategoryId::new("hygiene")))
            .await
            .unwrap();
        let choice = chat.walker().current_question().unwrap().choices()[1].clone();
        chat.dispatch(WalkerEvent::Answer {
            question: QuestionId::new("q1"),
            choice,
            selected_options: Vec::new(),
        })
        .await
        .unwrap();

        let task = chat.walker().pending_follow_up().cloned().unwrap();
        let effects = chat
            .dispatch(WalkerEvent::FollowUp {
                task,
                value: FollowUpValue::Skip,
            })
            .await
            .unwrap();

        assert!(effects.contains(&Effect::SectionComplete));
        assert!(effects.ends_with(&[Effect::CloseChat, Effect::RefreshDashboard]));
        assert!(!chat.is_open());
        assert!(chat.checklist().categories()[0].completed);
        let bodies: Vec<_> = chat.transcript().iter().map(|m| m.body.as_str()).collect();
        assert_eq!(
            bodies,
            vec![
                "Hands washed?\nHint: Check the sink",
                "No",
                "Any comments for this question?",
                "Section complete! Great job.",
            ]
        );
    }

    #[tokio::test]
    async fn closing_mid_typing_cancels_the_delay() {
        let mut chat = ChatSession::with_delays(
            checklist(),
            TypingDelay::Interactive(std::time::Duration::from_secs(60)),
            TypingDelay::Headless,
        );
        let playback = chat
            .begin(WalkerEvent::OpenCategory(CategoryId::new("hygiene")))
            .unwrap();
        let pending = playback.pending.unwrap();

        chat.close().unwrap();
        assert!(pending.canceller.is_cancelled());
        assert!(chat.accepts_input());
        assert!(chat.finish().unwrap().is_empty());
        assert!(!chat.checklist().categories()[0].completed);
    }
}
