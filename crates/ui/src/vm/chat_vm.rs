use audit_core::model::{AnswerChoice, FollowUpTask, QuestionId};
use services::walker::WalkerPhase;
use services::{ChatMessage, ChatSession, Sender};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatLineVm {
    pub class: &'static str,
    pub body: String,
}

impl From<&ChatMessage> for ChatLineVm {
    fn from(message: &ChatMessage) -> Self {
        Self {
            class: match message.sender {
                Sender::Bot => "message bot",
                Sender::User => "message user",
            },
            body: message.body.clone(),
        }
    }
}

/// Controls under the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatInputVm {
    /// Nothing to answer, or a delay is running.
    Hidden,
    Choices {
        question: QuestionId,
        choices: Vec<AnswerChoice>,
        secondary_options: Vec<String>,
    },
    FollowUp(FollowUpTask),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatVm {
    pub title: String,
    pub lines: Vec<ChatLineVm>,
    pub typing: bool,
    pub input: ChatInputVm,
}

impl ChatVm {
    /// `None` while the chat modal is closed.
    #[must_use]
    pub fn from_session(session: &ChatSession) -> Option<Self> {
        let title = session.title()?.to_string();
        let walker = session.walker();
        let input = if !session.accepts_input() {
            ChatInputVm::Hidden
        } else {
            match walker.phase() {
                WalkerPhase::AskingQuestion => walker.current_question().map_or(
                    ChatInputVm::Hidden,
                    |question| ChatInputVm::Choices {
                        question: question.id.clone(),
                        choices: question.choices(),
                        secondary_options: question.secondary_options(),
                    },
                ),
                WalkerPhase::AskingFollowUp => walker
                    .pending_follow_up()
                    .cloned()
                    .map_or(ChatInputVm::Hidden, ChatInputVm::FollowUp),
                _ => ChatInputVm::Hidden,
            }
        };
        Some(Self {
            title,
            lines: session.transcript().iter().map(ChatLineVm::from).collect(),
            typing: session.is_typing(),
            input,
        })
    }
}
