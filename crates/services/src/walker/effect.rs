use audit_core::model::{AnswerChoice, CategoryId, FollowUpTask, FollowUpValue, Question, QuestionId};

/// Where the walker is in a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkerPhase {
    #[default]
    Idle,
    CategoryActive,
    AskingQuestion,
    AskingFollowUp,
    CategoryComplete,
}

/// Everything the host needs to render one main question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPrompt {
    pub question: Question,
    pub choices: Vec<AnswerChoice>,
    pub secondary_options: Vec<String>,
    /// 1-based position inside the category.
    pub position: usize,
    pub total: usize,
}

impl QuestionPrompt {
    pub(crate) fn new(question: Question, position: usize, total: usize) -> Self {
        Self {
            choices: question.choices(),
            secondary_options: question.secondary_options(),
            question,
            position,
            total,
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.question.comment.as_deref()
    }
}

/// Render or side-effect instruction produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenChat { title: String },
    ShowTyping,
    AskQuestion(QuestionPrompt),
    AskFollowUp(FollowUpTask),
    UserReply(String),
    ClearAnswerOptions,
    SectionComplete,
    CloseChat,
    RefreshDashboard,
}

/// Input accepted by [`super::QuestionnaireWalker::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkerEvent {
    OpenCategory(CategoryId),
    Answer {
        question: QuestionId,
        choice: AnswerChoice,
        selected_options: Vec<String>,
    },
    FollowUp {
        task: FollowUpTask,
        value: FollowUpValue,
    },
    Advance,
    CloseCategory,
}
