//! Guided questionnaire: walks a category question by question, queueing
//! photo and comment follow-ups after each answer.

mod effect;
mod machine;

pub use crate::error::WalkerError;
pub use effect::{Effect, QuestionPrompt, WalkerEvent, WalkerPhase};
pub use machine::{QuestionnaireWalker, SECTION_COMPLETE_MESSAGE};
