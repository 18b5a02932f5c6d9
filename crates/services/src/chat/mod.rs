//! Chat-style host around the questionnaire walker: transcript, input gate
//! and the cosmetic typing delay.

mod delay;
mod session;

pub use delay::{
    CLOSE_DELAY, DelayCanceller, DelayOutcome, TYPING_DELAY, TypingDelay,
};
pub use session::{ChatMessage, ChatSession, Pending, Playback, Sender};
