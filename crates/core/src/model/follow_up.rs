use serde::{Deserialize, Serialize};

use crate::model::image::{ImageError, encode_image};
use crate::model::QuestionId;

/// Kind of secondary prompt shown after a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpKind {
    Image,
    Comment,
}

/// A pending photo or comment prompt for an answered question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FollowUpTask {
    pub kind: FollowUpKind,
    pub for_question: QuestionId,
}

impl FollowUpTask {
    #[must_use]
    pub fn image(for_question: QuestionId) -> Self {
        Self {
            kind: FollowUpKind::Image,
            for_question,
        }
    }

    #[must_use]
    pub fn comment(for_question: QuestionId) -> Self {
        Self {
            kind: FollowUpKind::Comment,
            for_question,
        }
    }

    /// Bot line that opens the prompt.
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        match self.kind {
            FollowUpKind::Image => "Would you like to add a photo?",
            FollowUpKind::Comment => "Any comments for this question?",
        }
    }

    /// Reply echoed into the transcript once a value is attached.
    #[must_use]
    pub fn echo(&self, value: &str) -> String {
        match self.kind {
            FollowUpKind::Image => "Image attached.".to_string(),
            FollowUpKind::Comment => value.to_string(),
        }
    }
}

/// Host reply to a follow-up prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUpValue {
    /// Base64 `data:image/...` URI.
    Image(String),
    Comment(String),
    Skip,
}

impl FollowUpValue {
    /// Photo reply built from the raw bytes of an uploaded file.
    ///
    /// # Errors
    ///
    /// Fails when the file is empty or not a recognised image.
    pub fn image_file(file_name: &str, bytes: &[u8]) -> Result<Self, ImageError> {
        encode_image(file_name, bytes).map(Self::Image)
    }

    /// The attached value, or `None` for a skip or an empty string.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Image(v) | Self::Comment(v) if !v.trim().is_empty() => Some(v.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> Option<FollowUpKind> {
        match self {
            Self::Image(_) => Some(FollowUpKind::Image),
            Self::Comment(_) => Some(FollowUpKind::Comment),
            Self::Skip => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_differ_by_kind() {
        let q = QuestionId::new("q");
        assert_eq!(
            FollowUpTask::image(q.clone()).prompt(),
            "Would you like to add a photo?"
        );
        assert_eq!(
            FollowUpTask::comment(q).prompt(),
            "Any comments for this question?"
        );
    }

    #[test]
    fn blank_values_count_as_skip() {
        assert_eq!(FollowUpValue::Comment("  ".into()).payload(), None);
        assert_eq!(FollowUpValue::Skip.payload(), None);
        assert_eq!(FollowUpValue::Comment("ok".into()).payload(), Some("ok"));
    }

    #[test]
    fn image_file_carries_a_data_uri() {
        let value = FollowUpValue::image_file("door.gif", b"GIF89a\x01\0\x01\0").unwrap();
        assert!(value.payload().unwrap().starts_with("data:image/gif;base64,"));
        assert!(FollowUpValue::image_file("door.txt", b"open").is_err());
    }

    #[test]
    fn image_echo_hides_payload() {
        let task = FollowUpTask::image(QuestionId::new("q"));
        assert_eq!(task.echo("data:image/png;base64,AAAA"), "Image attached.");
    }
}
