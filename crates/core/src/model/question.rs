use serde::{Deserialize, Serialize};

use crate::model::QuestionId;
use crate::model::wire;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerType {
    /// One to five stars.
    Rating,
    /// A binary verdict.
    #[serde(rename = "Yes/No", alias = "YesNo")]
    YesNo,
}

/// Binary verdict for `AnswerType::YesNo` questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Yes,
    No,
}

/// Value submitted for an answer: a star count or a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Rating(u8),
    Verdict(Verdict),
}

/// One primary answer button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerChoice {
    pub text: String,
    pub score: u8,
    pub value: AnswerValue,
}

/// Highest score a single answer can reach.
pub const MAX_SCORE: u8 = 5;

/// A checklist question as delivered by the template endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub answer_type: AnswerType,
    #[serde(default, deserialize_with = "wire::list")]
    pub options: Vec<String>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub is_mandatory: bool,
    #[serde(default, deserialize_with = "wire::flag")]
    pub allow_image_upload: bool,
    /// Hint shown under the question text.
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub comment: Option<String>,
}

impl Question {
    /// Checkbox items shown under the question.
    ///
    /// Empty when there are no options or the first option is blank.
    #[must_use]
    pub fn secondary_options(&self) -> Vec<String> {
        match self.options.first() {
            Some(first) if !first.trim().is_empty() => self
                .options
                .iter()
                .map(|opt| opt.trim().to_string())
                .filter(|opt| !opt.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Primary answer buttons for this question, in display order.
    #[must_use]
    pub fn choices(&self) -> Vec<AnswerChoice> {
        match self.answer_type {
            AnswerType::Rating => (1..=MAX_SCORE)
                .map(|stars| AnswerChoice {
                    text: "⭐".repeat(usize::from(stars)),
                    score: stars,
                    value: AnswerValue::Rating(stars),
                })
                .collect(),
            AnswerType::YesNo => vec![
                AnswerChoice {
                    text: "Yes".to_string(),
                    score: MAX_SCORE,
                    value: AnswerValue::Verdict(Verdict::Yes),
                },
                AnswerChoice {
                    text: "No".to_string(),
                    score: 1,
                    value: AnswerValue::Verdict(Verdict::No),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer_type: AnswerType, options: &[&str]) -> Question {
        Question {
            id: QuestionId::new("q1"),
            text: "Is the floor clean?".into(),
            answer_type,
            options: options.iter().map(|s| (*s).to_string()).collect(),
            is_mandatory: true,
            allow_image_upload: false,
            comment: None,
        }
    }

    #[test]
    fn rating_offers_five_star_choices() {
        let choices = question(AnswerType::Rating, &[]).choices();
        assert_eq!(choices.len(), 5);
        assert_eq!(choices[0].text, "⭐");
        assert_eq!(choices[4].score, 5);
        assert_eq!(choices[2].value, AnswerValue::Rating(3));
    }

    #[test]
    fn yes_no_scores_five_and_one() {
        let choices = question(AnswerType::YesNo, &[]).choices();
        assert_eq!(choices.len(), 2);
        assert_eq!((choices[0].text.as_str(), choices[0].score), ("Yes", 5));
        assert_eq!((choices[1].text.as_str(), choices[1].score), ("No", 1));
    }

    #[test]
    fn blank_first_option_hides_secondary_options() {
        assert!(question(AnswerType::Rating, &["", "Mop"]).secondary_options().is_empty());
        assert_eq!(
            question(AnswerType::Rating, &[" Mop ", "Bucket"]).secondary_options(),
            vec!["Mop".to_string(), "Bucket".to_string()]
        );
    }

    #[test]
    fn decodes_template_question() {
        let q: Question = serde_json::from_value(serde_json::json!({
            "id": "Q-7",
            "text": "Hand wash station stocked?",
            "answer_type": "Yes/No",
            "options": null,
            "is_mandatory": 1,
            "allow_image_upload": 0,
            "comment": ""
        }))
        .unwrap();
        assert_eq!(q.answer_type, AnswerType::YesNo);
        assert!(q.is_mandatory);
        assert!(!q.allow_image_upload);
        assert!(q.comment.is_none());
        assert!(q.options.is_empty());
    }

    #[test]
    fn answer_values_serialize_like_the_form() {
        assert_eq!(serde_json::to_value(AnswerValue::Rating(4)).unwrap(), 4);
        assert_eq!(
            serde_json::to_value(AnswerValue::Verdict(Verdict::No)).unwrap(),
            "No"
        );
    }
}
