use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    #[serde(default)]
    pub id: Option<i64>,
    pub exam_title: String,
    pub total_questions: i64,
    pub difficulty: String,
    pub estimated_completion_minutes: i64,
    pub question_types: Vec<QuestionType>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub difficulty: QuestionDifficulty,
    pub question: String,
    #[serde(flatten)]
    pub details: QuestionDetails,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.details.question_type()
    }
}

/// Variant-specific fields, keyed by the `type` discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionDetails {
    #[serde(rename = "Multiple Choice")]
    MultipleChoice {
        options: Vec<String>,
        correct_answer: String,
        explanation: String,
    },
    #[serde(rename = "True/False")]
    TrueFalse {
        correct_answer: String,
        explanation: String,
    },
    #[serde(rename = "Short Answer")]
    ShortAnswer { sample_answer: String },
    #[serde(rename = "Essay")]
    Essay { guidelines: String },
}

impl QuestionDetails {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionDetails::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionDetails::TrueFalse { .. } => QuestionType::TrueFalse,
            QuestionDetails::ShortAnswer { .. } => QuestionType::ShortAnswer,
            QuestionDetails::Essay { .. } => QuestionType::Essay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "Multiple Choice")]
    MultipleChoice,
    #[serde(rename = "True/False")]
    TrueFalse,
    #[serde(rename = "Short Answer")]
    ShortAnswer,
    #[serde(rename = "Essay")]
    Essay,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
        QuestionType::Essay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True/False",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::Essay => "Essay",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuestionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.label() == s.trim())
            .ok_or_else(|| {
                let labels: Vec<&str> = QuestionType::ALL.iter().map(|t| t.label()).collect();
                Error::InvalidInput(format!(
                    "Unknown question type '{}'. Expected one of: {}",
                    s,
                    labels.join(", ")
                ))
            })
    }
}

/// Request-level difficulty. `Mixed` never appears on an individual question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            "Mixed" => Ok(Difficulty::Mixed),
            other => Err(Error::InvalidInput(format!(
                "Unknown difficulty '{}'. Expected one of: Easy, Medium, Hard, Mixed",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionDifficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for QuestionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuestionDifficulty::Easy => "Easy",
            QuestionDifficulty::Medium => "Medium",
            QuestionDifficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_serializes_with_type_label() {
        let q = Question {
            id: 3,
            difficulty: QuestionDifficulty::Hard,
            question: "Explain ownership.".into(),
            details: QuestionDetails::Essay {
                guidelines: "Cover moves and borrows".into(),
            },
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["type"], "Essay");
        assert_eq!(value["difficulty"], "Hard");
        assert_eq!(value["guidelines"], "Cover moves and borrows");
    }

    #[test]
    fn question_type_parses_display_labels() {
        assert_eq!(
            "True/False".parse::<QuestionType>().unwrap(),
            QuestionType::TrueFalse
        );
        assert_eq!(
            " Short Answer ".parse::<QuestionType>().unwrap(),
            QuestionType::ShortAnswer
        );
        assert!("MCQ".parse::<QuestionType>().is_err());
    }

    #[test]
    fn mixed_difficulty_is_request_level_only() {
        assert_eq!("Mixed".parse::<Difficulty>().unwrap(), Difficulty::Mixed);
        let err = serde_json::from_value::<QuestionDifficulty>(json!("Mixed"));
        assert!(err.is_err());
    }
}
