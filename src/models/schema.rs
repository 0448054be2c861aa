//! Structural contract for generated exams.
//!
//! The same shape is sent to the model as a response schema and enforced on
//! the way back by [`validate_exam`].

use crate::error::{Error, Result};
use crate::models::exam::{Exam, QuestionDetails, QuestionType};
use serde_json::{json, Map, Value as JsonValue};

/// Options are labelled `A`..`Z`, so a question can carry at most this many.
pub const MAX_OPTIONS: usize = 26;

const EXAM_FIELDS: [&str; 7] = [
    "id",
    "exam_title",
    "total_questions",
    "difficulty",
    "estimated_completion_minutes",
    "question_types",
    "questions",
];

/// Response schema in the Gemini `responseSchema` dialect (OpenAPI subset).
pub fn exam_response_schema() -> JsonValue {
    let type_labels: Vec<&str> = QuestionType::ALL.iter().map(|t| t.label()).collect();

    let variants: Vec<JsonValue> = QuestionType::ALL
        .iter()
        .map(|t| question_schema(*t))
        .collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "INTEGER", "nullable": true },
            "exam_title": { "type": "STRING" },
            "total_questions": { "type": "INTEGER" },
            "difficulty": { "type": "STRING" },
            "estimated_completion_minutes": { "type": "INTEGER" },
            "question_types": {
                "type": "ARRAY",
                "items": { "type": "STRING", "enum": type_labels }
            },
            "questions": {
                "type": "ARRAY",
                "items": { "anyOf": variants }
            }
        },
        "required": &EXAM_FIELDS[1..],
        "propertyOrdering": EXAM_FIELDS,
    })
}

fn question_schema(question_type: QuestionType) -> JsonValue {
    let string = || json!({ "type": "STRING" });

    let mut properties = Map::new();
    properties.insert("id".into(), json!({ "type": "INTEGER" }));
    properties.insert(
        "type".into(),
        json!({ "type": "STRING", "enum": [question_type.label()] }),
    );
    properties.insert(
        "difficulty".into(),
        json!({ "type": "STRING", "enum": ["Easy", "Medium", "Hard"] }),
    );
    properties.insert("question".into(), string());

    let extra: Vec<(&str, JsonValue)> = match question_type {
        QuestionType::MultipleChoice => vec![
            (
                "options",
                json!({ "type": "ARRAY", "items": string(), "maxItems": MAX_OPTIONS }),
            ),
            ("correct_answer", string()),
            ("explanation", string()),
        ],
        QuestionType::TrueFalse => vec![("correct_answer", string()), ("explanation", string())],
        QuestionType::ShortAnswer => vec![("sample_answer", string())],
        QuestionType::Essay => vec![("guidelines", string())],
    };

    let mut required: Vec<String> = properties.keys().cloned().collect();
    for (name, schema) in extra {
        properties.insert(name.to_string(), schema);
        required.push(name.to_string());
    }

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

/// Turns a raw model payload into an [`Exam`], all or nothing.
///
/// Unknown fields are ignored. Missing fields, wrong primitive types, an
/// unknown `type` tag, or more than [`MAX_OPTIONS`] options are rejected.
pub fn validate_exam(raw: JsonValue) -> Result<Exam> {
    let exam: Exam =
        serde_json::from_value(raw).map_err(|e| Error::SchemaMismatch(e.to_string()))?;

    check_option_bounds(&exam).map_err(Error::SchemaMismatch)?;

    if exam.total_questions != exam.questions.len() as i64 {
        tracing::warn!(
            total_questions = exam.total_questions,
            actual = exam.questions.len(),
            "Generated exam question count differs from total_questions"
        );
    }

    Ok(exam)
}

pub fn check_option_bounds(exam: &Exam) -> std::result::Result<(), String> {
    for q in &exam.questions {
        if let QuestionDetails::MultipleChoice { options, .. } = &q.details {
            if options.len() > MAX_OPTIONS {
                return Err(format!(
                    "question {} has {} options; at most {} are supported",
                    q.id,
                    options.len(),
                    MAX_OPTIONS
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam_with(question: JsonValue) -> JsonValue {
        json!({
            "exam_title": "Rust Basics",
            "total_questions": 1,
            "difficulty": "Easy",
            "estimated_completion_minutes": 10,
            "question_types": [question["type"].clone()],
            "questions": [question],
        })
    }

    fn minimal_questions() -> Vec<JsonValue> {
        vec![
            json!({
                "id": 1, "type": "Multiple Choice", "difficulty": "Easy",
                "question": "Pick one", "options": ["a", "b"],
                "correct_answer": "a", "explanation": "because"
            }),
            json!({
                "id": 2, "type": "True/False", "difficulty": "Medium",
                "question": "Sky is blue?", "correct_answer": "True", "explanation": "Rayleigh"
            }),
            json!({
                "id": 3, "type": "Short Answer", "difficulty": "Hard",
                "question": "Define borrow", "sample_answer": "A reference"
            }),
            json!({
                "id": 4, "type": "Essay", "difficulty": "Easy",
                "question": "Discuss traits", "guidelines": "Two pages"
            }),
        ]
    }

    #[test]
    fn accepts_minimal_question_of_each_variant() {
        for q in minimal_questions() {
            let expected = q["type"].as_str().unwrap().to_string();
            let exam = validate_exam(exam_with(q)).expect("minimal question should validate");
            assert_eq!(exam.questions[0].question_type().label(), expected);
            assert_eq!(exam.id, None);
        }
    }

    #[test]
    fn rejects_each_missing_required_field() {
        for q in minimal_questions() {
            let fields: Vec<String> = q
                .as_object()
                .unwrap()
                .keys()
                .filter(|k| k.as_str() != "type")
                .cloned()
                .collect();
            for field in fields {
                let mut broken = q.clone();
                broken.as_object_mut().unwrap().remove(&field);
                let result = validate_exam(exam_with(broken));
                assert!(
                    matches!(result, Err(Error::SchemaMismatch(_))),
                    "removing `{}` from {} should fail",
                    field,
                    q["type"]
                );
            }
        }
    }

    #[test]
    fn rejects_unknown_question_type() {
        let q = json!({
            "id": 1, "type": "Matching", "difficulty": "Easy",
            "question": "Match", "pairs": []
        });
        let err = validate_exam(exam_with(q)).unwrap_err();
        assert!(err.to_string().contains("Matching"));
    }

    #[test]
    fn rejects_wrong_primitive_type() {
        let mut raw = exam_with(minimal_questions().remove(0));
        raw["total_questions"] = json!("one");
        assert!(matches!(validate_exam(raw), Err(Error::SchemaMismatch(_))));
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut q = minimal_questions().remove(2);
        q["hint"] = json!("think about lifetimes");
        let mut raw = exam_with(q);
        raw["generated_by"] = json!("model");
        assert!(validate_exam(raw).is_ok());
    }

    #[test]
    fn rejects_more_than_26_options() {
        let mut q = minimal_questions().remove(0);
        q["options"] = json!((0..27).map(|i| i.to_string()).collect::<Vec<_>>());
        let err = validate_exam(exam_with(q)).unwrap_err();
        assert!(err.to_string().contains("27 options"));
    }

    #[test]
    fn count_mismatch_is_tolerated() {
        let mut raw = exam_with(minimal_questions().remove(3));
        raw["total_questions"] = json!(5);
        assert_eq!(validate_exam(raw).unwrap().total_questions, 5);
    }

    #[test]
    fn response_schema_lists_every_variant() {
        let schema = exam_response_schema();
        let variants = schema["properties"]["questions"]["items"]["anyOf"]
            .as_array()
            .unwrap();
        assert_eq!(variants.len(), 4);
        let mc = &variants[0];
        assert_eq!(mc["properties"]["type"]["enum"][0], "Multiple Choice");
        let required: Vec<&str> = mc["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"options"));
        assert!(required.contains(&"correct_answer"));
        assert!(!schema["required"]
            .as_array()
            .unwrap()
            .contains(&json!("id")));
    }
}
