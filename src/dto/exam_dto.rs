use crate::models::exam::{Difficulty, QuestionType};
use bytes::Bytes;
use serde::Deserialize;
use validator::Validate;

/// Parsed form of a `POST /v1/exams/generate` request.
#[derive(Debug, Clone, Validate)]
pub struct GenerateExamRequest {
    #[validate(range(min = 1, message = "num_questions must be at least 1"))]
    pub num_questions: u32,
    pub difficulty: Difficulty,
    #[validate(length(min = 1, message = "At least one question type is required"))]
    pub question_types: Vec<QuestionType>,
    pub exam_guide_content: String,
    pub additional_info: String,
    pub exam_guide_file: Option<UploadedFile>,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub file_type: String,
}
