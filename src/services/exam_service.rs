use crate::dto::exam_dto::{GenerateExamRequest, UploadedFile};
use crate::error::{Error, Result};
use crate::models::exam::Exam;
use crate::models::file_type::{file_extension, InputFileType};
use crate::models::schema::{exam_response_schema, validate_exam};
use crate::services::ai_service::ExamGenerator;
use crate::services::extraction_service::ExtractionService;
use crate::services::prompt::build_prompt;
use std::sync::Arc;
use validator::Validate;

/// Drives the generate path: input checks, extraction, prompt, model call, validation.
#[derive(Clone)]
pub struct ExamService {
    generator: Arc<dyn ExamGenerator>,
    max_questions: u32,
}

impl ExamService {
    pub fn new(generator: Arc<dyn ExamGenerator>, max_questions: u32) -> Self {
        Self {
            generator,
            max_questions,
        }
    }

    pub async fn generate_exam(&self, payload: GenerateExamRequest) -> Result<Exam> {
        payload.validate()?;
        if payload.num_questions > self.max_questions {
            return Err(Error::InvalidInput(format!(
                "num_questions must not exceed {}",
                self.max_questions
            )));
        }

        let guide = Self::resolve_guide_text(
            payload.exam_guide_content,
            payload.exam_guide_file,
        )
        .await?;

        let prompt = build_prompt(
            payload.num_questions,
            payload.difficulty,
            &payload.question_types,
            &guide,
            &payload.additional_info,
        );
        let schema = exam_response_schema();

        let raw = self.generator.generate(&prompt, &schema).await?;
        let exam = validate_exam(raw)?;

        tracing::info!(
            exam_title = %exam.exam_title,
            questions = exam.questions.len(),
            "Exam generated"
        );
        Ok(exam)
    }

    /// Picks the inline guide or the uploaded file; exactly one must be present.
    async fn resolve_guide_text(
        content: String,
        file: Option<UploadedFile>,
    ) -> Result<String> {
        let text = match (content.is_empty(), file) {
            (true, None) => {
                return Err(Error::InvalidInput(
                    "Either 'exam_guide_content' or 'exam_guide_file' must be provided.".into(),
                ))
            }
            (false, Some(_)) => {
                return Err(Error::InvalidInput(
                    "Provide either 'exam_guide_content' OR 'exam_guide_file', not both.".into(),
                ))
            }
            (false, None) => content,
            (true, Some(file)) => Self::read_upload(file).await?,
        };

        if text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "No content found to generate exam from.".into(),
            ));
        }
        Ok(text)
    }

    async fn read_upload(file: UploadedFile) -> Result<String> {
        let filename = file
            .filename
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                Error::InvalidInput("File must have a filename with extension.".into())
            })?;

        if InputFileType::from_filename(&filename).is_none() {
            return Err(Error::UnsupportedFormat {
                extension: file_extension(&filename).unwrap_or_default(),
                supported: InputFileType::supported_extensions(),
            });
        }

        tracing::info!(filename = %filename, "Reading file");
        let data = file.data;
        tokio::task::spawn_blocking(move || ExtractionService::extract(&data, &filename))
            .await
            .map_err(|e| Error::Internal(format!("extraction task failed: {}", e)))?
    }
}
