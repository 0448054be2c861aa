use crate::{
    dto::exam_dto::{DownloadQuery, GenerateExamRequest, UploadedFile},
    error::{Error, Result},
    models::{
        exam::{Difficulty, Exam, QuestionType},
        file_type::OutputFileType,
    },
    services::export_service::ExportService,
    AppState,
};
use axum::{
    body::Body,
    extract::{Multipart, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::io::Cursor;
use tokio_util::io::ReaderStream;

#[axum::debug_handler]
pub async fn generate_exam(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Exam>> {
    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, "Exam generation request received");

    let mut num_questions = None;
    let mut difficulty = None;
    let mut question_types = None;
    let mut exam_guide_content = String::new();
    let mut additional_info = String::new();
    let mut exam_guide_file = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!(%request_id, "Failed to get next field: {}", e);
        Error::Multipart(e)
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "num_questions" => num_questions = Some(field.text().await?),
            "difficulty" => difficulty = Some(field.text().await?),
            "question_types" => question_types = Some(field.text().await?),
            "exam_guide_content" => exam_guide_content = field.text().await?,
            "additional_info" => additional_info = field.text().await?,
            "exam_guide_file" => {
                let filename = field.file_name().map(str::to_string);
                let data = field.bytes().await?;
                let unnamed = filename.as_deref().map_or(true, |n| n.trim().is_empty());
                if !(unnamed && data.is_empty()) {
                    exam_guide_file = Some(UploadedFile { filename, data });
                }
            }
            _ => {}
        }
    }

    let payload = GenerateExamRequest {
        num_questions: parse_num_questions(&required("num_questions", num_questions)?)?,
        difficulty: required("difficulty", difficulty)?.parse::<Difficulty>()?,
        question_types: parse_question_types(&required("question_types", question_types)?)?,
        exam_guide_content,
        additional_info,
        exam_guide_file,
    };

    let exam = state.exam_service.generate_exam(payload).await.map_err(|e| {
        tracing::warn!(%request_id, error = %e, "Exam generation failed");
        e
    })?;
    Ok(Json(exam))
}

#[axum::debug_handler]
pub async fn download_exam(
    Query(query): Query<DownloadQuery>,
    Json(exam): Json<Exam>,
) -> Result<Response> {
    let file_type: OutputFileType = query.file_type.parse()?;
    let file = ExportService::render(&exam, file_type)?;

    let disposition = HeaderValue::from_bytes(
        format!("attachment; filename={}", file.filename).as_bytes(),
    )
    .map_err(|e| Error::Internal(format!("Invalid download filename: {}", e)))?;

    tracing::info!(filename = %file.filename, bytes = file.body.len(), "Streaming exam export");
    let stream = ReaderStream::new(Cursor::new(file.body));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(file.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::InvalidInput(format!("Missing form field '{}'", name)))
}

fn parse_num_questions(raw: &str) -> Result<u32> {
    raw.trim().parse().map_err(|_| {
        Error::InvalidInput(format!(
            "num_questions must be a positive integer, got '{}'",
            raw
        ))
    })
}

fn parse_question_types(raw: &str) -> Result<Vec<QuestionType>> {
    let labels: Vec<String> = serde_json::from_str(raw).map_err(|e| {
        Error::InvalidInput(format!(
            "question_types must be a JSON array of strings: {}",
            e
        ))
    })?;
    labels.iter().map(|label| label.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_types_are_parsed_from_json_labels() {
        let types = parse_question_types(r#"["Multiple Choice", "Essay"]"#).unwrap();
        assert_eq!(types, vec![QuestionType::MultipleChoice, QuestionType::Essay]);
    }

    #[test]
    fn malformed_question_types_are_invalid_input() {
        assert!(matches!(
            parse_question_types("Multiple Choice"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            parse_question_types(r#"["Crossword"]"#),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn num_questions_must_be_an_unsigned_integer() {
        assert_eq!(parse_num_questions(" 12 ").unwrap(), 12);
        assert!(parse_num_questions("-3").is_err());
        assert!(parse_num_questions("ten").is_err());
    }
}
