use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Unsupported file type '{extension}'. Supported: {}", .supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<&'static str>,
    },

    #[error("Could not decode text file: {0}")]
    DecodeError(String),

    #[error("No text content found: {0}")]
    EmptyContent(String),

    #[error("Corrupt file: {0}")]
    CorruptFile(String),

    #[error("Error generating exam: {0}")]
    GenerationFailed(String),

    #[error("AI service returned an empty or unparseable response")]
    EmptyGeneration,

    #[error("Generated exam does not match the schema: {0}")]
    SchemaMismatch(String),

    #[error("Invalid file type: {0}")]
    UnsupportedOutputFormat(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_)
            | Error::UnsupportedFormat { .. }
            | Error::UnsupportedOutputFormat(_)
            | Error::Validation(_)
            | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error_message = match &self {
            Error::Config(_) | Error::Internal(_) => {
                tracing::error!(error = %self, "Unexpected error while processing request");
                "An unexpected error occurred while processing the request".to_string()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(error = %other, "Request failed");
                }
                other.to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_bad_request() {
        assert_eq!(
            Error::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::UnsupportedOutputFormat("pdf".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn backend_errors_map_to_server_error() {
        assert_eq!(
            Error::EmptyGeneration.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::CorruptFile("bad xref".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unsupported_format_lists_extensions() {
        let err = Error::UnsupportedFormat {
            extension: "xyz".into(),
            supported: vec!["docx", "pdf", "txt"],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported file type 'xyz'. Supported: docx, pdf, txt"
        );
    }
}
