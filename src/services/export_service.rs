use crate::error::{Error, Result};
use crate::models::exam::{Exam, QuestionDetails};
use crate::models::file_type::OutputFileType;
use crate::models::schema::MAX_OPTIONS;
use std::fmt::Write;

const SECTION_RULE: &str = "========================================";
const QUESTION_RULE: &str = "----------------------------------------";

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

pub struct ExportService;

impl ExportService {
    /// Renders the exam and its answer key as plain text.
    ///
    /// `doc` output is the same text as `txt` under a Word MIME type; it is not
    /// a binary Word document.
    pub fn render(exam: &Exam, file_type: OutputFileType) -> Result<ExportedFile> {
        let text = Self::render_text(exam)?;

        Ok(ExportedFile {
            filename: Self::filename(&exam.exam_title, file_type),
            content_type: file_type.content_type(),
            body: text.into_bytes(),
        })
    }

    pub fn render_text(exam: &Exam) -> Result<String> {
        let mut out = String::new();
        let types = exam
            .question_types
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ");

        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "Exam Title: {}\nQuestions: {}\nDifficulty: {}\nEstimated Time: {} minutes\nTypes: {}\n",
            exam.exam_title,
            exam.total_questions,
            exam.difficulty,
            exam.estimated_completion_minutes,
            types
        );
        let _ = write!(out, "\n{}\n\n", SECTION_RULE);

        for q in &exam.questions {
            let _ = write!(
                out,
                "Question {} [{} - {}]\n{}\n\n",
                q.id,
                q.question_type(),
                q.difficulty,
                q.question
            );

            match &q.details {
                QuestionDetails::MultipleChoice { options, .. } => {
                    for (i, option) in options.iter().enumerate() {
                        let label = option_label(i).ok_or_else(|| {
                            Error::InvalidInput(format!(
                                "Question {} has {} options; at most {} can be labelled",
                                q.id,
                                options.len(),
                                MAX_OPTIONS
                            ))
                        })?;
                        let _ = writeln!(out, "{}. {}", label, option);
                    }
                }
                QuestionDetails::Essay { guidelines } => {
                    let _ = writeln!(out, "Guidelines: {}", guidelines);
                }
                QuestionDetails::TrueFalse { .. } | QuestionDetails::ShortAnswer { .. } => {}
            }

            let _ = write!(out, "\n{}\n\n", QUESTION_RULE);
        }

        let _ = write!(out, "\nANSWER KEY\n{}\n\n", SECTION_RULE);
        for q in &exam.questions {
            match &q.details {
                QuestionDetails::MultipleChoice { correct_answer, .. }
                | QuestionDetails::TrueFalse { correct_answer, .. } => {
                    let _ = writeln!(out, "Question {}: {}", q.id, correct_answer);
                }
                QuestionDetails::ShortAnswer { sample_answer } => {
                    let _ = writeln!(out, "Question {}: [Sample Answer] {}", q.id, sample_answer);
                }
                QuestionDetails::Essay { .. } => {
                    let _ = writeln!(out, "Question {}: Not Applicable", q.id);
                }
            }
        }

        Ok(out)
    }

    pub fn filename(exam_title: &str, file_type: OutputFileType) -> String {
        let stem: String = exam_title
            .chars()
            .filter(|c| !c.is_control())
            .map(|c| if c == ' ' { '_' } else { c })
            .collect();
        format!("{}.{}", stem, file_type.extension())
    }
}

/// `A` for index 0 through `Z` for index 25.
fn option_label(index: usize) -> Option<char> {
    if index >= MAX_OPTIONS {
        return None;
    }
    char::from_u32('A' as u32 + index as u32)
}
