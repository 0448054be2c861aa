use crate::error::{Error, Result};
use crate::models::file_type::file_extension;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Extensions the extractor knows how to read. `doc` is tried as OOXML.
pub const RECOGNIZED_EXTENSIONS: [&str; 4] = ["txt", "docx", "doc", "pdf"];

/// Encodings tried for plain-text uploads, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Windows1252,
    Latin1,
}

impl TextEncoding {
    pub const ORDER: [TextEncoding; 3] = [
        TextEncoding::Utf8,
        TextEncoding::Windows1252,
        TextEncoding::Latin1,
    ];

    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_string)
            }
            TextEncoding::Windows1252 => {
                // Undefined in CP1252; encoding_rs would map them to C1 controls.
                if bytes
                    .iter()
                    .any(|b| matches!(b, 0x81 | 0x8D | 0x8F | 0x90 | 0x9D))
                {
                    return None;
                }
                encoding_rs::WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|text| text.into_owned())
            }
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

pub struct ExtractionService;

impl ExtractionService {
    /// Converts an uploaded file into plain text, dispatching on its extension.
    pub fn extract(bytes: &[u8], filename: &str) -> Result<String> {
        let extension = file_extension(filename).unwrap_or_default();
        tracing::info!(filename, extension = %extension, size = bytes.len(), "Extracting text from file");

        match extension.as_str() {
            "txt" => Self::read_txt(bytes),
            "docx" => Self::read_docx(bytes),
            "doc" => Self::read_docx(bytes).map_err(|e| match e {
                Error::CorruptFile(_) => Error::CorruptFile(
                    "legacy binary .doc files are not supported; save the guide as .docx".into(),
                ),
                other => other,
            }),
            "pdf" => Self::read_pdf(bytes),
            _ => Err(Error::UnsupportedFormat {
                extension,
                supported: RECOGNIZED_EXTENSIONS.to_vec(),
            }),
        }
    }

    pub fn read_txt(bytes: &[u8]) -> Result<String> {
        for encoding in TextEncoding::ORDER {
            if let Some(text) = encoding.decode(bytes) {
                if !text.trim().is_empty() {
                    tracing::debug!(?encoding, "Decoded text file");
                    return Ok(text);
                }
            }
        }
        Err(Error::DecodeError(
            "no supported encoding produced readable text".into(),
        ))
    }

    pub fn read_docx(bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| Error::CorruptFile(format!("not a valid DOCX archive: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| Error::CorruptFile(format!("DOCX is missing its document part: {}", e)))?
            .read_to_string(&mut xml)
            .map_err(|e| Error::CorruptFile(format!("failed to read DOCX document part: {}", e)))?;

        let paragraphs = docx_paragraphs(&xml)?;
        let text = paragraphs.join("\n");

        if text.trim().is_empty() {
            return Err(Error::EmptyContent("no text content found in DOCX file".into()));
        }
        Ok(text)
    }

    pub fn read_pdf(bytes: &[u8]) -> Result<String> {
        // pdf-extract can panic on malformed input instead of returning an error.
        let pages = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| Error::CorruptFile("PDF parser aborted on malformed input".into()))?
        .map_err(|e| Error::CorruptFile(format!("failed to process PDF file: {}", e)))?;

        let page_count = pages.len();
        let text = join_pages(pages);

        if text.is_empty() {
            return Err(Error::EmptyContent(
                "no text content found in PDF; the file might be image-based or encrypted".into(),
            ));
        }

        tracing::debug!(page_count, "Extracted PDF text");
        Ok(text)
    }
}

/// Trims each page, drops empty ones and joins the rest with newlines.
fn join_pages(pages: Vec<String>) -> String {
    pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of every `w:p` in document order.
///
/// Paragraphs nest inside text boxes (`w:txbxContent`). Each open paragraph
/// owns a slot in `paragraphs`, reserved when it starts, and text goes to the
/// innermost one, so the outer paragraph keeps the text around the box.
fn docx_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                }
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" => push_str(&mut paragraphs, &open, "\t"),
                b"w:br" | b"w:cr" => push_str(&mut paragraphs, &open, "\n"),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| Error::CorruptFile(format!("invalid DOCX text: {}", e)))?;
                push_str(&mut paragraphs, &open, &text);
            }
            Ok(Event::CData(t)) if in_text_run => {
                let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                push_str(&mut paragraphs, &open, &text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    open.pop();
                }
                b"w:t" => in_text_run = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::CorruptFile(format!(
                    "malformed DOCX XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(paragraphs)
}

/// Appends to the innermost open paragraph; text outside any paragraph is dropped.
fn push_str(paragraphs: &mut [String], open: &[usize], s: &str) {
    if let Some(&idx) = open.last() {
        paragraphs[idx].push_str(s);
    }
}
