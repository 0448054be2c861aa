use crate::error::Error;
use std::str::FromStr;

/// Upload formats accepted by the generate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFileType {
    Docx,
    Pdf,
    Txt,
}

impl InputFileType {
    pub const ALL: [InputFileType; 3] = [InputFileType::Docx, InputFileType::Pdf, InputFileType::Txt];

    pub fn extension(&self) -> &'static str {
        match self {
            InputFileType::Docx => "docx",
            InputFileType::Pdf => "pdf",
            InputFileType::Txt => "txt",
        }
    }

    pub fn supported_extensions() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.extension()).collect()
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = file_extension(filename)?;
        Self::ALL.into_iter().find(|t| t.extension() == ext)
    }
}

/// Export formats. `Doc` is the same plain text under a Word MIME label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFileType {
    Doc,
    Txt,
}

impl OutputFileType {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFileType::Doc => "doc",
            OutputFileType::Txt => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFileType::Doc => "application/msword",
            OutputFileType::Txt => "text/plain",
        }
    }
}

impl FromStr for OutputFileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doc" => Ok(OutputFileType::Doc),
            "txt" => Ok(OutputFileType::Txt),
            other => Err(Error::UnsupportedOutputFormat(format!(
                "'{}' (expected doc or txt)",
                other
            ))),
        }
    }
}

/// Lowercased text after the last `.`, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(InputFileType::from_filename("Guide.PDF"), Some(InputFileType::Pdf));
        assert_eq!(InputFileType::from_filename("notes.final.Docx"), Some(InputFileType::Docx));
        assert_eq!(InputFileType::from_filename("notes.xyz"), None);
        assert_eq!(InputFileType::from_filename("README"), None);
    }

    #[test]
    fn legacy_doc_is_not_an_accepted_upload() {
        assert_eq!(InputFileType::from_filename("old.doc"), None);
    }

    #[test]
    fn output_type_parses_known_formats_only() {
        assert_eq!("doc".parse::<OutputFileType>().unwrap(), OutputFileType::Doc);
        assert_eq!("txt".parse::<OutputFileType>().unwrap().content_type(), "text/plain");
        assert!(matches!(
            "pdf".parse::<OutputFileType>(),
            Err(Error::UnsupportedOutputFormat(_))
        ));
    }
}
