//! Plain-text extraction from uploaded resume files (PDF, DOCX, plain text).
//!
//! Extraction is synchronous and CPU-bound; handlers run it on the blocking pool.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}. Please upload a PDF, DOCX or TXT file.")]
    UnsupportedType(String),

    #[error("Failed to read file: {0}")]
    Failed(String),

    #[error("Could not extract text from the file.")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Text,
}

impl FileKind {
    /// Classifies a declared content type. Parameters such as `charset` are ignored.
    pub fn from_content_type(content_type: &str) -> Result<Self, ExtractionError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            MIME_PDF => Ok(FileKind::Pdf),
            MIME_DOCX => Ok(FileKind::Docx),
            MIME_TEXT => Ok(FileKind::Text),
            _ => Err(ExtractionError::UnsupportedType(content_type.to_string())),
        }
    }
}

/// Extracts text from `data` according to its declared content type.
/// Fails with `Empty` when nothing but whitespace comes out.
pub fn extract_text(content_type: &str, data: &[u8]) -> Result<String, ExtractionError> {
    let kind = FileKind::from_content_type(content_type)?;
    let text = match kind {
        FileKind::Pdf => extract_pdf_text(data)?,
        FileKind::Docx => extract_docx_text(data)?,
        FileKind::Text => String::from_utf8_lossy(data).into_owned(),
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }
    debug!(?kind, chars = text.len(), "Extracted upload text");
    Ok(text)
}

fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs.
    std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data))
        .map_err(|_| ExtractionError::Failed("malformed PDF".to_string()))?
        .map_err(|e| ExtractionError::Failed(e.to_string()))
}

fn extract_docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(failed)?;
    let mut document = archive
        .by_name("word/document.xml")
        .map_err(failed)?;
    let mut xml = String::new();
    document.read_to_string(&mut xml).map_err(failed)?;

    let mut reader = Reader::from_str(&xml);
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => {
                text.push_str(&e.xml_content().map_err(failed)?);
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(ch) = e.resolve_char_ref().map_err(failed)? {
                    text.push(ch);
                } else {
                    let name = e.decode().map_err(failed)?;
                    text.push_str(match name.as_ref() {
                        "amp" => "&",
                        "lt" => "<",
                        "gt" => ">",
                        "quot" => "\"",
                        "apos" => "'",
                        _ => "",
                    });
                }
            }
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Eof) => break,
            Err(e) => return Err(failed(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

fn failed(err: impl std::fmt::Display) -> ExtractionError {
    ExtractionError::Failed(err.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn docx_with_body(body: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            let xml = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
            );
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_text("text/plain; charset=utf-8", b"Jane Doe\nEngineer").unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let err = extract_text("application/zip", b"PK").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(t) if t == "application/zip"));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let err = extract_text(MIME_TEXT, b"  \n\t ").unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
        assert_eq!(err.to_string(), "Could not extract text from the file.");
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let data = docx_with_body(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
             <w:p><w:r><w:t>R&amp;D</w:t><w:tab/><w:t xml:space=\"preserve\"> Lead</w:t></w:r></w:p>",
        );
        let text = extract_text(MIME_DOCX, &data).unwrap();
        assert_eq!(text, "Jane Doe\nR&D\t Lead\n");
    }

    #[test]
    fn test_corrupt_docx_fails() {
        let err = extract_text(MIME_DOCX, b"not a zip archive").unwrap_err();
        assert!(matches!(err, ExtractionError::Failed(_)));
    }
}
