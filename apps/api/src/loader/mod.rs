//! Document Loader — turns an uploaded resume file into plain-text segments.
//!
//! Dispatch is by file extension only (`.pdf`, `.docx`, `.txt`); anything
//! else is an explicit unsupported-file-type error, no retry. The upload is
//! buffered through a scoped temp file so the decoders can work from a real
//! path; the file is removed when the guard drops, on every exit path
//! including decode failures.

use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

mod docx;

/// Longest extracted-text preview returned to the client, in characters.
pub const PREVIEW_MAX_CHARS: usize = 4000;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    #[error("Could not buffer the upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("TXT extraction failed: {0}")]
    Txt(String),

    #[error("No text could be extracted from the document")]
    Empty,
}

/// An uploaded resume file: raw bytes plus the client-supplied file name.
/// Ephemeral — lives for the duration of one request.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// One page (PDF) or chunk (DOCX/TXT) of extracted text. Segments are
/// ordered; callers concatenate them with a blank line between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, LoaderError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            _ => Err(LoaderError::Unsupported(file_name.to_string())),
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Txt => ".txt",
        }
    }
}

/// Extracts the text segments of an uploaded resume.
///
/// Whitespace-only segments are dropped; a document with no remaining text
/// is an error rather than an empty sequence.
pub fn load_resume(upload: &ResumeUpload) -> Result<Vec<TextSegment>, LoaderError> {
    let kind = DocumentKind::from_file_name(&upload.file_name)?;

    let mut spool = tempfile::Builder::new()
        .prefix("cvision-upload-")
        .suffix(kind.suffix())
        .tempfile()?;
    spool.write_all(&upload.bytes)?;
    spool.flush()?;

    let chunks = match kind {
        DocumentKind::Pdf => pdf_segments(spool.path())?,
        DocumentKind::Docx => vec![docx::extract_docx_text(spool.path())?],
        DocumentKind::Txt => vec![read_txt(spool.path())?],
    };

    let segments: Vec<TextSegment> = chunks
        .into_iter()
        .filter(|content| !content.trim().is_empty())
        .map(|content| TextSegment { content })
        .collect();

    if segments.is_empty() {
        return Err(LoaderError::Empty);
    }

    debug!(
        "Loaded {} as {:?}: {} segment(s)",
        upload.file_name,
        kind,
        segments.len()
    );
    Ok(segments)
}

fn pdf_segments(path: &Path) -> Result<Vec<String>, LoaderError> {
    let text = pdf_extract::extract_text(path).map_err(|e| LoaderError::Pdf(e.to_string()))?;
    Ok(split_form_feeds(&text))
}

/// pdf-extract separates pages with a form feed (0x0C); absent those, the
/// whole document is one chunk. Blank pages are dropped later along with
/// every other whitespace-only chunk.
fn split_form_feeds(text: &str) -> Vec<String> {
    text.split('\x0C').map(str::to_string).collect()
}

/// Plain text is read as-is. A decode failure is the uploader's file being
/// broken, not an I/O fault.
fn read_txt(path: &Path) -> Result<String, LoaderError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => LoaderError::Txt("file is not valid UTF-8".to_string()),
        _ => LoaderError::Io(e),
    })
}

/// Joins segments into the full resume text, pages separated by a blank line.
pub fn combined_text(segments: &[TextSegment]) -> String {
    segments
        .iter()
        .map(|s| s.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The extracted-text preview shown to the user: the combined text truncated
/// to [`PREVIEW_MAX_CHARS`] characters, never splitting a character.
pub fn preview_text(segments: &[TextSegment]) -> String {
    truncate_chars(&combined_text(segments), PREVIEW_MAX_CHARS)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
