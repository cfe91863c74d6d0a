//! Text Extractor: turns a `Document` into one text string.
//!
//! Pure mechanical conversion. Whitespace-only output is still a success here;
//! the pipeline decides whether the text is usable.

use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::grading::error::GradeError;
use crate::grading::models::{Document, DocumentFormat};

const WORD_BODY_PART: &str = "word/document.xml";

/// Extracts text from `doc` according to its declared format.
pub fn extract_text(doc: &Document) -> Result<String, GradeError> {
    let text = match doc.format {
        DocumentFormat::Pdf => extract_pdf(&doc.bytes)?,
        DocumentFormat::PlainText => extract_plain_text(&doc.bytes)?,
        DocumentFormat::WordDocument => extract_word(&doc.bytes)?,
    };
    debug!(
        format = doc.format.as_str(),
        bytes = doc.bytes.len(),
        chars = text.len(),
        "text extracted"
    );
    Ok(text)
}

/// One newline after every page, the last included.
fn extract_pdf(bytes: &[u8]) -> Result<String, GradeError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| GradeError::Extraction("PDF parser aborted on malformed input".to_string()))?
    .map_err(|e| GradeError::Extraction(format!("invalid PDF: {e}")))?;

    let mut text = String::new();
    for page in pages {
        text.push_str(&page);
        text.push('\n');
    }
    Ok(text)
}

fn extract_plain_text(bytes: &[u8]) -> Result<String, GradeError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| GradeError::Extraction(format!("file is not valid UTF-8 text: {e}")))
}

/// Reads the OOXML body part and emits one line per paragraph.
fn extract_word(bytes: &[u8]) -> Result<String, GradeError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        GradeError::Extraction(format!(
            "not a readable word-processor document (legacy binary .doc is not supported): {e}"
        ))
    })?;

    let mut xml = String::new();
    archive
        .by_name(WORD_BODY_PART)
        .map_err(|e| GradeError::Extraction(format!("missing {WORD_BODY_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| GradeError::Extraction(format!("unreadable {WORD_BODY_PART}: {e}")))?;

    paragraphs_from_xml(&xml)
}

fn paragraphs_from_xml(xml: &str) -> Result<String, GradeError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| GradeError::Extraction(format!("malformed document XML: {e}")))?;
        match event {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| GradeError::Extraction(format!("bad XML text: {e}")))?;
                text.push_str(&unescaped);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
