use thiserror::Error;

/// Failures the grading pipeline can report. Detection and scoring never fail;
/// every variant here originates at the extraction boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    #[error("Unsupported file format '{0}'. Please upload a PDF, TXT, DOC or DOCX file")]
    UnsupportedFormat(String),

    #[error("Could not extract text: {0}")]
    Extraction(String),

    #[error("Could not extract readable text from this file. Please ensure it contains selectable text")]
    EmptyContent,
}
