//! Extract → detect → score, with the empty-text check between extraction and scoring.

use tracing::debug;

use crate::grading::error::GradeError;
use crate::grading::extractor::extract_text;
use crate::grading::models::{Document, RoleHint, ScoreReport};
use crate::grading::scorer::ResumeScorer;

/// Grades an uploaded document end to end.
pub fn grade_document(
    doc: &Document,
    role: RoleHint,
    scorer: &dyn ResumeScorer,
) -> Result<ScoreReport, GradeError> {
    let text = extract_text(doc)?;
    grade_text(&text, role, scorer)
}

/// Grades text that has already been extracted. Whitespace-only text is rejected.
pub fn grade_text(
    text: &str,
    role: RoleHint,
    scorer: &dyn ResumeScorer,
) -> Result<ScoreReport, GradeError> {
    if text.trim().is_empty() {
        return Err(GradeError::EmptyContent);
    }
    let report = scorer.score(text, role);
    debug!(
        role = role.as_str(),
        total_score = report.total_score,
        mode = scorer.mode(),
        "resume graded"
    );
    Ok(report)
}
