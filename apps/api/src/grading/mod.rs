// Resume grading engine: text extraction, field/section detection, scoring.
// Synchronous and free of shared mutable state; HTTP handlers run it inside
// tokio::task::spawn_blocking.

pub mod detector;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod scorer;
pub mod vocabulary;

// Re-export the public API consumed by the router and handlers.
pub use error::GradeError;
pub use models::{Document, DocumentFormat, RoleHint, ScoreReport};
pub use pipeline::{grade_document, grade_text};
pub use scorer::{ResumeScorer, WeightedScorer};
