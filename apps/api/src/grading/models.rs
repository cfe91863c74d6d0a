use std::collections::BTreeSet;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::grading::error::GradeError;

/// Document formats accepted by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    PlainText,
    WordDocument,
}

impl DocumentFormat {
    /// Maps a file extension (without the dot) onto a supported format.
    pub fn from_extension(ext: &str) -> Result<Self, GradeError> {
        match ext.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::PlainText),
            "doc" | "docx" => Ok(Self::WordDocument),
            other => Err(GradeError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Infers the format from the extension of an uploaded file name.
    pub fn from_filename(filename: &str) -> Result<Self, GradeError> {
        match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Self::from_extension(ext),
            _ => Err(GradeError::UnsupportedFormat(filename.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::PlainText => "plain_text",
            Self::WordDocument => "word_document",
        }
    }
}

/// Raw upload plus its declared format. Lives for a single grading request.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Bytes,
    pub format: DocumentFormat,
}

impl Document {
    pub fn new(bytes: impl Into<Bytes>, format: DocumentFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }
}

/// Role hint selecting the skill and keyword vocabularies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleHint {
    Developer,
    DataScientist,
    Designer,
    Manager,
    #[default]
    General,
}

impl RoleHint {
    #[cfg(test)]
    pub const ALL: [RoleHint; 5] = [
        RoleHint::Developer,
        RoleHint::DataScientist,
        RoleHint::Designer,
        RoleHint::Manager,
        RoleHint::General,
    ];

    /// Lenient parse: unknown or missing values fall back to `General`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::General;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "developer" => Self::Developer,
            "data_scientist" | "data-scientist" => Self::DataScientist,
            "designer" => Self::Designer,
            "manager" => Self::Manager,
            _ => Self::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::DataScientist => "data_scientist",
            Self::Designer => "designer",
            Self::Manager => "manager",
            Self::General => "general",
        }
    }
}

/// Contact fields found in the resume. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// First email address in the text.
    pub email: Option<String>,
    /// Normalized phone numbers (digit groups joined by `-`).
    pub phones: Vec<String>,
    /// `linkedin.com/in/<handle>` fragments, lower-cased.
    pub linkedin: Vec<String>,
    /// `github.com/<handle>` fragments, lower-cased.
    pub github: Vec<String>,
}

impl ContactInfo {
    pub fn has_phone(&self) -> bool {
        !self.phones.is_empty()
    }

    pub fn has_linkedin(&self) -> bool {
        !self.linkedin.is_empty()
    }

    pub fn has_github(&self) -> bool {
        !self.github.is_empty()
    }
}

/// Resume section labels recognised by keyword presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Awards,
}

pub type SectionSet = BTreeSet<Section>;

/// Everything the detector pulls out of the extracted text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub contact_info: ContactInfo,
    pub sections: SectionSet,
    pub skills: Vec<String>,
    pub experience_years: u32,
    /// Lines around education triggers, first-seen order.
    pub education: Vec<String>,
    /// Lines around experience triggers, first-seen order.
    pub experience: Vec<String>,
    pub word_count: usize,
}

/// Per-category sub-scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScores {
    pub contact_info: u32,
    pub education: u32,
    pub experience: u32,
    pub skills: u32,
    pub formatting: u32,
    pub keywords: u32,
}

/// Final grading output. Field names are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total_score: u32,
    pub section_scores: SectionScores,
    pub feedback: Vec<String>,
    pub suggestions: Vec<String>,
    pub role_type: RoleHint,
    pub scoring_mode: String,
    pub parsed_data: ParsedResume,
}
