//! Pluggable, trait-based grader that turns detector output into a `ScoreReport`.
//!
//! Default (and only) backend: `WeightedScorer`. Each category is scored 0–100
//! independently, then combined with `CATEGORY_WEIGHTS` (which sum to 100).
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>`.

use serde::{Deserialize, Serialize};

use crate::grading::detector::parse_resume;
use crate::grading::models::{ContactInfo, ParsedResume, RoleHint, ScoreReport, SectionScores};
use crate::grading::vocabulary::{
    general_keywords, is_technical, role_keywords, ACTION_VERBS, BULLET_MARKERS,
    COMMON_SECTION_HEADERS, DEGREE_KEYWORDS,
};

// ────────────────────────────────────────────────────────────────────────────
// Categories and weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ContactInfo,
    Education,
    Experience,
    Skills,
    Formatting,
    Keywords,
}

/// Category weights in processing order. Sum is 100.
pub const CATEGORY_WEIGHTS: &[(Category, u32)] = &[
    (Category::ContactInfo, 15),
    (Category::Education, 20),
    (Category::Experience, 25),
    (Category::Skills, 20),
    (Category::Formatting, 10),
    (Category::Keywords, 10),
];

impl SectionScores {
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::ContactInfo => self.contact_info,
            Category::Education => self.education,
            Category::Experience => self.experience,
            Category::Skills => self.skills,
            Category::Formatting => self.formatting,
            Category::Keywords => self.keywords,
        }
    }
}

const MAX_SCORE: i32 = 100;

/// Below this total the low-score suggestions are attached.
pub const SUGGESTION_SCORE_THRESHOLD: u32 = 70;
/// Below this many matched skills the skill suggestion is attached.
pub const SUGGESTION_SKILL_FLOOR: usize = 5;

const MIN_WORDS: usize = 200;
const MAX_WORDS: usize = 1200;
const MIN_SECTION_HEADERS: usize = 3;
const FORMATTED_LINE_RATIO: f64 = 0.7;
const KEYWORD_THRESHOLD: i32 = 40;

const LOW_SCORE_SUGGESTIONS: &[&str] = &[
    "Tailor your resume to the job description by mirroring its key terms",
    "Open with a short professional summary that highlights your strongest results",
    "Quantify accomplishments wherever possible (percentages, revenue, team size)",
];

const FEW_SKILLS_SUGGESTION: &str =
    "List at least 5 relevant skills, mixing technical tools with soft skills";

/// One category's result: clamped sub-score plus the feedback it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryResult {
    pub score: u32,
    pub feedback: Vec<String>,
}

impl CategoryResult {
    fn new(raw: i32, feedback: Vec<String>) -> Self {
        Self {
            score: raw.clamp(0, MAX_SCORE) as u32,
            feedback,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Grades extracted resume text. Implementations must be pure: the same text
/// and role always give the same report.
pub trait ResumeScorer: Send + Sync {
    fn score(&self, text: &str, role: RoleHint) -> ScoreReport;

    /// Name of the combination strategy, echoed in the report.
    fn mode(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedScorer
// ────────────────────────────────────────────────────────────────────────────

/// Weighted-percentage scorer.
///
/// total = round(Σ sub_score × weight / 100), clamped to 0..=100.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScorer;

impl ResumeScorer for WeightedScorer {
    fn score(&self, text: &str, role: RoleHint) -> ScoreReport {
        let parsed = parse_resume(text, role);
        self.score_parsed(text, parsed, role)
    }

    fn mode(&self) -> &'static str {
        "weighted"
    }
}

impl WeightedScorer {
    /// Scores already-detected fields. `text` is the same text `parsed` came from.
    pub fn score_parsed(&self, text: &str, parsed: ParsedResume, role: RoleHint) -> ScoreReport {
        let contact = score_contact_info(&parsed.contact_info);
        let education = score_education(&parsed.education);
        let experience = score_experience(&parsed.experience);
        let skills = score_skills(&parsed.skills);
        let formatting = score_formatting(text);
        let keywords = score_keywords(text, role);

        let section_scores = SectionScores {
            contact_info: contact.score,
            education: education.score,
            experience: experience.score,
            skills: skills.score,
            formatting: formatting.score,
            keywords: keywords.score,
        };
        let total_score = weighted_total(&section_scores);

        let feedback: Vec<String> = [contact, education, experience, skills, formatting, keywords]
            .into_iter()
            .flat_map(|c| c.feedback)
            .collect();
        let suggestions = build_suggestions(total_score, parsed.skills.len());

        ScoreReport {
            total_score,
            section_scores,
            feedback,
            suggestions,
            role_type: role,
            scoring_mode: self.mode().to_string(),
            parsed_data: parsed,
        }
    }
}

/// Σ(score × weight) / 100, rounded half up.
pub fn weighted_total(scores: &SectionScores) -> u32 {
    let weighted: u32 = CATEGORY_WEIGHTS
        .iter()
        .map(|(category, weight)| scores.get(*category) * weight)
        .sum();
    ((weighted + 50) / 100).min(MAX_SCORE as u32)
}

fn build_suggestions(total_score: u32, skill_count: usize) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();
    if total_score < SUGGESTION_SCORE_THRESHOLD {
        suggestions.extend(LOW_SCORE_SUGGESTIONS.iter().map(|s| s.to_string()));
    }
    if skill_count < SUGGESTION_SKILL_FLOOR {
        suggestions.push(FEW_SKILLS_SUGGESTION.to_string());
    }
    suggestions
}

// ────────────────────────────────────────────────────────────────────────────
// Category scorers
// ────────────────────────────────────────────────────────────────────────────

pub fn score_contact_info(info: &ContactInfo) -> CategoryResult {
    let mut score = 0;
    let mut feedback = Vec::new();

    if info.email.is_some() {
        score += 40;
    } else {
        feedback.push("Add a professional email address".to_string());
    }
    if info.has_phone() {
        score += 30;
    } else {
        feedback.push("Include a phone number".to_string());
    }
    if info.has_linkedin() {
        score += 20;
    } else {
        feedback.push("Add your LinkedIn profile URL".to_string());
    }
    if info.has_github() {
        score += 10;
    } else {
        feedback.push(
            "Consider adding your GitHub profile (especially for technical roles)".to_string(),
        );
    }

    CategoryResult::new(score, feedback)
}

pub fn score_education(lines: &[String]) -> CategoryResult {
    if lines.is_empty() {
        return CategoryResult::new(
            0,
            vec!["Add education section with your degree and institution".to_string()],
        );
    }

    let mut score = 70;
    let mut feedback = Vec::new();
    let joined = lines.join(" ").to_lowercase();
    if DEGREE_KEYWORDS.iter().any(|k| joined.contains(k)) {
        score += 30;
    } else {
        feedback.push("Clearly specify your degree type (Bachelor's, Master's, etc.)".to_string());
    }

    CategoryResult::new(score, feedback)
}

pub fn score_experience(lines: &[String]) -> CategoryResult {
    if lines.is_empty() {
        return CategoryResult::new(
            0,
            vec!["Add work experience section with your roles and achievements".to_string()],
        );
    }

    let mut score = 50;
    let mut feedback = Vec::new();
    let joined = lines.join(" ");

    // Any number, with or without a trailing % or $, counts as quantified.
    if joined.chars().any(|c| c.is_ascii_digit()) {
        score += 30;
    } else {
        feedback.push(
            "Quantify your achievements with numbers (e.g., '20% increase in sales', 'managed team of 5')"
                .to_string(),
        );
    }

    let lower = joined.to_lowercase();
    if ACTION_VERBS.iter().any(|verb| lower.contains(verb)) {
        score += 20;
    } else {
        feedback.push("Use strong action verbs to describe your accomplishments".to_string());
    }

    CategoryResult::new(score, feedback)
}

pub fn score_skills(skills: &[String]) -> CategoryResult {
    if skills.is_empty() {
        return CategoryResult::new(
            0,
            vec!["Add a skills section with relevant technical and soft skills".to_string()],
        );
    }

    let mut score = 40;
    let mut feedback = Vec::new();
    match skills.len() {
        n if n >= 8 => score += 40,
        n if n >= 5 => score += 30,
        n if n >= 3 => score += 20,
        _ => feedback.push("Add more relevant skills (aim for 8+ skills)".to_string()),
    }
    if skills.iter().any(|s| is_technical(s)) {
        score += 20;
    }

    CategoryResult::new(score, feedback)
}

/// Base 60; length band ±, header count, bullets and line ratio adjust from there.
pub fn score_formatting(text: &str) -> CategoryResult {
    let mut score = 60;
    let mut feedback = Vec::new();
    let lower = text.to_lowercase();

    let word_count = text.split_whitespace().count();
    if word_count < MIN_WORDS {
        score -= 30;
        feedback.push("Resume seems too short - aim for 400-800 words".to_string());
    } else if word_count > MAX_WORDS {
        score -= 15;
        feedback.push("Resume might be too long - consider condensing to 1-2 pages".to_string());
    } else {
        score += 10;
    }

    let headers = COMMON_SECTION_HEADERS
        .iter()
        .filter(|h| lower.contains(*h))
        .count();
    if headers < MIN_SECTION_HEADERS {
        score -= 40;
        feedback.push("Include clear section headers (Experience, Education, Skills, etc.)".to_string());
    }

    if text.contains(BULLET_MARKERS) {
        score += 10;
    } else {
        feedback.push("Use bullet points to organize information clearly".to_string());
    }

    if formatted_line_ratio(text) > FORMATTED_LINE_RATIO {
        score += 20;
    } else {
        feedback.push(
            "Start each line with a capital letter or a bullet point for a cleaner layout"
                .to_string(),
        );
    }

    CategoryResult::new(score, feedback)
}

/// Share of non-empty lines starting with an uppercase letter or a bullet marker.
pub fn formatted_line_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut formatted = 0usize;
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        total += 1;
        if line
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || BULLET_MARKERS.contains(&c))
        {
            formatted += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    formatted as f64 / total as f64
}

/// General hits ×4 (max 60) plus role hits ×8 (max 40).
pub fn score_keywords(text: &str, role: RoleHint) -> CategoryResult {
    let lower = text.to_lowercase();

    let general_hits = general_keywords().filter(|k| lower.contains(k)).count() as i32;
    let role_hits = role_keywords(role)
        .iter()
        .filter(|k| lower.contains(*k))
        .count() as i32;

    let score = (general_hits * 4).min(60) + (role_hits * 8).min(40);

    let mut feedback = Vec::new();
    if score < KEYWORD_THRESHOLD {
        feedback.push(format!(
            "Include more relevant keywords for {} roles",
            role.as_str()
        ));
    }

    CategoryResult::new(score, feedback)
}
