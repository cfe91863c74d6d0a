//! Static keyword tables. Built once per process and never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::grading::models::{RoleHint, Section};

pub const TECHNICAL: &[&str] = &[
    "python",
    "java",
    "javascript",
    "react",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "api",
    "machine learning",
    "data science",
    "artificial intelligence",
    "html",
    "css",
    "node.js",
    "mongodb",
    "postgresql",
    "redis",
    "elasticsearch",
];

pub const MANAGEMENT: &[&str] = &[
    "leadership",
    "management",
    "team",
    "project",
    "strategy",
    "planning",
    "budget",
    "stakeholder",
    "agile",
    "scrum",
    "coordination",
    "delegation",
];

pub const COMMUNICATION: &[&str] = &[
    "communication",
    "presentation",
    "writing",
    "collaboration",
    "interpersonal",
    "public speaking",
    "negotiation",
    "client relations",
];

pub const ANALYTICAL: &[&str] = &[
    "analysis",
    "research",
    "problem solving",
    "critical thinking",
    "data analysis",
    "statistics",
    "optimization",
    "troubleshooting",
];

/// Keyword categories in processing order; together they form the general list.
pub const KEYWORD_CATEGORIES: &[(&str, &[&str])] = &[
    ("technical", TECHNICAL),
    ("management", MANAGEMENT),
    ("communication", COMMUNICATION),
    ("analytical", ANALYTICAL),
];

const DEVELOPER_KEYWORDS: &[&str] = &[
    "programming",
    "coding",
    "software",
    "development",
    "framework",
    "database",
    "testing",
    "debugging",
    "version control",
    "ci/cd",
    "microservices",
    "rest api",
];

const DATA_SCIENTIST_KEYWORDS: &[&str] = &[
    "statistics",
    "machine learning",
    "data mining",
    "visualization",
    "python",
    "r",
    "sql",
    "modeling",
    "pandas",
    "numpy",
    "scikit-learn",
    "tensorflow",
    "pytorch",
];

const DESIGNER_KEYWORDS: &[&str] = &[
    "design",
    "ui/ux",
    "photoshop",
    "illustrator",
    "figma",
    "prototyping",
    "user experience",
    "visual",
    "wireframing",
    "user research",
    "design systems",
];

const MANAGER_KEYWORDS: &[&str] = &[
    "management",
    "leadership",
    "strategy",
    "team building",
    "project management",
    "budget",
    "operations",
    "kpi",
    "performance",
    "mentoring",
];

/// Role-relevance keywords. `General` has none.
pub fn role_keywords(role: RoleHint) -> &'static [&'static str] {
    match role {
        RoleHint::Developer => DEVELOPER_KEYWORDS,
        RoleHint::DataScientist => DATA_SCIENTIST_KEYWORDS,
        RoleHint::Designer => DESIGNER_KEYWORDS,
        RoleHint::Manager => MANAGER_KEYWORDS,
        RoleHint::General => &[],
    }
}

/// Every general keyword, category order preserved.
pub fn general_keywords() -> impl Iterator<Item = &'static str> {
    KEYWORD_CATEGORIES
        .iter()
        .flat_map(|(_, keywords)| keywords.iter().copied())
}

pub fn is_technical(skill: &str) -> bool {
    TECHNICAL.contains(&skill)
}

const DATA_SCIENTIST_TECHNICAL: &[&str] = &[
    "python",
    "sql",
    "machine learning",
    "data science",
    "artificial intelligence",
    "aws",
    "git",
];

const DESIGNER_TECHNICAL: &[&str] = &["html", "css"];

static SKILL_INDEX: LazyLock<HashMap<RoleHint, Vec<&'static str>>> = LazyLock::new(|| {
    let compose = |lists: &[&[&'static str]]| -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for &keyword in lists.iter().flat_map(|l| l.iter()) {
            if !out.contains(&keyword) {
                out.push(keyword);
            }
        }
        out
    };

    HashMap::from([
        (
            RoleHint::General,
            compose(&[TECHNICAL, MANAGEMENT, COMMUNICATION, ANALYTICAL]),
        ),
        (RoleHint::Developer, compose(&[TECHNICAL, DEVELOPER_KEYWORDS])),
        (
            RoleHint::DataScientist,
            compose(&[DATA_SCIENTIST_KEYWORDS, ANALYTICAL, DATA_SCIENTIST_TECHNICAL]),
        ),
        (
            RoleHint::Designer,
            compose(&[DESIGNER_KEYWORDS, COMMUNICATION, DESIGNER_TECHNICAL]),
        ),
        (
            RoleHint::Manager,
            compose(&[MANAGER_KEYWORDS, MANAGEMENT, COMMUNICATION]),
        ),
    ])
});

/// Skill vocabulary for a role, falling back to the general list.
pub fn skill_vocabulary(role: RoleHint) -> &'static [&'static str] {
    SKILL_INDEX
        .get(&role)
        .or_else(|| SKILL_INDEX.get(&RoleHint::General))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Section label → trigger keywords.
pub const SECTION_TRIGGERS: &[(Section, &[&str])] = &[
    (Section::Contact, &["contact", "email", "phone", "address"]),
    (Section::Summary, &["summary", "objective", "profile", "about"]),
    (
        Section::Experience,
        &["experience", "work", "employment", "career", "professional"],
    ),
    (
        Section::Education,
        &["education", "university", "college", "degree", "school"],
    ),
    (
        Section::Skills,
        &["skills", "competencies", "technologies", "expertise"],
    ),
    (Section::Projects, &["projects", "portfolio"]),
    (
        Section::Certifications,
        &["certification", "certified", "license"],
    ),
    (Section::Awards, &["awards", "honors", "achievements"]),
];

pub const EDUCATION_TRIGGERS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "university",
    "college",
    "education",
    "graduated",
    "gpa",
    "honors",
    "summa cum laude",
    "magna cum laude",
];

pub const EXPERIENCE_TRIGGERS: &[&str] = &[
    "experience",
    "work",
    "employment",
    "job",
    "position",
    "role",
    "company",
    "intern",
    "volunteer",
    "project",
    "achievements",
];

pub const DEGREE_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "degree"];

pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "led",
    "managed",
    "developed",
    "created",
    "improved",
    "increased",
    "reduced",
    "implemented",
    "designed",
    "optimized",
];

/// Headers the formatting check counts.
pub const COMMON_SECTION_HEADERS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "summary",
    "objective",
    "projects",
];

pub const BULLET_MARKERS: &[char] = &['•', '-', '*'];
