//! Section/Field Detector: contact fields, section labels, skills, context
//! lines and the experience-years estimate.
//!
//! Every function here is total over `&str` and deterministic. Keyword tests
//! are plain substring checks against lower-cased text, so short keywords can
//! match inside longer words.

use std::sync::LazyLock;

use regex::Regex;

use crate::grading::models::{ContactInfo, ParsedResume, RoleHint, SectionSet};
use crate::grading::vocabulary::{
    skill_vocabulary, EDUCATION_TRIGGERS, EXPERIENCE_TRIGGERS, SECTION_TRIGGERS,
};

macro_rules! detector_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

detector_pattern!(
    RE_EMAIL,
    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"
);

// Groups: country code, area code, exchange, line number.
detector_pattern!(
    RE_PHONE,
    r"(?:\+?(\d{1,3})[-.\s]?)?\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})"
);

detector_pattern!(RE_LINKEDIN, r"(?i)linkedin\.com/in/[\w-]+");
detector_pattern!(RE_GITHUB, r"(?i)github\.com/[\w-]+");

detector_pattern!(RE_YEAR, r"\b(?:19|20)\d{2}\b");

detector_pattern!(
    RE_EXPLICIT_YEARS,
    r"(?i)(\d+)\+?\s*(?:years?|yrs?)\s*(?:of\s+)?(?:experience|exp)"
);

/// Number of lines kept on each side of a trigger line.
const CONTEXT_RADIUS: usize = 2;

/// Runs every detector over `text`.
pub fn parse_resume(text: &str, role: RoleHint) -> ParsedResume {
    ParsedResume {
        contact_info: extract_contact_info(text),
        sections: detect_sections(text),
        skills: detect_skills(text, role),
        experience_years: estimate_experience_years(text),
        education: context_lines(text, EDUCATION_TRIGGERS),
        experience: context_lines(text, EXPERIENCE_TRIGGERS),
        word_count: text.split_whitespace().count(),
    }
}

pub fn extract_contact_info(text: &str) -> ContactInfo {
    let email = LazyLock::force(&RE_EMAIL)
        .as_ref()
        .and_then(|re| re.find(text))
        .map(|m| m.as_str().to_string());

    ContactInfo {
        email,
        phones: extract_phones(text),
        linkedin: profile_fragments(&RE_LINKEDIN, text),
        github: profile_fragments(&RE_GITHUB, text),
    }
}

/// All phone numbers, normalized to hyphen-joined digit groups, first-seen order.
fn extract_phones(text: &str) -> Vec<String> {
    let Some(re) = LazyLock::force(&RE_PHONE).as_ref() else {
        return Vec::new();
    };

    let mut phones: Vec<String> = Vec::new();
    let mut pos = 0;
    while let Some(caps) = re.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        match normalize_phone(text, whole.start(), whole.end(), &caps) {
            Some(normalized) => {
                if !phones.contains(&normalized) {
                    phones.push(normalized);
                }
                pos = whole.end();
            }
            // A rejected match may have swallowed the start of a real number.
            None => {
                pos = whole.start()
                    + text[whole.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
            }
        }
    }
    phones
}

/// Returns `None` for matches carved out of a longer digit run (order numbers,
/// IDs); those are not phone numbers.
fn normalize_phone(
    text: &str,
    start: usize,
    end: usize,
    caps: &regex::Captures<'_>,
) -> Option<String> {
    let digit_before = text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit());
    let digit_after = text[end..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit());
    if digit_before || digit_after {
        return None;
    }

    let groups: Vec<&str> = (1..=4)
        .filter_map(|i| caps.get(i).map(|m| m.as_str()))
        .collect();
    if groups.len() < 3 {
        return None;
    }
    Some(groups.join("-"))
}

fn profile_fragments(re: &LazyLock<Option<Regex>>, text: &str) -> Vec<String> {
    let Some(re) = LazyLock::force(re).as_ref() else {
        return Vec::new();
    };
    let mut out: Vec<String> = Vec::new();
    for m in re.find_iter(text) {
        let fragment = m.as_str().to_lowercase();
        if !out.contains(&fragment) {
            out.push(fragment);
        }
    }
    out
}

/// A section is present when any of its trigger keywords occurs anywhere.
pub fn detect_sections(text: &str) -> SectionSet {
    let lower = text.to_lowercase();
    SECTION_TRIGGERS
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|k| lower.contains(k)))
        .map(|(section, _)| *section)
        .collect()
}

/// Role vocabulary keywords present in the text, in vocabulary order.
pub fn detect_skills(text: &str, role: RoleHint) -> Vec<String> {
    let lower = text.to_lowercase();
    skill_vocabulary(role)
        .iter()
        .filter(|k| lower.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

/// Year span if at least two years appear; else the largest explicit
/// "N years of experience"; else 0.
pub fn estimate_experience_years(text: &str) -> u32 {
    let years: Vec<u32> = LazyLock::force(&RE_YEAR)
        .as_ref()
        .map(|re| {
            re.find_iter(text)
                .filter_map(|m| m.as_str().parse().ok())
                .collect()
        })
        .unwrap_or_default();

    if years.len() >= 2 {
        let min = years.iter().min().copied().unwrap_or(0);
        let max = years.iter().max().copied().unwrap_or(0);
        return max - min;
    }

    LazyLock::force(&RE_EXPLICIT_YEARS)
        .as_ref()
        .and_then(|re| {
            re.captures_iter(text)
                .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
                .max()
        })
        .unwrap_or(0)
}

/// Lines containing any trigger plus `CONTEXT_RADIUS` neighbours each side,
/// de-duplicated in first-seen order.
pub fn context_lines(text: &str, triggers: &[&str]) -> Vec<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !triggers.iter().any(|k| lower.contains(k)) {
            continue;
        }
        let from = i.saturating_sub(CONTEXT_RADIUS);
        let to = (i + CONTEXT_RADIUS + 1).min(lines.len());
        for neighbour in &lines[from..to] {
            if !out.iter().any(|l| l == neighbour) {
                out.push(neighbour.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::models::Section;

    #[test]
    fn test_email_and_phone_from_contact_line() {
        let info = extract_contact_info("Contact: jane.doe@example.com or 415-555-0100");
        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert!(info.phones.contains(&"415-555-0100".to_string()));
    }

    #[test]
    fn test_only_first_email_kept() {
        let info = extract_contact_info("a@one.io, b@two.io");
        assert_eq!(info.email.as_deref(), Some("a@one.io"));
    }

    #[test]
    fn test_phone_formats_normalize() {
        let info = extract_contact_info("(415) 555-0100 | 212.555.0199 | +1 646 555 0123");
        assert_eq!(
            info.phones,
            vec!["415-555-0100", "212-555-0199", "1-646-555-0123"]
        );
    }

    #[test]
    fn test_phone_inside_longer_digit_run_is_omitted() {
        let info = extract_contact_info("Order 123456789012345 shipped");
        assert!(info.phones.is_empty());
    }

    #[test]
    fn test_phone_after_postal_code_is_kept() {
        let info = extract_contact_info("San Francisco, CA 94105 415-555-0100");
        assert_eq!(info.phones, vec!["415-555-0100"]);
    }

    #[test]
    fn test_duplicate_phones_collapse() {
        let info = extract_contact_info("415-555-0100\nCell: 415.555.0100");
        assert_eq!(info.phones, vec!["415-555-0100"]);
    }

    #[test]
    fn test_profile_links_case_insensitive_and_listed() {
        let info = extract_contact_info(
            "LinkedIn.com/in/Jane-Doe github.com/janedoe GitHub.com/acme-labs",
        );
        assert_eq!(info.linkedin, vec!["linkedin.com/in/jane-doe"]);
        assert_eq!(info.github, vec!["github.com/janedoe", "github.com/acme-labs"]);
    }

    #[test]
    fn test_absent_contact_fields_are_empty_not_errors() {
        let info = extract_contact_info("no contact details here");
        assert_eq!(info, ContactInfo::default());
    }

    #[test]
    fn test_detect_sections_by_keyword() {
        let sections = detect_sections("PROFESSIONAL EXPERIENCE\nEducation\nTechnical Skills");
        assert!(sections.contains(&Section::Experience));
        assert!(sections.contains(&Section::Education));
        assert!(sections.contains(&Section::Skills));
        assert!(!sections.contains(&Section::Awards));
    }

    #[test]
    fn test_section_substring_overmatch_is_kept() {
        // "network" contains "work"
        let sections = detect_sections("networking enthusiast");
        assert!(sections.contains(&Section::Experience));
    }

    #[test]
    fn test_developer_skills_exact_set() {
        let mut skills = detect_skills("python, react, docker", RoleHint::Developer);
        skills.sort();
        assert_eq!(skills, vec!["docker", "python", "react"]);
    }

    #[test]
    fn test_skills_preserve_vocabulary_order() {
        let skills = detect_skills("Docker and Python", RoleHint::Developer);
        assert_eq!(skills, vec!["python", "docker"]);
    }

    #[test]
    fn test_data_scientist_single_letter_skill_matches() {
        let skills = detect_skills("Languages: R, Python", RoleHint::DataScientist);
        assert!(skills.contains(&"r".to_string()));
        assert!(skills.contains(&"python".to_string()));
    }

    #[test]
    fn test_designer_skills_ignore_developer_vocabulary() {
        let skills = detect_skills("Figma, Python, Kubernetes", RoleHint::Designer);
        assert_eq!(skills, vec!["figma"]);
    }

    #[test]
    fn test_experience_years_none() {
        assert_eq!(estimate_experience_years("no numbers or phrases here"), 0);
    }

    #[test]
    fn test_experience_years_from_date_range() {
        assert_eq!(estimate_experience_years("Acme Corp 2015 - 2021"), 6);
    }

    #[test]
    fn test_experience_years_explicit_phrase() {
        let text = "Engineer with 7+ years of experience, 3 yrs exp in Rust";
        assert_eq!(estimate_experience_years(text), 7);
    }

    #[test]
    fn test_date_range_wins_over_explicit_phrase() {
        let text = "10 years of experience\n2018 - 2020";
        assert_eq!(estimate_experience_years(text), 2);
    }

    #[test]
    fn test_single_year_falls_back_to_phrase() {
        let text = "Since 2019. 4 years experience";
        assert_eq!(estimate_experience_years(text), 4);
    }

    #[test]
    fn test_context_lines_include_neighbours_once() {
        let text = "a\nb\nEducation\nc\nd\ne\nUniversity of X\nf";
        let lines = context_lines(text, EDUCATION_TRIGGERS);
        assert_eq!(
            lines,
            vec!["a", "b", "Education", "c", "d", "e", "University of X", "f"]
        );
    }

    #[test]
    fn test_context_lines_empty_without_triggers() {
        assert!(context_lines("just words", EDUCATION_TRIGGERS).is_empty());
    }

    #[test]
    fn test_parse_resume_total_on_empty_text() {
        let parsed = parse_resume("", RoleHint::General);
        assert_eq!(parsed, ParsedResume::default());
    }

    #[test]
    fn test_parse_resume_deterministic() {
        let text = "Jane Doe\njane@x.io\nExperience 2019 - 2023\nPython, SQL";
        assert_eq!(
            parse_resume(text, RoleHint::DataScientist),
            parse_resume(text, RoleHint::DataScientist)
        );
    }
}
