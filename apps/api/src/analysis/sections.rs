//! Section Segmenter: splits raw resume text into labelled sections using
//! header-pattern matching.
//!
//! A line opens a new section when it either looks like a bare header
//! (`Experience`, `Work History:`) or is visually styled as one (ALL CAPS, or
//! underlined by a `---` / `___` / `===` divider) and mentions a known header
//! phrase. Everything before the first header lands in `header`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// The closed set of section labels the segmenter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Interests,
    References,
}

impl SectionName {
    /// Detectable sections in priority order: the first pattern that matches wins.
    pub const DETECTABLE: [SectionName; 9] = [
        SectionName::Summary,
        SectionName::Experience,
        SectionName::Education,
        SectionName::Skills,
        SectionName::Projects,
        SectionName::Certifications,
        SectionName::Languages,
        SectionName::Interests,
        SectionName::References,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Header => "header",
            SectionName::Summary => "summary",
            SectionName::Experience => "experience",
            SectionName::Education => "education",
            SectionName::Skills => "skills",
            SectionName::Projects => "projects",
            SectionName::Certifications => "certifications",
            SectionName::Languages => "languages",
            SectionName::Interests => "interests",
            SectionName::References => "references",
        }
    }

    /// Header phrases that open this section. `header` is implicit and has none.
    fn header_pattern(&self) -> Option<&'static str> {
        let pattern = match self {
            SectionName::Header => return None,
            SectionName::Summary => {
                r"summary|profile|objective|about me|professional\s+summary|career\s+objective"
            }
            SectionName::Experience => {
                r"experience|work\s+experience|employment|work\s+history|professional\s+experience|career\s+history"
            }
            SectionName::Education => {
                r"education|academic|qualification|educational\s+background|academic\s+achievements"
            }
            SectionName::Skills => {
                r"skills|technical\s+skills|competencies|expertise|core\s+competencies|qualifications|key\s+skills"
            }
            SectionName::Projects => {
                r"projects|key\s+projects|professional\s+projects|personal\s+projects"
            }
            SectionName::Certifications => {
                r"certifications|certificates|accreditations|professional\s+certifications"
            }
            SectionName::Languages => r"languages|language\s+proficiency|language\s+skills",
            SectionName::Interests => r"interests|hobbies|activities|personal\s+interests",
            SectionName::References => r"references|recommendations|endorsements",
        };
        Some(pattern)
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

struct HeaderRule {
    name: SectionName,
    /// Whole-line header: pattern at line start, then only `:` or end of line.
    anchored: Regex,
    /// Pattern anywhere in the line, used for styled (caps / underlined) headers.
    loose: Regex,
}

static HEADER_RULES: Lazy<Vec<HeaderRule>> = Lazy::new(|| {
    SectionName::DETECTABLE
        .iter()
        .filter_map(|name| {
            let pattern = name.header_pattern()?;
            Some(HeaderRule {
                name: *name,
                anchored: Regex::new(&format!(r"^\s*(?:{pattern})\s*(?::|$)"))
                    .expect("static header pattern"),
                loose: Regex::new(&format!("(?:{pattern})")).expect("static header pattern"),
            })
        })
        .collect()
});

static DIVIDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-_=]{3,}$").expect("static divider pattern"));

/// A named, contiguous region of resume text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: SectionName,
    /// Section lines (trimmed) joined with `\n`.
    pub content: String,
}

impl Section {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    pub fn word_count(&self) -> usize {
        crate::analysis::normalize::word_count(&self.content)
    }
}

/// Insertion-ordered section map. Always contains `header`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sections {
    entries: Vec<Section>,
}

impl Sections {
    pub fn get(&self, name: SectionName) -> Option<&Section> {
        self.entries.iter().find(|s| s.name == name)
    }

    pub fn content(&self, name: SectionName) -> Option<&str> {
        self.get(name).map(|s| s.content.as_str())
    }

    pub fn contains(&self, name: SectionName) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<SectionName> {
        self.entries.iter().map(|s| s.name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for section in &self.entries {
            map.serialize_entry(section.name.as_str(), &section.content)?;
        }
        map.end()
    }
}

/// Line buffers keyed by section, in first-seen order.
struct SectionBuffers {
    buffers: Vec<(SectionName, Vec<String>)>,
    current: usize,
}

impl SectionBuffers {
    fn new() -> Self {
        Self {
            buffers: vec![(SectionName::Header, Vec::new())],
            current: 0,
        }
    }

    /// Starts (or restarts) the buffer for `name`. A repeated header discards
    /// whatever was collected under the earlier occurrence.
    fn open(&mut self, name: SectionName) {
        match self.buffers.iter().position(|(n, _)| *n == name) {
            Some(idx) => {
                self.buffers[idx].1.clear();
                self.current = idx;
            }
            None => {
                self.buffers.push((name, Vec::new()));
                self.current = self.buffers.len() - 1;
            }
        }
    }

    fn push(&mut self, line: &str) {
        self.buffers[self.current].1.push(line.to_string());
    }

    fn finish(self) -> Sections {
        Sections {
            entries: self
                .buffers
                .into_iter()
                .map(|(name, lines)| Section {
                    name,
                    content: lines.join("\n"),
                })
                .collect(),
        }
    }
}

/// Splits resume text into labelled sections.
pub fn segment(resume_text: &str) -> Sections {
    let lines: Vec<&str> = resume_text.split('\n').collect();
    let mut buffers = SectionBuffers::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        let line_lower = line.to_lowercase();

        let mut found = match_bare_header(&line_lower);

        if found.is_none() && i + 1 < lines.len() {
            let next_line = lines[i + 1].trim();
            let underlined = DIVIDER.is_match(next_line);
            if (is_upper(line) && line.chars().count() > 3) || underlined {
                let cleaned = line_lower.replace(':', "");
                found = match_styled_header(&cleaned);
                if found.is_some() && underlined {
                    i += 1;
                }
            }
        }

        match found {
            Some(name) => buffers.open(name),
            None => buffers.push(line),
        }
        i += 1;
    }

    buffers.finish()
}

fn match_bare_header(line_lower: &str) -> Option<SectionName> {
    HEADER_RULES
        .iter()
        .find(|rule| rule.anchored.is_match(line_lower))
        .map(|rule| rule.name)
}

fn match_styled_header(cleaned: &str) -> Option<SectionName> {
    HEADER_RULES
        .iter()
        .find(|rule| rule.loose.is_match(cleaned))
        .map(|rule| rule.name)
}

/// True when the line has at least one cased letter and none of them are lowercase.
fn is_upper(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_headers_yields_single_header_section() {
        let text = "Jane Doe\njane@example.com\nSeattle, WA";
        let sections = segment(text);
        assert_eq!(sections.names(), vec![SectionName::Header]);
        assert_eq!(sections.content(SectionName::Header), Some(text));
    }

    #[test]
    fn test_empty_text_still_has_header() {
        let sections = segment("");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.content(SectionName::Header), Some(""));
    }

    #[test]
    fn test_caps_headers_split_sections() {
        let sections = segment(
            "EXPERIENCE\nBuilt REST APIs in Python and Django.\nEDUCATION\nBS Computer Science.",
        );
        assert_eq!(
            sections.names(),
            vec![
                SectionName::Header,
                SectionName::Experience,
                SectionName::Education
            ]
        );
        assert_eq!(
            sections.content(SectionName::Experience),
            Some("Built REST APIs in Python and Django.")
        );
        assert_eq!(
            sections.content(SectionName::Education),
            Some("BS Computer Science.")
        );
        assert_eq!(sections.content(SectionName::Header), Some(""));
    }

    #[test]
    fn test_header_with_colon_and_multiword_variants() {
        let sections = segment("Work History:\nAcme Corp\nTechnical Skills\nRust, Go");
        assert_eq!(sections.content(SectionName::Experience), Some("Acme Corp"));
        assert_eq!(sections.content(SectionName::Skills), Some("Rust, Go"));
    }

    #[test]
    fn test_trailing_text_after_header_word_is_not_a_header() {
        let sections = segment("Experienced engineer with a passion for tooling");
        assert_eq!(sections.names(), vec![SectionName::Header]);
    }

    #[test]
    fn test_underlined_header_skips_divider() {
        let text = "Jane Doe\nMy Professional Experience\n-----\nAcme Corp, 2019-2023";
        let sections = segment(text);
        assert_eq!(
            sections.content(SectionName::Experience),
            Some("Acme Corp, 2019-2023")
        );
        assert_eq!(sections.content(SectionName::Header), Some("Jane Doe"));
    }

    #[test]
    fn test_all_caps_line_containing_header_phrase() {
        let sections = segment("RELEVANT WORK EXPERIENCE\nAcme Corp");
        assert_eq!(sections.content(SectionName::Experience), Some("Acme Corp"));
    }

    #[test]
    fn test_caps_line_without_header_phrase_is_content() {
        let sections = segment("JANE DOE\nSUMMARY\nSeasoned engineer");
        assert_eq!(sections.content(SectionName::Header), Some("JANE DOE"));
        assert_eq!(
            sections.content(SectionName::Summary),
            Some("Seasoned engineer")
        );
    }

    #[test]
    fn test_styled_check_skipped_on_last_line() {
        // A trailing caps line has no successor, so only the bare-header rule applies.
        let sections = segment("Intro\nRELEVANT PROJECTS HIGHLIGHTS");
        assert_eq!(sections.names(), vec![SectionName::Header]);
    }

    #[test]
    fn test_repeated_section_keeps_last_occurrence_in_first_position() {
        let text = "Skills\nPython\nEducation\nBS\nSkills\nRust";
        let sections = segment(text);
        assert_eq!(
            sections.names(),
            vec![
                SectionName::Header,
                SectionName::Skills,
                SectionName::Education
            ]
        );
        assert_eq!(sections.content(SectionName::Skills), Some("Rust"));
    }

    #[test]
    fn test_qualifications_maps_to_skills_not_education() {
        let sections = segment("Qualifications\nLicensed PE");
        assert!(sections.contains(SectionName::Skills));
        assert!(!sections.contains(SectionName::Education));
    }

    #[test]
    fn test_lines_are_trimmed() {
        let sections = segment("  Skills  \n   Rust   \n\tGo");
        assert_eq!(sections.content(SectionName::Skills), Some("Rust\nGo"));
        let skills = sections.get(SectionName::Skills).unwrap();
        assert_eq!(skills.lines().collect::<Vec<_>>(), vec!["Rust", "Go"]);
        assert_eq!(skills.word_count(), 2);
    }

    #[test]
    fn test_is_upper() {
        assert!(is_upper("EXPERIENCE"));
        assert!(is_upper("WORK HISTORY 2020"));
        assert!(!is_upper("Experience"));
        assert!(!is_upper("2020 - 2023"));
    }

    #[test]
    fn test_serializes_as_name_to_content_map() {
        let sections = segment("Summary\nBuilder of things");
        let json = serde_json::to_value(&sections).unwrap();
        assert_eq!(json["header"], "");
        assert_eq!(json["summary"], "Builder of things");
    }
}
