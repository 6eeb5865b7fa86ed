//! Skill Extractor: matches taxonomy phrases against free text.
//!
//! Three passes, each adding only skills not already found:
//! 1. exact phrase, word-boundary anchored, over the normalized text
//! 2. the same search over lemmatized text with lemmatized phrases
//! 3. 2- and 3-word windows of the normalized text compared to every phrase
//!
//! Output order is first-match order, so the result is stable for identical input.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::analysis::nlp::{NlpEngine, NlpError};
use crate::analysis::normalize::normalize;
use crate::analysis::taxonomy::{DomainArea, SkillCategory, TechnicalArea, TAXONOMY};

/// A compiled phrase list. Build once and reuse across calls.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    phrases: Vec<String>,
    /// lowercase phrase -> indices into `phrases`
    by_lower: HashMap<String, Vec<usize>>,
}

impl SkillMatcher {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        let mut by_lower: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, phrase) in phrases.iter().enumerate() {
            by_lower.entry(phrase.to_lowercase()).or_default().push(idx);
        }
        Self { phrases, by_lower }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

/// Technical + domain + soft phrases.
pub static ALL_SKILLS: Lazy<SkillMatcher> = Lazy::new(|| SkillMatcher::new(TAXONOMY.all_skills()));

/// Domain phrases only, for the domain-match component.
pub static DOMAIN_SKILLS: Lazy<SkillMatcher> =
    Lazy::new(|| SkillMatcher::new(TAXONOMY.domain_skills()));

/// Extracts the skills of `matcher` that occur in `text`.
pub fn extract_skills(
    text: &str,
    engine: &dyn NlpEngine,
    matcher: &SkillMatcher,
) -> Result<Vec<String>, NlpError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let clean = normalize(text);
    let doc = engine.process(&clean)?;

    let mut found = FoundList::default();

    for phrase in matcher.phrases() {
        if contains_bounded(&clean, phrase) {
            found.add(phrase);
        }
    }

    let lemmatized = doc.lemma_text();
    for phrase in matcher.phrases() {
        if found.contains(phrase) {
            continue;
        }
        let phrase_lemmas = engine.process(phrase)?.lemma_text();
        if !phrase_lemmas.is_empty() && contains_bounded(&lemmatized, &phrase_lemmas) {
            found.add(phrase);
        }
    }

    let words: Vec<&str> = clean.split(' ').collect();
    for n in 2..=3 {
        for window in words.windows(n) {
            let ngram = window.join(" ");
            if let Some(indices) = matcher.by_lower.get(&ngram) {
                for &idx in indices {
                    found.add(&matcher.phrases[idx]);
                }
            }
        }
    }

    Ok(found.into_vec())
}

#[derive(Default)]
struct FoundList {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl FoundList {
    fn contains(&self, phrase: &str) -> bool {
        self.seen.contains(phrase)
    }

    fn add(&mut self, phrase: &str) {
        if self.seen.insert(phrase.to_string()) {
            self.order.push(phrase.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.order
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Finds `needle` in `haystack` with `\b` semantics on both ends: each edge of
/// the match must sit between a word and a non-word character.
fn contains_bounded(haystack: &str, needle: &str) -> bool {
    let (Some(first), Some(last)) = (needle.chars().next(), needle.chars().next_back()) else {
        return false;
    };

    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        let left_ok = before.map_or(false, is_word_char) != is_word_char(first);
        let right_ok = after.map_or(false, is_word_char) != is_word_char(last);
        left_ok && right_ok
    })
}

/// Skills grouped per category, keyed in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBuckets<K> {
    buckets: Vec<(K, Vec<String>)>,
}

impl<K> Default for CategoryBuckets<K> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> CategoryBuckets<K> {
    fn push(&mut self, key: K, skill: &str) {
        match self.buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, skills)) => skills.push(skill.to_string()),
            None => self.buckets.push((key, vec![skill.to_string()])),
        }
    }

    pub fn get(&self, key: K) -> Option<&[String]> {
        self.buckets
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, skills)| skills.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &[String])> {
        self.buckets.iter().map(|(k, skills)| (*k, skills.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn skills(&self) -> impl Iterator<Item = &String> {
        self.buckets.iter().flat_map(|(_, skills)| skills.iter())
    }
}

impl<K: Serialize> Serialize for CategoryBuckets<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (key, skills) in &self.buckets {
            map.serialize_entry(key, skills)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FoundSkills {
    pub technical: CategoryBuckets<TechnicalArea>,
    pub domain: CategoryBuckets<DomainArea>,
    pub soft: Vec<String>,
}

impl FoundSkills {
    /// Every categorized skill: technical, then domain, then soft.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.technical
            .skills()
            .chain(self.domain.skills())
            .chain(self.soft.iter())
    }

    pub fn contains_ignore_case(&self, skill: &str) -> bool {
        self.all().any(|s| s.eq_ignore_ascii_case(skill))
    }

    pub fn len(&self) -> usize {
        self.all().count()
    }

    pub fn is_empty(&self) -> bool {
        self.technical.is_empty() && self.domain.is_empty() && self.soft.is_empty()
    }
}

/// Buckets skills by category (soft > domain > technical). Skills outside the
/// taxonomy are dropped.
pub fn categorize_skills(skills: &[String]) -> FoundSkills {
    let mut found = FoundSkills::default();
    for skill in skills {
        match TAXONOMY.category_of(skill) {
            Some(SkillCategory::Soft) => found.soft.push(skill.clone()),
            Some(SkillCategory::Domain(area)) => found.domain.push(area, skill),
            Some(SkillCategory::Technical(area)) => found.technical.push(area, skill),
            None => {}
        }
    }
    found
}
