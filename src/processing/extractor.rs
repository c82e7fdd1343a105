//! Free-text skill extraction against a skill dictionary

use crate::error::{Result, SkillGapError};
use crate::processing::dictionary::SkillDictionary;
use crate::processing::normalizer::Normalizer;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_FUZZY_MIN_LEN: usize = 3;

/// Alias spellings that are too common as plain English or abbreviations to scan for
const SKIPPED_ALIAS_FORMS: &[&str] = &["rest", "cv", "cd", "ci", "dl", "tf"];

const COMMON_TECH_PATTERN: &str = r"(?i)python|javascript|typescript|java|c\+\+|c#|sql|html|css|react|node\.js|git|docker|aws|linux|excel";

/// Multi-strategy extractor. Every result is a member of the dictionary it was built with.
pub struct SkillExtractor<'a> {
    dictionary: &'a SkillDictionary,
    normalizer: &'a Normalizer,
    fuzzy_min_len: usize,
    matcher: AhoCorasick,
    targets: Vec<String>,
    header_regex: Regex,
    caps_header_regex: Regex,
    separator_regex: Regex,
    context_regex: Regex,
    common_regex: Regex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSkill {
    pub skill: String,
    pub confidence: f64,
    pub matches: usize,
}

impl<'a> SkillExtractor<'a> {
    pub fn new(dictionary: &'a SkillDictionary, normalizer: &'a Normalizer, fuzzy_min_len: usize) -> Result<Self> {
        let mut patterns: Vec<String> = Vec::with_capacity(dictionary.len());
        let mut targets: Vec<String> = Vec::with_capacity(dictionary.len());

        for skill in dictionary.iter() {
            patterns.push(skill.clone());
            targets.push(skill.clone());
        }

        for (alias, canonical) in normalizer.alias_forms() {
            if SKIPPED_ALIAS_FORMS.contains(&alias.as_str())
                || dictionary.contains(&alias)
                || !dictionary.contains(&canonical)
            {
                continue;
            }
            patterns.push(alias);
            targets.push(canonical);
        }

        // Standard match kind so overlapping skills ("react" / "react native") are all reported
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| SkillGapError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        let header_regex = Regex::new(
            r"(?i)^[#*=\-\s]*(?:technical\s+skills|programming\s+languages|technologies|tools|frameworks|libraries|proficiencies|skills)[*\s]*(?::[*\s]*(.*))?$",
        )?;
        let caps_header_regex = Regex::new(r"^[A-Z][A-Z0-9 &/]{2,}:?$")?;
        let separator_regex = Regex::new(r"[,:;|•·●▪\n]")?;
        let context_regex = Regex::new(
            r"\b(?i:built|developed|used|utilized|proficient\s+in|familiar\s+with|experience\s+with|using|via|through|with)\s+([A-Z][\w+#.\-]*(?:[ \t]+[A-Z][\w+#.\-]*)*)",
        )?;
        let common_regex = Regex::new(COMMON_TECH_PATTERN)?;

        Ok(Self {
            dictionary,
            normalizer,
            fuzzy_min_len,
            matcher,
            targets,
            header_regex,
            caps_header_regex,
            separator_regex,
            context_regex,
            common_regex,
        })
    }

    /// Union of all four strategies
    pub fn extract(&self, text: &str) -> Result<BTreeSet<String>> {
        let mut found: BTreeSet<String> = self.scan_counts(text)?.into_keys().collect();
        found.extend(self.section_skills(text)?);
        found.extend(self.contextual_skills(text));
        found.extend(self.common_pattern_skills(text));

        found.retain(|skill| self.dictionary.contains(skill));
        log::debug!("Extracted {} skills from {} characters of text", found.len(), text.len());
        Ok(found)
    }

    /// Whole-word occurrences of every dictionary skill and scanned alias, keyed by canonical skill
    pub fn scan_counts(&self, text: &str) -> Result<BTreeMap<String, usize>> {
        let lower = text.to_lowercase();
        let mut counts = BTreeMap::new();

        let matches = self
            .matcher
            .try_find_overlapping_iter(lower.as_str())
            .map_err(|e| SkillGapError::Processing(format!("Skill scan failed: {}", e)))?;

        for mat in matches {
            if is_whole_word(&lower, mat.start(), mat.end()) {
                let skill = &self.targets[mat.pattern().as_usize()];
                *counts.entry(skill.clone()).or_insert(0) += 1;
            }
        }

        Ok(counts)
    }

    /// Skills listed under a skills-like heading
    pub fn section_skills(&self, text: &str) -> Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        let mut in_section = false;

        for line in text.lines() {
            let trimmed = line.trim();

            if let Some(caps) = self.header_regex.captures(trimmed) {
                in_section = true;
                if let Some(rest) = caps.get(1) {
                    self.collect_candidates(rest.as_str(), &mut found)?;
                }
                continue;
            }

            if !in_section {
                continue;
            }

            if trimmed.is_empty() || self.is_caps_header(trimmed) {
                in_section = false;
                continue;
            }

            self.collect_candidates(trimmed, &mut found)?;
        }

        Ok(found)
    }

    /// Capitalized phrases after verbs like "built" or "experience with"
    pub fn contextual_skills(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();

        for caps in self.context_regex.captures_iter(text) {
            let Some(phrase) = caps.get(1) else { continue };
            let phrase = phrase.as_str().trim_end_matches(['.', ',', ';', ':']);
            let length = phrase.graphemes(true).count();
            if !(2..=30).contains(&length) {
                continue;
            }

            let normalized = self.normalizer.normalize_skill(phrase);
            if self.dictionary.contains(&normalized) {
                found.insert(normalized);
                continue;
            }

            for word in phrase.split_whitespace() {
                let normalized = self
                    .normalizer
                    .normalize_skill(word.trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':')));
                if self.dictionary.contains(&normalized) {
                    found.insert(normalized);
                }
            }
        }

        found
    }

    /// Fixed list of very common technology names
    pub fn common_pattern_skills(&self, text: &str) -> BTreeSet<String> {
        self.common_regex
            .find_iter(text)
            .filter(|m| is_whole_word(text, m.start(), m.end()))
            .map(|m| self.normalizer.normalize_skill(m.as_str()))
            .filter(|skill| self.dictionary.contains(skill))
            .collect()
    }

    fn is_caps_header(&self, line: &str) -> bool {
        self.caps_header_regex.is_match(line)
            && !self
                .dictionary
                .contains(&self.normalizer.normalize_skill(line.trim_end_matches(':')))
    }

    fn collect_candidates(&self, content: &str, found: &mut BTreeSet<String>) -> Result<()> {
        for piece in self.separator_regex.split(content) {
            let candidate = piece
                .trim()
                .trim_start_matches(['-', '*', '–'])
                .trim_end_matches('.')
                .trim();
            if candidate.is_empty() {
                continue;
            }

            let normalized = self.normalizer.normalize_skill(candidate);
            if self.dictionary.contains(&normalized) {
                found.insert(normalized);
            } else if let Some(skill) = self.fuzzy_match(&normalized)? {
                found.insert(skill);
            }
        }
        Ok(())
    }

    /// Longest dictionary skill inside the candidate, else the first dictionary skill containing it
    fn fuzzy_match(&self, candidate: &str) -> Result<Option<String>> {
        if candidate.chars().count() < self.fuzzy_min_len {
            return Ok(None);
        }

        let mut best: Option<(usize, &String)> = None;
        let matches = self
            .matcher
            .try_find_overlapping_iter(candidate)
            .map_err(|e| SkillGapError::Processing(format!("Skill scan failed: {}", e)))?;

        for mat in matches {
            let len = mat.end() - mat.start();
            if len < self.fuzzy_min_len || !is_whole_word(candidate, mat.start(), mat.end()) {
                continue;
            }
            if best.map_or(true, |(best_len, _)| len > best_len) {
                best = Some((len, &self.targets[mat.pattern().as_usize()]));
            }
        }

        if let Some((_, skill)) = best {
            return Ok(Some(skill.clone()));
        }

        Ok(self
            .dictionary
            .iter()
            .find(|skill| skill.chars().count() >= self.fuzzy_min_len && skill.contains(candidate))
            .cloned())
    }
}

/// Per-skill match counts turned into a confidence value
pub struct ScoredSkillExtractor<'a> {
    extractor: SkillExtractor<'a>,
}

impl<'a> ScoredSkillExtractor<'a> {
    pub fn new(dictionary: &'a SkillDictionary, normalizer: &'a Normalizer) -> Result<Self> {
        Ok(Self {
            extractor: SkillExtractor::new(dictionary, normalizer, DEFAULT_FUZZY_MIN_LEN)?,
        })
    }

    pub fn from_extractor(extractor: SkillExtractor<'a>) -> Self {
        Self { extractor }
    }

    /// Sorted by confidence descending, then skill name
    pub fn extract(&self, text: &str) -> Result<Vec<ScoredSkill>> {
        let mut scored: Vec<ScoredSkill> = self
            .extractor
            .scan_counts(text)?
            .into_iter()
            .map(|(skill, matches)| ScoredSkill {
                skill,
                confidence: (matches as f64 * 0.3 + 0.1).min(1.0),
                matches,
            })
            .collect();

        scored.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.skill.cmp(&b.skill))
        });

        Ok(scored)
    }
}

/// Extract with the default normalizer and fuzzy threshold
pub fn extract_skills_from_text(text: &str, dictionary: &SkillDictionary) -> Result<BTreeSet<String>> {
    let normalizer = Normalizer::default();
    SkillExtractor::new(dictionary, &normalizer, DEFAULT_FUZZY_MIN_LEN)?.extract(text)
}

fn is_skill_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '+' || c == '#'
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, is_skill_char) && !after.map_or(false, is_skill_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::dictionary::build_dictionary;
    use crate::processing::tables::EngineTables;

    fn default_dictionary() -> SkillDictionary {
        build_dictionary(&[], &[], &EngineTables::default(), &Normalizer::default())
    }

    #[test]
    fn test_whole_word_scan() {
        let dictionary = default_dictionary();
        let skills = extract_skills_from_text(
            "Worked on Python services and React Native apps backed by PostgreSQL.",
            &dictionary,
        )
        .unwrap();

        assert!(skills.contains("python"));
        assert!(skills.contains("react native"));
        assert!(skills.contains("react"));
        assert!(skills.contains("postgresql"));
    }

    #[test]
    fn test_c_does_not_match_inside_cpp() {
        let dictionary: SkillDictionary = ["c", "c++"].into_iter().collect();
        let skills = extract_skills_from_text("I know C++ well", &dictionary).unwrap();
        assert_eq!(skills.into_iter().collect::<Vec<_>>(), vec!["c++"]);

        let skills = extract_skills_from_text("Used C and C++ daily", &dictionary).unwrap();
        assert!(skills.contains("c"));
        assert!(skills.contains("c++"));
    }

    #[test]
    fn test_alias_forms_yield_canonical_skill() {
        let dictionary = default_dictionary();
        let skills = extract_skills_from_text("Deployed to k8s, wrote JS and some ML", &dictionary).unwrap();

        assert!(skills.contains("kubernetes"));
        assert!(skills.contains("javascript"));
        assert!(skills.contains("machine learning"));
    }

    #[test]
    fn test_english_words_are_not_skills() {
        let dictionary = default_dictionary();
        let skills =
            extract_skills_from_text("Take the rest of the day. Check the community board.", &dictionary).unwrap();

        assert!(!skills.contains("rest api"));
        assert!(!skills.contains("unity"));
    }

    #[test]
    fn test_section_extraction_with_fuzzy_match() {
        let dictionary = default_dictionary();
        let normalizer = Normalizer::default();
        let extractor = SkillExtractor::new(&dictionary, &normalizer, DEFAULT_FUZZY_MIN_LEN).unwrap();

        let text = "TECHNICAL SKILLS\nLanguages: Python, Javascript | Rust\nFrameworks: Django\n- Pytorc\n\nEXPERIENCE\nPytorc again";
        let skills = extractor.section_skills(text).unwrap();

        assert!(skills.contains("python"));
        assert!(skills.contains("javascript"));
        assert!(skills.contains("rust"));
        assert!(skills.contains("django"));
        assert!(skills.contains("pytorch"));
    }

    #[test]
    fn test_fuzzy_match_prefers_longest_skill_inside_candidate() {
        let dictionary: SkillDictionary = ["python", "machine learning", "learning", "tensorflow"].into_iter().collect();
        let normalizer = Normalizer::default();
        let extractor = SkillExtractor::new(&dictionary, &normalizer, DEFAULT_FUZZY_MIN_LEN).unwrap();

        assert_eq!(extractor.fuzzy_match("python 3.11 scripting").unwrap().as_deref(), Some("python"));
        assert_eq!(
            extractor.fuzzy_match("machine learning basics course").unwrap().as_deref(),
            Some("machine learning")
        );
    }

    #[test]
    fn test_fuzzy_match_candidate_inside_skill() {
        let dictionary: SkillDictionary = ["python", "tensorflow"].into_iter().collect();
        let normalizer = Normalizer::default();
        let extractor = SkillExtractor::new(&dictionary, &normalizer, DEFAULT_FUZZY_MIN_LEN).unwrap();

        assert_eq!(extractor.fuzzy_match("tensorfl").unwrap().as_deref(), Some("tensorflow"));
        assert_eq!(extractor.fuzzy_match("pyth").unwrap().as_deref(), Some("python"));
        assert!(extractor.fuzzy_match("haskell").unwrap().is_none());
    }

    #[test]
    fn test_fuzzy_match_rejects_short_candidates() {
        let dictionary: SkillDictionary = ["python", "tensorflow"].into_iter().collect();
        let normalizer = Normalizer::default();
        let extractor = SkillExtractor::new(&dictionary, &normalizer, DEFAULT_FUZZY_MIN_LEN).unwrap();

        // Both are substrings of dictionary skills
        assert!(extractor.fuzzy_match("th").unwrap().is_none());
        assert!(extractor.fuzzy_match("fl").unwrap().is_none());
        assert_eq!(extractor.fuzzy_match("tho").unwrap().as_deref(), Some("python"));

        let skills = extractor.section_skills("Skills: th, fl").unwrap();
        assert!(skills.is_empty());
    }

    #[test]
    fn test_section_fuzzy_match_both_directions() {
        let dictionary: SkillDictionary = ["python", "tensorflow", "sql"].into_iter().collect();
        let normalizer = Normalizer::default();
        let extractor = SkillExtractor::new(&dictionary, &normalizer, DEFAULT_FUZZY_MIN_LEN).unwrap();

        let skills = extractor.section_skills("Skills: Python 3.11 scripting, Tensorfl").unwrap();
        let found: Vec<&str> = skills.iter().map(|s| s.as_str()).collect();
        assert_eq!(found, vec!["python", "tensorflow"]);
    }

    #[test]
    fn test_section_ends_at_caps_header() {
        let dictionary = default_dictionary();
        let normalizer = Normalizer::default();
        let extractor = SkillExtractor::new(&dictionary, &normalizer, DEFAULT_FUZZY_MIN_LEN).unwrap();

        let text = "Skills: Docker\nEDUCATION\nKubernetes";
        let skills = extractor.section_skills(text).unwrap();
        assert!(skills.contains("docker"));
        assert!(!skills.contains("kubernetes"));
    }

    #[test]
    fn test_contextual_extraction() {
        let dictionary = default_dictionary();
        let normalizer = Normalizer::default();
        let extractor = SkillExtractor::new(&dictionary, &normalizer, DEFAULT_FUZZY_MIN_LEN).unwrap();

        let skills = extractor.contextual_skills("Built REST APIs and developed Flask Dashboards using Tableau.");
        assert!(skills.contains("rest api"));
        assert!(skills.contains("flask"));
        assert!(skills.contains("tableau"));
    }

    #[test]
    fn test_extraction_is_subset_of_dictionary() {
        let dictionary: SkillDictionary = ["python", "sql"].into_iter().collect();
        let text = "Skills: Python, Java, SQL, Docker\nBuilt Kubernetes clusters using AWS and Git";
        let skills = extract_skills_from_text(text, &dictionary).unwrap();

        for skill in &skills {
            assert!(dictionary.contains(skill));
        }
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn test_confidence_scoring() {
        let dictionary = default_dictionary();
        let normalizer = Normalizer::default();
        let scored = ScoredSkillExtractor::new(&dictionary, &normalizer)
            .unwrap()
            .extract("Python python PYTHON and SQL")
            .unwrap();

        assert_eq!(scored[0].skill, "python");
        assert_eq!(scored[0].matches, 3);
        assert!((scored[0].confidence - 1.0).abs() < 1e-9);

        let sql = scored.iter().find(|s| s.skill == "sql").unwrap();
        assert_eq!(sql.matches, 1);
        assert!((sql.confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text() {
        let dictionary = default_dictionary();
        assert!(extract_skills_from_text("", &dictionary).unwrap().is_empty());
    }
}
