//! Skill name canonicalization

use crate::processing::tables::EngineTables;
use std::collections::{HashMap, HashSet};

/// Rewrites raw skill mentions into their canonical lowercase form
#[derive(Debug, Clone)]
pub struct Normalizer {
    aliases: HashMap<String, String>,
    plural_rules: Vec<(String, String)>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_tables(&EngineTables::default())
    }
}

impl Normalizer {
    pub fn new(aliases: HashMap<String, String>, plural_rules: Vec<(String, String)>) -> Self {
        Self {
            aliases,
            plural_rules,
        }
    }

    pub fn from_tables(tables: &EngineTables) -> Self {
        Self::new(tables.aliases.clone(), tables.plural_rules.clone())
    }

    /// Lowercase, trim, resolve aliases, then strip one plural suffix.
    pub fn normalize_skill(&self, raw: &str) -> String {
        let mut normalized = raw.to_lowercase().trim().to_string();

        if let Some(canonical) = self.aliases.get(&normalized) {
            normalized = canonical.clone();
        }

        for (plural, singular) in &self.plural_rules {
            if let Some(stem) = normalized.strip_suffix(plural.as_str()) {
                normalized = format!("{}{}", stem, singular);
                break;
            }
        }

        normalized
    }

    /// Normalize a list, dropping empties and keeping the first occurrence of each skill
    pub fn normalize_skills<I, S>(&self, skills: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();

        for skill in skills {
            let norm = self.normalize_skill(skill.as_ref());
            if !norm.is_empty() && seen.insert(norm.clone()) {
                normalized.push(norm);
            }
        }

        normalized
    }

    /// Alias spellings paired with the canonical skill they normalize to
    pub fn alias_forms(&self) -> Vec<(String, String)> {
        let mut forms: Vec<(String, String)> = self
            .aliases
            .keys()
            .map(|alias| (alias.clone(), self.normalize_skill(alias)))
            .collect();
        forms.sort();
        forms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolution() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize_skill("JS"), "javascript");
        assert_eq!(normalizer.normalize_skill("  k8s "), "kubernetes");
        assert_eq!(normalizer.normalize_skill("ML"), "machine learning");
        assert_eq!(normalizer.normalize_skill("Python"), "python");
    }

    #[test]
    fn test_plural_stripping() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize_skill("APIs"), "api");
        assert_eq!(normalizer.normalize_skill("REST APIs"), "rest api");
        assert_eq!(normalizer.normalize_skill("Databases"), "database");
        assert_eq!(normalizer.normalize_skill("rest"), "rest api");
        assert_eq!(normalizer.normalize_skill("embedded systems"), "embedded system");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = Normalizer::default();
        let samples = [
            "", " ", "JS", "APIs", "api", "apis", "rest", "REST APIs", "nosql", "Node",
            "machine learning basics", "Data Pipelines", "c++", "C#", "  Docker  ",
            "microservices", "ci", "libraries", "Amazon Web Services", "systems",
            "k8s", "sklearn", "Ünïcode Skills", "frameworks frameworks",
        ];

        for sample in samples {
            let once = normalizer.normalize_skill(sample);
            let twice = normalizer.normalize_skill(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }

        for (alias, _) in normalizer.alias_forms() {
            let once = normalizer.normalize_skill(&alias);
            assert_eq!(once, normalizer.normalize_skill(&once));
        }
    }

    #[test]
    fn test_normalize_skills_dedup_keeps_order() {
        let normalizer = Normalizer::default();
        let skills = normalizer.normalize_skills(["Python", "js", "python", "", "JavaScript", "SQL"]);
        assert_eq!(skills, vec!["python", "javascript", "sql"]);
    }

    #[test]
    fn test_empty_input() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize_skill(""), "");
        assert!(normalizer.normalize_skills(Vec::<String>::new()).is_empty());
    }
}
