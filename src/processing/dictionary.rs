//! Canonical skill vocabulary for one analysis

use crate::processing::learning_plan::LearningResource;
use crate::processing::normalizer::Normalizer;
use crate::processing::profile::RoleRequirementSet;
use crate::processing::tables::EngineTables;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of canonical skill strings. Sorted so iteration order is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillDictionary {
    skills: BTreeSet<String>,
}

impl SkillDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    pub fn insert(&mut self, skill: String) -> bool {
        if skill.is_empty() {
            return false;
        }
        self.skills.insert(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkillDictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dictionary = SkillDictionary::new();
        for skill in iter {
            dictionary.insert(skill.into());
        }
        dictionary
    }
}

/// Static vocabulary plus every role requirement and resource skill, all normalized
pub fn build_dictionary(
    roles: &[RoleRequirementSet],
    resources: &[LearningResource],
    tables: &EngineTables,
    normalizer: &Normalizer,
) -> SkillDictionary {
    let mut dictionary = SkillDictionary::new();

    for term in &tables.tech_vocabulary {
        dictionary.insert(normalizer.normalize_skill(term));
    }

    for role in roles {
        for requirement in &role.requirements {
            dictionary.insert(normalizer.normalize_skill(&requirement.skill));
        }
    }

    for resource in resources {
        dictionary.insert(normalizer.normalize_skill(&resource.skill));
    }

    log::debug!(
        "Built skill dictionary with {} entries from {} roles and {} resources",
        dictionary.len(),
        roles.len(),
        resources.len()
    );

    dictionary
}
