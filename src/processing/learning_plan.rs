//! Learning resources and the two-week study plan

use crate::error::Result;
use crate::processing::normalizer::Normalizer;
use crate::processing::profile::{Priority, SkillRequirement};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PLAN_DAYS: u8 = 14;
const PLAN_SKILLS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!(
                "Invalid difficulty '{}'. Valid levels: beginner, intermediate, advanced",
                s
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    Course,
    Tutorial,
    Interactive,
    Documentation,
    Video,
    Book,
    Practice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cost {
    #[default]
    Free,
    Freemium,
    Paid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub skill: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub difficulty: Difficulty,
    pub duration: String,
    #[serde(default)]
    pub cost: Cost,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// Resources grouped by skill key, in catalog order
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    entries: Vec<(String, Vec<LearningResource>)>,
}

impl ResourceCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_json(include_str!("../../data/resources.json"))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let resources: Vec<LearningResource> = serde_json::from_str(json)?;
        Ok(Self::from_resources(resources))
    }

    pub fn from_resources(resources: Vec<LearningResource>) -> Self {
        let mut entries: Vec<(String, Vec<LearningResource>)> = Vec::new();
        for resource in resources {
            let key = resource.skill.trim().to_lowercase();
            match entries.iter_mut().find(|(skill, _)| *skill == key) {
                Some((_, list)) => list.push(resource),
                None => entries.push((key, vec![resource])),
            }
        }
        Self { entries }
    }

    /// Re-key on canonical skill names so lookups by normalized gap skills hit
    pub fn normalized(self, normalizer: &Normalizer) -> Self {
        let mut entries: Vec<(String, Vec<LearningResource>)> = Vec::new();
        for (skill, list) in self.entries {
            let key = normalizer.normalize_skill(&skill);
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, existing)) => existing.extend(list),
                None => entries.push((key, list)),
            }
        }
        Self { entries }
    }

    pub fn resources(&self) -> impl Iterator<Item = &LearningResource> {
        self.entries.iter().flat_map(|(_, list)| list.iter())
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(skill, _)| skill.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, list)| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, key: &str) -> Option<&[LearningResource]> {
        self.entries
            .iter()
            .find(|(skill, _)| skill == key)
            .map(|(_, list)| list.as_slice())
    }

    /// Exact key, then the first word ("c++ basics" -> "c++"), then whole-word containment either way
    pub fn resources_for_skill(&self, skill: &str, level: Difficulty, max_results: usize) -> Vec<LearningResource> {
        let normalized = skill.trim().to_lowercase();

        let candidates = self
            .lookup(&normalized)
            .or_else(|| {
                normalized
                    .split_whitespace()
                    .next()
                    .and_then(|first| self.lookup(first))
            })
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(key, _)| !normalized.is_empty() && (contains_words(&normalized, key) || contains_words(key, &normalized)))
                    .map(|(_, list)| list.as_slice())
            })
            .unwrap_or(&[]);

        let mut appropriate: Vec<LearningResource> = candidates
            .iter()
            .filter(|resource| match level {
                Difficulty::Beginner => resource.difficulty == Difficulty::Beginner,
                Difficulty::Intermediate => resource.difficulty <= Difficulty::Intermediate,
                Difficulty::Advanced => true,
            })
            .cloned()
            .collect();

        appropriate.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal));
        appropriate.truncate(max_results);
        appropriate
    }
}

fn contains_words(haystack: &str, needle: &str) -> bool {
    format!(" {} ", haystack).contains(&format!(" {} ", needle))
}

/// A requirement the candidate does not meet, with resources attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    pub weight: u8,
    pub priority: Priority,
    #[serde(default)]
    pub resources: Vec<LearningResource>,
}

impl MissingSkill {
    pub fn from_requirement(requirement: &SkillRequirement, resources: Vec<LearningResource>) -> Self {
        Self {
            skill: requirement.skill.clone(),
            weight: requirement.weight,
            priority: requirement.priority,
            resources,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPlanDay {
    pub day: u8,
    pub task: String,
    pub skill: String,
}

/// Fourteen days over the top three missing skills; leftover days cycle through them for review
pub fn generate_learning_plan(missing: &[MissingSkill]) -> Vec<LearningPlanDay> {
    if missing.is_empty() {
        return Vec::new();
    }

    let mut selected: Vec<&MissingSkill> = missing.iter().collect();
    selected.sort_by(|a, b| {
        b.priority
            .is_required()
            .cmp(&a.priority.is_required())
            .then_with(|| b.weight.cmp(&a.weight))
    });
    selected.truncate(PLAN_SKILLS);

    let mut plan = Vec::with_capacity(PLAN_DAYS as usize);
    let mut day = 1u8;

    for item in &selected {
        let skill_days = if item.priority.is_required() { 5 } else { 3 };
        let first = item.resources.first();
        let second = item.resources.get(1);

        for i in 0..skill_days {
            if day > PLAN_DAYS {
                break;
            }
            let task = match (i, first, second) {
                (0, _, _) => format!("Start learning {}", item.skill),
                (1, Some(resource), _) => format!("Complete: {}", resource.title),
                (2, _, Some(resource)) => format!("Work through: {}", resource.title),
                (3, _, _) => format!("Practice {} with hands-on exercises", item.skill),
                _ => format!("Build a small project using {}", item.skill),
            };
            plan.push(LearningPlanDay {
                day,
                task,
                skill: item.skill.clone(),
            });
            day += 1;
        }
    }

    let mut review = selected.iter().cycle();
    while day <= PLAN_DAYS {
        let Some(item) = review.next() else { break };
        plan.push(LearningPlanDay {
            day,
            task: format!("Review and practice {}", item.skill),
            skill: item.skill.clone(),
        });
        day += 1;
    }

    plan
}
