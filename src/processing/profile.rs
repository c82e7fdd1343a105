//! Candidate, role and analysis input types

use crate::error::{Result, SkillGapError};
use crate::processing::dictionary::SkillDictionary;
use crate::processing::market::MarketDemandProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use strsim::jaro_winkler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Required,
    Preferred,
}

impl Priority {
    pub fn is_required(&self) -> bool {
        matches!(self, Priority::Required)
    }

    /// Multiplier used when ranking gaps
    pub fn rank_factor(&self) -> f64 {
        match self {
            Priority::Required => 2.0,
            Priority::Preferred => 1.0,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Required => write!(f, "required"),
            Priority::Preferred => write!(f, "preferred"),
        }
    }
}

/// A single skill a role asks for. Weight is 1 (normal) or 2 (core).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSkillRequirement")]
pub struct SkillRequirement {
    pub skill: String,
    pub weight: u8,
    pub priority: Priority,
}

#[derive(Deserialize)]
struct RawSkillRequirement {
    skill: String,
    weight: i64,
    priority: Priority,
}

impl TryFrom<RawSkillRequirement> for SkillRequirement {
    type Error = SkillGapError;

    fn try_from(raw: RawSkillRequirement) -> Result<Self> {
        if raw.weight != 1 && raw.weight != 2 {
            return Err(SkillGapError::InvalidInput(format!(
                "Requirement '{}' has weight {}; expected 1 or 2",
                raw.skill, raw.weight
            )));
        }
        SkillRequirement::new(&raw.skill, raw.weight as u8, raw.priority)
    }
}

impl SkillRequirement {
    pub fn new(skill: &str, weight: u8, priority: Priority) -> Result<Self> {
        if weight != 1 && weight != 2 {
            return Err(SkillGapError::InvalidInput(format!(
                "Requirement '{}' has weight {}; expected 1 or 2",
                skill, weight
            )));
        }
        if skill.trim().is_empty() {
            return Err(SkillGapError::InvalidInput("Requirement has an empty skill name".to_string()));
        }
        Ok(Self {
            skill: skill.to_string(),
            weight,
            priority,
        })
    }

    pub fn required(skill: &str, weight: u8) -> Result<Self> {
        Self::new(skill, weight, Priority::Required)
    }

    pub fn preferred(skill: &str, weight: u8) -> Result<Self> {
        Self::new(skill, weight, Priority::Preferred)
    }

    pub fn is_required(&self) -> bool {
        self.priority.is_required()
    }
}

/// One role in the catalog together with its requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRequirementSet {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<SkillRequirement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleCatalog {
    pub roles: Vec<RoleRequirementSet>,
}

impl RoleCatalog {
    /// Catalog bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(include_str!("../../data/roles.json"))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let roles: Vec<RoleRequirementSet> = serde_json::from_str(json)?;
        Ok(Self { roles })
    }

    pub fn find(&self, id: &str) -> Result<&RoleRequirementSet> {
        if let Some(role) = self.roles.iter().find(|r| r.id.eq_ignore_ascii_case(id)) {
            return Ok(role);
        }

        let suggestion = self
            .roles
            .iter()
            .map(|r| (r, jaro_winkler(&r.id, &id.to_lowercase())))
            .filter(|(_, score)| *score >= 0.8)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        match suggestion {
            Some((role, _)) => Err(SkillGapError::InvalidInput(format!(
                "Unknown role '{}'. Did you mean '{}'?",
                id, role.id
            ))),
            None => Err(SkillGapError::InvalidInput(format!("Unknown role '{}'", id))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

impl Experience {
    pub fn new(kind: &str, description: &str) -> Self {
        Self {
            kind: kind.to_string(),
            duration: String::new(),
            description: description.to_string(),
        }
    }

    /// Description when present, otherwise the experience type
    pub fn summary(&self) -> &str {
        if self.description.is_empty() {
            &self.kind
        } else {
            &self.description
        }
    }
}

/// What the candidate declared about themselves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub coursework: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub is_student: bool,
    #[serde(default, alias = "year")]
    pub year_level: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
}

/// Everything one analysis needs. The three engine entry points share this shape.
#[derive(Debug, Clone)]
pub struct AnalysisInput<'a> {
    pub user_skills: Vec<String>,
    pub user_coursework: Vec<String>,
    pub user_experience: Vec<Experience>,
    pub resume_text: Option<String>,
    pub role_requirements: Vec<SkillRequirement>,
    pub role_category: String,
    pub role_title: String,
    pub jd_text: String,
    pub jd_title: String,
    pub dictionary: &'a SkillDictionary,
    pub is_student: bool,
    pub year_level: Option<String>,
    pub major: Option<String>,
    /// Overrides the engine's market data for this call
    pub market: Option<&'a MarketDemandProvider>,
}

pub type ScoringInput<'a> = AnalysisInput<'a>;
pub type GapAnalysisInput<'a> = AnalysisInput<'a>;
pub type DetailedAnalysisInput<'a> = AnalysisInput<'a>;

impl<'a> AnalysisInput<'a> {
    pub fn new(jd_title: &str, jd_text: &str, dictionary: &'a SkillDictionary) -> Self {
        Self {
            user_skills: Vec::new(),
            user_coursework: Vec::new(),
            user_experience: Vec::new(),
            resume_text: None,
            role_requirements: Vec::new(),
            role_category: "general".to_string(),
            role_title: jd_title.to_string(),
            jd_text: jd_text.to_string(),
            jd_title: jd_title.to_string(),
            dictionary,
            is_student: false,
            year_level: None,
            major: None,
            market: None,
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_skills.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn with_profile(mut self, profile: &CandidateProfile) -> Self {
        self.user_skills.extend(profile.skills.iter().cloned());
        self.user_coursework.extend(profile.coursework.iter().cloned());
        self.user_experience.extend(profile.experience.iter().cloned());
        self.is_student = profile.is_student;
        self.year_level = profile.year_level.clone();
        self.major = profile.major.clone();
        self
    }

    /// Attach résumé text; blank text counts as no résumé
    pub fn with_resume(mut self, text: &str) -> Self {
        self.resume_text = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self
    }

    pub fn with_role(mut self, role: &RoleRequirementSet) -> Self {
        self.role_requirements = role.requirements.clone();
        self.role_category = role.category.clone();
        self.role_title = role.title.clone();
        self
    }

    pub fn with_requirements(mut self, requirements: Vec<SkillRequirement>) -> Self {
        self.role_requirements = requirements;
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.role_category = category.to_string();
        self
    }

    pub fn with_market(mut self, market: &'a MarketDemandProvider) -> Self {
        self.market = Some(market);
        self
    }

    pub fn resume(&self) -> Option<&str> {
        self.resume_text.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn has_resume(&self) -> bool {
        self.resume().is_some()
    }

    /// Requirements built in code bypass the deserializer, so check them again here
    pub fn validate(&self) -> Result<()> {
        for req in &self.role_requirements {
            if req.weight != 1 && req.weight != 2 {
                return Err(SkillGapError::InvalidInput(format!(
                    "Requirement '{}' has weight {}; expected 1 or 2",
                    req.skill, req.weight
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_deserialization() {
        let json = r#"{"skill": "python", "weight": 2, "priority": "required"}"#;
        let req: SkillRequirement = serde_json::from_str(json).unwrap();
        assert_eq!(req.skill, "python");
        assert_eq!(req.weight, 2);
        assert!(req.is_required());
    }

    #[test]
    fn test_requirement_rejects_bad_weight() {
        let json = r#"{"skill": "python", "weight": 3, "priority": "required"}"#;
        assert!(serde_json::from_str::<SkillRequirement>(json).is_err());

        let json = r#"{"skill": "python", "weight": -1, "priority": "required"}"#;
        assert!(serde_json::from_str::<SkillRequirement>(json).is_err());

        assert!(SkillRequirement::required("python", 0).is_err());
    }

    #[test]
    fn test_requirement_rejects_unknown_priority() {
        let json = r#"{"skill": "python", "weight": 1, "priority": "optional"}"#;
        assert!(serde_json::from_str::<SkillRequirement>(json).is_err());
    }

    #[test]
    fn test_builtin_catalog_lookup() {
        let catalog = RoleCatalog::builtin().unwrap();
        assert!(!catalog.roles.is_empty());

        let role = catalog.find("ai-ml-intern").unwrap();
        assert_eq!(role.category, "AI/ML");
        assert!(role.requirements.iter().any(|r| r.skill == "python" && r.weight == 2));
    }

    #[test]
    fn test_catalog_suggests_close_role() {
        let catalog = RoleCatalog::builtin().unwrap();
        let err = catalog.find("ai-ml-inter").unwrap_err().to_string();
        assert!(err.contains("Did you mean 'ai-ml-intern'"));

        let err = catalog.find("zzzz").unwrap_err().to_string();
        assert!(!err.contains("Did you mean"));
    }

    #[test]
    fn test_profile_deserialization_defaults() {
        let json = r#"{"skills": ["Python"], "experience": [{"type": "Internship"}], "year": "Junior"}"#;
        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.skills, vec!["Python"]);
        assert!(profile.coursework.is_empty());
        assert_eq!(profile.experience[0].kind, "Internship");
        assert_eq!(profile.experience[0].summary(), "Internship");
        assert_eq!(profile.year_level.as_deref(), Some("Junior"));
        assert!(!profile.is_student);
    }

    #[test]
    fn test_blank_resume_is_absent() {
        let dictionary = SkillDictionary::default();
        let input = AnalysisInput::new("Intern", "", &dictionary).with_resume("   \n");
        assert!(!input.has_resume());
    }
}
