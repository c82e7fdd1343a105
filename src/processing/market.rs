//! Market demand data and the advice derived from it

use crate::error::Result;
use crate::processing::normalizer::Normalizer;
use crate::processing::profile::{Priority, SkillRequirement};
use crate::processing::tables::EngineTables;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Market data as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    #[serde(default)]
    pub market_data: BTreeMap<String, u64>,
    #[serde(default)]
    pub skill_combinations: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub emerging_tech: Option<Vec<String>>,
}

impl MarketData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillCategory {
    HighDemand,
    MediumDemand,
    LowDemand,
    Emerging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    fn from_skill_count(count: usize) -> Self {
        if count < 3 {
            ExperienceLevel::Beginner
        } else if count < 8 {
            ExperienceLevel::Intermediate
        } else {
            ExperienceLevel::Advanced
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

/// A missing requirement ranked by market value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedGap {
    pub skill: String,
    pub weight: u8,
    pub priority: Priority,
    pub market_priority: f64,
    pub market_demand: u64,
}

/// Read-only demand table keyed by canonical skill
#[derive(Debug, Clone)]
pub struct MarketDemandProvider {
    demand: HashMap<String, u64>,
    skill_combinations: HashMap<String, Vec<String>>,
    emerging_tech: Vec<String>,
    /// All demand values, highest first
    ranked_demand: Vec<u64>,
    is_fallback: bool,
}

const EMERGING_PATTERNS: &[&str] = &[
    "kubernetes", "terraform", "graphql", "microservices", "pytorch", "spark", "kafka", "prometheus", "grafana",
];

impl MarketDemandProvider {
    /// Build from caller data; an empty table falls back to the built-in one
    pub fn from_data(data: &MarketData, tables: &EngineTables, normalizer: &Normalizer) -> Self {
        if data.market_data.is_empty() {
            log::warn!("Market data is empty, using built-in fallback table");
            return Self::fallback(tables, normalizer);
        }

        let demand = normalize_demand(data.market_data.iter().map(|(k, v)| (k.as_str(), *v)), normalizer);

        let skill_combinations = match &data.skill_combinations {
            Some(combinations) => combinations
                .iter()
                .map(|(skill, related)| {
                    (
                        normalizer.normalize_skill(skill),
                        normalizer.normalize_skills(related),
                    )
                })
                .collect(),
            None => generate_skill_combinations(&demand),
        };

        let emerging_tech = match &data.emerging_tech {
            Some(emerging) => normalizer.normalize_skills(emerging),
            None => detect_emerging_tech(&demand),
        };

        Self::assemble(demand, skill_combinations, emerging_tech, false)
    }

    pub fn fallback(tables: &EngineTables, normalizer: &Normalizer) -> Self {
        let demand = normalize_demand(
            tables.fallback_market.iter().map(|(k, v)| (k.as_str(), *v)),
            normalizer,
        );
        let skill_combinations = generate_skill_combinations(&demand);
        let emerging_tech = detect_emerging_tech(&demand);
        Self::assemble(demand, skill_combinations, emerging_tech, true)
    }

    fn assemble(
        demand: HashMap<String, u64>,
        skill_combinations: HashMap<String, Vec<String>>,
        emerging_tech: Vec<String>,
        is_fallback: bool,
    ) -> Self {
        let mut ranked_demand: Vec<u64> = demand.values().copied().collect();
        ranked_demand.sort_unstable_by(|a, b| b.cmp(a));

        log::debug!(
            "Market provider ready: {} skills, {} combinations, {} emerging{}",
            demand.len(),
            skill_combinations.len(),
            emerging_tech.len(),
            if is_fallback { " (fallback)" } else { "" }
        );

        Self {
            demand,
            skill_combinations,
            emerging_tech,
            ranked_demand,
            is_fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    pub fn len(&self) -> usize {
        self.demand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }

    /// Job-posting count for a skill, 0 when unknown
    pub fn demand(&self, skill: &str) -> u64 {
        self.demand.get(&skill.trim().to_lowercase()).copied().unwrap_or(0)
    }

    pub fn total_demand<S: AsRef<str>>(&self, skills: &[S]) -> u64 {
        skills.iter().map(|s| self.demand(s.as_ref())).sum()
    }

    pub fn emerging_tech(&self) -> &[String] {
        &self.emerging_tech
    }

    pub fn complementary_skills(&self, skill: &str) -> &[String] {
        self.skill_combinations
            .get(&skill.trim().to_lowercase())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Emerging first, then top 20% / top 50% of the demand distribution
    pub fn skill_category(&self, skill: &str) -> SkillCategory {
        let key = skill.trim().to_lowercase();
        if self.emerging_tech.contains(&key) {
            return SkillCategory::Emerging;
        }
        if self.ranked_demand.is_empty() {
            return SkillCategory::LowDemand;
        }

        let threshold_at = |fraction: f64, default: u64| {
            let index = (self.ranked_demand.len() as f64 * fraction).floor() as usize;
            match self.ranked_demand.get(index) {
                Some(&value) if value > 0 => value,
                _ => default,
            }
        };
        let high = threshold_at(0.2, 10000);
        let medium = threshold_at(0.5, 3000);

        let demand = self.demand(&key);
        if demand >= high {
            SkillCategory::HighDemand
        } else if demand >= medium {
            SkillCategory::MediumDemand
        } else {
            SkillCategory::LowDemand
        }
    }

    /// Required first, then weight x ln(1 + demand)
    pub fn prioritize_skill_gaps(&self, missing: &[SkillRequirement]) -> Vec<PrioritizedGap> {
        let mut prioritized: Vec<PrioritizedGap> = missing
            .iter()
            .map(|req| {
                let market_demand = self.demand(&req.skill);
                PrioritizedGap {
                    skill: req.skill.clone(),
                    weight: req.weight,
                    priority: req.priority,
                    market_priority: req.weight as f64 * (1.0 + market_demand as f64).ln(),
                    market_demand,
                }
            })
            .collect();

        prioritized.sort_by(|a, b| {
            b.priority
                .is_required()
                .cmp(&a.priority.is_required())
                .then_with(|| {
                    b.market_priority
                        .partial_cmp(&a.market_priority)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        prioritized
    }

    /// Up to five concrete next steps built from missing skills and market demand
    pub fn technical_improvements(
        &self,
        missing: &[SkillRequirement],
        user_skills: &[String],
        role_category: &str,
        readiness: u8,
        alignment: u8,
    ) -> Vec<String> {
        let mut improvements = Vec::new();
        let category = role_category.to_lowercase();
        let has = |skill: &str| user_skills.iter().any(|s| s == skill);
        let has_any = |skills: &[&str]| user_skills.iter().any(|s| skills.contains(&s.as_str()));
        let first_of = |skills: &[&str]| user_skills.iter().find(|s| skills.contains(&s.as_str())).cloned();

        let level = ExperienceLevel::from_skill_count(user_skills.len());
        let has_frontend = has_any(&["html", "css", "javascript", "react", "vue"]);
        let has_backend = has_any(&["python", "java", "node.js", "sql", "database"]);
        let has_data = has_any(&["python", "sql", "excel", "statistics", "pandas"]);
        let is_ai = category.contains("ai") || category.contains("ml");

        let mut prioritized: Vec<(&SkillRequirement, u64)> =
            missing.iter().map(|req| (req, self.demand(&req.skill))).collect();
        prioritized.sort_by(|a, b| {
            b.0.is_required()
                .cmp(&a.0.is_required())
                .then_with(|| b.1.cmp(&a.1))
        });

        let first_two_missing = missing
            .iter()
            .take(2)
            .map(|r| r.skill.as_str())
            .collect::<Vec<_>>()
            .join(" and ");
        let top_three_user = if user_skills.is_empty() {
            "your existing skills".to_string()
        } else {
            user_skills.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
        };

        // Career progression from what the candidate already has
        if level == ExperienceLevel::Beginner && !user_skills.is_empty() {
            improvements.push(format!(
                "Build on your {} foundation: Create a portfolio project that combines your current skills with {} to demonstrate real-world application.",
                top_three_user, first_two_missing
            ));
        } else if level == ExperienceLevel::Intermediate {
            improvements.push(format!(
                "Advance from {} to senior-level: Focus on {} architecture patterns, best practices, and mentoring others while adding {}.",
                top_three_user,
                category,
                missing.first().map(|r| r.skill.as_str()).unwrap_or("key missing skills")
            ));
        }

        if is_ai {
            if has("python") {
                improvements.push(format!(
                    "Leverage your Python expertise for ML: Your programming foundation positions you well for data science. Next, add {} to become ML-ready.",
                    first_two_missing
                ));
            } else if has("excel") || has("statistics") {
                improvements.push(
                    "Transition from analytics to ML: Your data analysis background is valuable. Add Python programming and ML libraries to expand into machine learning roles."
                        .to_string(),
                );
            }
        }

        for (req, demand) in prioritized.iter().take(3) {
            if let Some(text) = self.contextual_improvement(req, *demand, user_skills, level, has_data) {
                improvements.push(text);
            }
        }

        if is_ai {
            if !has("python") && !has("machine learning") {
                if has_data {
                    improvements.push("Transition to ML programming: Your data analysis foundation is valuable. Add Python and ML libraries to move from Excel/SQL analysis to machine learning development.".to_string());
                } else {
                    improvements.push("Build ML fundamentals: Start with Python programming, then add data manipulation libraries. Your coding foundation will accelerate learning statistical analysis and model training.".to_string());
                }
            }
            if !has("tensorflow") && !has("pytorch") && has("python") {
                improvements.push("Advance to deep learning: With your Python foundation, learn TensorFlow (1,400+ mentions) or PyTorch (1,200+ mentions) for neural network development and modern AI applications.".to_string());
            }
        }

        if category.contains("backend") {
            if !has("rest api") {
                if has_backend {
                    improvements.push(format!(
                        "Advance to API development: Your {} skills are perfect for REST API design. Focus on OpenAPI specs and authentication (JWT, OAuth) for 4,800+ backend roles.",
                        first_of(&["python", "java", "node.js"]).unwrap_or_else(|| "backend".to_string())
                    ));
                } else {
                    improvements.push("Master REST API design - 4,800+ backend roles require API development. Start with basic HTTP concepts, then learn OpenAPI/Swagger specifications.".to_string());
                }
            }
            if !has("docker") && has("python") {
                improvements.push("Containerize your Python apps: Docker (5,832+ jobs) is essential for modern deployment. Start with dockerizing your existing Python projects, then learn Docker Compose.".to_string());
            }
        }

        if category.contains("frontend") {
            if !has("react") && !has("javascript") {
                if has_frontend {
                    improvements.push(format!(
                        "Advance to React: Your {} foundation makes React (6,900+ roles) a natural next step. Focus on hooks, components, and state management.",
                        first_of(&["html", "css", "javascript"]).unwrap_or_else(|| "web".to_string())
                    ));
                } else {
                    improvements.push("Master React.js - 6,900+ frontend roles require React. Start with JavaScript fundamentals, then learn React components and hooks.".to_string());
                }
            }
            if !has("typescript") && has("javascript") {
                improvements.push("Upgrade to TypeScript: Your JavaScript knowledge makes TypeScript (3,200+ roles) an easy transition. Add type safety and enhanced tooling to your existing projects.".to_string());
            }
        }

        if category.contains("data") {
            if !has("sql") {
                if has("excel") {
                    improvements.push("Transition from Excel to SQL: Your spreadsheet analysis skills translate well to database querying. SQL (18,322+ roles) will expand your data capabilities from files to enterprise databases.".to_string());
                } else if has("python") {
                    improvements.push("Add SQL to your Python toolkit: Database skills complement your programming foundation. Learn SQL for data extraction, then use pandas for analysis - a powerful combination for 18,322+ data roles.".to_string());
                } else {
                    improvements.push("Master SQL - 18,322+ data roles require SQL proficiency. Essential for data extraction, joins, aggregations, and working with enterprise databases.".to_string());
                }
            }
            if !has("pandas") && has("python") {
                improvements.push("Leverage Python for data: Add pandas (2,100+ roles) to transform your programming skills into data analysis capabilities. Perfect progression from general Python to specialized data manipulation.".to_string());
            }
        }

        if readiness < 50 {
            if level == ExperienceLevel::Beginner {
                improvements.push(format!(
                    "Build foundational projects: Create 2-3 projects showcasing {}. Start simple, focus on clean code, and document your learning process.",
                    first_two_missing
                ));
            } else {
                improvements.push(format!(
                    "Strengthen technical depth: Build {} projects demonstrating mastery of required technologies. Add unit tests, CI/CD, and production deployment.",
                    if level == ExperienceLevel::Intermediate { "comprehensive" } else { "enterprise-level" }
                ));
            }
        }

        if alignment < 40 {
            let advice = if user_skills.len() > 3 {
                "Optimize skill presentation: Your technical abilities are strong, but alignment with job requirements needs work."
            } else {
                "Build targeted skills: Focus on the specific technologies mentioned in job descriptions."
            };
            improvements.push(format!(
                "{} Review JD keywords and ensure your resume includes exact terminology from {} job postings.",
                advice, category
            ));
        }

        let high_value = user_skills.iter().find(|s| self.demand(s) >= 5000);
        if let (Some(strong), Some((top, demand))) = (high_value, prioritized.first()) {
            improvements.push(format!(
                "Leverage your {} expertise: Combine with missing skills like {} to target {}+ opportunities.",
                strong,
                top.skill,
                format_count(*demand as f64)
            ));
        }

        improvements.truncate(5);
        improvements
    }

    fn contextual_improvement(
        &self,
        req: &SkillRequirement,
        demand: u64,
        user_skills: &[String],
        level: ExperienceLevel,
        has_data: bool,
    ) -> Option<String> {
        let skill = req.skill.as_str();
        let has = |s: &str| user_skills.iter().any(|u| u == s);
        let complementary = self.complementary_skills(skill);
        let owned_complement = complementary.iter().find(|c| has(c.as_str()));
        let demand_text = format_count(demand as f64);

        if req.is_required() {
            if skill == "statistics" && has_data {
                let base = user_skills
                    .iter()
                    .find(|s| ["python", "excel", "sql"].contains(&s.as_str()))
                    .map(|s| s.as_str())
                    .unwrap_or("existing tools");
                return Some(format!(
                    "Master statistics - essential for {}+ ML roles. Your data background with {} provides a great foundation for statistical analysis.",
                    demand_text, base
                ));
            }
            if skill == "pandas" && has("python") {
                return Some(format!(
                    "Learn pandas data manipulation - required skill that pairs perfectly with your Python knowledge. Build projects analyzing real datasets to demonstrate proficiency for {}+ opportunities.",
                    demand_text
                ));
            }
            if skill == "numpy" && (has("python") || has("pandas")) {
                return Some("Master NumPy for numerical computing - foundation for all Python data work. Your existing Python skills make this a natural next step for ML roles.".to_string());
            }
            if let Some(base) = owned_complement {
                return Some(format!(
                    "Develop {} - required skill that builds on your {} experience. {}+ roles seek this combination.",
                    skill, base, demand_text
                ));
            }

            let first_user = user_skills.first().map(|s| s.as_str()).unwrap_or("existing");
            return Some(if demand >= 10000 {
                format!(
                    "Master {} - critical skill with {}+ job mentions. Focus on practical projects to demonstrate {} proficiency alongside your {} skills.",
                    skill, demand_text, skill, first_user
                )
            } else if demand >= 3000 {
                format!(
                    "Learn {} - required for this role with {}+ market opportunities. Consider combining with {} for stronger positioning.",
                    skill,
                    demand_text,
                    complementary.first().map(|s| s.as_str()).unwrap_or("related tools")
                )
            } else {
                format!(
                    "Acquire {} - required skill. Build {} projects demonstrating {} proficiency to strengthen your profile.",
                    skill,
                    if level == ExperienceLevel::Beginner { "simple" } else { "comprehensive" },
                    skill
                )
            });
        }

        if self.skill_category(skill) == SkillCategory::Emerging {
            return Some(format!(
                "Explore {} - emerging technology with growing demand. Your {} background positions you well for early adoption opportunities.",
                skill,
                level.as_str()
            ));
        }

        if demand >= 5000 {
            let existing = if user_skills.is_empty() {
                "skill set".to_string()
            } else {
                user_skills.iter().take(2).cloned().collect::<Vec<_>>().join(" and ")
            };
            return Some(format!(
                "Develop {} proficiency - {}+ job postings require this. Combines well with your existing {}.",
                skill, demand_text, existing
            ));
        }

        None
    }
}

/// Call-scoped memo of demand lookups with the industry weight applied
pub struct DemandLookup<'a> {
    provider: &'a MarketDemandProvider,
    industry_weight: f64,
    cache: HashMap<String, f64>,
}

impl<'a> DemandLookup<'a> {
    pub fn new(provider: &'a MarketDemandProvider, industry_weight: f64) -> Self {
        Self {
            provider,
            industry_weight,
            cache: HashMap::new(),
        }
    }

    /// Demand multiplied by the role category's industry weight
    pub fn weighted(&mut self, skill: &str) -> f64 {
        if let Some(&value) = self.cache.get(skill) {
            return value;
        }
        let value = self.provider.demand(skill) as f64 * self.industry_weight;
        self.cache.insert(skill.to_string(), value);
        value
    }
}

/// Format a count with thousands separators, e.g. 22016 -> "22,016"
pub fn format_count(value: f64) -> String {
    let rounded = value.round().max(0.0) as u64;
    let digits = rounded.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(ch);
    }
    formatted
}

fn normalize_demand<'s>(entries: impl Iterator<Item = (&'s str, u64)>, normalizer: &Normalizer) -> HashMap<String, u64> {
    let mut demand: HashMap<String, u64> = HashMap::new();
    for (skill, count) in entries {
        let key = normalizer.normalize_skill(skill);
        if key.is_empty() {
            continue;
        }
        let entry = demand.entry(key).or_insert(0);
        *entry = entry.saturating_add(count);
    }
    demand
}

fn generate_skill_combinations(demand: &HashMap<String, u64>) -> HashMap<String, Vec<String>> {
    let present = |skill: &str| demand.get(skill).copied().unwrap_or(0) > 0;
    let ecosystems: [(&str, &[&str], &[&str]); 9] = [
        ("python", &["python"], &["pandas", "numpy", "scikit-learn", "sql", "git"]),
        ("javascript", &["javascript"], &["react", "node.js", "typescript", "html", "css", "git"]),
        ("java", &["java"], &["spring", "maven", "git", "sql", "docker"]),
        (
            "machine learning",
            &["machine learning", "python"],
            &["python", "pandas", "scikit-learn", "tensorflow", "jupyter notebooks"],
        ),
        ("data analysis", &["data analysis", "python"], &["python", "sql", "pandas", "excel", "tableau"]),
        ("backend", &["python", "javascript"], &["python", "sql", "rest api", "docker", "git"]),
        ("frontend", &["javascript", "html"], &["javascript", "react", "html", "css", "git"]),
        ("devops", &["docker", "kubernetes"], &["docker", "kubernetes", "aws", "linux", "git", "ci/cd"]),
        ("cloud", &["aws", "azure"], &["aws", "docker", "kubernetes", "terraform", "linux"]),
    ];

    ecosystems
        .iter()
        .filter(|(_, triggers, _)| triggers.iter().any(|t| present(t)))
        .map(|(key, _, related)| {
            (
                key.to_string(),
                related.iter().filter(|s| present(s)).map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}

/// Low-count skills (bottom 30) that match known emerging technologies
fn detect_emerging_tech(demand: &HashMap<String, u64>) -> Vec<String> {
    let mut ascending: Vec<(&String, &u64)> = demand.iter().collect();
    ascending.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

    ascending
        .into_iter()
        .take(30)
        .filter(|(skill, _)| EMERGING_PATTERNS.iter().any(|p| skill.contains(p)))
        .map(|(skill, _)| skill.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with(entries: &[(&str, u64)]) -> MarketDemandProvider {
        let data = MarketData {
            market_data: entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            ..MarketData::default()
        };
        MarketDemandProvider::from_data(&data, &EngineTables::default(), &Normalizer::default())
    }

    #[test]
    fn test_fallback_when_empty() {
        let provider = MarketDemandProvider::from_data(
            &MarketData::default(),
            &EngineTables::default(),
            &Normalizer::default(),
        );
        assert!(provider.is_fallback());
        assert_eq!(provider.len(), 10);
        assert_eq!(provider.demand("python"), 22016);
        assert_eq!(provider.demand("Node.js"), 5800);
        assert_eq!(provider.demand("cobol"), 0);
    }

    #[test]
    fn test_keys_are_normalized() {
        let provider = provider_with(&[("REST APIs", 4500), ("Databases", 8900), ("JS", 100), ("javascript", 9661)]);
        assert_eq!(provider.demand("rest api"), 4500);
        assert_eq!(provider.demand("database"), 8900);
        assert_eq!(provider.demand("javascript"), 9761);
    }

    #[test]
    fn test_parse_market_json() {
        let json = r#"{"marketData": {"python": 100, "kafka": 5}, "emergingTech": ["Kafka"]}"#;
        let data = MarketData::from_json(json).unwrap();
        let provider = MarketDemandProvider::from_data(&data, &EngineTables::default(), &Normalizer::default());
        assert!(!provider.is_fallback());
        assert_eq!(provider.emerging_tech(), &["kafka".to_string()]);

        assert!(MarketData::from_json(r#"{"marketData": {"python": -1}}"#).is_err());
    }

    #[test]
    fn test_generated_combinations() {
        let provider = MarketDemandProvider::fallback(&EngineTables::default(), &Normalizer::default());
        assert_eq!(provider.complementary_skills("python"), &["sql".to_string(), "git".to_string()]);
        assert!(provider.complementary_skills("javascript").contains(&"react".to_string()));
        assert!(provider.complementary_skills("cobol").is_empty());
    }

    #[test]
    fn test_skill_category() {
        let provider = provider_with(&[
            ("python", 22000),
            ("sql", 18000),
            ("java", 12000),
            ("excel", 9000),
            ("git", 6000),
            ("docker", 5000),
            ("react", 4000),
            ("html", 3000),
            ("css", 2000),
            ("kubernetes", 100),
        ]);

        assert_eq!(provider.skill_category("python"), SkillCategory::HighDemand);
        assert_eq!(provider.skill_category("docker"), SkillCategory::MediumDemand);
        assert_eq!(provider.skill_category("css"), SkillCategory::LowDemand);
        assert_eq!(provider.skill_category("kubernetes"), SkillCategory::Emerging);
    }

    #[test]
    fn test_prioritize_required_first() {
        let provider = MarketDemandProvider::fallback(&EngineTables::default(), &Normalizer::default());
        let missing = vec![
            SkillRequirement::preferred("python", 2).unwrap(),
            SkillRequirement::required("git", 1).unwrap(),
            SkillRequirement::required("sql", 2).unwrap(),
        ];
        let prioritized = provider.prioritize_skill_gaps(&missing);
        let order: Vec<&str> = prioritized.iter().map(|g| g.skill.as_str()).collect();
        assert_eq!(order, vec!["sql", "git", "python"]);
        assert_eq!(prioritized[0].market_demand, 18322);
    }

    #[test]
    fn test_technical_improvements_capped() {
        let provider = MarketDemandProvider::fallback(&EngineTables::default(), &Normalizer::default());
        let missing = vec![
            SkillRequirement::required("sql", 2).unwrap(),
            SkillRequirement::required("statistics", 2).unwrap(),
            SkillRequirement::preferred("pandas", 1).unwrap(),
        ];
        let user = vec!["python".to_string()];
        let improvements = provider.technical_improvements(&missing, &user, "Data", 20, 10);

        assert!(!improvements.is_empty());
        assert!(improvements.len() <= 5);
        assert!(improvements[0].starts_with("Build on your python foundation"));
    }

    #[test]
    fn test_demand_lookup_applies_weight() {
        let provider = MarketDemandProvider::fallback(&EngineTables::default(), &Normalizer::default());
        let mut lookup = DemandLookup::new(&provider, 1.5);
        assert_eq!(lookup.weighted("git"), 9630.0);
        assert_eq!(lookup.weighted("git"), 9630.0);
        assert_eq!(lookup.weighted("cobol"), 0.0);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(22016.0), "22,016");
        assert_eq!(format_count(575843.0), "575,843");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000000.0), "1,000,000");
        assert_eq!(format_count(0.0), "0");
    }
}
