//! Natural-language reasons for the top skill gaps

use crate::error::Result;
use crate::processing::market::{format_count, MarketDemandProvider, PrioritizedGap};
use crate::processing::profile::Priority;
use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_JD_TASKS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillExplanation {
    pub skill: String,
    pub reason: String,
    pub market_demand: u64,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapSummary {
    pub total: usize,
    pub critical: usize,
    pub learning_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketExplanations {
    pub explanations: Vec<SkillExplanation>,
    pub skill_gaps: SkillGapSummary,
}

pub struct ExplanationGenerator<'a> {
    market: &'a MarketDemandProvider,
    top_n: usize,
    bullet_regex: Regex,
    sentence_regex: Regex,
}

impl<'a> ExplanationGenerator<'a> {
    pub fn new(market: &'a MarketDemandProvider, top_n: usize) -> Result<Self> {
        Ok(Self {
            market,
            top_n,
            bullet_regex: Regex::new(r"^\s*(?:[•·*\-]|\d+[.)])\s+(.+)$")?,
            sentence_regex: Regex::new(r"(?i)[^.!?\n]*\byou(?:'ll|’ll| will)\b[^.!?\n]*")?,
        })
    }

    /// Reasons for the top prioritized gaps plus the overall learning-path summary
    pub fn generate(
        &self,
        prioritized: &[PrioritizedGap],
        user_skills: &[String],
        role_category: &str,
        jd_text: &str,
    ) -> MarketExplanations {
        let tasks = self.extract_jd_tasks(jd_text);

        let explanations = prioritized
            .iter()
            .take(self.top_n)
            .map(|gap| {
                let mut reason = self.skill_reason(gap, user_skills, role_category);
                match tasks.iter().find(|task| mentions(task, &gap.skill)) {
                    Some(task) => {
                        reason.push_str(&format!(" In this role you'd use it to: {}.", task));
                    }
                    None => {
                        if let Some(use_case) = category_use_case(role_category) {
                            reason.push(' ');
                            reason.push_str(use_case);
                        }
                    }
                }
                SkillExplanation {
                    skill: gap.skill.clone(),
                    reason,
                    market_demand: gap.market_demand,
                    priority: gap.priority,
                }
            })
            .collect();

        let critical = prioritized.iter().filter(|g| g.priority.is_required()).count();

        MarketExplanations {
            explanations,
            skill_gaps: SkillGapSummary {
                total: prioritized.len(),
                critical,
                learning_path: learning_path_narrative(user_skills, role_category, critical),
            },
        }
    }

    /// Bullet points, numbered items and "you will" sentences from the JD, at most five
    pub fn extract_jd_tasks(&self, jd_text: &str) -> Vec<String> {
        let mut tasks: Vec<String> = Vec::new();

        for line in jd_text.lines() {
            if let Some(caps) = self.bullet_regex.captures(line) {
                push_task(&mut tasks, &caps[1]);
            } else {
                for m in self.sentence_regex.find_iter(line) {
                    push_task(&mut tasks, m.as_str());
                }
            }
            if tasks.len() >= MAX_JD_TASKS {
                break;
            }
        }

        tasks.truncate(MAX_JD_TASKS);
        tasks
    }

    fn skill_reason(&self, gap: &PrioritizedGap, user_skills: &[String], role_category: &str) -> String {
        let has = |s: &str| user_skills.iter().any(|u| u == s);
        let skill = gap.skill.as_str();
        let demand = format_count(gap.market_demand as f64);

        match skill {
            "statistics" => {
                if let Some(base) = user_skills.iter().find(|s| *s == "python" || *s == "excel") {
                    format!("Statistics is essential for {}+ ML/data roles. Your existing {} foundation makes learning statistical concepts more practical. You'll need statistics for hypothesis testing, probability distributions, and validating model performance.", demand, base)
                } else {
                    format!("Statistics is required for {}+ data science positions. It's fundamental for understanding data patterns, making predictions, and validating analysis results. Without statistics, you can't properly interpret data or build reliable models.", demand)
                }
            }
            "pandas" => {
                if has("python") {
                    format!("Pandas is the industry standard for data manipulation in Python, required by {}+ roles. Since you already know Python, pandas is your natural next step for data cleaning, transformation, and analysis. It's essential for preparing datasets before machine learning.", demand)
                } else {
                    format!("Pandas is Python's primary data manipulation library, needed for {}+ data roles. It handles data cleaning, filtering, grouping, and reshaping - tasks that are 80% of any data science project. Learning pandas without Python first would be very difficult.", demand)
                }
            }
            "numpy" => {
                if has("python") || has("pandas") {
                    format!("NumPy provides the mathematical foundation for all Python data work, powering {}+ scientific computing roles. Your {} knowledge makes this a logical next step. NumPy handles arrays, linear algebra, and numerical operations that ML libraries depend on.", demand, if has("pandas") { "pandas" } else { "Python" })
                } else {
                    format!("NumPy is the mathematical backbone of Python data science, essential for {}+ technical roles. It provides efficient array operations and mathematical functions. Most ML libraries (scikit-learn, TensorFlow) are built on NumPy, making it unavoidable for serious data work.", demand)
                }
            }
            "sql" => {
                if has("excel") {
                    format!("SQL expands your data analysis from spreadsheets to enterprise databases, opening {}+ opportunities. Your Excel skills with formulas and data manipulation translate well to SQL queries. Most real-world data lives in databases, not files.", demand)
                } else if has("python") {
                    format!("SQL complements your Python programming by handling data extraction from databases, needed for {}+ roles. While Python processes data, SQL gets the data from where it's stored. This combination is powerful for end-to-end data workflows.", demand)
                } else {
                    format!("SQL is the universal language for working with databases, required by {}+ positions across all tech roles. Every company stores data in databases, and SQL is how you access, filter, join, and analyze that data. It's foundational regardless of your programming language.", demand)
                }
            }
            "machine learning" | "machine learning basics" => {
                if has("python") && has("statistics") {
                    format!("With your Python and statistics foundation, machine learning is your natural career progression into {}+ AI roles. ML combines programming and statistics to build predictive models. Your existing skills make learning algorithms and model training much easier.", demand)
                } else if has("python") {
                    format!("Machine learning leverages your Python skills for building predictive models, opening {}+ AI opportunities. However, you'll also need statistics knowledge to understand how algorithms work and validate model performance.", demand)
                } else {
                    format!("Machine learning is driving {}+ job opportunities in AI. It requires both programming (usually Python) and statistics to build models that learn from data. This field is growing rapidly but requires strong technical foundations.", demand)
                }
            }
            "javascript" => {
                if has("html") || has("css") {
                    format!("JavaScript completes your web development foundation, enabling {}+ frontend roles. Your HTML/CSS skills handle structure and styling; JavaScript adds interactivity and dynamic behavior. Modern web development is impossible without all three.", demand)
                } else {
                    format!("JavaScript powers {}+ web development positions and is essential for interactive websites. It runs in browsers and servers (Node.js), making it versatile for full-stack development. It's one of the most in-demand programming languages.", demand)
                }
            }
            "react" | "react.js" => {
                if has("javascript") {
                    format!("React builds on your JavaScript knowledge to create modern user interfaces, needed for {}+ frontend roles. It's the most popular UI framework, used by Facebook, Netflix, and countless companies. Your JavaScript foundation makes React a natural progression.", demand)
                } else {
                    format!("React is the leading framework for building user interfaces, powering {}+ frontend positions. However, React requires solid JavaScript fundamentals first. Learning React without JavaScript would be like learning calculus without algebra.", demand)
                }
            }
            _ => {
                let owned_complement = self
                    .market
                    .complementary_skills(skill)
                    .iter()
                    .find(|c| has(c.as_str()));

                match (gap.priority, owned_complement) {
                    (Priority::Required, Some(base)) => format!(
                        "{} is required for this role and appears in {}+ job postings. Your existing {} experience provides a good foundation for learning {}. These skills often work together in real projects.",
                        skill, demand, base, skill
                    ),
                    (Priority::Required, None) => format!(
                        "{} is a required skill for this position, appearing in {}+ job listings in the {} field. This skill is essential for performing core job responsibilities and is non-negotiable for most employers in this role.",
                        skill, demand, role_category
                    ),
                    (Priority::Preferred, _) => format!(
                        "{} enhances your profile for {}+ opportunities in {}. While not always required, having this skill significantly improves your competitiveness and may qualify you for higher-level positions or specialized projects.",
                        skill, demand, role_category
                    ),
                }
            }
        }
    }
}

fn push_task(tasks: &mut Vec<String>, raw: &str) {
    let task = raw.trim().trim_end_matches(['.', ';', ',']).trim();
    if task.chars().count() < 8 || tasks.iter().any(|t| t == task) {
        return;
    }
    tasks.push(task.to_string());
}

fn mentions(task: &str, skill: &str) -> bool {
    let task = task.to_lowercase();
    task.match_indices(skill).any(|(start, matched)| {
        let before = task[..start].chars().next_back();
        let after = task[start + matched.len()..].chars().next();
        let boundary = |c: Option<char>| c.map_or(true, |c| !(c.is_alphanumeric() || c == '+' || c == '#'));
        boundary(before) && boundary(after)
    })
}

fn category_use_case(role_category: &str) -> Option<&'static str> {
    let category = role_category.to_lowercase();
    if category.contains("ai") || category.contains("ml") {
        Some("A typical use case in AI/ML roles: preparing training data and evaluating models.")
    } else if category.contains("data") {
        Some("A typical use case in data roles: cleaning, querying and reporting on datasets.")
    } else if category.contains("frontend") {
        Some("A typical use case in frontend roles: building and testing user interfaces.")
    } else if category.contains("backend") {
        Some("A typical use case in backend roles: designing APIs and the services behind them.")
    } else if category.contains("devops") {
        Some("A typical use case in DevOps roles: automating deployments and infrastructure.")
    } else if category.contains("robotics") {
        Some("A typical use case in robotics roles: programming sensors and control loops on real hardware.")
    } else if category.contains("game") {
        Some("A typical use case in game development roles: scripting gameplay and engine tooling.")
    } else {
        None
    }
}

/// Overall study direction for the role category
pub fn learning_path_narrative(user_skills: &[String], role_category: &str, critical: usize) -> String {
    let has = |s: &str| user_skills.iter().any(|u| u == s);
    let category = role_category.to_lowercase();

    let path = if category.contains("ai") || category.contains("ml") {
        if has("python") {
            "Build on your Python foundation: Learn statistics and pandas for data manipulation, then dive into machine learning algorithms and libraries like scikit-learn."
        } else if has("excel") || has("statistics") {
            "Transition from analysis to programming: Start with Python fundamentals, then add data libraries (pandas, numpy) to complement your analytical background."
        } else {
            "Start with fundamentals: Learn Python programming first, then statistics, followed by data manipulation (pandas/numpy), and finally machine learning concepts."
        }
    } else if category.contains("data") {
        if has("python") {
            "Specialize your Python skills: Focus on data-specific libraries (pandas for manipulation, matplotlib for visualization) and SQL for database access."
        } else if has("excel") {
            "Expand beyond spreadsheets: Learn SQL for database queries, then Python with pandas for more powerful data manipulation and automation."
        } else {
            "Build data fundamentals: Start with SQL for data extraction, learn Excel/Python for analysis, then advance to specialized data tools and visualization."
        }
    } else if category.contains("frontend") {
        if has("html") && has("css") {
            "Complete the web trinity: Add JavaScript for interactivity, then learn React for modern component-based development."
        } else {
            "Master web fundamentals: Start with HTML for structure, CSS for styling, JavaScript for behavior, then frameworks like React."
        }
    } else {
        return format!(
            "Focus on the {} required skills first, then add preferred skills to strengthen your profile for {} roles.",
            critical, category
        );
    };

    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalizer::Normalizer;
    use crate::processing::tables::EngineTables;

    fn gap(skill: &str, priority: Priority, demand: u64) -> PrioritizedGap {
        PrioritizedGap {
            skill: skill.to_string(),
            weight: 1,
            priority,
            market_priority: (1.0 + demand as f64).ln(),
            market_demand: demand,
        }
    }

    fn market() -> MarketDemandProvider {
        MarketDemandProvider::fallback(&EngineTables::default(), &Normalizer::default())
    }

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_statistics_narrative_uses_existing_foundation() {
        let market = market();
        let generator = ExplanationGenerator::new(&market, 5).unwrap();
        let result = generator.generate(
            &[gap("statistics", Priority::Required, 6200)],
            &skills(&["excel", "python"]),
            "Data",
            "",
        );

        let reason = &result.explanations[0].reason;
        assert!(reason.starts_with("Statistics is essential for 6,200+ ML/data roles. Your existing excel foundation"));
        assert!(reason.ends_with("A typical use case in data roles: cleaning, querying and reporting on datasets."));
    }

    #[test]
    fn test_generic_reason_mentions_complementary_skill() {
        let market = market();
        let generator = ExplanationGenerator::new(&market, 5).unwrap();
        let result = generator.generate(
            &[gap("java", Priority::Required, 12482)],
            &skills(&["git"]),
            "general",
            "",
        );

        assert_eq!(
            result.explanations[0].reason,
            "java is required for this role and appears in 12,482+ job postings. Your existing git experience provides a good foundation for learning java. These skills often work together in real projects."
        );
    }

    #[test]
    fn test_preferred_reason_and_top_n() {
        let market = market();
        let generator = ExplanationGenerator::new(&market, 2).unwrap();
        let gaps = vec![
            gap("docker", Priority::Preferred, 5832),
            gap("rust", Priority::Preferred, 0),
            gap("go", Priority::Preferred, 0),
        ];
        let result = generator.generate(&gaps, &[], "Backend", "");

        assert_eq!(result.explanations.len(), 2);
        assert!(result.explanations[0].reason.starts_with("docker enhances your profile for 5,832+ opportunities in Backend."));
        assert!(result.explanations.iter().all(|e| !e.reason.is_empty()));
        assert_eq!(result.skill_gaps.total, 3);
        assert_eq!(result.skill_gaps.critical, 0);
    }

    #[test]
    fn test_jd_task_mining() {
        let market = market();
        let generator = ExplanationGenerator::new(&market, 5).unwrap();
        let jd = "About the team\n\
                  • Build ETL pipelines in Python and SQL\n\
                  - Maintain dashboards\n\
                  1. Write unit tests for data jobs.\n\
                  In this internship you'll deploy models with Docker. Pay is competitive.\n";

        let tasks = generator.extract_jd_tasks(jd);
        assert_eq!(
            tasks,
            vec![
                "Build ETL pipelines in Python and SQL",
                "Maintain dashboards",
                "Write unit tests for data jobs",
                "In this internship you'll deploy models with Docker",
            ]
        );

        let result = generator.generate(&[gap("docker", Priority::Required, 5832)], &[], "Data", jd);
        assert!(result.explanations[0]
            .reason
            .ends_with("In this role you'd use it to: In this internship you'll deploy models with Docker."));
    }

    #[test]
    fn test_task_mentions_whole_words_only() {
        assert!(mentions("Write SQL queries", "sql"));
        assert!(!mentions("Use NoSQL stores", "sql"));
        assert!(!mentions("Write C++ code", "c"));
    }

    #[test]
    fn test_learning_path_narratives() {
        assert!(learning_path_narrative(&skills(&["python"]), "AI/ML", 2).starts_with("Build on your Python foundation"));
        assert!(learning_path_narrative(&skills(&["excel"]), "Data", 2).starts_with("Expand beyond spreadsheets"));
        assert!(learning_path_narrative(&skills(&["html", "css"]), "Frontend", 1).starts_with("Complete the web trinity"));
        assert_eq!(
            learning_path_narrative(&[], "Backend", 3),
            "Focus on the 3 required skills first, then add preferred skills to strengthen your profile for backend roles."
        );
    }
}
