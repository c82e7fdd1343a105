//! Gap classification, ranking and the guidance built around it

use crate::processing::context::AnalysisContext;
use crate::processing::learning_plan::{Difficulty, LearningResource, ResourceCatalog};
use crate::processing::market::{format_count, DemandLookup};
use crate::processing::profile::Priority;
use crate::processing::tables::EngineTables;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Important,
    Beneficial,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Important => write!(f, "important"),
            Severity::Beneficial => write!(f, "beneficial"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeToLearn {
    #[serde(rename = "1-2 weeks")]
    OneToTwoWeeks,
    #[serde(rename = "3-4 weeks")]
    ThreeToFourWeeks,
    #[serde(rename = "1-2 months")]
    OneToTwoMonths,
    #[serde(rename = "2-3 months")]
    TwoToThreeMonths,
    #[serde(rename = "3+ months")]
    ThreePlusMonths,
}

impl TimeToLearn {
    pub fn from_weeks(weeks: f64) -> Self {
        let weeks = weeks.ceil();
        if weeks <= 2.0 {
            TimeToLearn::OneToTwoWeeks
        } else if weeks <= 4.0 {
            TimeToLearn::ThreeToFourWeeks
        } else if weeks <= 8.0 {
            TimeToLearn::OneToTwoMonths
        } else if weeks <= 12.0 {
            TimeToLearn::TwoToThreeMonths
        } else {
            TimeToLearn::ThreePlusMonths
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeToLearn::OneToTwoWeeks => "1-2 weeks",
            TimeToLearn::ThreeToFourWeeks => "3-4 weeks",
            TimeToLearn::OneToTwoMonths => "1-2 months",
            TimeToLearn::TwoToThreeMonths => "2-3 months",
            TimeToLearn::ThreePlusMonths => "3+ months",
        }
    }

    pub fn is_quick(&self) -> bool {
        matches!(self, TimeToLearn::OneToTwoWeeks | TimeToLearn::ThreeToFourWeeks)
    }

    pub fn is_months(&self) -> bool {
        !self.is_quick()
    }
}

impl fmt::Display for TimeToLearn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill: String,
    pub weight: u8,
    pub priority: Priority,
    pub market_demand: f64,
    pub severity: Severity,
    pub time_to_learn: TimeToLearn,
    pub learning_path: Vec<String>,
    pub career_impact: String,
    #[serde(default)]
    pub resources: Vec<LearningResource>,
}

impl SkillGap {
    /// (required ? 2 : 1) x weight x ln(demand + 1)
    pub fn rank_score(&self) -> f64 {
        self.priority.rank_factor() * self.weight as f64 * (self.market_demand + 1.0).ln()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInsights {
    pub market_position: String,
    pub competitive_advantage: Vec<String>,
    pub trending_skills: Vec<String>,
    pub salary_impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningRecommendations {
    pub immediate: Vec<String>,
    pub next_month: Vec<String>,
    pub next_quarter: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysisResult {
    pub overall_readiness: u8,
    pub critical_gaps: Vec<SkillGap>,
    pub important_gaps: Vec<SkillGap>,
    pub beneficial_gaps: Vec<SkillGap>,
    pub strengths: Vec<String>,
    pub quick_wins: Vec<SkillGap>,
    pub long_term_goals: Vec<SkillGap>,
    pub industry_insights: IndustryInsights,
    pub learning_recommendations: LearningRecommendations,
    pub confidence_score: u8,
}

impl GapAnalysisResult {
    pub fn all_gaps(&self) -> impl Iterator<Item = &SkillGap> {
        self.critical_gaps
            .iter()
            .chain(self.important_gaps.iter())
            .chain(self.beneficial_gaps.iter())
    }

    pub fn gap_count(&self) -> usize {
        self.critical_gaps.len() + self.important_gaps.len() + self.beneficial_gaps.len()
    }

    /// Fill every gap's resource list from the catalog
    pub fn attach_resources(&mut self, catalog: &ResourceCatalog, level: Difficulty, max_results: usize) {
        let lists = [
            &mut self.critical_gaps,
            &mut self.important_gaps,
            &mut self.beneficial_gaps,
            &mut self.quick_wins,
            &mut self.long_term_goals,
        ];
        for list in lists {
            for gap in list.iter_mut() {
                gap.resources = catalog.resources_for_skill(&gap.skill, level, max_results);
            }
        }
    }
}

pub fn gap_severity(priority: Priority, weight: u8, market_demand: f64) -> Severity {
    if priority.is_required() && weight == 2 {
        Severity::Critical
    } else if priority.is_required() || market_demand > 10000.0 {
        Severity::Important
    } else {
        Severity::Beneficial
    }
}

/// Base weeks for the skill, x1.5 for core (weight 2) requirements
pub fn estimate_time_to_learn(tables: &EngineTables, skill: &str, weight: u8) -> TimeToLearn {
    let multiplier = if weight == 2 { 1.5 } else { 1.0 };
    TimeToLearn::from_weeks(tables.base_weeks_for(skill) * multiplier)
}

pub fn learning_path(tables: &EngineTables, skill: &str) -> Vec<String> {
    if let Some(path) = tables.learning_paths.get(&skill.to_lowercase()) {
        return path.clone();
    }
    vec![
        format!("Study {} fundamentals", skill),
        "Practice with tutorials and exercises".to_string(),
        format!("Build a project using {}", skill),
        "Apply knowledge in real scenario".to_string(),
    ]
}

pub fn career_impact(market_demand: f64) -> &'static str {
    if market_demand > 20000.0 {
        "High impact - Opens many opportunities"
    } else if market_demand > 10000.0 {
        "Medium-high impact - Valuable skill in market"
    } else if market_demand > 5000.0 {
        "Medium impact - Good addition to skillset"
    } else if market_demand > 1000.0 {
        "Low-medium impact - Useful for specialization"
    } else {
        "Low impact - Nice to have skill"
    }
}

fn build_gap(tables: &EngineTables, skill: &str, weight: u8, priority: Priority, market_demand: f64) -> SkillGap {
    SkillGap {
        skill: skill.to_string(),
        weight,
        priority,
        market_demand,
        severity: gap_severity(priority, weight, market_demand),
        time_to_learn: estimate_time_to_learn(tables, skill, weight),
        learning_path: learning_path(tables, skill),
        career_impact: career_impact(market_demand).to_string(),
        resources: Vec::new(),
    }
}

/// Unmet requirements plus in-demand JD skills, highest impact first
pub fn calculate_skill_gaps(ctx: &AnalysisContext, lookup: &mut DemandLookup) -> Vec<SkillGap> {
    let mut gaps: Vec<SkillGap> = Vec::new();

    for req in &ctx.requirements {
        if ctx.has_skill(&req.skill) || gaps.iter().any(|g| g.skill == req.skill) {
            continue;
        }
        let demand = lookup.weighted(&req.skill);
        gaps.push(build_gap(ctx.tables, &req.skill, req.weight, req.priority, demand));
    }

    for skill in &ctx.jd_skills {
        if ctx.has_skill(skill) || gaps.iter().any(|g| &g.skill == skill) {
            continue;
        }
        if ctx.market.demand(skill) > 1000 {
            let demand = lookup.weighted(skill);
            gaps.push(build_gap(ctx.tables, skill, 1, Priority::Preferred, demand));
        }
    }

    gaps.sort_by(|a, b| {
        b.rank_score()
            .partial_cmp(&a.rank_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    gaps
}

/// Up to three gaps learnable within a month that are required or in demand
pub fn identify_quick_wins(gaps: &[SkillGap]) -> Vec<SkillGap> {
    gaps.iter()
        .filter(|g| g.time_to_learn.is_quick() && (g.market_demand > 5000.0 || g.priority.is_required()))
        .take(3)
        .cloned()
        .collect()
}

pub fn identify_long_term_goals(gaps: &[SkillGap]) -> Vec<SkillGap> {
    gaps.iter()
        .filter(|g| g.time_to_learn.is_months() && (g.severity == Severity::Critical || g.market_demand > 15000.0))
        .take(3)
        .cloned()
        .collect()
}

pub fn identify_strengths(ctx: &AnalysisContext) -> Vec<String> {
    let mut strengths = Vec::new();

    if ctx.met_required() as f64 >= ctx.total_required() as f64 * 0.7 {
        strengths.push("Strong foundation in core required skills".to_string());
    }

    let high_value: Vec<&str> = ["python", "javascript", "sql", "git"]
        .into_iter()
        .filter(|s| ctx.has_skill(s))
        .collect();
    if high_value.len() >= 2 {
        strengths.push(format!("Excellent foundation with {}", high_value.join(", ")));
    }

    let category = ctx.role_category();
    if category == "AI/ML" && ctx.has_skill("python") && ctx.has_skill("statistics") {
        strengths.push("Perfect programming foundation for AI/ML career".to_string());
    }
    if category == "Frontend" && ctx.has_skill("html") && ctx.has_skill("css") && ctx.has_skill("javascript") {
        strengths.push("Complete web development foundation".to_string());
    }

    strengths
}

pub fn industry_insights(ctx: &AnalysisContext) -> IndustryInsights {
    let mentions = |skill: &str| format_count(ctx.market.demand(skill) as f64);
    let category = ctx.role_category();

    let market_position = match category {
        "AI/ML" => format!(
            "AI/ML has {} job mentions. High growth but competitive field.",
            mentions("machine learning")
        ),
        "Data" => format!(
            "Data Analysis has {} mentions. Strong, accessible entry path.",
            mentions("data analysis")
        ),
        "Backend" => format!(
            "Backend development has consistent demand with {} Java mentions.",
            mentions("java")
        ),
        "Frontend" => "Frontend has moderate visibility but high actual demand in market.".to_string(),
        "DevOps" => format!("DevOps is fastest-growing with {} AWS mentions.", mentions("aws")),
        "Robotics" => format!(
            "Robotics has highest demand ({} C++ mentions) but specialized.",
            mentions("c++")
        ),
        "Game Dev" => "Game development is niche but passion-driven market.".to_string(),
        _ => "Market analysis not available for this category.".to_string(),
    };

    let mut competitive_advantage = Vec::new();
    let universal = [
        ("python", "Python proficiency (22K+ job mentions)"),
        ("git", "Version control experience"),
        ("sql", "Data skills (18K+ mentions)"),
    ];
    let by_category: &[(&str, &str)] = match category {
        "AI/ML" => &[
            ("statistics", "Statistical foundation for ML"),
            ("pandas", "Data manipulation expertise"),
            ("jupyter notebooks", "ML workflow proficiency"),
        ],
        "Frontend" => &[
            ("react", "Modern framework expertise"),
            ("typescript", "Professional development skills"),
            ("figma", "Design collaboration skills"),
        ],
        "DevOps" => &[
            ("docker", "Containerization knowledge"),
            ("aws", "Cloud platform expertise"),
            ("linux", "System administration skills"),
        ],
        _ => &[],
    };
    for (skill, advantage) in universal.iter().chain(by_category.iter()) {
        if ctx.has_skill(skill) {
            competitive_advantage.push(advantage.to_string());
        }
    }

    let trending: &[&str] = match category {
        "AI/ML" => &["Large Language Models", "MLOps", "Computer Vision", "PyTorch"],
        "Data" => &["dbt", "Snowflake", "Apache Spark", "Data Engineering"],
        "Backend" => &["Microservices", "GraphQL", "Serverless", "Kubernetes"],
        "Frontend" => &["Next.js", "Tailwind CSS", "React Native", "TypeScript"],
        "DevOps" => &["Infrastructure as Code", "GitOps", "Service Mesh", "Observability"],
        "Robotics" => &["ROS 2", "Autonomous Navigation", "SLAM", "Edge Computing"],
        "Game Dev" => &["Unreal Engine 5", "VR/AR", "Procedural Generation", "Multiplayer"],
        _ => &[],
    };

    let high_value = ctx.has_any(&["python", "aws", "machine learning", "react"]);
    let skill_count = ctx.user_set.len();
    let salary_impact = if high_value && skill_count >= 8 {
        "High salary potential - Strong skill portfolio"
    } else if high_value && skill_count >= 5 {
        "Medium-high salary potential - Good foundation"
    } else if skill_count >= 5 {
        "Medium salary potential - Solid skill base"
    } else {
        "Entry-level salary range - Focus on core skills first"
    };

    IndustryInsights {
        market_position,
        competitive_advantage,
        trending_skills: trending.iter().map(|s| s.to_string()).collect(),
        salary_impact: salary_impact.to_string(),
    }
}

pub fn learning_recommendations(
    critical: &[SkillGap],
    important: &[SkillGap],
    is_student: bool,
    year_level: Option<&str>,
) -> LearningRecommendations {
    let mut recommendations = LearningRecommendations::default();

    for gap in critical.iter().filter(|g| g.time_to_learn.is_quick()).take(2) {
        recommendations
            .immediate
            .push(format!("Learn {} - {}", gap.skill, gap.career_impact));
    }

    if recommendations.immediate.is_empty() {
        if let Some(first) = critical.first() {
            recommendations
                .immediate
                .push(format!("Start learning {} - highest priority skill", first.skill));
        }
        recommendations
            .immediate
            .push("Review job requirements and create study plan".to_string());
    }

    for gap in critical.iter().take(3) {
        if !recommendations.immediate.iter().any(|item| item.contains(&gap.skill)) {
            recommendations
                .next_month
                .push(format!("Master {} - essential for role readiness", gap.skill));
        }
    }

    for gap in important.iter().take(3) {
        recommendations
            .next_quarter
            .push(format!("Develop {} - {}", gap.skill, gap.career_impact.to_lowercase()));
    }

    if is_student {
        let early = year_level
            .map(|y| y.eq_ignore_ascii_case("freshman") || y.eq_ignore_ascii_case("sophomore"))
            .unwrap_or(false);
        if early {
            recommendations
                .next_quarter
                .push("Build 2-3 portfolio projects showcasing your skills".to_string());
            recommendations
                .next_quarter
                .push("Apply for internships and gain practical experience".to_string());
        } else {
            recommendations
                .next_month
                .push("Network with professionals in your target industry".to_string());
            recommendations
                .next_quarter
                .push("Prepare for technical interviews and coding challenges".to_string());
        }
    }

    recommendations
}

/// 70 plus bonuses for each kind of supporting data, capped at 95
pub fn confidence_score(ctx: &AnalysisContext, gaps_found: usize) -> u8 {
    let input = ctx.input;
    let jd_len = input.jd_text.chars().count();
    let mut confidence: u8 = 70;

    if input.has_resume() {
        confidence += 15;
    }
    if !input.user_coursework.is_empty() {
        confidence += 10;
    }
    if !input.user_experience.is_empty() {
        confidence += 10;
    }
    if jd_len > 500 {
        confidence += 5;
    }
    if jd_len > 1000 {
        confidence += 5;
    }
    if gaps_found > 0 && gaps_found < 20 {
        confidence += 5;
    }

    confidence.min(95)
}

pub fn analyze_skill_gaps(ctx: &AnalysisContext) -> GapAnalysisResult {
    let mut lookup = ctx.demand_lookup();
    let gaps = calculate_skill_gaps(ctx, &mut lookup);

    let by_severity = |severity: Severity| -> Vec<SkillGap> {
        gaps.iter().filter(|g| g.severity == severity).cloned().collect()
    };
    let critical_gaps = by_severity(Severity::Critical);
    let important_gaps = by_severity(Severity::Important);
    let beneficial_gaps = by_severity(Severity::Beneficial);

    log::info!(
        "Gap analysis: {} critical, {} important, {} beneficial",
        critical_gaps.len(),
        important_gaps.len(),
        beneficial_gaps.len()
    );

    let learning_recommendations = learning_recommendations(
        &critical_gaps,
        &important_gaps,
        ctx.input.is_student,
        ctx.input.year_level.as_deref(),
    );

    GapAnalysisResult {
        overall_readiness: ctx.readiness(),
        strengths: identify_strengths(ctx),
        quick_wins: identify_quick_wins(&gaps),
        long_term_goals: identify_long_term_goals(&gaps),
        industry_insights: industry_insights(ctx),
        learning_recommendations,
        confidence_score: confidence_score(ctx, gaps.len()),
        critical_gaps,
        important_gaps,
        beneficial_gaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::dictionary::build_dictionary;
    use crate::processing::dictionary::SkillDictionary;
    use crate::processing::market::MarketDemandProvider;
    use crate::processing::normalizer::Normalizer;
    use crate::processing::profile::{AnalysisInput, SkillRequirement};

    struct Fixture {
        tables: EngineTables,
        normalizer: Normalizer,
        dictionary: SkillDictionary,
        market: MarketDemandProvider,
    }

    impl Fixture {
        fn new() -> Self {
            let tables = EngineTables::default();
            let normalizer = Normalizer::from_tables(&tables);
            let dictionary = build_dictionary(&[], &[], &tables, &normalizer);
            let market = MarketDemandProvider::fallback(&tables, &normalizer);
            Self {
                tables,
                normalizer,
                dictionary,
                market,
            }
        }
    }

    fn gap(skill: &str, priority: Priority, weight: u8, demand: f64, time: TimeToLearn) -> SkillGap {
        SkillGap {
            skill: skill.to_string(),
            weight,
            priority,
            market_demand: demand,
            severity: gap_severity(priority, weight, demand),
            time_to_learn: time,
            learning_path: Vec::new(),
            career_impact: career_impact(demand).to_string(),
            resources: Vec::new(),
        }
    }

    #[test]
    fn test_severity() {
        assert_eq!(gap_severity(Priority::Required, 2, 0.0), Severity::Critical);
        assert_eq!(gap_severity(Priority::Required, 1, 0.0), Severity::Important);
        assert_eq!(gap_severity(Priority::Preferred, 2, 10001.0), Severity::Important);
        assert_eq!(gap_severity(Priority::Preferred, 2, 10000.0), Severity::Beneficial);
    }

    #[test]
    fn test_time_to_learn_buckets() {
        let tables = EngineTables::default();
        assert_eq!(estimate_time_to_learn(&tables, "html", 1), TimeToLearn::OneToTwoWeeks);
        assert_eq!(estimate_time_to_learn(&tables, "python", 1), TimeToLearn::ThreeToFourWeeks);
        assert_eq!(estimate_time_to_learn(&tables, "python", 2), TimeToLearn::OneToTwoMonths);
        assert_eq!(estimate_time_to_learn(&tables, "javascript", 2), TimeToLearn::OneToTwoMonths);
        assert_eq!(estimate_time_to_learn(&tables, "machine learning", 2), TimeToLearn::TwoToThreeMonths);
        assert_eq!(estimate_time_to_learn(&tables, "ros", 2), TimeToLearn::ThreePlusMonths);
        assert_eq!(estimate_time_to_learn(&tables, "haskell", 1).label(), "3-4 weeks");
    }

    #[test]
    fn test_learning_path_templates() {
        let tables = EngineTables::default();
        assert_eq!(learning_path(&tables, "SQL")[0], "Learn basic query syntax");

        let generic = learning_path(&tables, "rust");
        assert_eq!(generic.len(), 4);
        assert_eq!(generic[0], "Study rust fundamentals");
        assert_eq!(generic[2], "Build a project using rust");
    }

    #[test]
    fn test_career_impact_tiers() {
        assert!(career_impact(22016.0).starts_with("High impact"));
        assert!(career_impact(18322.0).starts_with("Medium-high"));
        assert!(career_impact(6420.0).starts_with("Medium impact"));
        assert!(career_impact(1001.0).starts_with("Low-medium"));
        assert!(career_impact(1000.0).starts_with("Low impact"));
    }

    #[test]
    fn test_quick_wins_and_long_term_goals() {
        let gaps = vec![
            gap("ros", Priority::Required, 2, 0.0, TimeToLearn::ThreePlusMonths),
            gap("git", Priority::Preferred, 1, 6420.0, TimeToLearn::OneToTwoWeeks),
            gap("css", Priority::Preferred, 1, 900.0, TimeToLearn::OneToTwoWeeks),
            gap("python", Priority::Preferred, 1, 22016.0, TimeToLearn::OneToTwoMonths),
            gap("sql", Priority::Required, 1, 18322.0, TimeToLearn::ThreeToFourWeeks),
        ];

        let wins = identify_quick_wins(&gaps);
        let quick: Vec<&str> = wins.iter().map(|g| g.skill.as_str()).collect();
        assert_eq!(quick, vec!["git", "sql"]);

        let goals = identify_long_term_goals(&gaps);
        let long: Vec<&str> = goals.iter().map(|g| g.skill.as_str()).collect();
        assert_eq!(long, vec!["ros", "python"]);
    }

    #[test]
    fn test_quick_wins_and_long_term_goals_capped_at_three() {
        let quick_gaps: Vec<SkillGap> = ["git", "sql", "html", "css", "bash"]
            .iter()
            .map(|s| gap(s, Priority::Required, 1, 0.0, TimeToLearn::OneToTwoWeeks))
            .collect();
        let wins = identify_quick_wins(&quick_gaps);
        let quick: Vec<&str> = wins.iter().map(|g| g.skill.as_str()).collect();
        assert_eq!(quick, vec!["git", "sql", "html"]);

        let slow_gaps: Vec<SkillGap> = ["ros", "c++", "rust", "kubernetes"]
            .iter()
            .map(|s| gap(s, Priority::Required, 2, 0.0, TimeToLearn::ThreePlusMonths))
            .collect();
        let goals = identify_long_term_goals(&slow_gaps);
        assert_eq!(goals.len(), 3);
        assert_eq!(goals[0].skill, "ros");
    }

    #[test]
    fn test_required_core_skill_is_critical() {
        let f = Fixture::new();
        let input = AnalysisInput::new("Robotics Intern", "", &f.dictionary)
            .with_skills(["python"])
            .with_requirements(vec![SkillRequirement::required("ros", 2).unwrap()]);
        let ctx = AnalysisContext::build(&input, &f.tables, &f.normalizer, &f.market, 3).unwrap();
        let result = analyze_skill_gaps(&ctx);

        assert_eq!(result.critical_gaps.len(), 1);
        assert_eq!(result.critical_gaps[0].skill, "ros");
        assert_eq!(result.critical_gaps[0].time_to_learn, TimeToLearn::ThreePlusMonths);
        assert_eq!(result.overall_readiness, 0);
        assert_eq!(result.long_term_goals.len(), 1);
    }

    #[test]
    fn test_jd_skills_with_demand_become_gaps() {
        let f = Fixture::new();
        let jd = "You will write Python and SQL daily, deploy with Docker and track work in Jira.";
        let input = AnalysisInput::new("Backend Intern", jd, &f.dictionary)
            .with_skills(["python"])
            .with_category("Backend");
        let ctx = AnalysisContext::build(&input, &f.tables, &f.normalizer, &f.market, 3).unwrap();
        let result = analyze_skill_gaps(&ctx);

        let skills: Vec<&str> = result.all_gaps().map(|g| g.skill.as_str()).collect();
        assert!(skills.contains(&"sql"));
        assert!(skills.contains(&"docker"));
        // No demand figure for jira, so it is not reported
        assert!(!skills.contains(&"jira"));
        assert!(!skills.contains(&"python"));

        // sql has demand > 10000 so it is important, docker stays beneficial
        assert!(result.important_gaps.iter().any(|g| g.skill == "sql"));
        assert!(result.beneficial_gaps.iter().any(|g| g.skill == "docker"));
        assert!(result.industry_insights.market_position.contains("12,482 Java mentions"));
    }

    #[test]
    fn test_gaps_sorted_by_rank_score() {
        let f = Fixture::new();
        let input = AnalysisInput::new("Intern", "", &f.dictionary).with_requirements(vec![
            SkillRequirement::preferred("git", 1).unwrap(),
            SkillRequirement::required("python", 2).unwrap(),
            SkillRequirement::required("haskell", 2).unwrap(),
        ]);
        let ctx = AnalysisContext::build(&input, &f.tables, &f.normalizer, &f.market, 3).unwrap();
        let mut lookup = ctx.demand_lookup();
        let gaps = calculate_skill_gaps(&ctx, &mut lookup);

        let order: Vec<&str> = gaps.iter().map(|g| g.skill.as_str()).collect();
        assert_eq!(order, vec!["python", "git", "haskell"]);
    }

    #[test]
    fn test_learning_recommendations_for_students() {
        let critical = vec![gap("python", Priority::Required, 2, 22016.0, TimeToLearn::ThreeToFourWeeks)];
        let important = vec![gap("sql", Priority::Required, 1, 18322.0, TimeToLearn::ThreeToFourWeeks)];

        let early = learning_recommendations(&critical, &important, true, Some("Sophomore"));
        assert_eq!(early.immediate, vec!["Learn python - High impact - Opens many opportunities"]);
        assert!(early.next_month.is_empty());
        assert_eq!(early.next_quarter.len(), 3);
        assert!(early.next_quarter[0].starts_with("Develop sql - medium-high impact"));

        let senior = learning_recommendations(&[], &[], true, Some("Senior"));
        assert_eq!(senior.immediate, vec!["Review job requirements and create study plan"]);
        assert_eq!(senior.next_month, vec!["Network with professionals in your target industry"]);
    }

    #[test]
    fn test_confidence_score() {
        let f = Fixture::new();
        let long_jd = "python ".repeat(200);
        let input = AnalysisInput::new("Intern", &long_jd, &f.dictionary)
            .with_resume("Python developer")
            .with_requirements(vec![SkillRequirement::required("rust", 1).unwrap()]);
        let ctx = AnalysisContext::build(&input, &f.tables, &f.normalizer, &f.market, 3).unwrap();

        // 70 + 15 résumé + 5 + 5 JD length + 5 gaps, capped
        assert_eq!(confidence_score(&ctx, 1), 95);
        assert_eq!(confidence_score(&ctx, 0), 95);

        let bare = AnalysisInput::new("Intern", "short", &f.dictionary);
        let ctx = AnalysisContext::build(&bare, &f.tables, &f.normalizer, &f.market, 3).unwrap();
        assert_eq!(confidence_score(&ctx, 0), 70);
        assert_eq!(confidence_score(&ctx, 25), 70);
    }
}
