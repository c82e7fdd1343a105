//! Detailed analysis: benchmarked scores, strengths and weaknesses, recommendations, market insights

use crate::error::Result;
use crate::processing::context::AnalysisContext;
use crate::processing::tables::ScoreBenchmarks;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ranking {
    Excellent,
    #[serde(rename = "Above Average")]
    AboveAverage,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl Ranking {
    pub fn from_overall(overall: u8) -> Self {
        match overall {
            85..=u8::MAX => Ranking::Excellent,
            75..=84 => Ranking::AboveAverage,
            55..=74 => Ranking::Average,
            _ => Ranking::BelowAverage,
        }
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Ranking::Excellent => "Excellent",
            Ranking::AboveAverage => "Above Average",
            Ranking::Average => "Average",
            Ranking::BelowAverage => "Below Average",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePercentiles {
    pub overall: u8,
    pub ats: u8,
    pub alignment: u8,
    pub impact: u8,
    pub polish: u8,
    pub potential: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedScores {
    pub overall: u8,
    pub readiness: u8,
    pub ats: u8,
    pub alignment: u8,
    pub impact: u8,
    pub polish: u8,
    pub potential: u8,
    pub percentiles: ScorePercentiles,
    pub ranking: Ranking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketValue {
    High,
    Medium,
    Low,
}

impl MarketValue {
    pub fn from_demand(total: u64) -> Self {
        if total > 50_000 {
            MarketValue::High
        } else if total > 10_000 {
            MarketValue::Medium
        } else {
            MarketValue::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImprovementImpact {
    Critical,
    Important,
    Beneficial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strength {
    pub category: String,
    pub description: String,
    pub evidence: Vec<String>,
    pub market_value: MarketValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub category: String,
    pub description: String,
    pub impact: ImprovementImpact,
    pub time_to_address: String,
    pub market_relevance: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrengthsAndWeaknesses {
    pub strengths: Vec<Strength>,
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImmediateAction {
    pub action: String,
    pub rationale: String,
    pub example: String,
    pub impact: MarketValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTermAction {
    pub action: String,
    pub rationale: String,
    pub timeline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongTermAction {
    pub action: String,
    pub rationale: String,
    pub timeline: String,
    pub skills_needed: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionableRecommendations {
    pub immediate: Vec<ImmediateAction>,
    pub short_term: Vec<ShortTermAction>,
    pub long_term: Vec<LongTermAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandTrend {
    Rising,
    Stable,
    Declining,
}

impl DemandTrend {
    pub fn from_demand(demand: u64) -> Self {
        if demand > 10_000 {
            DemandTrend::Rising
        } else if demand > 5_000 {
            DemandTrend::Stable
        } else {
            DemandTrend::Declining
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDemand {
    pub current: u64,
    pub trend: DemandTrend,
    /// 1 held by the candidate, 2 asked for by the JD
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub skill_demand_analysis: BTreeMap<String, SkillDemand>,
    pub competitive_position: String,
    pub salary_impact: String,
    pub career_trajectory: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysisResult {
    pub scores: DetailedScores,
    pub strengths_and_weaknesses: StrengthsAndWeaknesses,
    pub recommendations: ActionableRecommendations,
    pub market_insights: MarketInsights,
    pub confidence_level: u8,
}

struct DetailedPatterns {
    headers: Regex,
    years: Regex,
    action_verbs: Regex,
    quantifiable: Regex,
    leadership: Regex,
    typos: Regex,
    casual_tone: Regex,
    email: Regex,
    relevant_coursework: Regex,
    practical_experience: Regex,
    dev_experience: Regex,
    complex_project: Regex,
    teamwork_resume: Regex,
    teamwork_profile: Regex,
}

impl DetailedPatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            headers: Regex::new(r"experience|education|skills|projects")?,
            years: Regex::new(r"\d{4}")?,
            action_verbs: Regex::new(
                r"\b(developed|built|led|managed|designed|implemented|created|analyzed|optimized|collaborated)\b",
            )?,
            quantifiable: Regex::new(r"\d+%|\d+x|\d+ users|\d+ projects")?,
            leadership: Regex::new(r"lead|manage|coordinate|organize")?,
            typos: Regex::new(r"(?i)teh|recieve|seperate|occured")?,
            casual_tone: Regex::new(r"(?i)\b(awesome|cool|stuff|things|lots of)\b")?,
            email: Regex::new(r"\b[\w.%+-]+@[\w.-]+\.[A-Za-z]{2,}\b")?,
            relevant_coursework: Regex::new(r"(?i)computer science|programming|software|data|machine learning|algorithms")?,
            practical_experience: Regex::new(r"(?i)intern|project|development|programming")?,
            dev_experience: Regex::new(r"(?i)software|development|programming|engineering")?,
            complex_project: Regex::new(r"(?i)complex.*project|large.*project|team.*project")?,
            teamwork_resume: Regex::new(r"(?i)team|collaborate|group|pair")?,
            teamwork_profile: Regex::new(r"(?i)team|collaborate")?,
        })
    }
}

fn round_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn is_category(ctx: &AnalysisContext, name: &str) -> bool {
    ctx.role_category().eq_ignore_ascii_case(name)
}

pub fn calculate_detailed_scores(
    ctx: &AnalysisContext,
    benchmarks: &ScoreBenchmarks,
) -> Result<DetailedScores> {
    let patterns = DetailedPatterns::new()?;
    let input = ctx.input;
    let skill_count = ctx.user_set.len();
    let met_required = ctx.met_required();
    let readiness = ctx.readiness();

    let alignment = {
        let tokens: std::collections::BTreeSet<&str> = ctx
            .requirements
            .iter()
            .map(|r| r.skill.as_str())
            .chain(ctx.jd_skills.iter().map(String::as_str))
            .collect();
        let hits = tokens.iter().filter(|t| ctx.has_skill(t)).count();
        if tokens.is_empty() {
            0
        } else {
            round_score(100.0 * hits as f64 / tokens.len() as f64)
        }
    };

    let (ats, impact, polish) = match input.resume() {
        Some(resume) => {
            let text = resume.to_lowercase();
            let quantifiable = patterns.quantifiable.find_iter(&text).count();

            let mut ats = 0u32;
            if patterns.headers.is_match(&text) {
                ats += 20;
            }
            if text.chars().filter(|c| matches!(c, '•' | '-' | '*')).count() >= 5 {
                ats += 15;
            }
            if patterns.years.find_iter(&text).count() >= 2 {
                ats += 15;
            }
            if patterns.action_verbs.is_match(&text) {
                ats += 20;
            }
            if ctx.jd_skills.iter().any(|skill| text.contains(skill.as_str())) {
                ats += 15;
            }
            if quantifiable >= 2 {
                ats += 15;
            }

            let impact = 25 * text.matches("intern").count()
                + 15 * text.matches("project").count()
                + 20 * patterns.leadership.find_iter(&text).count()
                + 10 * quantifiable;

            let length = resume.chars().count();
            let mut polish = if resume.contains("\n\n") { 20 } else { 10 };
            polish += if length > 500 && length < 3000 { 20 } else { 10 };
            polish += 15;
            polish += if patterns.typos.is_match(resume) { 5 } else { 15 };
            polish += if patterns.casual_tone.is_match(resume) { 5 } else { 15 };
            if patterns.email.is_match(resume) {
                polish += 15;
            }

            (ats.min(100) as u8, impact.min(100) as u8, polish.min(100) as u8)
        }
        None => {
            let ats = (8 * skill_count + 10 * met_required).min(85);
            let depth = if skill_count >= 8 { 30 } else { 3 * skill_count };
            let impact = (20 * input.user_experience.len() + depth + 5 * input.user_coursework.len()).min(100);

            let mut polish = 0u8;
            for filled in [
                !input.user_skills.is_empty(),
                !input.user_coursework.is_empty(),
                !input.user_experience.is_empty(),
                input.year_level.is_some(),
            ] {
                if filled {
                    polish += 25;
                }
            }

            (ats as u8, impact as u8, polish)
        }
    };

    let mut potential = 0.0;
    if ctx.has_any(&["python", "javascript", "java", "sql"]) {
        potential += 20.0;
    }
    potential += if skill_count >= 6 { 15.0 } else { 2.5 * skill_count as f64 };
    potential += 10.0
        * input
            .user_coursework
            .iter()
            .filter(|c| patterns.relevant_coursework.is_match(c))
            .count() as f64;
    potential += 15.0
        * input
            .user_experience
            .iter()
            .filter(|e| patterns.practical_experience.is_match(&e.kind))
            .count() as f64;
    if input.is_student {
        potential += 15.0;
    }
    let potential = round_score(potential.min(100.0));

    let overall = if input.has_resume() {
        0.30 * alignment as f64
            + 0.25 * readiness as f64
            + 0.15 * ats as f64
            + 0.15 * impact as f64
            + 0.15 * potential as f64
    } else {
        0.40 * alignment as f64 + 0.35 * readiness as f64 + 0.25 * potential as f64
    };
    let overall = round_score(overall);

    let percentiles = ScorePercentiles {
        overall: benchmarks.overall.percentile(overall as f64),
        ats: benchmarks.ats.percentile(ats as f64),
        alignment: benchmarks.alignment.percentile(alignment as f64),
        impact: benchmarks.impact.percentile(impact as f64),
        polish: benchmarks.polish.percentile(polish as f64),
        potential: benchmarks.potential.percentile(potential as f64),
    };

    Ok(DetailedScores {
        overall,
        readiness,
        ats,
        alignment,
        impact,
        polish,
        potential,
        percentiles,
        ranking: Ranking::from_overall(overall),
    })
}

fn role_specific_gaps(ctx: &AnalysisContext) -> Option<Improvement> {
    let market = ctx.market;
    let critical = |category: &str, description: String, time: &str, relevance: u64| Improvement {
        category: category.to_string(),
        description,
        impact: ImprovementImpact::Critical,
        time_to_address: time.to_string(),
        market_relevance: relevance,
    };

    if is_category(ctx, "AI/ML") {
        if !ctx.has_any(&["machine learning", "statistics"]) {
            return Some(critical(
                "AI/ML Foundation",
                "No explicit mention of machine learning or statistical background.".to_string(),
                "3-6 months",
                market.demand("machine learning"),
            ));
        }
    } else if is_category(ctx, "Data") {
        if !ctx.has_any(&["excel", "sql"]) {
            return Some(critical(
                "Data Analysis Tools",
                "Missing fundamental data analysis tools like Excel or SQL.".to_string(),
                "1-2 months",
                market.demand("excel") + market.demand("sql"),
            ));
        }
    } else if is_category(ctx, "Frontend") {
        let missing: Vec<&str> = ["html", "css", "javascript"]
            .into_iter()
            .filter(|s| !ctx.has_skill(s))
            .collect();
        if !missing.is_empty() {
            return Some(critical(
                "Frontend Fundamentals",
                format!("Missing core frontend technologies: {}.", missing.join(", ")),
                "2-4 months",
                market.demand("javascript"),
            ));
        }
    } else if is_category(ctx, "Robotics") && !ctx.has_any(&["python", "c++"]) {
        return Some(critical(
            "Robotics Programming",
            "Missing core robotics programming languages (Python/C++).".to_string(),
            "3-6 months",
            market.demand("python") + market.demand("c++"),
        ));
    }
    None
}

pub fn analyze_strengths_and_weaknesses(ctx: &AnalysisContext) -> Result<StrengthsAndWeaknesses> {
    let patterns = DetailedPatterns::new()?;
    let input = ctx.input;
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    let strong: Vec<&str> = ctx
        .requirements
        .iter()
        .filter(|r| r.weight == 2 && ctx.has_skill(&r.skill))
        .map(|r| r.skill.as_str())
        .collect();
    if strong.len() >= 2 {
        strengths.push(Strength {
            category: "Technical Skills".to_string(),
            description: format!("Strong technical skills in {}.", strong.join(", ")),
            evidence: strong.iter().map(|s| format!("Proficiency in {}", s)).collect(),
            market_value: MarketValue::from_demand(ctx.market.total_demand(&strong)),
        });
    }

    let dev_experience: Vec<String> = input
        .user_experience
        .iter()
        .filter(|e| patterns.dev_experience.is_match(e.summary()))
        .map(|e| {
            let description = if e.description.is_empty() {
                "Software development experience"
            } else {
                e.description.as_str()
            };
            format!("{}: {}", e.kind, description)
        })
        .collect();
    if !dev_experience.is_empty() {
        strengths.push(Strength {
            category: "Professional Experience".to_string(),
            description: "Experience with software development principles and practices.".to_string(),
            evidence: dev_experience,
            market_value: MarketValue::High,
        });
    }

    if input.resume().map_or(false, |r| patterns.complex_project.is_match(r)) {
        strengths.push(Strength {
            category: "Project Management".to_string(),
            description: "Demonstrated ability to work on complex projects and deliver results.".to_string(),
            evidence: vec!["Experience with complex project delivery".to_string()],
            market_value: MarketValue::High,
        });
    }

    let missing_required: Vec<&str> = ctx
        .required()
        .filter(|r| !ctx.has_skill(&r.skill))
        .map(|r| r.skill.as_str())
        .collect();
    if !missing_required.is_empty() {
        improvements.push(Improvement {
            category: "Critical Skills Gap".to_string(),
            description: format!("Missing essential skills: {}", missing_required.join(", ")),
            impact: ImprovementImpact::Critical,
            time_to_address: "2-6 months".to_string(),
            market_relevance: ctx.market.total_demand(&missing_required),
        });
    }

    improvements.extend(role_specific_gaps(ctx));

    let has_teamwork = match input.resume() {
        Some(resume) => patterns.teamwork_resume.is_match(resume),
        None => input
            .user_experience
            .iter()
            .any(|e| patterns.teamwork_profile.is_match(&e.description)),
    };
    if !has_teamwork {
        improvements.push(Improvement {
            category: "Collaboration Skills".to_string(),
            description: "Limited mention of collaborative team projects or code reviews.".to_string(),
            impact: ImprovementImpact::Important,
            time_to_address: "1-3 months".to_string(),
            market_relevance: 85424,
        });
    }

    Ok(StrengthsAndWeaknesses { strengths, improvements })
}

fn role_specific_actions(ctx: &AnalysisContext) -> Option<ImmediateAction> {
    let action = |action: &str, rationale: &str, example: &str| ImmediateAction {
        action: action.to_string(),
        rationale: rationale.to_string(),
        example: example.to_string(),
        impact: MarketValue::High,
    };

    if is_category(ctx, "AI/ML") {
        Some(action(
            "Include any relevant coursework or projects related to machine learning, data science, or statistics",
            "AI/ML roles require demonstrated understanding of statistical and ML concepts",
            "Add coursework: 'Machine Learning Fundamentals, Statistics, Data Structures'",
        ))
    } else if is_category(ctx, "Data") {
        Some(action(
            "Emphasize any experience with data analysis tools like Excel, SQL, or Python",
            "Data analyst roles require proficiency with data manipulation and analysis tools",
            "Highlight: 'Analyzed datasets using Excel pivot tables and statistical functions'",
        ))
    } else if is_category(ctx, "Frontend") {
        Some(action(
            "Showcase any web development projects or experience with HTML, CSS, and JavaScript",
            "Frontend roles require demonstrable experience with core web technologies",
            "Add project: 'Built responsive personal website using HTML, CSS, and JavaScript'",
        ))
    } else if is_category(ctx, "Robotics") {
        let title = ctx.input.role_title.to_lowercase();
        (title.contains("aerospace") || title.contains("aviation")).then(|| {
            action(
                "Include any relevant coursework or projects related to aerospace, embedded systems, or robotics",
                "Aerospace roles value specialized knowledge in relevant engineering domains",
                "Add: 'Coursework in Control Systems, Embedded Programming, and Aerospace Engineering'",
            )
        })
    } else {
        None
    }
}

pub fn generate_actionable_recommendations(
    ctx: &AnalysisContext,
    analysis: &StrengthsAndWeaknesses,
) -> ActionableRecommendations {
    let mut immediate = Vec::new();
    let mut short_term = Vec::new();
    let mut long_term = Vec::new();

    let critical: Vec<&Improvement> = analysis
        .improvements
        .iter()
        .filter(|i| i.impact == ImprovementImpact::Critical)
        .collect();

    if ctx.input.resume().map_or(false, |r| r.chars().count() < 500) {
        immediate.push(ImmediateAction {
            action: "Expand resume content to better showcase your experience".to_string(),
            rationale: "Current resume appears too brief to effectively demonstrate qualifications".to_string(),
            example: "Add 2-3 bullet points per experience with specific achievements and technologies used".to_string(),
            impact: MarketValue::High,
        });
    }

    if !ctx.has_any(&["git", "version control"]) {
        immediate.push(ImmediateAction {
            action: "Highlight any experience with version control systems like Git".to_string(),
            rationale: "Version control is a fundamental requirement for all development roles".to_string(),
            example: "Add bullet: 'Utilized Git for version control and collaborative development'".to_string(),
            impact: MarketValue::High,
        });
    }

    immediate.extend(role_specific_actions(ctx));

    if analysis.improvements.iter().any(|i| i.category == "Collaboration Skills") {
        short_term.push(ShortTermAction {
            action: "Add a bullet point under current internship experience to emphasize collaboration".to_string(),
            rationale: "Employers value candidates who can work effectively in team environments".to_string(),
            timeline: "1-2 weeks".to_string(),
            example: Some(
                "Add: 'Collaborated with cross-functional teams to integrate AI solutions into existing systems'"
                    .to_string(),
            ),
        });
    }

    for improvement in critical.iter().filter(|i| i.category.contains("Skills")) {
        short_term.push(ShortTermAction {
            action: format!(
                "Include relevant coursework or projects related to {}",
                improvement.description.to_lowercase()
            ),
            rationale: format!("This addresses a critical gap: {}", improvement.description),
            timeline: improvement.time_to_address.clone(),
            example: None,
        });
    }

    if ctx.input.is_student {
        long_term.push(LongTermAction {
            action: "Develop a portfolio of projects demonstrating your technical abilities".to_string(),
            rationale: "Portfolio projects provide concrete evidence of your skills and problem-solving ability"
                .to_string(),
            timeline: "2-4 months".to_string(),
            skills_needed: critical.iter().take(3).map(|i| i.description.clone()).collect(),
        });
    }

    long_term.push(LongTermAction {
        action: "Gain practical experience through internships, co-ops, or open-source contributions".to_string(),
        rationale: "Real-world experience significantly strengthens your candidacy for technical roles".to_string(),
        timeline: "3-6 months".to_string(),
        skills_needed: vec![
            "Professional development".to_string(),
            "Team collaboration".to_string(),
            "Industry best practices".to_string(),
        ],
    });

    ActionableRecommendations {
        immediate,
        short_term,
        long_term,
    }
}

pub fn analyze_market_insights(ctx: &AnalysisContext, overall: u8) -> MarketInsights {
    let market = ctx.market;
    let mut skill_demand_analysis = BTreeMap::new();

    for skill in ctx.user_set.iter().chain(ctx.jd_skills.iter()) {
        let current = market.demand(skill);
        let priority = if ctx.has_skill(skill) {
            1
        } else if ctx.jd_skills.contains(skill) {
            2
        } else {
            3
        };
        skill_demand_analysis.insert(
            skill.clone(),
            SkillDemand {
                current,
                trend: DemandTrend::from_demand(current),
                priority,
            },
        );
    }

    let strong: Vec<&String> = ctx.user_skills.iter().filter(|s| market.demand(s) > 10_000).collect();
    let competitive_position = match strong.len() {
        n if n >= 3 => format!("Strong competitive position with {} high-demand skills", n),
        n if n >= 1 => format!("Moderate competitive position. Build on {} expertise", strong[0]),
        _ => "Developing competitive position. Focus on high-demand skills first".to_string(),
    };

    let total = market.total_demand(&ctx.user_skills);
    let salary_impact = if total > 100_000 {
        "High salary potential - strong skill portfolio"
    } else if total > 50_000 {
        "Medium-high salary potential - good foundation"
    } else {
        "Entry-level salary range - focus on core skills"
    }
    .to_string();

    let category = ctx.role_category();
    let career_trajectory = if ctx.input.is_student {
        format!(
            "As a {}, focus on {} fundamentals for {} entry-level positioning",
            ctx.input.year_level.as_deref().unwrap_or("student"),
            category,
            if overall >= 75 { "competitive" } else { "solid" }
        )
    } else {
        format!(
            "Current profile suggests {} candidacy for {} roles",
            if overall >= 75 { "strong" } else { "developing" },
            category
        )
    };

    MarketInsights {
        skill_demand_analysis,
        competitive_position,
        salary_impact,
        career_trajectory,
    }
}

/// 70 base, raised by how much the candidate told us, capped at 95
pub fn analysis_confidence(ctx: &AnalysisContext) -> u8 {
    let input = ctx.input;
    let mut confidence = 70u8;
    if input.resume().map_or(false, |r| r.chars().count() > 500) {
        confidence += 15;
    }
    if ctx.user_skills.len() >= 5 {
        confidence += 10;
    }
    if input.user_coursework.len() >= 3 {
        confidence += 5;
    }
    if input.user_experience.len() >= 2 {
        confidence += 5;
    }
    if input.jd_text.chars().count() > 1000 {
        confidence += 5;
    }
    confidence.min(95)
}

pub fn perform_detailed_analysis(
    ctx: &AnalysisContext,
    benchmarks: &ScoreBenchmarks,
) -> Result<DetailedAnalysisResult> {
    let scores = calculate_detailed_scores(ctx, benchmarks)?;
    let strengths_and_weaknesses = analyze_strengths_and_weaknesses(ctx)?;
    let recommendations = generate_actionable_recommendations(ctx, &strengths_and_weaknesses);
    let market_insights = analyze_market_insights(ctx, scores.overall);
    let confidence_level = analysis_confidence(ctx);

    log::info!(
        "Detailed analysis: overall {} ({}), {} strengths, {} improvement areas",
        scores.overall,
        scores.ranking,
        strengths_and_weaknesses.strengths.len(),
        strengths_and_weaknesses.improvements.len()
    );

    Ok(DetailedAnalysisResult {
        scores,
        strengths_and_weaknesses,
        recommendations,
        market_insights,
        confidence_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::dictionary::{build_dictionary, SkillDictionary};
    use crate::processing::market::MarketDemandProvider;
    use crate::processing::normalizer::Normalizer;
    use crate::processing::profile::{AnalysisInput, CandidateProfile, Experience, SkillRequirement};
    use crate::processing::tables::EngineTables;

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

        fn analyze(&self, input: &AnalysisInput) -> DetailedAnalysisResult {
            let ctx = AnalysisContext::build(input, &self.tables, &self.normalizer, &self.market, 3).unwrap();
            perform_detailed_analysis(&ctx, &self.tables.benchmarks).unwrap()
        }
    }

    #[test]
    fn test_ranking_labels() {
        assert_eq!(Ranking::from_overall(85), Ranking::Excellent);
        assert_eq!(Ranking::from_overall(84), Ranking::AboveAverage);
        assert_eq!(Ranking::from_overall(55), Ranking::Average);
        assert_eq!(Ranking::from_overall(54), Ranking::BelowAverage);
        assert_eq!(Ranking::AboveAverage.to_string(), "Above Average");
    }

    #[test]
    fn test_profile_only_scores() {
        let fx = Fixture::new();
        let profile = CandidateProfile {
            skills: vec!["python".into(), "sql".into()],
            coursework: vec!["Data Structures".into()],
            experience: vec![Experience::new("Internship", "Built a software tool with a team")],
            is_student: true,
            year_level: Some("Junior".into()),
            major: None,
        };
        let input = AnalysisInput::new("Data Intern", "", &fx.dictionary)
            .with_profile(&profile)
            .with_category("Data")
            .with_requirements(vec![
                SkillRequirement::required("python", 2).unwrap(),
                SkillRequirement::required("excel", 1).unwrap(),
            ]);
        let result = fx.analyze(&input);
        let scores = &result.scores;

        assert_eq!(scores.readiness, 50);
        // python, sql, data structures: 8 * 3 + 10 * 1
        assert_eq!(scores.ats, 34);
        // 20 * 1 + 3 * 3 + 5 * 1
        assert_eq!(scores.impact, 34);
        assert_eq!(scores.polish, 100);
        // 20 + 7.5 + 10 + 15 + 15 = 67.5
        assert_eq!(scores.potential, 68);
        assert_eq!(scores.percentiles.polish, 90);
        assert!(scores.overall <= 100);

        let weaknesses = &result.strengths_and_weaknesses.improvements;
        assert_eq!(weaknesses[0].category, "Critical Skills Gap");
        assert_eq!(weaknesses[0].description, "Missing essential skills: excel");
        // sql is present so the data tools gap does not fire; teamwork is in the experience
        assert_eq!(weaknesses.len(), 1);

        let strengths = &result.strengths_and_weaknesses.strengths;
        assert!(strengths.iter().any(|s| s.category == "Professional Experience"));
    }

    #[test]
    fn test_collaboration_gap_and_recommendations() {
        let fx = Fixture::new();
        let input = AnalysisInput::new("Frontend Intern", "", &fx.dictionary)
            .with_skills(["html"])
            .with_category("Frontend")
            .with_resume("Solo developer. Wrote a website.")
            .with_requirements(vec![SkillRequirement::required("javascript", 2).unwrap()]);
        let result = fx.analyze(&input);

        let improvements = &result.strengths_and_weaknesses.improvements;
        let categories: Vec<&str> = improvements.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["Critical Skills Gap", "Frontend Fundamentals", "Collaboration Skills"]
        );
        assert_eq!(
            improvements[1].description,
            "Missing core frontend technologies: css, javascript."
        );

        let recs = &result.recommendations;
        assert!(recs.immediate[0].action.starts_with("Expand resume content"));
        assert!(recs.immediate.iter().any(|a| a.action.contains("version control")));
        assert!(recs.immediate.iter().any(|a| a.action.starts_with("Showcase any web development")));
        assert!(recs.short_term[0].action.contains("collaboration"));
        assert!(recs.short_term[1].action.starts_with("Include relevant coursework or projects related to missing essential skills"));
        assert_eq!(recs.long_term.len(), 1);
    }

    #[test]
    fn test_market_insights() {
        let fx = Fixture::new();
        let input = AnalysisInput::new("Backend Intern", "Java and Docker", &fx.dictionary)
            .with_skills(["python", "sql", "java"])
            .with_category("Backend");
        let result = fx.analyze(&input);
        let insights = &result.market_insights;

        assert_eq!(
            insights.competitive_position,
            "Strong competitive position with 3 high-demand skills"
        );
        assert_eq!(insights.salary_impact, "Medium-high salary potential - good foundation");
        assert_eq!(insights.skill_demand_analysis["python"].trend, DemandTrend::Rising);
        assert_eq!(insights.skill_demand_analysis["docker"].priority, 2);
        assert_eq!(insights.skill_demand_analysis["java"].priority, 1);
        assert!(insights.career_trajectory.starts_with("Current profile suggests"));
    }

    #[test]
    fn test_confidence_level() {
        let fx = Fixture::new();
        let resume = "x".repeat(600);
        let input = AnalysisInput::new("Intern", "", &fx.dictionary)
            .with_skills(["python", "sql", "java", "git", "excel"])
            .with_resume(&resume);
        let result = fx.analyze(&input);
        assert_eq!(result.confidence_level, 95);
    }
}
