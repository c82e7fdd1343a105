//! Quick scoring path: six subscores, strengths, improvements and market notes

use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::processing::context::AnalysisContext;
use crate::processing::explanation::{ExplanationGenerator, MarketExplanations};
use crate::processing::extractor::ScoredSkillExtractor;
use crate::processing::learning_plan::MissingSkill;
use crate::processing::similarity::cosine_similarity;
use crate::processing::vectorizer::TfIdfVectorizer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub readiness: u8,
    pub alignment: u8,
    pub ats: u8,
    pub impact: u8,
    pub polish: u8,
    pub potential: u8,
    pub overall: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub missing_skills: Vec<MissingSkill>,
    pub market_analysis: MarketAnalysis,
    pub meta: ScoringMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    #[serde(flatten)]
    pub explanations: MarketExplanations,
    pub technical_improvements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringMeta {
    pub user_skills_count: usize,
    pub role_requirements_count: usize,
    pub resume_skills_count: usize,
    pub jd_skills_count: usize,
    pub internships: usize,
    pub projects_with_metrics: usize,
    pub quant_bullets: usize,
    pub bullet_count: usize,
    pub market_fallback: bool,
    /// Present only when résumé text was supplied
    pub alignment: Option<AlignmentDetails>,
}

/// How the résumé-based alignment score was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentDetails {
    /// Cosine plus keyword boost, capped at 1.0
    pub score: f64,
    pub document_similarity: f64,
    pub keyword_matches: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub skill_relevance: BTreeMap<String, f64>,
    pub recommendations: Vec<String>,
}

struct ResumeSignals {
    ats: u8,
    impact: u8,
    polish: u8,
    internships: usize,
    projects_with_metrics: usize,
    quant_bullets: usize,
    bullet_count: usize,
}

struct ResumePatterns {
    headers: Regex,
    years: Regex,
    action_verbs: Regex,
    quantified: Regex,
    digits: Regex,
}

impl ResumePatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            headers: Regex::new(r"experience|education|skills")?,
            years: Regex::new(r"\d{4}")?,
            action_verbs: Regex::new(r"\b(developed|built|led|managed|designed|implemented|created|analyzed)\b")?,
            quantified: Regex::new(r"\d+%|\d+x")?,
            digits: Regex::new(r"\d+")?,
        })
    }
}

fn count_bullets(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '•' | '-' | '*')).count()
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Lowercased résumé heuristics
fn resume_signals(ctx: &AnalysisContext, resume: &str, patterns: &ResumePatterns) -> ResumeSignals {
    let text = resume.to_lowercase();
    let bullets = count_bullets(&text);

    let mut ats = 0u32;
    if patterns.headers.is_match(&text) {
        ats += 20;
    }
    if bullets >= 5 {
        ats += 20;
    }
    if patterns.years.find_iter(&text).count() >= 2 {
        ats += 15;
    }
    if patterns.action_verbs.is_match(&text) {
        ats += 25;
    }
    if ctx.jd_skills.iter().any(|skill| text.contains(skill.as_str())) {
        ats += 20;
    }

    let internships = text.matches("intern").count();
    let projects_with_metrics = patterns.quantified.find_iter(&text).count();
    let quant_bullets = patterns.digits.find_iter(&text).count();
    let impact = (30 * internships + 20 * projects_with_metrics + 5 * quant_bullets).min(100);

    let mut polish = if text.contains("\n\n") { 20 } else { 10 };
    polish += 20 + 20;
    if !text.contains("references available") {
        polish += 20;
    }
    polish += 20;

    ResumeSignals {
        ats: ats.min(100) as u8,
        impact: impact as u8,
        polish: polish.min(100) as u8,
        internships,
        projects_with_metrics,
        quant_bullets,
        bullet_count: bullets.min(10),
    }
}

/// Profile-only fallbacks when there is no résumé text
fn profile_signals(ctx: &AnalysisContext) -> ResumeSignals {
    let skill_bonus = if ctx.user_skills.len() >= 5 { 20 } else { 0 };
    let impact = (skill_bonus + 30 * ctx.met_required()).min(100);
    ResumeSignals {
        ats: 0,
        impact: impact as u8,
        polish: 0,
        internships: 0,
        projects_with_metrics: 0,
        quant_bullets: 0,
        bullet_count: 0,
    }
}

/// Required-or-JD skills the user already has, over the size of that union
fn token_alignment(ctx: &AnalysisContext) -> (usize, usize) {
    let tokens: BTreeSet<&str> = ctx
        .required()
        .map(|r| r.skill.as_str())
        .chain(ctx.jd_skills.iter().map(String::as_str))
        .collect();
    let hits = tokens.iter().filter(|t| ctx.has_skill(t)).count();
    (hits, tokens.len())
}

/// TF-IDF cosine between résumé and JD, boosted by matched skills
pub fn resume_alignment(ctx: &AnalysisContext, resume: &str, config: &ProcessingConfig) -> Result<AlignmentDetails> {
    let mut vectorizer = TfIdfVectorizer::new(config.max_vocabulary, config.smooth_idf);
    let vectors = vectorizer.fit_transform(&[resume, ctx.input.jd_text.as_str()]);
    let similarity = cosine_similarity(&vectors[0], &vectors[1]);

    let required: BTreeSet<&str> = ctx.required().map(|r| r.skill.as_str()).collect();
    let scored = ScoredSkillExtractor::from_extractor(ctx.extractor()?).extract(resume)?;

    let keyword_matches: Vec<String> = scored
        .iter()
        .filter(|s| ctx.jd_skills.contains(&s.skill) || required.contains(s.skill.as_str()))
        .map(|s| s.skill.clone())
        .collect();

    let resume_set: BTreeSet<&str> = scored.iter().map(|s| s.skill.as_str()).collect();
    let missing_keywords: Vec<String> = required
        .iter()
        .copied()
        .chain(ctx.jd_skills.iter().map(String::as_str))
        .filter(|skill| !resume_set.contains(skill))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let skill_relevance = scored
        .iter()
        .map(|s| {
            let factor = if required.contains(s.skill.as_str()) {
                1.0
            } else if ctx.jd_skills.contains(&s.skill) {
                0.8
            } else {
                0.5
            };
            (s.skill.clone(), s.confidence * factor)
        })
        .collect();

    let denominator = (required.len() + ctx.jd_skills.len()).max(1) as f64;
    let boost = 0.3 * keyword_matches.len() as f64 / denominator;
    let score = (similarity + boost).min(1.0);

    let mut recommendations = Vec::new();
    if score < 0.3 {
        recommendations.push("Consider tailoring your resume more closely to this job description".to_string());
        recommendations.push("Add more relevant keywords and technical terms".to_string());
    } else if score < 0.6 {
        recommendations.push("Good foundation - strengthen alignment with job requirements".to_string());
    } else {
        recommendations.push("Excellent alignment with job requirements".to_string());
    }

    let critical: Vec<&str> = required
        .iter()
        .copied()
        .filter(|skill| !resume_set.contains(skill))
        .take(3)
        .collect();
    if !critical.is_empty() {
        recommendations.push(format!("Focus on learning these critical skills: {}", critical.join(", ")));
    }
    if !keyword_matches.is_empty() {
        let top: Vec<&str> = keyword_matches.iter().take(3).map(String::as_str).collect();
        recommendations.push(format!("Highlight your experience with: {}", top.join(", ")));
    }

    log::debug!(
        "Résumé alignment: cosine {:.3}, {} keyword matches, boost {:.3}",
        similarity,
        keyword_matches.len(),
        boost
    );

    Ok(AlignmentDetails {
        score,
        document_similarity: similarity,
        keyword_matches,
        missing_keywords,
        skill_relevance,
        recommendations,
    })
}

fn strengths(ctx: &AnalysisContext, hits: usize, tokens: usize) -> Vec<String> {
    let mut strengths = Vec::new();
    let met = ctx.met_required() as f64;
    let total = ctx.total_required() as f64;

    if met >= total * 0.5 {
        strengths.push("Solid foundation in core required skills".to_string());
    } else if met > 0.0 {
        strengths.push("Good starting point with some required skills".to_string());
    }

    let bonus = ctx.met_preferred();
    if bonus > 0 {
        strengths.push(format!("{} bonus skills that make you stand out", bonus));
    }

    if tokens > 0 && hits as f64 >= tokens as f64 * 0.4 {
        strengths.push("Skills align well with this internship opportunity".to_string());
    }
    if ctx.has_any(&["python", "javascript"]) {
        strengths.push("Strong programming foundation with versatile languages".to_string());
    }
    if ctx.has_skill("git") {
        strengths.push("Version control experience - highly valued by employers".to_string());
    }

    strengths
}

fn improvements(readiness: u8, alignment: u8, ats: u8, impact: u8, has_resume: bool) -> Vec<String> {
    let mut improvements = Vec::new();

    if readiness < 50 {
        improvements.push("Focus on learning the most essential required skills first".to_string());
    } else if readiness < 70 {
        improvements.push("Strengthen proficiency in remaining required skills".to_string());
    }

    if alignment < 40 {
        improvements.push("Study the job description and learn key technologies mentioned".to_string());
    } else if alignment < 70 {
        improvements.push("Continue building skills that match job requirements".to_string());
    }

    if has_resume && ats < 60 {
        improvements.push("Optimize resume with relevant keywords and clear formatting".to_string());
    }

    if impact < 30 {
        improvements.push("Add personal projects or coursework examples to demonstrate skills".to_string());
    } else if impact < 60 {
        improvements.push("Quantify your project achievements (e.g., \"built app with 5 features\")".to_string());
    }

    improvements
}

pub fn compute_scores(ctx: &AnalysisContext, config: &ProcessingConfig) -> Result<ScoringResult> {
    let patterns = ResumePatterns::new()?;
    let readiness = ctx.readiness();
    let (hits, tokens) = token_alignment(ctx);

    let (alignment, details, signals) = match ctx.input.resume() {
        Some(resume) => {
            let details = resume_alignment(ctx, resume, config)?;
            let alignment = clamp_score(details.score * 100.0);
            (alignment, Some(details), resume_signals(ctx, resume, &patterns))
        }
        None => {
            let alignment = if tokens == 0 {
                0
            } else {
                clamp_score(100.0 * hits as f64 / tokens as f64)
            };
            (alignment, None, profile_signals(ctx))
        }
    };

    let skill_count = ctx.user_skills.len();
    let mut potential = readiness as f64;
    if skill_count >= 5 {
        potential += 15.0;
    }
    potential += 15.0 * (skill_count as f64 / 2.0).min(5.0);
    if ctx.has_any(&["python", "javascript"]) {
        potential += 10.0;
    }
    let potential = clamp_score(potential.min(100.0));

    let overall = if details.is_some() {
        0.35 * alignment as f64
            + 0.25 * readiness as f64
            + 0.15 * signals.ats as f64
            + 0.15 * signals.impact as f64
            + 0.10 * signals.polish as f64
    } else {
        0.5 * alignment as f64 + 0.3 * readiness as f64 + 0.2 * signals.impact as f64
    };
    let overall = clamp_score(overall);

    let missing = ctx.missing_requirements();
    let missing_skills = missing
        .iter()
        .map(|req| MissingSkill::from_requirement(req, Vec::new()))
        .collect();

    let prioritized = ctx.market.prioritize_skill_gaps(&missing);
    let explanations = ExplanationGenerator::new(ctx.market, config.top_explanations)?.generate(
        &prioritized,
        &ctx.user_skills,
        ctx.role_category(),
        &ctx.input.jd_text,
    );
    let technical_improvements =
        ctx.market
            .technical_improvements(&missing, &ctx.user_skills, ctx.role_category(), readiness, alignment);

    log::info!(
        "Scores: overall {}, readiness {}, alignment {}, ats {}, impact {}, polish {}, potential {}",
        overall,
        readiness,
        alignment,
        signals.ats,
        signals.impact,
        signals.polish,
        potential
    );

    Ok(ScoringResult {
        readiness,
        alignment,
        ats: signals.ats,
        impact: signals.impact,
        polish: signals.polish,
        potential,
        overall,
        strengths: strengths(ctx, hits, tokens),
        improvements: improvements(readiness, alignment, signals.ats, signals.impact, details.is_some()),
        missing_skills,
        market_analysis: MarketAnalysis {
            explanations,
            technical_improvements,
        },
        meta: ScoringMeta {
            user_skills_count: skill_count,
            role_requirements_count: ctx.requirements.len(),
            resume_skills_count: ctx.resume_skills.len(),
            jd_skills_count: ctx.jd_skills.len(),
            internships: signals.internships,
            projects_with_metrics: signals.projects_with_metrics,
            quant_bullets: signals.quant_bullets,
            bullet_count: signals.bullet_count,
            market_fallback: ctx.market.is_fallback(),
            alignment: details,
        },
    })
}
