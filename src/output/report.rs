//! Report structure for a complete skill-gap analysis

use crate::processing::analyzer::AnalysisOutcome;
use crate::processing::detailed::{DetailedAnalysisResult, Ranking};
use crate::processing::gap_analyzer::GapAnalysisResult;
use crate::processing::learning_plan::LearningPlanDay;
use crate::processing::profile::RoleRequirementSet;
use crate::processing::scoring::ScoringResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one analysis run produced, ready for formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub role: RoleSummary,
    pub summary: ReportSummary,
    pub scores: ScoringResult,
    pub gap_analysis: GapAnalysisResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed: Option<DetailedAnalysisResult>,

    #[serde(default)]
    pub learning_plan: Vec<LearningPlanDay>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl RoleSummary {
    pub fn from_role(role: &RoleRequirementSet) -> Self {
        Self {
            id: role.id.clone(),
            title: role.title.clone(),
            category: role.category.clone(),
            description: role.description.clone(),
        }
    }

    /// Summary for requirements that came from a job description rather than the catalog
    pub fn ad_hoc(title: &str) -> Self {
        Self {
            id: "custom".to_string(),
            title: title.to_string(),
            category: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub overall: u8,
    pub readiness: u8,
    pub verdict: String,
    pub ranking: Ranking,
    pub gap_count: usize,
    pub critical_gap_count: usize,
    pub confidence: u8,
}

/// Where the inputs came from and how long the run took
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_file: Option<String>,
    pub market_source: String,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(market_source: &str, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            job_file: None,
            resume_file: None,
            profile_file: None,
            market_source: market_source.to_string(),
            processing_time_ms,
        }
    }
}

impl SkillGapReport {
    pub fn from_outcome(role: RoleSummary, outcome: AnalysisOutcome, metadata: ReportMetadata) -> Self {
        let summary = Self::create_summary(&outcome);

        Self {
            role,
            summary,
            scores: outcome.scores,
            gap_analysis: outcome.gap_analysis,
            detailed: outcome.detailed,
            learning_plan: outcome.learning_plan,
            metadata,
        }
    }

    fn create_summary(outcome: &AnalysisOutcome) -> ReportSummary {
        let overall = outcome.scores.overall;
        let verdict = match overall {
            85..=100 => "Strong candidate - ready to apply for this role".to_string(),
            70..=84 => "Good fit - a few targeted skills would make you competitive".to_string(),
            55..=69 => "Promising foundation - focus on the critical gaps first".to_string(),
            40..=54 => "Developing - several core skills still need work".to_string(),
            _ => "Early stage - follow the learning plan before applying".to_string(),
        };

        let confidence = outcome
            .detailed
            .as_ref()
            .map(|d| d.confidence_level)
            .unwrap_or(outcome.gap_analysis.confidence_score);

        ReportSummary {
            overall,
            readiness: outcome.scores.readiness,
            verdict,
            ranking: Ranking::from_overall(overall),
            gap_count: outcome.gap_analysis.gap_count(),
            critical_gap_count: outcome.gap_analysis.critical_gaps.len(),
            confidence,
        }
    }

    pub fn has_gaps(&self) -> bool {
        self.summary.gap_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessingConfig;
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::profile::AnalysisInput;

    #[test]
    fn test_report_from_outcome() {
        let engine = AnalysisEngine::new(&ProcessingConfig::default()).unwrap();
        let role = engine.role("data-analyst-intern").unwrap().clone();
        let input = AnalysisInput::new(&role.title, "", engine.dictionary())
            .with_skills(["sql", "excel"])
            .with_role(&role);
        let outcome = engine.analyze(&input, false, true).unwrap();
        let readiness = outcome.scores.readiness;

        let report = SkillGapReport::from_outcome(
            RoleSummary::from_role(&role),
            outcome,
            ReportMetadata::new("built-in", 12),
        );

        assert_eq!(report.role.id, "data-analyst-intern");
        assert_eq!(report.summary.readiness, readiness);
        assert!(report.has_gaps());
        assert!(!report.summary.verdict.is_empty());
        assert_eq!(report.metadata.processing_time_ms, 12);
        assert!(report.detailed.is_none());
    }

    #[test]
    fn test_ad_hoc_role_summary() {
        let summary = RoleSummary::ad_hoc("Platform Intern");
        assert_eq!(summary.id, "custom");
        assert_eq!(summary.title, "Platform Intern");
        assert!(summary.category.is_empty());
    }
}
