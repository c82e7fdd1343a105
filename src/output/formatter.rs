//! Output formatters for console, JSON and Markdown reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::SkillGapReport;
use crate::processing::detailed::{DetailedAnalysisResult, ImprovementImpact, MarketValue};
use crate::processing::gap_analyzer::{Severity, SkillGap};
use crate::processing::learning_plan::LearningResource;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting skill-gap reports
pub trait OutputFormatter {
    fn format_report(&self, report: &SkillGapReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and section markers
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and sharing
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

const SCORE_ROWS: [(&str, &str); 6] = [
    ("Readiness", "Share of the role's required skills you already have"),
    ("Alignment", "Overlap between your skills and the job description"),
    ("ATS", "Résumé structure that applicant tracking systems can parse"),
    ("Impact", "Quantified results and relevant experience"),
    ("Polish", "Bullet formatting and length"),
    ("Potential", "Breadth of skills and coursework"),
];

fn score_values(report: &SkillGapReport) -> [u8; 6] {
    let s = &report.scores;
    [s.readiness, s.alignment, s.ats, s.impact, s.polish, s.potential]
}

fn format_demand(demand: f64) -> String {
    if demand >= 1000.0 {
        format!("{:.1}k", demand / 1000.0)
    } else {
        format!("{:.0}", demand)
    }
}

fn market_value_label(value: MarketValue) -> &'static str {
    match value {
        MarketValue::High => "high",
        MarketValue::Medium => "medium",
        MarketValue::Low => "low",
    }
}

fn impact_label(impact: ImprovementImpact) -> &'static str {
    match impact {
        ImprovementImpact::Critical => "critical",
        ImprovementImpact::Important => "important",
        ImprovementImpact::Beneficial => "beneficial",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_severity_icon(&self, severity: Severity) -> String {
        if self.use_colors {
            let icon = match severity {
                Severity::Critical => "🚨",
                Severity::Important => "⚠️",
                Severity::Beneficial => "💡",
            };
            format!("{} ", icon)
        } else {
            let text_icon = match severity {
                Severity::Critical => "[!]",
                Severity::Important => "[*]",
                Severity::Beneficial => "[+]",
            };
            format!("{} ", text_icon)
        }
    }

    fn score_bar(&self, score: u8) -> String {
        let filled = (score as usize + 5) / 10;
        let bar = format!("{}{}", "■".repeat(filled), "·".repeat(10 - filled.min(10)));
        let color = match score {
            70..=100 => Color::Green,
            50..=69 => Color::Yellow,
            _ => Color::Red,
        };
        self.colorize(&bar, color)
    }

    fn format_gap(&self, output: &mut String, gap: &SkillGap) {
        output.push_str(&format!(
            "  {}{} ({}, weight {}) - demand {} - {}\n",
            self.format_severity_icon(gap.severity),
            self.colorize(&gap.skill, Color::Cyan),
            gap.priority,
            gap.weight,
            format_demand(gap.market_demand),
            gap.time_to_learn
        ));
        output.push_str(&format!("     {}\n", gap.career_impact));
        if self.detailed {
            if !gap.learning_path.is_empty() {
                output.push_str(&format!("     Path: {}\n", gap.learning_path.join(" → ")));
            }
            for resource in &gap.resources {
                output.push_str(&format!("     {}\n", self.format_resource(resource)));
            }
        }
    }

    fn format_resource(&self, resource: &LearningResource) -> String {
        format!(
            "📚 {} ({}, {}) {}",
            resource.title,
            resource.platform,
            resource.duration,
            self.colorize(&resource.url, Color::BrightBlack)
        )
    }

    fn format_detailed(&self, output: &mut String, detailed: &DetailedAnalysisResult) {
        output.push_str(&self.format_header("🔬 Detailed Analysis", 2));
        output.push_str(&format!(
            "Ranking: {} | Confidence: {}%\n",
            self.colorize(&detailed.scores.ranking.to_string(), Color::Cyan),
            detailed.confidence_level
        ));
        let p = &detailed.scores.percentiles;
        output.push_str(&format!(
            "Percentiles: overall {} | ATS {} | alignment {} | impact {} | polish {} | potential {}\n",
            p.overall, p.ats, p.alignment, p.impact, p.polish, p.potential
        ));

        let sw = &detailed.strengths_and_weaknesses;
        if !sw.strengths.is_empty() {
            output.push_str(&self.format_header("💪 Strengths", 3));
            for strength in &sw.strengths {
                output.push_str(&format!(
                    "  • {}: {} (market value: {})\n",
                    self.colorize(&strength.category, Color::Green),
                    strength.description,
                    market_value_label(strength.market_value)
                ));
                for evidence in &strength.evidence {
                    output.push_str(&format!("      - {}\n", evidence));
                }
            }
        }
        if !sw.improvements.is_empty() {
            output.push_str(&self.format_header("🔧 Improvements", 3));
            for improvement in &sw.improvements {
                output.push_str(&format!(
                    "  • {}: {} [{}, {}]\n",
                    self.colorize(&improvement.category, Color::Yellow),
                    improvement.description,
                    impact_label(improvement.impact),
                    improvement.time_to_address
                ));
            }
        }

        let recs = &detailed.recommendations;
        output.push_str(&self.format_header("📋 Action Plan", 3));
        for action in &recs.immediate {
            output.push_str(&format!("  Now: {}\n      {}\n", action.action, action.rationale));
            output.push_str(&format!("      e.g. {}\n", self.colorize(&action.example, Color::BrightBlack)));
        }
        for action in &recs.short_term {
            output.push_str(&format!("  {}: {}\n      {}\n", action.timeline, action.action, action.rationale));
        }
        for action in &recs.long_term {
            output.push_str(&format!("  {}: {}\n      {}\n", action.timeline, action.action, action.rationale));
        }

        let insights = &detailed.market_insights;
        output.push_str(&self.format_header("📈 Market Insights", 3));
        output.push_str(&format!("  Position: {}\n", insights.competitive_position));
        output.push_str(&format!("  Salary: {}\n", insights.salary_impact));
        output.push_str(&format!("  Trajectory: {}\n", insights.career_trajectory));
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &SkillGapReport) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&self.format_header(&format!("🎯 SKILL GAP ANALYSIS: {}", report.role.title), 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms | Market data: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms,
            report.metadata.market_source
        ));

        // Summary
        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {}% {}\n",
            report.summary.overall,
            self.format_score_badge(report.summary.overall)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&report.summary.verdict, Color::Cyan)));
        output.push_str(&format!(
            "Gaps: {} ({} critical) | Confidence: {}%\n",
            report.summary.gap_count, report.summary.critical_gap_count, report.summary.confidence
        ));

        // Scores
        output.push_str(&self.format_header("Score Breakdown", 3));
        for ((name, description), score) in SCORE_ROWS.iter().zip(score_values(report)) {
            output.push_str(&format!("  {:<10} {} {:>3}%", name, self.score_bar(score), score));
            if self.detailed {
                output.push_str(&format!("  {}", self.colorize(description, Color::BrightBlack)));
            }
            output.push('\n');
        }

        if !report.scores.strengths.is_empty() {
            output.push_str(&self.format_header("✅ Key Strengths", 3));
            for strength in &report.scores.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !report.scores.improvements.is_empty() {
            output.push_str(&self.format_header("🎯 Improvement Areas", 3));
            for area in &report.scores.improvements {
                output.push_str(&format!("  • {}\n", self.colorize(area, Color::Yellow)));
            }
        }

        // Gaps
        let gaps = &report.gap_analysis;
        if report.has_gaps() {
            output.push_str(&self.format_header("🧩 Skill Gaps", 2));
            for gap in gaps.all_gaps() {
                self.format_gap(&mut output, gap);
            }

            if !gaps.quick_wins.is_empty() {
                let names: Vec<&str> = gaps.quick_wins.iter().map(|g| g.skill.as_str()).collect();
                output.push_str(&format!("\n⚡ Quick wins: {}\n", self.colorize(&names.join(", "), Color::Green)));
            }
            if !gaps.long_term_goals.is_empty() {
                let names: Vec<&str> = gaps.long_term_goals.iter().map(|g| g.skill.as_str()).collect();
                output.push_str(&format!("🏔  Long-term goals: {}\n", names.join(", ")));
            }
        } else {
            output.push_str(&self.format_header("🧩 Skill Gaps", 2));
            output.push_str(&format!("  {}\n", self.colorize("No skill gaps found for this role", Color::Green)));
        }

        // Market explanations
        let market = &report.scores.market_analysis;
        if !market.explanations.explanations.is_empty() {
            output.push_str(&self.format_header("📊 Why These Skills Matter", 2));
            for explanation in &market.explanations.explanations {
                output.push_str(&format!(
                    "  • {} ({} openings): {}\n",
                    self.colorize(&explanation.skill, Color::Cyan),
                    explanation.market_demand,
                    explanation.reason
                ));
            }
            output.push_str(&format!("\n  {}\n", market.explanations.skill_gaps.learning_path));
        }
        if !market.technical_improvements.is_empty() {
            output.push_str(&self.format_header("🛠  Technical Improvements", 3));
            for improvement in &market.technical_improvements {
                output.push_str(&format!("  • {}\n", improvement));
            }
        }

        // Learning recommendations
        let recs = &gaps.learning_recommendations;
        if !recs.immediate.is_empty() || !recs.next_month.is_empty() || !recs.next_quarter.is_empty() {
            output.push_str(&self.format_header("🗓  Learning Timeline", 2));
            for (label, items) in [
                ("This week", &recs.immediate),
                ("Next month", &recs.next_month),
                ("Next quarter", &recs.next_quarter),
            ] {
                for item in items {
                    output.push_str(&format!("  {:<13} {}\n", label, item));
                }
            }
        }

        // Learning plan
        if !report.learning_plan.is_empty() {
            output.push_str(&self.format_header("📅 14-Day Learning Plan", 2));
            for day in &report.learning_plan {
                output.push_str(&format!("  Day {:>2}: {}\n", day.day, day.task));
            }
        }

        let insights = &gaps.industry_insights;
        output.push_str(&self.format_header("🏢 Industry Insights", 3));
        output.push_str(&format!("  {}\n", insights.market_position));
        output.push_str(&format!("  {}\n", insights.salary_impact));
        if !insights.trending_skills.is_empty() {
            output.push_str(&format!("  Trending: {}\n", insights.trending_skills.join(", ")));
        }

        if let Some(detailed) = &report.detailed {
            self.format_detailed(&mut output, detailed);
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &SkillGapReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match score {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }

    fn format_markdown_gap(gap: &SkillGap) -> String {
        let mut output = format!("#### {}\n\n", gap.skill);
        output.push_str(&format!(
            "**Severity:** {} | **Priority:** {} | **Demand:** {} | **Time to learn:** {}\n\n",
            gap.severity,
            gap.priority,
            format_demand(gap.market_demand),
            gap.time_to_learn
        ));
        output.push_str(&format!("{}\n\n", gap.career_impact));
        if !gap.learning_path.is_empty() {
            output.push_str(&format!("**Path:** {}\n\n", gap.learning_path.join(" → ")));
        }
        for resource in &gap.resources {
            output.push_str(&format!(
                "- [{}]({}) ({}, {})\n",
                resource.title, resource.url, resource.platform, resource.duration
            ));
        }
        if !gap.resources.is_empty() {
            output.push('\n');
        }
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &SkillGapReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# 🎯 Skill Gap Analysis: {}\n\n", report.role.title));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms | **Market data:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms,
                report.metadata.market_source
            ));
            let files: Vec<String> = [
                ("Job", &report.metadata.job_file),
                ("Resume", &report.metadata.resume_file),
                ("Profile", &report.metadata.profile_file),
            ]
            .iter()
            .filter_map(|(label, path)| {
                path.as_ref().map(|p| {
                    let name = Path::new(p)
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| p.clone());
                    format!("**{}:** `{}`", label, name)
                })
            })
            .collect();
            if !files.is_empty() {
                output.push_str(&format!("{}\n", files.join(" | ")));
            }
            output.push('\n');
        }

        // Summary
        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {}% {}\n\n",
            report.summary.overall,
            Self::markdown_score_badge(report.summary.overall)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.summary.verdict));
        output.push_str(&format!(
            "**Gaps:** {} ({} critical) | **Confidence:** {}%\n\n",
            report.summary.gap_count, report.summary.critical_gap_count, report.summary.confidence
        ));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score | Measures |\n");
        output.push_str("|-----------|-------|----------|\n");
        for ((name, description), score) in SCORE_ROWS.iter().zip(score_values(report)) {
            output.push_str(&format!("| {} | {}% | {} |\n", name, score, description));
        }
        output.push('\n');

        if !report.scores.strengths.is_empty() {
            output.push_str("### ✅ Key Strengths\n\n");
            for strength in &report.scores.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !report.scores.improvements.is_empty() {
            output.push_str("### 🎯 Areas for Improvement\n\n");
            for area in &report.scores.improvements {
                output.push_str(&format!("- {}\n", area));
            }
            output.push('\n');
        }

        // Gaps
        output.push_str("## Skill Gaps\n\n");
        let gaps = &report.gap_analysis;
        if report.has_gaps() {
            for (title, list) in [
                ("Critical", &gaps.critical_gaps),
                ("Important", &gaps.important_gaps),
                ("Beneficial", &gaps.beneficial_gaps),
            ] {
                if list.is_empty() {
                    continue;
                }
                output.push_str(&format!("### {} ({})\n\n", title, list.len()));
                for gap in list {
                    output.push_str(&Self::format_markdown_gap(gap));
                }
            }
            if !gaps.quick_wins.is_empty() {
                let names: Vec<&str> = gaps.quick_wins.iter().map(|g| g.skill.as_str()).collect();
                output.push_str(&format!("**Quick wins:** {}\n\n", names.join(", ")));
            }
        } else {
            output.push_str("No skill gaps found for this role.\n\n");
        }

        let market = &report.scores.market_analysis;
        if !market.explanations.explanations.is_empty() {
            output.push_str("## Market Context\n\n");
            output.push_str("| Skill | Openings | Why it matters |\n");
            output.push_str("|-------|----------|----------------|\n");
            for explanation in &market.explanations.explanations {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    explanation.skill, explanation.market_demand, explanation.reason
                ));
            }
            output.push_str(&format!("\n{}\n\n", market.explanations.skill_gaps.learning_path));
        }
        if !market.technical_improvements.is_empty() {
            output.push_str("### Technical Improvements\n\n");
            for improvement in &market.technical_improvements {
                output.push_str(&format!("- {}\n", improvement));
            }
            output.push('\n');
        }

        if !report.learning_plan.is_empty() {
            output.push_str("## 📅 14-Day Learning Plan\n\n");
            output.push_str("| Day | Task |\n");
            output.push_str("|-----|------|\n");
            for day in &report.learning_plan {
                output.push_str(&format!("| {} | {} |\n", day.day, day.task));
            }
            output.push('\n');
        }

        let insights = &gaps.industry_insights;
        output.push_str("## Industry Insights\n\n");
        output.push_str(&format!("- {}\n", insights.market_position));
        output.push_str(&format!("- {}\n", insights.salary_impact));
        for advantage in &insights.competitive_advantage {
            output.push_str(&format!("- {}\n", advantage));
        }
        output.push('\n');

        if let Some(detailed) = &report.detailed {
            output.push_str("## Detailed Analysis\n\n");
            output.push_str(&format!(
                "**Ranking:** {} | **Confidence:** {}%\n\n",
                detailed.scores.ranking, detailed.confidence_level
            ));
            for action in &detailed.recommendations.immediate {
                output.push_str(&format!("- **Now:** {} ({})\n", action.action, action.rationale));
            }
            for action in &detailed.recommendations.short_term {
                output.push_str(&format!("- **{}:** {}\n", action.timeline, action.action));
            }
            for action in &detailed.recommendations.long_term {
                output.push_str(&format!("- **{}:** {}\n", action.timeline, action.action));
            }
            output.push_str(&format!(
                "\n{}\n\n{}\n",
                detailed.market_insights.competitive_position, detailed.market_insights.career_trajectory
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &SkillGapReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, role_id: &str, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_skillgap{}.txt", role_id, timestamp_suffix),
        OutputFormat::Json => format!("{}_skillgap{}.json", role_id, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_skillgap{}.md", role_id, timestamp_suffix),
    }
}
