//! CLI interface for the skill-gap analyzer

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skillgap")]
#[command(about = "Skill-gap and readiness scoring for internship and entry-level roles")]
#[command(long_about = "Compare a candidate's skills, coursework and résumé against a role's requirements \
and a job description, weighted by market demand, and produce scores, gaps and a learning plan")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a candidate against a role and job description
    Analyze {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Role id from the catalog, e.g. ai-ml-intern
        #[arg(short, long)]
        role: String,

        /// Path to resume file (TXT, MD)
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Candidate profile JSON (skills, coursework, experience)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Role catalog JSON, overrides the bundled catalog
        #[arg(long)]
        roles: Option<PathBuf>,

        /// Market demand JSON, overrides the built-in fallback table
        #[arg(short, long)]
        market: Option<PathBuf>,

        /// Learning resources JSON, overrides the bundled resources
        #[arg(long)]
        resources: Option<PathBuf>,

        /// Job description title, defaults to the role title
        #[arg(short, long)]
        title: Option<String>,

        /// Include the detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Skip the 14-day learning plan
        #[arg(long)]
        no_plan: bool,
    },

    /// List roles in the catalog
    Roles {
        /// Role catalog JSON, overrides the bundled catalog
        #[arg(long)]
        roles: Option<PathBuf>,

        /// Show each role's requirements
        #[arg(short, long)]
        detailed: bool,
    },

    /// Print the skills found in a document
    Extract {
        /// Path to a TXT or MD document
        #[arg(short, long)]
        file: PathBuf,

        /// Show how often each skill appears
        #[arg(long)]
        counts: bool,
    },

    /// Normalize skill names
    Normalize {
        /// Skill names to normalize
        #[arg(required = true)]
        skills: Vec<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "processing.fuzzy_min_len")
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::parse_from([
            "skillgap", "analyze", "--job", "jd.md", "--role", "ai-ml-intern", "--resume", "cv.txt", "-o", "json",
        ]);
        match cli.command {
            Commands::Analyze { job, role, resume, output, detailed, .. } => {
                assert_eq!(job, PathBuf::from("jd.md"));
                assert_eq!(role, "ai-ml-intern");
                assert_eq!(resume, Some(PathBuf::from("cv.txt")));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(!detailed);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_parse_data_overrides() {
        let cli = Cli::parse_from([
            "skillgap", "analyze", "-j", "jd.txt", "-r", "robotics-intern", "--resources", "res.json", "-m", "market.json",
        ]);
        match cli.command {
            Commands::Analyze { resources, market, roles, .. } => {
                assert_eq!(resources, Some(PathBuf::from("res.json")));
                assert_eq!(market, Some(PathBuf::from("market.json")));
                assert!(roles.is_none());
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("resume.MD"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("resume.pdf"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("resume"), &["txt", "md"]).is_err());
    }
}
