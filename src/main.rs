//! skillgap: skill-gap and readiness scoring for internship and entry-level roles

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use skillgap::cli::{self, Cli, Commands, ConfigAction};
use skillgap::config::{Config, OutputFormat};
use skillgap::error::{Result, SkillGapError};
use skillgap::input::InputManager;
use skillgap::output::{save_report_to_file, suggest_filename, ReportGenerator, ReportMetadata, RoleSummary, SkillGapReport};
use skillgap::processing::analyzer::AnalysisEngine;
use skillgap::processing::extractor::SkillExtractor;
use skillgap::processing::learning_plan::ResourceCatalog;
use skillgap::processing::profile::{AnalysisInput, RoleCatalog};
use skillgap::processing::tables::EngineTables;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Config::load_from(path),
        Some(path) => {
            warn!("Configuration file {} not found, writing defaults", path.display());
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
        None => Config::load(),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn check_extension(path: &Path, allowed: &[&str], label: &str) -> Result<()> {
    cli::validate_file_extension(path, allowed)
        .map_err(|e| SkillGapError::InvalidInput(format!("{} file: {}", label, e)))
}

async fn load_role_catalog(input_manager: &InputManager, path: Option<&Path>) -> Result<RoleCatalog> {
    match path {
        Some(path) => {
            check_extension(path, &["json"], "Role catalog")?;
            input_manager.load_roles(path).await
        }
        None => RoleCatalog::builtin(),
    }
}

async fn load_resource_catalog(input_manager: &InputManager, path: Option<&Path>) -> Result<ResourceCatalog> {
    match path {
        Some(path) => {
            check_extension(path, &["json"], "Learning resources")?;
            input_manager.load_resources(path).await
        }
        None => ResourceCatalog::builtin(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            job,
            role,
            resume,
            profile,
            roles,
            market,
            resources,
            title,
            detailed,
            output,
            save,
            no_plan,
        } => {
            info!("Starting skill-gap analysis for role '{}'", role);

            // Validate input files
            check_extension(&job, &["txt", "md"], "Job description")?;
            if let Some(resume) = &resume {
                check_extension(resume, &["txt", "md"], "Resume")?;
            }
            if let Some(profile) = &profile {
                check_extension(profile, &["json"], "Profile")?;
            }

            let output_format = match &output {
                Some(format) => cli::parse_output_format(format).map_err(SkillGapError::InvalidInput)?,
                None => config.output.format.clone(),
            };
            let detailed = detailed || config.output.detailed;
            let include_plan = !no_plan && config.output.include_learning_plan;

            let pb = (output_format == OutputFormat::Console).then(|| spinner("Loading inputs..."));

            let mut input_manager = InputManager::new();
            let job_text = input_manager.extract_text(&job).await?;
            let resume_text = match &resume {
                Some(path) => Some(input_manager.extract_text(path).await?),
                None => None,
            };
            let candidate = match &profile {
                Some(path) => Some(input_manager.load_profile(path).await?),
                None => None,
            };

            let roles_path = roles.or_else(|| config.data.roles_path.clone());
            let catalog = load_role_catalog(&input_manager, roles_path.as_deref()).await?;

            let market_path: Option<PathBuf> = market.or_else(|| config.data.market_path.clone());
            let market_data = match &market_path {
                Some(path) => {
                    check_extension(path, &["json"], "Market data")?;
                    Some(input_manager.load_market(path).await?)
                }
                None => None,
            };

            let resources_path = resources.or_else(|| config.data.resources_path.clone());
            let resource_catalog = load_resource_catalog(&input_manager, resources_path.as_deref()).await?;

            if let Some(pb) = &pb {
                pb.set_message("Analyzing skills...");
            }

            let engine = AnalysisEngine::from_parts(
                &config.processing,
                EngineTables::default(),
                catalog,
                resource_catalog,
                market_data.as_ref(),
            )?;
            let role_set = engine.role(&role)?.clone();
            let jd_title = title.unwrap_or_else(|| role_set.title.clone());

            let mut input = AnalysisInput::new(&jd_title, &job_text, engine.dictionary()).with_role(&role_set);
            if let Some(candidate) = &candidate {
                input = input.with_profile(candidate);
            }
            if let Some(text) = &resume_text {
                input = input.with_resume(text);
            }
            input.validate()?;

            let outcome = engine.analyze(&input, detailed, include_plan)?;

            if let Some(pb) = pb {
                pb.finish_and_clear();
            }

            let market_source = match &market_path {
                Some(path) => path.display().to_string(),
                None => "built-in fallback".to_string(),
            };
            let mut metadata = ReportMetadata::new(&market_source, outcome.processing_time_ms);
            metadata.job_file = Some(job.display().to_string());
            metadata.resume_file = resume.as_ref().map(|p| p.display().to_string());
            metadata.profile_file = profile.as_ref().map(|p| p.display().to_string());

            let report = SkillGapReport::from_outcome(RoleSummary::from_role(&role_set), outcome, metadata);
            info!(
                "Analysis complete: overall {}%, {} gaps",
                report.summary.overall, report.summary.gap_count
            );

            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
            let content = generator.generate_report(&report, &output_format)?;
            println!("{}", content);

            if let Some(save_path) = save {
                let save_path = if save_path.is_dir() {
                    save_path.join(suggest_filename(&output_format, &role_set.id, true))
                } else {
                    save_path
                };
                // Saved console reports are plain text
                let saved = if output_format == OutputFormat::Console && config.output.color_output {
                    ReportGenerator::with_options(false, detailed, true, true).generate_report(&report, &output_format)?
                } else {
                    content
                };
                save_report_to_file(&saved, &save_path)?;
                println!("💾 Report saved to {}", save_path.display());
            }
        }

        Commands::Roles { roles, detailed } => {
            let input_manager = InputManager::new();
            let roles_path = roles.or_else(|| config.data.roles_path.clone());
            let catalog = load_role_catalog(&input_manager, roles_path.as_deref()).await?;

            println!("📚 Available Roles\n");
            for role in &catalog.roles {
                let required = role.requirements.iter().filter(|r| r.is_required()).count();
                println!(
                    "  {:<22} {} [{}] ({} required, {} preferred)",
                    role.id,
                    role.title,
                    role.category,
                    required,
                    role.requirements.len() - required
                );
                if detailed {
                    if !role.description.is_empty() {
                        println!("      {}", role.description);
                    }
                    for req in &role.requirements {
                        println!("      - {} (weight {}, {})", req.skill, req.weight, req.priority);
                    }
                }
            }
        }

        Commands::Extract { file, counts } => {
            check_extension(&file, &["txt", "md"], "Document")?;
            let mut input_manager = InputManager::new();
            let text = input_manager.extract_text(&file).await?;

            let engine = AnalysisEngine::new(&config.processing)?;
            if counts {
                let extractor = SkillExtractor::new(engine.dictionary(), engine.normalizer(), config.processing.fuzzy_min_len)?;
                let found = extractor.scan_counts(&text)?;
                println!("🔍 {} skills found in {}\n", found.len(), file.display());
                for (skill, count) in &found {
                    println!("  {:<28} {}", skill, count);
                }
            } else {
                let found = engine.extract_skills(&text, engine.dictionary())?;
                println!("🔍 {} skills found in {}\n", found.len(), file.display());
                for skill in &found {
                    println!("  • {}", skill);
                }
            }
        }

        Commands::Normalize { skills } => {
            let engine = AnalysisEngine::new(&config.processing)?;
            for skill in &skills {
                println!("{} → {}", skill, engine.normalizer().normalize_skill(skill));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set_value(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}
