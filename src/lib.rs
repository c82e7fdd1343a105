//! skillgap: skill-gap and readiness scoring engine

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, SkillGapError};
pub use processing::analyzer::{AnalysisEngine, AnalysisOutcome};
pub use processing::profile::{AnalysisInput, CandidateProfile, RoleCatalog, SkillRequirement};
