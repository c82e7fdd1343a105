//! Report model and output formatters

pub mod formatter;
pub mod report;

pub use formatter::{ReportGenerator, save_report_to_file, suggest_filename};
pub use report::{ReportMetadata, RoleSummary, SkillGapReport};
