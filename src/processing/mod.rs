//! Skill matching, scoring and gap analysis

pub mod normalizer;
pub mod tables;
pub mod profile;
pub mod dictionary;
pub mod extractor;
pub mod text_processor;
pub mod vectorizer;
pub mod similarity;
pub mod market;
pub mod context;
pub mod gap_analyzer;
pub mod scoring;
pub mod detailed;
pub mod explanation;
pub mod learning_plan;
pub mod analyzer;
