//! Main analysis engine coordinating extraction, scoring, gap analysis and learning plans

use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::processing::context::AnalysisContext;
use crate::processing::detailed::{self, DetailedAnalysisResult};
use crate::processing::dictionary::{self, SkillDictionary};
use crate::processing::extractor::SkillExtractor;
use crate::processing::gap_analyzer::{self, GapAnalysisResult};
use crate::processing::learning_plan::{generate_learning_plan, LearningPlanDay, LearningResource, ResourceCatalog};
use crate::processing::market::{MarketData, MarketDemandProvider};
use crate::processing::normalizer::Normalizer;
use crate::processing::profile::{
    AnalysisInput, DetailedAnalysisInput, GapAnalysisInput, RoleCatalog, RoleRequirementSet, ScoringInput,
};
use crate::processing::scoring::{self, ScoringResult};
use crate::processing::tables::EngineTables;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;

/// Owns every read-only table an analysis needs. Holds no per-call state, so one engine
/// can serve concurrent analyses.
pub struct AnalysisEngine {
    tables: EngineTables,
    normalizer: Normalizer,
    roles: RoleCatalog,
    resources: ResourceCatalog,
    market: MarketDemandProvider,
    dictionary: SkillDictionary,
    config: ProcessingConfig,
}

/// Everything the `analyze` entry point produces for one candidate and role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub scores: ScoringResult,
    pub gap_analysis: GapAnalysisResult,
    pub detailed: Option<DetailedAnalysisResult>,
    pub learning_plan: Vec<LearningPlanDay>,
    pub processing_time_ms: u64,
}

impl AnalysisEngine {
    /// Engine over the bundled role catalog, resource catalog and fallback market table
    pub fn new(config: &ProcessingConfig) -> Result<Self> {
        Self::from_parts(
            config,
            EngineTables::default(),
            RoleCatalog::builtin()?,
            ResourceCatalog::builtin()?,
            None,
        )
    }

    pub fn from_parts(
        config: &ProcessingConfig,
        tables: EngineTables,
        roles: RoleCatalog,
        resources: ResourceCatalog,
        market_data: Option<&MarketData>,
    ) -> Result<Self> {
        let normalizer = Normalizer::from_tables(&tables);
        let resources = resources.normalized(&normalizer);
        let market = match market_data {
            Some(data) => MarketDemandProvider::from_data(data, &tables, &normalizer),
            None => {
                log::info!("No market data supplied, using built-in fallback table");
                MarketDemandProvider::fallback(&tables, &normalizer)
            }
        };

        let resource_list: Vec<LearningResource> = resources.resources().cloned().collect();
        let dictionary = dictionary::build_dictionary(&roles.roles, &resource_list, &tables, &normalizer);

        log::info!(
            "Analysis engine ready: {} roles, {} resources, {} dictionary skills, {} market entries",
            roles.roles.len(),
            resources.len(),
            dictionary.len(),
            market.len()
        );

        Ok(Self {
            tables,
            normalizer,
            roles,
            resources,
            market,
            dictionary,
            config: config.clone(),
        })
    }

    pub fn tables(&self) -> &EngineTables {
        &self.tables
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn roles(&self) -> &RoleCatalog {
        &self.roles
    }

    pub fn role(&self, id: &str) -> Result<&RoleRequirementSet> {
        self.roles.find(id)
    }

    pub fn resources(&self) -> &ResourceCatalog {
        &self.resources
    }

    pub fn market(&self) -> &MarketDemandProvider {
        &self.market
    }

    /// Dictionary over the engine's own roles and resources
    pub fn dictionary(&self) -> &SkillDictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Dictionary over caller-supplied roles and resources, normalized with this engine's tables
    pub fn build_dictionary(&self, roles: &[RoleRequirementSet], resources: &[LearningResource]) -> SkillDictionary {
        dictionary::build_dictionary(roles, resources, &self.tables, &self.normalizer)
    }

    pub fn extract_skills(&self, text: &str, dictionary: &SkillDictionary) -> Result<BTreeSet<String>> {
        SkillExtractor::new(dictionary, &self.normalizer, self.config.fuzzy_min_len)?.extract(text)
    }

    fn context<'a>(&'a self, input: &'a AnalysisInput<'a>) -> Result<AnalysisContext<'a>> {
        let market = input.market.unwrap_or(&self.market);
        AnalysisContext::build(input, &self.tables, &self.normalizer, market, self.config.fuzzy_min_len)
    }

    /// Quick scores with learning resources attached to each missing skill
    pub fn compute_scores(&self, input: &ScoringInput) -> Result<ScoringResult> {
        let ctx = self.context(input)?;
        let mut result = scoring::compute_scores(&ctx, &self.config)?;
        for missing in &mut result.missing_skills {
            missing.resources = self.resources.resources_for_skill(
                &missing.skill,
                self.config.resource_level,
                self.config.max_resources_per_skill,
            );
        }
        Ok(result)
    }

    pub fn analyze_skill_gaps(&self, input: &GapAnalysisInput) -> Result<GapAnalysisResult> {
        let ctx = self.context(input)?;
        let mut result = gap_analyzer::analyze_skill_gaps(&ctx);
        result.attach_resources(
            &self.resources,
            self.config.resource_level,
            self.config.max_resources_per_skill,
        );
        Ok(result)
    }

    pub fn perform_detailed_analysis(&self, input: &DetailedAnalysisInput) -> Result<DetailedAnalysisResult> {
        let ctx = self.context(input)?;
        detailed::perform_detailed_analysis(&ctx, &self.tables.benchmarks)
    }

    /// Scores, gap analysis, an optional detailed pass and a learning plan in one call
    pub fn analyze(&self, input: &AnalysisInput, include_detailed: bool, include_plan: bool) -> Result<AnalysisOutcome> {
        let start_time = Instant::now();

        let scores = self.compute_scores(input)?;
        let gap_analysis = self.analyze_skill_gaps(input)?;
        let detailed = if include_detailed {
            Some(self.perform_detailed_analysis(input)?)
        } else {
            None
        };

        let learning_plan = if include_plan {
            generate_learning_plan(&scores.missing_skills)
        } else {
            Vec::new()
        };

        let processing_time = start_time.elapsed();
        log::debug!("Analysis finished in {} ms", processing_time.as_millis());

        Ok(AnalysisOutcome {
            scores,
            gap_analysis,
            detailed,
            learning_plan,
            processing_time_ms: processing_time.as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::profile::SkillRequirement;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(&ProcessingConfig::default()).unwrap()
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalysisEngine>();
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine();
        assert!(!engine.roles().roles.is_empty());
        assert!(!engine.resources().is_empty());
        assert!(engine.market().is_fallback());
        assert!(engine.dictionary().contains("python"));
    }

    #[test]
    fn test_compute_scores_attaches_resources() {
        let engine = engine();
        let input = AnalysisInput::new("ML Intern", "", engine.dictionary())
            .with_skills(["sql"])
            .with_requirements(vec![
                SkillRequirement::required("python", 2).unwrap(),
                SkillRequirement::preferred("sql", 1).unwrap(),
            ]);
        let result = engine.compute_scores(&input).unwrap();

        assert_eq!(result.readiness, 0);
        assert_eq!(result.missing_skills.len(), 1);
        let resources = &result.missing_skills[0].resources;
        assert!(!resources.is_empty());
        assert!(resources.len() <= 3);
    }

    #[test]
    fn test_analyze_builds_learning_plan() {
        let engine = engine();
        let role = engine.role("ai-ml-intern").unwrap().clone();
        let input = AnalysisInput::new(&role.title, "", engine.dictionary()).with_role(&role);
        let outcome = engine.analyze(&input, true, true).unwrap();

        assert_eq!(outcome.learning_plan.len(), 14);
        assert_eq!(outcome.learning_plan[0].day, 1);
        assert!(outcome.detailed.is_some());
        assert!(outcome.gap_analysis.gap_count() > 0);
    }

    #[test]
    fn test_analyze_without_gaps_has_empty_plan() {
        let engine = engine();
        let input = AnalysisInput::new("Intern", "", engine.dictionary())
            .with_skills(["python"])
            .with_requirements(vec![SkillRequirement::required("python", 1).unwrap()]);
        let outcome = engine.analyze(&input, false, true).unwrap();

        assert_eq!(outcome.scores.readiness, 100);
        assert!(outcome.learning_plan.is_empty());
        assert!(outcome.detailed.is_none());
    }

    #[test]
    fn test_plural_catalog_skill_gets_resources() {
        let engine = engine();
        let role = engine.role("robotics-intern").unwrap().clone();
        let input = AnalysisInput::new(&role.title, "", engine.dictionary()).with_role(&role);
        let outcome = engine.analyze(&input, false, true).unwrap();

        let gap = outcome
            .gap_analysis
            .all_gaps()
            .find(|g| g.skill == "embedded system")
            .unwrap();
        assert!(!gap.resources.is_empty());
        assert!(gap.resources.iter().all(|r| r.skill == "embedded systems"));
    }

    #[test]
    fn test_market_override_per_call() {
        let engine = engine();
        let data = MarketData::from_json(r#"{"marketData": {"rust": 50000}}"#).unwrap();
        let market = MarketDemandProvider::from_data(&data, engine.tables(), engine.normalizer());
        let input = AnalysisInput::new("Systems Intern", "", engine.dictionary())
            .with_requirements(vec![SkillRequirement::preferred("rust", 1).unwrap()])
            .with_market(&market);
        let gaps = engine.analyze_skill_gaps(&input).unwrap();

        // preferred but above 10000 demand
        assert_eq!(gaps.important_gaps.len(), 1);
        assert_eq!(gaps.important_gaps[0].market_demand, 50000.0);
    }
}
