//! Per-call view of an analysis input shared by the scoring and gap paths

use crate::error::Result;
use crate::processing::extractor::SkillExtractor;
use crate::processing::market::{DemandLookup, MarketDemandProvider};
use crate::processing::normalizer::Normalizer;
use crate::processing::profile::{AnalysisInput, SkillRequirement};
use crate::processing::tables::EngineTables;
use std::collections::BTreeSet;

pub struct AnalysisContext<'a> {
    pub input: &'a AnalysisInput<'a>,
    pub tables: &'a EngineTables,
    pub market: &'a MarketDemandProvider,
    pub normalizer: &'a Normalizer,
    pub fuzzy_min_len: usize,
    /// Role requirements with normalized skill names, in catalog order
    pub requirements: Vec<SkillRequirement>,
    /// Declared skills, coursework and résumé skills, normalized, first occurrence kept
    pub user_skills: Vec<String>,
    pub user_set: BTreeSet<String>,
    pub resume_skills: BTreeSet<String>,
    pub jd_skills: BTreeSet<String>,
}

impl<'a> AnalysisContext<'a> {
    pub fn build(
        input: &'a AnalysisInput<'a>,
        tables: &'a EngineTables,
        normalizer: &'a Normalizer,
        market: &'a MarketDemandProvider,
        fuzzy_min_len: usize,
    ) -> Result<Self> {
        input.validate()?;

        let extractor = SkillExtractor::new(input.dictionary, normalizer, fuzzy_min_len)?;
        let resume_skills = match input.resume() {
            Some(text) => extractor.extract(text)?,
            None => BTreeSet::new(),
        };
        let jd_skills = extractor.extract(&input.jd_text)?;

        let user_skills = normalizer.normalize_skills(
            input
                .user_skills
                .iter()
                .chain(input.user_coursework.iter())
                .chain(resume_skills.iter()),
        );
        let user_set: BTreeSet<String> = user_skills.iter().cloned().collect();

        let requirements = input
            .role_requirements
            .iter()
            .map(|req| SkillRequirement {
                skill: normalizer.normalize_skill(&req.skill),
                ..req.clone()
            })
            .collect();

        log::debug!(
            "Analysis context: {} user skills ({} from résumé), {} JD skills",
            user_skills.len(),
            resume_skills.len(),
            jd_skills.len()
        );

        Ok(Self {
            input,
            tables,
            market,
            normalizer,
            fuzzy_min_len,
            requirements,
            user_skills,
            user_set,
            resume_skills,
            jd_skills,
        })
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.user_set.contains(skill)
    }

    pub fn has_any(&self, skills: &[&str]) -> bool {
        skills.iter().any(|s| self.has_skill(s))
    }

    pub fn required(&self) -> impl Iterator<Item = &SkillRequirement> {
        self.requirements.iter().filter(|r| r.is_required())
    }

    pub fn preferred(&self) -> impl Iterator<Item = &SkillRequirement> {
        self.requirements.iter().filter(|r| !r.is_required())
    }

    pub fn total_required(&self) -> usize {
        self.required().count()
    }

    pub fn met_required(&self) -> usize {
        self.required().filter(|r| self.has_skill(&r.skill)).count()
    }

    pub fn met_preferred(&self) -> usize {
        self.preferred().filter(|r| self.has_skill(&r.skill)).count()
    }

    /// Share of required skills met, 100 when the role lists none
    pub fn readiness(&self) -> u8 {
        let total = self.total_required();
        if total == 0 {
            return 100;
        }
        (100.0 * self.met_required() as f64 / total as f64).round() as u8
    }

    /// Unmet requirements, required first then weight descending
    pub fn missing_requirements(&self) -> Vec<SkillRequirement> {
        let mut missing: Vec<SkillRequirement> = self
            .requirements
            .iter()
            .filter(|r| !self.has_skill(&r.skill))
            .cloned()
            .collect();
        missing.sort_by(|a, b| {
            b.is_required()
                .cmp(&a.is_required())
                .then_with(|| b.weight.cmp(&a.weight))
        });
        missing
    }

    pub fn demand_lookup(&self) -> DemandLookup<'a> {
        DemandLookup::new(self.market, self.tables.industry_weight(&self.input.role_category))
    }

    pub fn extractor(&self) -> Result<SkillExtractor<'a>> {
        SkillExtractor::new(self.input.dictionary, self.normalizer, self.fuzzy_min_len)
    }

    pub fn role_category(&self) -> &str {
        &self.input.role_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::dictionary::build_dictionary;

    #[test]
    fn test_readiness_half_met() {
        let tables = EngineTables::default();
        let normalizer = Normalizer::from_tables(&tables);
        let dictionary = build_dictionary(&[], &[], &tables, &normalizer);
        let market = MarketDemandProvider::fallback(&tables, &normalizer);

        let input = AnalysisInput::new("ML Intern", "", &dictionary)
            .with_skills(["python", "sql"])
            .with_requirements(vec![
                SkillRequirement::required("python", 2).unwrap(),
                SkillRequirement::required("machine learning basics", 2).unwrap(),
                SkillRequirement::preferred("sql", 1).unwrap(),
            ]);
        let ctx = AnalysisContext::build(&input, &tables, &normalizer, &market, 3).unwrap();

        assert_eq!(ctx.readiness(), 50);
        assert_eq!(ctx.met_preferred(), 1);
        let missing = ctx.missing_requirements();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].skill, "machine learning basics");
    }

    #[test]
    fn test_readiness_without_required_skills() {
        let tables = EngineTables::default();
        let normalizer = Normalizer::from_tables(&tables);
        let dictionary = build_dictionary(&[], &[], &tables, &normalizer);
        let market = MarketDemandProvider::fallback(&tables, &normalizer);

        let input = AnalysisInput::new("Intern", "", &dictionary)
            .with_requirements(vec![SkillRequirement::preferred("rust", 1).unwrap()]);
        let ctx = AnalysisContext::build(&input, &tables, &normalizer, &market, 3).unwrap();
        assert_eq!(ctx.readiness(), 100);
    }

    #[test]
    fn test_user_skills_merge_resume_and_aliases() {
        let tables = EngineTables::default();
        let normalizer = Normalizer::from_tables(&tables);
        let dictionary = build_dictionary(&[], &[], &tables, &normalizer);
        let market = MarketDemandProvider::fallback(&tables, &normalizer);

        let input = AnalysisInput::new("Intern", "We use Docker and Kubernetes.", &dictionary)
            .with_skills(["JS", "Python"])
            .with_resume("Built services with Docker and PostgreSQL.")
            .with_requirements(vec![SkillRequirement::required("REST APIs", 1).unwrap()]);
        let ctx = AnalysisContext::build(&input, &tables, &normalizer, &market, 3).unwrap();

        assert_eq!(&ctx.user_skills[..2], &["javascript".to_string(), "python".to_string()]);
        assert!(ctx.has_skill("docker"));
        assert!(ctx.has_skill("postgresql"));
        assert!(ctx.jd_skills.contains("kubernetes"));
        assert_eq!(ctx.requirements[0].skill, "rest api");
    }
}
