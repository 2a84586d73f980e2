#[cfg(test)]
mod tests {
    use symcat_modules::algorithm::probability::{
        BranchTable, Cell, ConditionEngine, SymptomBranching, SymptomEngine,
    };
    use symcat_modules::models::{
        AgeBucket, Bucket, PriorTable, Race, RiskFactorDistribution, Sex, Stratification,
    };

    use crate::utils::{assert_close, fixture_catalog};

    fn stratified(branching: SymptomBranching) -> BranchTable {
        match branching {
            SymptomBranching::Stratified(table) => table,
            SymptomBranching::Flat(p) => panic!("expected stratified branching, got flat {p}"),
        }
    }

    fn sex_cell(sex: Sex) -> Cell {
        Cell::new(Some(sex), None, None)
    }

    #[test]
    fn test_flat_symptom_keeps_listed_probability() {
        let catalog = fixture_catalog();
        let appendicitis = catalog.conditions.get("appendicitis").unwrap();
        let distention = &catalog.symptoms["abdominal-distention"];
        let priors = PriorTable::default();

        let branching = SymptomEngine::new(&priors)
            .evaluate(
                "abdominal-distention",
                0.91,
                Some(&distention.risk_factors),
                &appendicitis.risk_factors,
            )
            .unwrap();
        assert_eq!(branching, SymptomBranching::Flat(0.91));
    }

    #[test]
    fn test_cells_average_back_to_listed_probability() {
        let catalog = fixture_catalog();
        let appendicitis = catalog.conditions.get("appendicitis").unwrap();
        let vomiting = &catalog.symptoms["vomiting"];
        let priors = PriorTable::default();

        let table = stratified(
            SymptomEngine::new(&priors)
                .evaluate(
                    "vomiting",
                    0.3,
                    Some(&vomiting.risk_factors),
                    &appendicitis.risk_factors,
                )
                .unwrap(),
        );
        assert_eq!(table.len(), 2);
        assert!(!table.has_fallback());

        // weight each cell by its share of the condition's population
        let engine = ConditionEngine::new(&priors);
        let condition_marginal = engine.marginals(&appendicitis.risk_factors).unwrap().sex;
        let averaged: f64 = [Sex::Male, Sex::Female]
            .into_iter()
            .map(|sex| {
                let weight = priors.gender.weight(sex)
                    * engine.dimension_probability(appendicitis, sex).unwrap()
                    / condition_marginal;
                weight * table.probability(&sex_cell(sex)).unwrap()
            })
            .sum();
        assert_close(averaged, 0.3, 1e-3);

        assert_eq!(table.probability(&sex_cell(Sex::Male)).unwrap(), 0.3847);
        assert_eq!(table.probability(&sex_cell(Sex::Female)).unwrap(), 0.1923);
    }

    #[test]
    fn test_saturated_cells_are_clamped() {
        let catalog = fixture_catalog();
        let appendicitis = catalog.conditions.get("appendicitis").unwrap();
        let vomiting = &catalog.symptoms["vomiting"];
        let priors = PriorTable::default();
        let engine = SymptomEngine::new(&priors);

        let table = stratified(
            engine
                .evaluate(
                    "vomiting",
                    1.0,
                    Some(&vomiting.risk_factors),
                    &appendicitis.risk_factors,
                )
                .unwrap(),
        );
        assert_eq!(table.probability(&sex_cell(Sex::Male)).unwrap(), 1.0);
        assert_eq!(table.probability(&sex_cell(Sex::Female)).unwrap(), 0.641);
    }

    #[test]
    fn test_zero_joint_probability_falls_back() {
        let symptom = RiskFactorDistribution {
            sex: Stratification::new().with(Sex::Male, 1.0).with(Sex::Female, 0.0),
            ..Default::default()
        };
        let condition = RiskFactorDistribution {
            sex: Stratification::new().with(Sex::Male, 1.0).with(Sex::Female, 1.0),
            ..Default::default()
        };
        let priors = PriorTable::default();
        let table = stratified(
            SymptomEngine::new(&priors)
                .evaluate("cramps", 0.2, Some(&symptom), &condition)
                .unwrap(),
        );
        assert!(table.has_fallback());
        assert_eq!(table.len(), 1);
        assert!(table.probability(&sex_cell(Sex::Female)).is_none());
    }

    #[test]
    fn test_symptom_dimension_missing_from_condition_is_neutral_there() {
        // condition unstratified on sex: the symptom's own odds drive the cells
        let symptom = RiskFactorDistribution {
            sex: Stratification::new().with(Sex::Male, 3.0).with(Sex::Female, 1.0),
            ..Default::default()
        };
        let priors = PriorTable::default();
        let table = stratified(
            SymptomEngine::new(&priors)
                .evaluate("cough", 0.5, Some(&symptom), &RiskFactorDistribution::default())
                .unwrap(),
        );
        // Mˢ = (0.75 + 0.5) / 2 = 0.625
        assert_eq!(table.probability(&sex_cell(Sex::Male)).unwrap(), 0.6);
        assert_eq!(table.probability(&sex_cell(Sex::Female)).unwrap(), 0.4);
    }

    #[test]
    fn test_condition_marginals_stay_on_dimensions_the_symptom_lacks() {
        // symptom stratified on sex only, condition on all three dimensions
        let symptom = RiskFactorDistribution {
            sex: Stratification::new().with(Sex::Male, 3.0).with(Sex::Female, 1.0),
            ..Default::default()
        };
        let age = AgeBucket::PRIOR_BUCKETS
            .iter()
            .fold(Stratification::new(), |ages, &bucket| {
                let odds = if bucket == AgeBucket::UnderOne { 0.5 } else { 1.0 };
                ages.with(bucket, odds)
            });
        let condition = RiskFactorDistribution {
            sex: Stratification::new().with(Sex::Male, 1.3).with(Sex::Female, 0.8),
            age,
            race: Stratification::new()
                .with(Race::Black, 1.0)
                .with(Race::Hispanic, 1.0)
                .with(Race::White, 1.0)
                .with(Race::Other, 3.0),
        };
        let priors = PriorTable::default();
        let table = stratified(
            SymptomEngine::new(&priors)
                .evaluate("cough", 0.3, Some(&symptom), &condition)
                .unwrap(),
        );
        assert_eq!(table.len(), 2);

        // p · pˢ · pᶜ · Dᶜ_sex · Dᶜ_age · Dᶜ_race / (Mˢ_sex · pᶜ)
        // pˢ = 0.75 / 0.5, pᶜ = 0.5652 / 0.4444, Mˢ_sex = 0.32305
        // Dᶜ_sex = 0.5048, Dᶜ_age = (0.3333 + 7 · 0.5) / 8, Dᶜ_race = 0.625
        let d_age = (0.3333 + 7.0 * 0.5) / 8.0;
        let male = 0.3 * 0.75 * 0.5048 * d_age * 0.625 / 0.32305;
        let female = 0.3 * 0.5 * 0.5048 * d_age * 0.625 / 0.32305;
        assert_close(male, 0.1053, 5e-5);
        assert_close(female, 0.0702, 5e-5);
        assert_eq!(table.probability(&sex_cell(Sex::Male)).unwrap(), 0.1053);
        assert_eq!(table.probability(&sex_cell(Sex::Female)).unwrap(), 0.0702);
    }

    #[test]
    fn test_symptom_race_other_odds_cover_native_and_asian() {
        let symptom = RiskFactorDistribution {
            race: Stratification::new()
                .with(Race::Black, 1.0)
                .with(Race::Hispanic, 1.0)
                .with(Race::White, 1.0)
                .with(Race::Other, 3.0),
            ..Default::default()
        };
        let priors = PriorTable::default();
        let table = stratified(
            SymptomEngine::new(&priors)
                .evaluate("rash", 0.4, Some(&symptom), &RiskFactorDistribution::default())
                .unwrap(),
        );
        assert_eq!(table.len(), 6);

        let races: Vec<_> = table.branches().iter().map(|b| b.cell.race).collect();
        assert_eq!(
            races,
            [Race::Black, Race::Hispanic, Race::White, Race::Native, Race::Asian, Race::Other]
                .map(Some)
        );

        // Mˢ = (3 · 0.5 + 3 · 0.75) / 6 = 0.625
        let race_cell = |race| Cell::new(None, None, Some(race));
        for race in [Race::Black, Race::Hispanic, Race::White] {
            assert_eq!(table.probability(&race_cell(race)).unwrap(), 0.32);
        }
        for race in [Race::Native, Race::Asian, Race::Other] {
            assert_eq!(table.probability(&race_cell(race)).unwrap(), 0.48);
        }
    }
}
