#[cfg(test)]
mod tests {
    use symcat_modules::algorithm::probability::{DimensionView, joint_marginal, marginal};
    use symcat_modules::models::{Distribution, Race, Sex, Stratification};

    use crate::utils::assert_close;

    fn race_odds() -> Stratification<Race> {
        Stratification::new()
            .with(Race::Black, 1.0)
            .with(Race::Hispanic, 3.0)
            .with(Race::White, 1.0)
            .with(Race::Other, 0.25)
    }

    #[test]
    fn test_uniform_sex_marginal() {
        let odds = Stratification::new().with(Sex::Male, 1.3).with(Sex::Female, 0.8);
        let m = marginal(&odds, &Distribution::uniform()).unwrap();
        assert_close(m, (0.5652 + 0.4444) / 2.0, 1e-12);
    }

    #[test]
    fn test_unstratified_marginal_is_one() {
        let m = marginal(&Stratification::<Sex>::new(), &Distribution::uniform()).unwrap();
        assert_eq!(m, 1.0);
    }

    #[test]
    fn test_asian_and_native_borrow_other_odds() {
        let odds = race_odds();
        let view = DimensionView::new(&odds);
        assert_eq!(view.probability(Race::Asian).unwrap(), 0.2);
        assert_eq!(view.probability(Race::Native).unwrap(), 0.2);

        // six buckets share the prior: black, hispanic, white, other, asian, native
        let expected = (0.5 + 0.75 + 0.5 + 0.2 + 0.2 + 0.2) / 6.0;
        assert_close(marginal(&odds, &Distribution::uniform()).unwrap(), expected, 1e-12);
    }

    #[test]
    fn test_marginal_follows_explicit_priors() {
        let priors =
            Distribution::normalized("Gender", &[(Sex::Male, Some(0.75)), (Sex::Female, None)])
                .unwrap();
        let odds = Stratification::new().with(Sex::Male, 1.0).with(Sex::Female, 3.0);
        let m = marginal(&odds, &priors).unwrap();
        assert_close(m, 0.75 * 0.5 + 0.25 * 0.75, 1e-12);
    }

    #[test]
    fn test_joint_marginal() {
        let symptom = Stratification::new().with(Sex::Male, 1.0).with(Sex::Female, 3.0);
        let condition = Stratification::new().with(Sex::Male, 1.0).with(Sex::Female, 1.0);
        let joint = joint_marginal(
            &DimensionView::new(&symptom),
            &DimensionView::new(&condition),
            &Distribution::uniform(),
        )
        .unwrap();
        assert_close(joint, 0.5 * 0.5 * 0.5 + 0.5 * 0.75 * 0.5, 1e-12);
    }

    #[test]
    fn test_missing_bucket_is_an_error() {
        let odds = Stratification::new().with(Sex::Male, 1.3);
        assert!(marginal(&odds, &Distribution::uniform()).is_err());
    }
}
