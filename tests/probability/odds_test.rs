#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use symcat_modules::GeneratorError;
    use symcat_modules::algorithm::probability::{odds_to_probability, round_probability};

    #[test]
    fn test_published_odds() {
        assert_eq!(odds_to_probability(1.8).unwrap(), 0.6429);
        assert_eq!(odds_to_probability(1.3).unwrap(), 0.5652);
        assert_eq!(odds_to_probability(0.8).unwrap(), 0.4444);
        assert_eq!(odds_to_probability(3.0).unwrap(), 0.75);
    }

    #[test]
    fn test_zero_odds_is_zero_probability() {
        assert_eq!(odds_to_probability(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_odds_is_an_error() {
        let err = odds_to_probability(-1.0).unwrap_err();
        assert!(matches!(err, GeneratorError::NegativeOdds { odds } if odds == -1.0));
    }

    proptest! {
        #[test]
        fn prop_probability_in_unit_interval(odds in 0.0f64..1.0e6) {
            let p = odds_to_probability(odds).unwrap();
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn prop_probability_is_monotone(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(odds_to_probability(low).unwrap() <= odds_to_probability(high).unwrap());
        }

        #[test]
        fn prop_probability_has_four_decimals(odds in 0.0f64..100.0) {
            let p = odds_to_probability(odds).unwrap();
            prop_assert_eq!(round_probability(p), p);
        }
    }
}
