//! End-to-end checks of the percentile interval on synthesized data

use corr_confidence::api::{bootstrap_correlation_interval, correlation_interval};
use corr_confidence::{Bootstrap, BootstrapConfig, DegenerateReplicaPolicy};
use corr_core::{Error, PairedSample};
use corr_quantile::{HistogramQuantile, ProbabilityPair, QuantileMethod};
use corr_synth::{index_sequence, synthesize};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn synthesized_pair(n: usize, target: f64, seed: u64) -> PairedSample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    synthesize(&index_sequence(n), target, &mut rng).unwrap().pair
}

#[test]
fn test_interval_covers_sample_correlation() {
    let mut covered = 0;
    for seed in 0..20 {
        let pair = synthesized_pair(20, 0.7, seed);
        let mut rng = ChaCha8Rng::seed_from_u64(1000 + seed);
        let result =
            bootstrap_correlation_interval(&pair, 1000, ProbabilityPair::NINETY_FIVE, &mut rng)
                .unwrap();

        approx::assert_abs_diff_eq!(result.estimate, 0.7, epsilon = 1e-9);
        assert!(result.interval.lower <= result.interval.upper);
        assert!(result.interval.width() < 1.0);
        if result.interval.contains(0.7) {
            covered += 1;
        }
    }
    assert!(covered >= 18, "only {covered} of 20 intervals contain 0.7");
}

#[test]
fn test_replicas_stay_in_correlation_range() {
    let pair = synthesized_pair(20, -0.4, 8);
    let result = correlation_interval(&pair, 8).unwrap();
    assert_eq!(result.distribution.len(), 1000);
    assert!(result
        .distribution
        .values()
        .iter()
        .all(|r| (-1.0..=1.0).contains(r)));
}

#[test]
fn test_estimators_agree_to_bin_resolution() {
    let pair = synthesized_pair(40, 0.5, 2);
    let linear = Bootstrap::pearson()
        .with_resamples(2000)
        .with_seed(5)
        .confidence_interval(&pair)
        .unwrap();
    let histogram = Bootstrap::pearson()
        .with_quantile(HistogramQuantile::default())
        .with_resamples(2000)
        .with_seed(5)
        .confidence_interval(&pair)
        .unwrap();

    // Same seed, same replicas; only the quantile rule differs. Bins are 0.02 wide.
    assert_eq!(linear.distribution, histogram.distribution);
    assert!((linear.interval.lower - histogram.interval.lower).abs() <= 0.04);
    assert!((linear.interval.upper - histogram.interval.upper).abs() <= 0.04);
}

#[test]
fn test_config_from_json() {
    let config: BootstrapConfig = serde_json::from_str(
        r#"{
            "n_resamples": 250,
            "probabilities": [0.05, 0.95],
            "seed": 17,
            "policy": "abort",
            "quantile": { "histogram": { "bins": 50 } },
            "parallel": true
        }"#,
    )
    .unwrap();
    assert_eq!(config.n_resamples, 250);
    assert_eq!(config.policy, DegenerateReplicaPolicy::Abort);
    assert_eq!(config.quantile, QuantileMethod::Histogram { bins: 50 });

    let round_trip: BootstrapConfig =
        serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(round_trip, config);

    let pair = synthesized_pair(20, 0.7, 4);
    let result = Bootstrap::from_config(&config)
        .unwrap()
        .confidence_interval(&pair)
        .unwrap();
    assert_eq!(result.seed, Some(17));
    assert_eq!(result.n_resamples, 250);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: BootstrapConfig = serde_json::from_str(r#"{ "n_resamples": 50 }"#).unwrap();
    assert_eq!(config.n_resamples, 50);
    assert_eq!(config.probabilities, ProbabilityPair::NINETY_FIVE);
    assert_eq!(config.policy, DegenerateReplicaPolicy::default());
}

#[test]
fn test_invalid_probabilities_rejected() {
    let parsed: Result<BootstrapConfig, _> =
        serde_json::from_str(r#"{ "probabilities": [0.975, 0.025] }"#);
    assert!(parsed.is_err());

    assert!(matches!(
        ProbabilityPair::new(0.0, 0.5),
        Err(Error::InvalidProbability { .. })
    ));
}

#[test]
fn test_result_serializes() {
    let pair = synthesized_pair(20, 0.7, 1);
    let result = correlation_interval(&pair, 1).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["interval"]["lower"].is_number());
    assert_eq!(json["distribution"]["values"].as_array().unwrap().len(), 1000);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_bounds_ordered(target in -0.95..0.95f64, seed in 0u64..1000) {
        let pair = synthesized_pair(15, target, seed);
        let result = Bootstrap::pearson()
            .with_resamples(200)
            .with_seed(seed)
            .confidence_interval(&pair)
            .unwrap();
        prop_assert!(result.interval.lower <= result.interval.upper);
        prop_assert!(result.interval.lower >= -1.0 && result.interval.upper <= 1.0);
    }
}
