//! Choice Kernel
//!
//! Turns a utility vector into a probability distribution with a numerically
//! stable softmax and samples one index from it.

use rand::Rng;

/// Writes the softmax of `values` into `out`.
///
/// The maximum is subtracted before exponentiating, so large utilities do not
/// overflow. An empty input yields an empty output.
pub fn softmax_into(values: &[f64], out: &mut Vec<f64>) {
    out.clear();
    if values.is_empty() {
        return;
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    out.extend(values.iter().map(|v| (v - max).exp()));

    let total: f64 = out.iter().sum();
    for p in out.iter_mut() {
        *p /= total;
    }
}

/// Softmax of `values` as a new vector.
pub fn softmax(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    softmax_into(values, &mut out);
    out
}

/// Samples an index with probability proportional to `weights`.
///
/// Consumes exactly one draw from `rng`. Zero-weight entries are never picked
/// unless every weight is zero, in which case the first index is returned.
pub fn sample_index<R: Rng>(rng: &mut R, weights: &[f64]) -> usize {
    let total: f64 = weights.iter().sum();
    let mut roll = rng.gen::<f64>() * total;

    if total.is_nan() || total <= 0.0 {
        return 0;
    }

    let mut last_positive = 0;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        if roll < weight {
            return i;
        }
        roll -= weight;
        last_positive = i;
    }

    // Rounding left a sliver past the final weight
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_softmax_uniform() {
        let probs = softmax(&[0.3, 0.3, 0.3, 0.3]);
        assert!(probs.iter().all(|&p| p == 0.25));
    }

    #[test]
    fn test_softmax_large_values_do_not_overflow() {
        let probs = softmax(&[1000.0, 1001.0, 999.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!(probs[1] > probs[0] && probs[0] > probs[2]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_sample_index_frequencies() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let weights = [0.1, 0.9];

        let mut counts = [0usize; 2];
        for _ in 0..1000 {
            counts[sample_index(&mut rng, &weights)] += 1;
        }

        // Second entry should be selected ~90% of the time
        assert!(counts[1] > counts[0] * 5);
    }

    #[test]
    fn test_sample_index_skips_zero_weights() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..500 {
            let picked = sample_index(&mut rng, &[0.0, 0.5, 0.0, 0.5, 0.0]);
            assert!(picked == 1 || picked == 3);
        }
    }

    #[test]
    fn test_sample_index_all_zero() {
        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(sample_index(&mut rng, &[0.0, 0.0]), 0);
    }

    #[test]
    fn test_sample_index_is_deterministic() {
        let weights = [0.1, 0.3, 0.4, 0.2];

        let mut rng1 = SmallRng::seed_from_u64(12345);
        let picks1: Vec<usize> = (0..100).map(|_| sample_index(&mut rng1, &weights)).collect();

        let mut rng2 = SmallRng::seed_from_u64(12345);
        let picks2: Vec<usize> = (0..100).map(|_| sample_index(&mut rng2, &weights)).collect();

        assert_eq!(picks1, picks2);
    }

    proptest! {
        #[test]
        fn prop_softmax_is_a_distribution(values in proptest::collection::vec(-50.0f64..50.0, 1..12)) {
            let probs = softmax(&values);
            prop_assert_eq!(probs.len(), values.len());
            prop_assert!(probs.iter().all(|&p| p >= 0.0 && p <= 1.0));
            prop_assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_softmax_preserves_order(values in proptest::collection::vec(-5.0f64..5.0, 2..8)) {
            let probs = softmax(&values);
            for i in 0..values.len() {
                for j in 0..values.len() {
                    if values[i] > values[j] {
                        prop_assert!(probs[i] >= probs[j]);
                    }
                }
            }
        }
    }
}
