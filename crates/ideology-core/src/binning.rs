//! Ideology Binning
//!
//! Partitions the ideology axis into one bucket per anchor. Edges are the
//! midpoints between consecutive anchors, bracketed by -1 and 1, so K anchors
//! give K + 1 edges. Bucket `k` covers `[edges[k], edges[k + 1])` and the last
//! bucket is closed at 1.

/// Derives bucket edges from anchors.
pub fn bucket_edges(anchors: &[f64]) -> Vec<f64> {
    let mut edges = Vec::with_capacity(anchors.len() + 1);
    edges.push(-1.0);
    edges.extend(anchors.windows(2).map(|pair| (pair[0] + pair[1]) / 2.0));
    edges.push(1.0);
    edges
}

/// Returns the index of the bucket containing `value`.
///
/// Values at or below -1 land in the first bucket, values at or above 1 in the
/// last one. A value equal to an interior edge belongs to the upper bucket.
pub fn classify(value: f64, edges: &[f64]) -> usize {
    if edges.len() < 3 {
        return 0;
    }
    let interior = &edges[1..edges.len() - 1];
    interior.partition_point(|&edge| edge <= value)
}

/// Counts how many values fall in each bucket.
pub fn bucket_counts(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let buckets = edges.len().saturating_sub(1).max(1);
    let mut counts = vec![0usize; buckets];
    for &value in values {
        counts[classify(value, edges)] += 1;
    }
    counts
}

/// Converts bucket counts into fractions of `total`.
pub fn proportions(counts: &[usize], total: usize) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|&count| count as f64 / total as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_edges_are_midpoints() {
        let edges = bucket_edges(&[-0.8, -0.3, 0.3, 0.8]);
        assert_eq!(edges.len(), 5);
        assert_eq!(edges[0], -1.0);
        assert!((edges[1] + 0.55).abs() < 1e-12);
        assert_eq!(edges[2], 0.0);
        assert!((edges[3] - 0.55).abs() < 1e-12);
        assert_eq!(edges[4], 1.0);
    }

    #[test]
    fn test_single_anchor_has_one_bucket() {
        let edges = bucket_edges(&[0.0]);
        assert_eq!(edges, vec![-1.0, 1.0]);
        assert_eq!(classify(-1.0, &edges), 0);
        assert_eq!(classify(1.0, &edges), 0);
        assert_eq!(bucket_counts(&[0.3, -0.7], &edges), vec![2]);
    }

    #[test]
    fn test_classify_boundaries() {
        let edges = bucket_edges(&[-0.5, 0.5]);
        assert_eq!(classify(-1.0, &edges), 0);
        assert_eq!(classify(-0.0001, &edges), 0);
        assert_eq!(classify(0.0, &edges), 1);
        assert_eq!(classify(1.0, &edges), 1);
    }

    #[test]
    fn test_anchor_lands_in_own_bucket() {
        let anchors = [-0.9, -0.6, -0.2, 0.2, 0.6, 0.9];
        let edges = bucket_edges(&anchors);
        for (k, &anchor) in anchors.iter().enumerate() {
            assert_eq!(classify(anchor, &edges), k);
        }
    }

    #[test]
    fn test_proportions_of_empty_total() {
        assert_eq!(proportions(&[0, 0], 0), vec![0.0, 0.0]);
        assert_eq!(proportions(&[1, 3], 4), vec![0.25, 0.75]);
    }

    proptest! {
        #[test]
        fn prop_partition_is_total(values in proptest::collection::vec(-1.0f64..=1.0, 1..200)) {
            let edges = bucket_edges(&[-0.9, -0.6, -0.2, 0.2, 0.6, 0.9]);
            let counts = bucket_counts(&values, &edges);
            prop_assert_eq!(counts.iter().sum::<usize>(), values.len());

            let total: f64 = proportions(&counts, values.len()).iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
    }
}
