use crate::knn::store::ExampleStore;

/// K-nearest-neighbor voting over the stored examples.
pub struct KnnClassifier {
    topk: usize,
}

impl KnnClassifier {
    pub fn new(topk: usize) -> Self {
        Self {
            topk: topk.max(1),
        }
    }

    /// Vote fractions over the `min(topk, total)` nearest stored examples.
    /// Each entry is (neighbors labeled with that class) / topk, so the sum
    /// reaches 1.0 only once the store holds at least `topk` examples.
    ///
    /// Callers must ensure the store holds at least one example.
    pub fn classify(&self, store: &ExampleStore, query: &[f32]) -> Vec<f32> {
        let mut neighbors: Vec<(f32, usize)> = store
            .examples()
            .iter()
            .map(|example| (squared_distance(&example.embedding, query), example.class_index))
            .collect();

        // Stable sort: equal distances keep insertion order, first-inserted wins.
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));

        let k = self.topk.min(neighbors.len());
        let mut votes = vec![0usize; store.num_classes()];
        for (_, class_index) in neighbors.iter().take(k) {
            votes[*class_index] += 1;
        }

        votes
            .iter()
            .map(|&count| count as f32 / self.topk as f32)
            .collect()
    }
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

#[cfg(test)]
mod classifier_test {
    use super::KnnClassifier;
    use crate::knn::store::ExampleStore;

    #[test]
    fn test_uses_min_of_topk_and_total() {
        let mut store = ExampleStore::new(2);
        store.add_example(0, vec![0.0]);
        store.add_example(0, vec![0.1]);
        store.add_example(1, vec![5.0]);

        // topk 10 but only 3 examples stored; must not index out of range.
        let classifier = KnnClassifier::new(10);
        let confidences = classifier.classify(&store, &[0.0]);

        assert_eq!(confidences, vec![0.2, 0.1]);
    }

    #[test]
    fn test_confidences_in_range_and_sum_at_most_one() {
        let mut store = ExampleStore::new(3);
        for i in 0..12 {
            store.add_example(i % 3, vec![i as f32]);
        }

        let classifier = KnnClassifier::new(10);
        let confidences = classifier.classify(&store, &[4.0]);

        for &confidence in &confidences {
            assert!((0.0..=1.0).contains(&confidence));
        }
        let sum: f32 = confidences.iter().sum();
        assert!(sum <= 1.0 + 1e-6);
        // 12 examples stored, so a full 10 neighbors voted.
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_ties_resolve_to_first_inserted() {
        let mut store = ExampleStore::new(2);
        store.add_example(1, vec![0.0, 0.0]);
        store.add_example(0, vec![0.0, 0.0]);

        let classifier = KnnClassifier::new(1);
        let confidences = classifier.classify(&store, &[0.0, 0.0]);

        assert_eq!(confidences, vec![0.0, 1.0]);
    }

    #[test]
    fn test_majority_vote_fraction() {
        // 7 of the 10 nearest belong to class 2.
        let mut store = ExampleStore::new(3);
        for _ in 0..7 {
            store.add_example(2, vec![0.0]);
        }
        for _ in 0..3 {
            store.add_example(0, vec![1.0]);
        }
        for _ in 0..5 {
            store.add_example(1, vec![100.0]);
        }

        let classifier = KnnClassifier::new(10);
        let confidences = classifier.classify(&store, &[0.0]);

        assert_eq!(confidences, vec![0.3, 0.0, 0.7]);
    }
}
