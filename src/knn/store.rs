use crate::embedder::interface::Embedding;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub class_index: usize,
    pub embedding: Embedding,
}

/// Embeddings collected while a train button was held, one collection per
/// class. Examples live for the whole session; there is no removal.
#[derive(Debug, Clone)]
pub struct ExampleStore {
    examples: Vec<TrainingExample>,
    counts: Vec<usize>,
}

impl ExampleStore {
    pub fn new(num_classes: usize) -> Self {
        Self {
            examples: Vec::new(),
            counts: vec![0; num_classes],
        }
    }

    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    /// Appends in global insertion order, so classifier distance ties
    /// resolve to the first-added example.
    pub fn add_example(&mut self, class_index: usize, embedding: Embedding) {
        self.counts[class_index] += 1;
        self.examples.push(TrainingExample {
            class_index,
            embedding,
        });
    }

    /// Current example counts in class order.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.examples.len()
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }
}

#[cfg(test)]
mod store_test {
    use super::ExampleStore;

    #[test]
    fn test_new_store_is_empty() {
        let store = ExampleStore::new(3);

        assert_eq!(store.num_classes(), 3);
        assert_eq!(store.counts(), &[0, 0, 0]);
        assert_eq!(store.total(), 0);
    }

    #[test]
    fn test_add_example_mutates_only_target_class() {
        let mut store = ExampleStore::new(3);

        store.add_example(1, vec![0.1, 0.2]);
        store.add_example(1, vec![0.3, 0.4]);

        assert_eq!(store.counts(), &[0, 2, 0]);
        assert_eq!(store.total(), 2);
    }

    #[test]
    fn test_examples_keep_insertion_order() {
        let mut store = ExampleStore::new(2);

        store.add_example(1, vec![1.0]);
        store.add_example(0, vec![2.0]);
        store.add_example(1, vec![3.0]);

        let labels: Vec<usize> = store.examples().iter().map(|e| e.class_index).collect();
        assert_eq!(labels, vec![1, 0, 1]);
    }
}
