use std::collections::BTreeMap;

/// Counts candidate texts until they have been seen often enough to promote.
///
/// Each entry keeps the value it was first added with.
#[derive(Debug, Clone)]
pub(crate) struct CandidateCounter<V> {
    threshold: usize,
    entries: BTreeMap<String, (usize, V)>,
}

impl<V> CandidateCounter<V> {
    pub(crate) fn new(threshold: usize) -> Self {
        Self {
            threshold,
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn add_with(&mut self, text: String, value: V) {
        self.entries
            .entry(text)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, value));
    }

    /// Remove and return every entry that reached the threshold, by key order.
    pub(crate) fn drain_ready(&mut self) -> Vec<(String, V)> {
        let ready: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, (count, _))| *count >= self.threshold)
            .map(|(text, _)| text.clone())
            .collect();
        ready
            .into_iter()
            .filter_map(|text| {
                self.entries
                    .remove(&text)
                    .map(|(_, value)| (text, value))
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn count(&self, text: &str) -> usize {
        self.entries.get(text).map_or(0, |(count, _)| *count)
    }
}

impl CandidateCounter<()> {
    pub(crate) fn add(&mut self, text: String) {
        self.add_with(text, ());
    }
}
