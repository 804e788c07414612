use crate::batch::BatchKey;
use crate::batch::BatchResult;
use crate::value::DataValue;
use std::collections::HashMap;

/// What one source item of a batch receives.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchAssignment {
    Assigned(DataValue),
    /// A single-item field matched more than one result. Nothing is
    /// assigned.
    Ambiguous {
        key: BatchKey,
        match_count: usize,
    },
}

/// Joins a [`BatchResult`] onto the sources of a batch.
///
/// The key index is built in one pass over the results and each source is
/// then looked up once, so reconciling `M` result keys against `N` sources
/// costs `O(M + N)`.
pub struct BatchReconciler<'a> {
    batch: &'a BatchResult,
    index: HashMap<BatchKey, Vec<usize>>,
}
impl<'a> BatchReconciler<'a> {
    pub fn new(batch: &'a BatchResult) -> Self {
        let mut index: HashMap<BatchKey, Vec<usize>> = HashMap::new();
        for (result_idx, result) in batch.results.iter().enumerate() {
            for key in (batch.result_keys)(result) {
                let matches = index.entry(key).or_default();
                // A result that repeats one of its keys still matches once.
                if matches.last() != Some(&result_idx) {
                    matches.push(result_idx);
                }
            }
        }
        Self { batch, index }
    }

    /// The assignment for each source, in source order. List fields receive
    /// every matching result; single-item fields receive exactly one. A
    /// source with no key or no match is assigned `null`.
    pub fn reconcile<'s>(
        &self,
        sources: impl IntoIterator<Item = &'s DataValue>,
        returns_list: bool,
    ) -> Vec<BatchAssignment> {
        sources.into_iter()
            .map(|source| self.assign(source, returns_list))
            .collect()
    }

    fn assign(&self, source: &DataValue, returns_list: bool) -> BatchAssignment {
        let Some(key) = (self.batch.source_key)(source) else {
            return BatchAssignment::Assigned(DataValue::Null);
        };
        let Some(matches) = self.index.get(&key) else {
            return BatchAssignment::Assigned(DataValue::Null);
        };

        if returns_list {
            return BatchAssignment::Assigned(DataValue::List(
                matches.iter().map(|idx| self.batch.results[*idx].clone()).collect(),
            ));
        }

        match matches.as_slice() {
            [single] => BatchAssignment::Assigned(self.batch.results[*single].clone()),
            _ => BatchAssignment::Ambiguous {
                key,
                match_count: matches.len(),
            },
        }
    }
}
