use crate::batch::BatchKey;
use crate::value::DataValue;
use std::sync::Arc;

pub type SourceKeyFn = Arc<dyn Fn(&DataValue) -> Option<BatchKey> + Send + Sync>;
pub type ResultKeysFn = Arc<dyn Fn(&DataValue) -> Vec<BatchKey> + Send + Sync>;

/// The flat result set returned by a batch resolver together with the
/// functions that join it back onto the batch's sources.
///
/// A result may declare any number of keys, so one result can be shared by
/// several sources and one source can match several results.
#[derive(Clone)]
pub struct BatchResult {
    pub(crate) result_keys: ResultKeysFn,
    pub(crate) results: Vec<DataValue>,
    pub(crate) source_key: SourceKeyFn,
}
impl BatchResult {
    pub fn new(
        results: Vec<DataValue>,
        source_key: impl Fn(&DataValue) -> Option<BatchKey> + Send + Sync + 'static,
        result_keys: impl Fn(&DataValue) -> Vec<BatchKey> + Send + Sync + 'static,
    ) -> Self {
        Self {
            result_keys: Arc::new(result_keys),
            results,
            source_key: Arc::new(source_key),
        }
    }

    /// Join on object properties: a source's key is its `source_property`
    /// and a result's keys are its `result_property` (a single key or a list
    /// of keys).
    pub fn by_property(
        results: Vec<DataValue>,
        source_property: impl Into<String>,
        result_property: impl Into<String>,
    ) -> Self {
        let source_property = source_property.into();
        let result_property = result_property.into();
        Self::new(
            results,
            move |source| {
                source.as_object()
                    .and_then(|obj| obj.property(&source_property))
                    .and_then(DataValue::as_leaf)
                    .and_then(BatchKey::from_json)
            },
            move |result| {
                result.as_object()
                    .and_then(|obj| obj.property(&result_property))
                    .map(BatchKey::all_from_data)
                    .unwrap_or_default()
            },
        )
    }

    pub fn results(&self) -> &[DataValue] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
impl std::fmt::Debug for BatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchResult")
            .field("results", &self.results)
            .finish_non_exhaustive()
    }
}
