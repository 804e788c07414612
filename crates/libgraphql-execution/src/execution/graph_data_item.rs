use crate::response_path::ResponsePath;
use crate::value::DataValue;

/// Where a [`GraphDataItem`] is in its resolution.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ItemStatus {
    NeedsResolution,
    NeedsChildResolution,
    Complete,
    /// Cancelled without a critical message. Omitted from the response.
    Cancelled,
    /// Cancelled by a critical message. Rendered as `null`.
    Failed,
}

/// One resolved value for one field on one parent source item.
///
/// A list-valued field keeps one item per element in `list_items` (nested
/// lists nest further); the child fields of an object value hang off the
/// item holding that value.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphDataItem {
    pub(crate) children: Vec<GraphDataItem>,
    /// Index of this item's field among its parent's child invocations.
    pub(crate) field_index: usize,
    pub(crate) list_items: Option<Vec<GraphDataItem>>,
    pub(crate) path: ResponsePath,
    pub(crate) response_key: String,
    pub(crate) result: Option<DataValue>,
    pub(crate) source: DataValue,
    pub(crate) status: ItemStatus,
}
impl GraphDataItem {
    pub(crate) fn new(
        field_index: usize,
        response_key: impl Into<String>,
        path: ResponsePath,
        source: DataValue,
    ) -> Self {
        Self {
            children: vec![],
            field_index,
            list_items: None,
            path,
            response_key: response_key.into(),
            result: None,
            source,
            status: ItemStatus::NeedsResolution,
        }
    }

    /// The synthetic item holding an operation's root value.
    pub(crate) fn root(root_value: DataValue) -> Self {
        let mut item = Self::new(0, "", ResponsePath::root(), DataValue::Null);
        item.set_result(root_value);
        item
    }

    pub(crate) fn set_result(&mut self, value: DataValue) {
        self.result = Some(value);
        self.status = ItemStatus::NeedsChildResolution;
    }

    /// Replace the result after child fields have been resolved. The child
    /// items and list elements built from the old result are dropped.
    pub(crate) fn replace_result(&mut self, result: Option<DataValue>) {
        self.children.clear();
        self.list_items = None;
        self.result = result;
    }

    /// Split a list result into one item per element so that child fields
    /// can be resolved against each element.
    pub(crate) fn expand_list(&mut self) {
        let Some(DataValue::List(values)) = &self.result else {
            return;
        };
        let list_items: Vec<GraphDataItem> =
            values.iter()
                .enumerate()
                .map(|(idx, value)| {
                    let mut item = Self::new(
                        self.field_index,
                        self.response_key.as_str(),
                        self.path.child_index(idx),
                        self.source.clone(),
                    );
                    item.set_result(value.clone());
                    item.expand_list();
                    item
                })
                .collect();
        self.list_items = Some(list_items);
    }

    /// Push every non-null value held by this item (descending into list
    /// elements) onto `out`.
    pub(crate) fn collect_value_nodes<'a>(&'a mut self, out: &mut Vec<&'a mut GraphDataItem>) {
        if self.list_items.is_some() {
            for list_item in self.list_items.iter_mut().flatten() {
                list_item.collect_value_nodes(out);
            }
        } else if self.result.as_ref().is_some_and(|value| !value.is_null()) {
            out.push(self);
        }
    }

    pub fn children(&self) -> &[GraphDataItem] {
        &self.children
    }

    pub fn list_items(&self) -> Option<&[GraphDataItem]> {
        self.list_items.as_deref()
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    pub fn response_key(&self) -> &str {
        self.response_key.as_str()
    }

    pub fn result(&self) -> Option<&DataValue> {
        self.result.as_ref()
    }

    pub fn source(&self) -> &DataValue {
        &self.source
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }
}
