use crate::value::DataValue;

/// The join key shared by a batch's source items and its results.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BatchKey {
    Int(i64),
    String(String),
}
impl BatchKey {
    /// Read a key out of a JSON leaf. Integral numbers and strings are keys;
    /// anything else is not.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(num) => num.as_i64().map(Self::Int),
            serde_json::Value::String(text) => Some(Self::String(text.to_string())),
            _ => None,
        }
    }

    /// All keys held by a value: one for a leaf, one per keyed item for a
    /// list.
    pub fn all_from_data(value: &DataValue) -> Vec<Self> {
        match value {
            DataValue::Leaf(leaf) => Self::from_json(leaf).into_iter().collect(),
            DataValue::List(items) => items.iter().flat_map(Self::all_from_data).collect(),
            _ => vec![],
        }
    }
}
impl From<i32> for BatchKey {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}
impl From<i64> for BatchKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}
impl From<&str> for BatchKey {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
impl From<String> for BatchKey {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
impl std::fmt::Display for BatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
        }
    }
}
