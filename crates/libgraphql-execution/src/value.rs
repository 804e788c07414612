use indexmap::IndexMap;
use std::sync::Arc;

/// A value produced by a resolver.
///
/// * [`DataValue::Leaf`] holds scalars and enum values as JSON.
/// * [`DataValue::Object`] is expected where the field's type is an object,
///   interface, or union type; it knows its concrete type name so that child
///   fields can be dispatched polymorphically.
/// * [`DataValue::Virtual`] is a placeholder for fields whose value is supplied
///   externally (by the parent) rather than resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DataValue {
    #[default]
    Null,
    Leaf(serde_json::Value),
    List(Vec<DataValue>),
    Object(ObjectValue),
    Virtual,
}
impl DataValue {
    pub fn leaf(value: impl Into<serde_json::Value>) -> Self {
        match value.into() {
            serde_json::Value::Null => Self::Null,
            value => Self::Leaf(value),
        }
    }

    pub fn list(values: impl IntoIterator<Item = DataValue>) -> Self {
        Self::List(values.into_iter().collect())
    }

    pub fn object<K: Into<String>>(
        type_name: impl AsRef<str>,
        properties: impl IntoIterator<Item = (K, DataValue)>,
    ) -> Self {
        Self::Object(ObjectValue::new(type_name, properties))
    }

    pub fn as_list(&self) -> Option<&[DataValue]> {
        if let Self::List(values) = self {
            Some(values.as_slice())
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        if let Self::Object(obj) = self {
            Some(obj)
        } else {
            None
        }
    }

    pub fn as_leaf(&self) -> Option<&serde_json::Value> {
        if let Self::Leaf(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// The name of the concrete (runtime) type of this value, if it is an
    /// object.
    pub fn concrete_type_name(&self) -> Option<&str> {
        self.as_object().map(|obj| obj.type_name())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual)
    }

    /// Render this value as JSON without any selection applied. Objects render
    /// all of their properties.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null | Self::Virtual => serde_json::Value::Null,
            Self::Leaf(value) => value.clone(),
            Self::List(values) => serde_json::Value::Array(
                values.iter().map(|value| value.to_json()).collect(),
            ),
            Self::Object(obj) => serde_json::Value::Object(
                obj.properties()
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_json()))
                    .collect(),
            ),
        }
    }
}
impl From<ObjectValue> for DataValue {
    fn from(value: ObjectValue) -> Self {
        Self::Object(value)
    }
}
impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}
impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::Leaf(value.into())
    }
}
impl From<String> for DataValue {
    fn from(value: String) -> Self {
        Self::Leaf(value.into())
    }
}
impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        Self::Leaf(value.into())
    }
}
impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        Self::Leaf(value.into())
    }
}
impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::leaf(value)
    }
}
impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        Self::Leaf(value.into())
    }
}
impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// An object produced by a resolver along with the name of its concrete
/// (runtime) type.
///
/// Cloning is cheap: both the type name and the property map are shared.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    properties: Arc<IndexMap<String, DataValue>>,
    type_name: Arc<str>,
}
impl ObjectValue {
    pub fn new<K: Into<String>>(
        type_name: impl AsRef<str>,
        properties: impl IntoIterator<Item = (K, DataValue)>,
    ) -> Self {
        Self {
            properties: Arc::new(
                properties.into_iter()
                    .map(|(key, value)| (key.into(), value))
                    .collect(),
            ),
            type_name: Arc::from(type_name.as_ref()),
        }
    }

    pub fn properties(&self) -> &IndexMap<String, DataValue> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&DataValue> {
        self.properties.get(name)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A fully-coerced input value: a variable value or a field/directive
/// argument after variable substitution.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum InputValue {
    Null,
    Boolean(bool),
    Enum(String),
    Float(f64),
    Int(i64),
    List(Vec<InputValue>),
    Object(IndexMap<String, InputValue>),
    String(String),
}
impl InputValue {
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Boolean(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        if let Self::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[InputValue]> {
        if let Self::List(values) = self {
            Some(values.as_slice())
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, InputValue>> {
        if let Self::Object(fields) = self {
            Some(fields)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) | Self::Enum(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert an arbitrary JSON value without any type information. Integral
    /// numbers become [`InputValue::Int`] and strings never become enums.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Boolean(*value),
            serde_json::Value::Number(num) => match num.as_i64() {
                Some(value) => Self::Int(value),
                None => Self::Float(num.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(value) => Self::String(value.to_string()),
            serde_json::Value::Array(values) =>
                Self::List(values.iter().map(Self::from_json).collect()),
            serde_json::Value::Object(fields) => Self::Object(
                fields.iter()
                    .map(|(key, value)| (key.to_string(), Self::from_json(value)))
                    .collect(),
            ),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
impl std::fmt::Display for InputValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Enum(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::List(values) => {
                write!(f, "[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            },
            Self::Object(fields) => {
                write!(f, "{{")?;
                for (idx, (name, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            },
        }
    }
}

/// The materialized arguments passed to a field or directive resolver, in the
/// order they are declared on the schema.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: IndexMap<String, InputValue>,
}
impl Arguments {
    pub fn new(values: IndexMap<String, InputValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.values.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(InputValue::as_bool)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(InputValue::as_i64)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(InputValue::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, InputValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
