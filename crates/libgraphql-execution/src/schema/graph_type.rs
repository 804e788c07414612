use crate::loc::SourceLocation;
use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::schema::TypeExpression;
use crate::value::InputValue;
use indexmap::IndexMap;

/// Represents a type defined within a [`Schema`].
#[derive(Clone, Debug, PartialEq)]
pub enum GraphType {
    Boolean,
    Enum(EnumType),
    Float,
    ID,
    InputObject(InputObjectType),
    Int,
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    String,
    Union(UnionType),
}
impl GraphType {
    /// The fields declared directly on this type. Only object and interface
    /// types are field containers.
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDefinition>> {
        match self {
            Self::Interface(t) => Some(&t.fields),
            Self::Object(t) => Some(&t.fields),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().and_then(|fields| fields.get(name))
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    pub fn is_field_container(&self) -> bool {
        self.fields().is_some()
    }

    /// Whether values of this type are leaves of the response tree.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Enum(_)
                | Self::Float
                | Self::ID
                | Self::Int
                | Self::Scalar(_)
                | Self::String
        )
    }

    pub fn kind(&self) -> GraphTypeKind {
        self.into()
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Boolean => "Boolean",
            Self::Enum(t) => t.name.as_str(),
            Self::Float => "Float",
            Self::ID => "ID",
            Self::InputObject(t) => t.name.as_str(),
            Self::Int => "Int",
            Self::Interface(t) => t.name.as_str(),
            Self::Object(t) => t.name.as_str(),
            Self::Scalar(t) => t.name.as_str(),
            Self::String => "String",
            Self::Union(t) => t.name.as_str(),
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        if let Self::InputObject(t) = self {
            Some(t)
        } else {
            None
        }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        if let Self::Union(t) = self {
            Some(t)
        } else {
            None
        }
    }
}
impl DerefByName for GraphType {
    type Source = Schema;

    fn deref_name<'a>(
        schema: &'a Schema,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError> {
        schema.types.get(name).ok_or_else(
            || DerefByNameError::DanglingReference(name.to_string()),
        )
    }
}

pub type NamedGraphTypeRef = NamedRef<Schema, GraphType>;

/// Similar to [`GraphType`] except without the corresponding type metadata.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphTypeKind {
    Boolean,
    Enum,
    Float,
    ID,
    InputObject,
    Int,
    Interface,
    Object,
    Scalar,
    String,
    Union,
}
impl std::convert::From<&GraphType> for GraphTypeKind {
    fn from(value: &GraphType) -> Self {
        match value {
            GraphType::Boolean => Self::Boolean,
            GraphType::Enum(_) => Self::Enum,
            GraphType::Float => Self::Float,
            GraphType::ID => Self::ID,
            GraphType::InputObject(_) => Self::InputObject,
            GraphType::Int => Self::Int,
            GraphType::Interface(_) => Self::Interface,
            GraphType::Object(_) => Self::Object,
            GraphType::Scalar(_) => Self::Scalar,
            GraphType::String => Self::String,
            GraphType::Union(_) => Self::Union,
        }
    }
}

/// An argument of a field or directive, or a field of an input object.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentDefinition {
    pub(crate) def_location: SourceLocation,
    pub(crate) default_value: Option<InputValue>,
    pub(crate) name: String,
    pub(crate) type_expression: TypeExpression,
}
impl ArgumentDefinition {
    pub fn def_location(&self) -> &SourceLocation {
        &self.def_location
    }

    /// The declared default. `None` means "no default" which is distinct from
    /// `Some(InputValue::Null)`.
    pub fn default_value(&self) -> Option<&InputValue> {
        self.default_value.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_expression(&self) -> &TypeExpression {
        &self.type_expression
    }
}

pub type InputFieldDefinition = ArgumentDefinition;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub(crate) arguments: IndexMap<String, ArgumentDefinition>,
    pub(crate) def_location: SourceLocation,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) owner_type_name: String,
    pub(crate) type_expression: TypeExpression,
}
impl FieldDefinition {
    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.get(name)
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgumentDefinition> {
        &self.arguments
    }

    pub fn def_location(&self) -> &SourceLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The name of the object or interface type this field is declared on.
    pub fn owner_type_name(&self) -> &str {
        self.owner_type_name.as_str()
    }

    pub fn type_expression(&self) -> &TypeExpression {
        &self.type_expression
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub(crate) def_location: SourceLocation,
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, FieldDefinition>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}
impl ObjectType {
    pub fn def_location(&self) -> &SourceLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.fields
    }

    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(String::as_str).collect()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType {
    pub(crate) def_location: SourceLocation,
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, FieldDefinition>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}
impl InterfaceType {
    pub fn def_location(&self) -> &SourceLocation {
        &self.def_location
    }

    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.fields
    }

    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(String::as_str).collect()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionType {
    pub(crate) def_location: SourceLocation,
    pub(crate) members: Vec<String>,
    pub(crate) name: String,
}
impl UnionType {
    pub fn def_location(&self) -> &SourceLocation {
        &self.def_location
    }

    /// An ordered list of the names of each member type of this union, in the
    /// order they were declared.
    pub fn member_type_names(&self) -> Vec<&str> {
        self.members.iter().map(String::as_str).collect()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub(crate) def_location: SourceLocation,
    pub(crate) name: String,
    pub(crate) values: Vec<String>,
}
impl EnumType {
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectType {
    pub(crate) def_location: SourceLocation,
    pub(crate) fields: IndexMap<String, InputFieldDefinition>,
    pub(crate) name: String,
}
impl InputObjectType {
    pub fn field(&self, name: &str) -> Option<&InputFieldDefinition> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &IndexMap<String, InputFieldDefinition> {
        &self.fields
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// A custom scalar. Built-in scalars are represented by the dedicated
/// [`GraphType`] variants.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub(crate) def_location: SourceLocation,
    pub(crate) name: String,
}
impl ScalarType {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
