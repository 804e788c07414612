use crate::ast;

/// Represents the declared type of a field, argument, input field or variable
/// (e.g. `[String!]!`).
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum TypeExpression {
    List {
        inner: Box<TypeExpression>,
        nullable: bool,
    },
    Named {
        name: String,
        nullable: bool,
    },
}
impl TypeExpression {
    pub fn list(inner: TypeExpression, nullable: bool) -> Self {
        Self::List {
            inner: Box::new(inner),
            nullable,
        }
    }

    pub fn named(name: impl Into<String>, nullable: bool) -> Self {
        Self::Named {
            name: name.into(),
            nullable,
        }
    }

    pub(crate) fn from_ast_type(ast_type: &ast::Type) -> Self {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(ast_type: &ast::Type, nullable: bool) -> Self {
        match ast_type {
            ast::Type::ListType(inner) =>
                Self::list(Self::from_ast_type_impl(inner, true), nullable),

            ast::Type::NamedType(name) =>
                Self::named(name.as_str(), nullable),

            ast::Type::NonNullType(inner) =>
                Self::from_ast_type_impl(inner, false),
        }
    }

    /// Parse a type expression written in GraphQL syntax (e.g. `"[Int!]"`).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (body, nullable) = match text.strip_suffix('!') {
            Some(body) => (body.trim_end(), false),
            None => (text, true),
        };

        if let Some(inner) = body.strip_prefix('[') {
            let inner = inner.strip_suffix(']')?;
            return Some(Self::list(Self::parse(inner)?, nullable));
        }

        let is_name =
            !body.is_empty()
            && body.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && !body.starts_with(|c: char| c.is_ascii_digit());
        is_name.then(|| Self::named(body, nullable))
    }

    /// The inner type of a list expression, if this is one.
    pub fn list_inner(&self) -> Option<&TypeExpression> {
        if let Self::List { inner, .. } = self {
            Some(inner)
        } else {
            None
        }
    }

    /// Recursively unwrap this [`TypeExpression`] and return the name of the
    /// inner-most named type.
    pub fn innermost_type_name(&self) -> &str {
        match self {
            Self::List { inner, .. } => inner.innermost_type_name(),
            Self::Named { name, .. } => name.as_str(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    pub fn is_non_null(&self) -> bool {
        !self.nullable()
    }

    pub fn nullable(&self) -> bool {
        match self {
            Self::List { nullable, .. } => *nullable,
            Self::Named { nullable, .. } => *nullable,
        }
    }

    /// A copy of this expression with the outer-most nullability replaced.
    pub fn with_nullable(&self, nullable: bool) -> Self {
        match self {
            Self::List { inner, .. } => Self::List {
                inner: inner.clone(),
                nullable,
            },
            Self::Named { name, .. } => Self::Named {
                name: name.clone(),
                nullable,
            },
        }
    }
}
impl std::fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List { inner, nullable } => write!(
                f,
                "[{inner}]{}",
                if *nullable { "" } else { "!" },
            ),

            Self::Named { name, nullable } => write!(
                f,
                "{name}{}",
                if *nullable { "" } else { "!" },
            ),
        }
    }
}
