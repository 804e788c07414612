use crate::loc::SourceLocation;
use crate::schema::GraphType;
use crate::schema::GraphTypeKind;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::schema::TypeExpression;
use crate::syntax::OperationType;
use crate::value::InputValue;

type Result<T> = std::result::Result<T, SchemaBuildError>;

mod build_operations {
    use super::*;

    #[test]
    fn build_empty_query_type() -> Result<()> {
        let schema = SchemaBuilder::from_str("type Query")?.build()?;

        assert_eq!(schema.query_type().name(), "Query");
        assert!(schema.mutation_type().is_none());
        assert!(schema.subscription_type().is_none());
        // 5 built-in scalars + Query
        assert_eq!(schema.all_types().len(), 6);
        assert_eq!(schema.all_directives().len(), 3);

        Ok(())
    }

    #[test]
    fn build_all_operation_types_by_convention() -> Result<()> {
        let schema = SchemaBuilder::from_str(concat!(
            "type Mutation\n",
            "type Query\n",
            "type Subscription",
        ))?.build()?;

        assert_eq!(
            schema.root_type(OperationType::Mutation).map(|t| t.name()),
            Some("Mutation"),
        );
        assert_eq!(
            schema.root_type(OperationType::Subscription).map(|t| t.name()),
            Some("Subscription"),
        );

        let GraphType::Object(mutation_t) = schema.mutation_type().unwrap() else {
            panic!("Mutation should be an object type");
        };
        assert_eq!(mutation_t.def_location(), &SourceLocation::new(1, 1));

        Ok(())
    }

    #[test]
    fn build_operation_types_from_schema_block() -> Result<()> {
        let schema = SchemaBuilder::from_str(concat!(
            "schema { query: RootQuery, mutation: RootMutation }\n",
            "type RootQuery { a: Int }\n",
            "type RootMutation { b: Int }\n",
        ))?.build()?;

        assert_eq!(schema.query_type().name(), "RootQuery");
        assert_eq!(schema.mutation_type().map(|t| t.name()), Some("RootMutation"));

        Ok(())
    }

    #[test]
    fn missing_query_type_is_an_error() {
        let result = SchemaBuilder::from_str("type Foo { a: Int }")
            .and_then(|builder| builder.build());

        assert_eq!(result.unwrap_err(), SchemaBuildError::NoQueryOperationTypeDefined);
    }

    #[test]
    fn schema_block_naming_undefined_type_is_an_error() {
        let result = SchemaBuilder::from_str(concat!(
            "schema { query: Nope }\n",
            "type Query { a: Int }\n",
        )).and_then(|builder| builder.build());

        assert!(matches!(
            result,
            Err(SchemaBuildError::UndefinedRootOperationType {
                operation_type: OperationType::Query,
                ref type_name,
                ..
            }) if type_name == "Nope",
        ));
    }
}

mod type_definitions {
    use super::*;

    #[test]
    fn fields_and_arguments_are_recorded_in_order() -> Result<()> {
        let schema = SchemaBuilder::from_str(concat!(
            "type Query {\n",
            "  users(first: Int = 10, filter: UserFilter): [User!]!\n",
            "  me: User\n",
            "}\n",
            "type User { id: ID!, name: String }\n",
            "input UserFilter { name: String, active: Boolean = true }\n",
        ))?.build()?;

        let query_t = schema.query_type();
        let field_names: Vec<&str> =
            query_t.fields().unwrap().keys().map(String::as_str).collect();
        assert_eq!(field_names, vec!["users", "me"]);

        let users = schema.find_field("Query", "users").unwrap();
        assert_eq!(users.owner_type_name(), "Query");
        assert_eq!(users.type_expression().to_string(), "[User!]!");
        assert_eq!(
            users.argument("first").unwrap().default_value(),
            Some(&InputValue::Int(10)),
        );
        assert_eq!(users.argument("filter").unwrap().default_value(), None);

        let filter_t = schema.find_graph_type("UserFilter")
            .and_then(GraphType::as_input_object)
            .unwrap();
        assert_eq!(
            filter_t.field("active").unwrap().default_value(),
            Some(&InputValue::Boolean(true)),
        );
        assert_eq!(
            filter_t.field("name").unwrap().type_expression(),
            &TypeExpression::named("String", true),
        );

        Ok(())
    }

    #[test]
    fn all_kinds_of_types_are_built() -> Result<()> {
        let schema = SchemaBuilder::from_str(concat!(
            "type Query { a: Int }\n",
            "scalar DateTime\n",
            "enum Color { RED GREEN }\n",
            "interface Node { id: ID! }\n",
            "type Cat implements Node { id: ID! }\n",
            "union Pet = Cat\n",
            "input Filter { q: String }\n",
        ))?.build()?;

        let kind_of = |name: &str| schema.find_graph_type(name).map(|t| t.kind());
        assert_eq!(kind_of("DateTime"), Some(GraphTypeKind::Scalar));
        assert_eq!(kind_of("Color"), Some(GraphTypeKind::Enum));
        assert_eq!(kind_of("Node"), Some(GraphTypeKind::Interface));
        assert_eq!(kind_of("Cat"), Some(GraphTypeKind::Object));
        assert_eq!(kind_of("Pet"), Some(GraphTypeKind::Union));
        assert_eq!(kind_of("Filter"), Some(GraphTypeKind::InputObject));
        assert_eq!(kind_of("Int"), Some(GraphTypeKind::Int));

        let GraphType::Enum(color_t) = schema.find_graph_type("Color").unwrap() else {
            panic!("Color should be an enum");
        };
        assert!(color_t.has_value("GREEN"));
        assert!(!color_t.has_value("BLUE"));

        Ok(())
    }

    #[test]
    fn duplicate_type_definition_is_an_error() {
        let result = SchemaBuilder::from_str("type Query { a: Int }")
            .and_then(|builder| builder.load_str("type Query { b: Int }"));

        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateTypeDefinition { ref type_name, .. })
                if type_name == "Query",
        ));
    }

    #[test]
    fn redefining_builtin_scalar_is_an_error() {
        let result = SchemaBuilder::from_str("scalar String\ntype Query { a: Int }");

        assert!(matches!(
            result,
            Err(SchemaBuildError::RedefinitionOfBuiltinType { .. }),
        ));
    }

    #[test]
    fn undefined_field_type_is_an_error() {
        let result = SchemaBuilder::from_str("type Query { a: Missing }")
            .and_then(|builder| builder.build());

        assert!(matches!(
            result,
            Err(SchemaBuildError::UndefinedTypeReference { ref type_name, ref referenced_from, .. })
                if type_name == "Missing" && referenced_from == "Query.a",
        ));
    }

    #[test]
    fn union_with_non_object_member_is_an_error() {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { a: Int }\n",
            "union Bad = Int\n",
        )).and_then(|builder| builder.build());

        assert!(matches!(
            result,
            Err(SchemaBuildError::InvalidUnionMember { ref member_name, .. })
                if member_name == "Int",
        ));
    }

    #[test]
    fn parse_errors_are_reported() {
        let result = SchemaBuilder::from_str("type Query {");
        assert!(matches!(result, Err(SchemaBuildError::ParseError { .. })));
    }
}

mod type_extensions {
    use super::*;

    #[test]
    fn extensions_merge_into_defined_types() -> Result<()> {
        let schema = SchemaBuilder::from_str(concat!(
            "extend type Query { b: String }\n",
            "type Query { a: Int }\n",
            "enum Color { RED }\n",
            "extend enum Color { BLUE }\n",
        ))?.build()?;

        assert!(schema.find_field("Query", "a").is_some());
        assert!(schema.find_field("Query", "b").is_some());

        let GraphType::Enum(color_t) = schema.find_graph_type("Color").unwrap() else {
            panic!("Color should be an enum");
        };
        assert_eq!(color_t.values(), &["RED".to_string(), "BLUE".to_string()]);

        Ok(())
    }

    #[test]
    fn extension_of_undefined_type_is_an_error() {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { a: Int }\n",
            "extend type Missing { b: Int }\n",
        )).and_then(|builder| builder.build());

        assert!(matches!(
            result,
            Err(SchemaBuildError::ExtensionOfUndefinedType { ref type_name, .. })
                if type_name == "Missing",
        ));
    }

    #[test]
    fn extension_redefining_field_is_an_error() {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { a: Int }\n",
            "extend type Query { a: String }\n",
        )).and_then(|builder| builder.build());

        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateFieldDefinition { ref field_name, .. })
                if field_name == "a",
        ));
    }
}

mod directives {
    use super::*;

    #[test]
    fn builtin_directives_are_injected() -> Result<()> {
        let schema = SchemaBuilder::from_str("type Query { a: Int }")?.build()?;

        let skip = schema.find_directive("skip").unwrap();
        assert!(skip.is_builtin());
        assert_eq!(
            skip.argument("if").unwrap().type_expression(),
            &TypeExpression::named("Boolean", false),
        );
        assert!(schema.find_directive("include").is_some());
        assert!(schema.find_directive("deprecated").is_some());

        Ok(())
    }

    #[test]
    fn custom_directive_definition() -> Result<()> {
        let schema = SchemaBuilder::from_str(concat!(
            "directive @upper(enabled: Boolean = true) repeatable on FIELD | FIELD_DEFINITION\n",
            "type Query { a: String }\n",
        ))?.build()?;

        let upper = schema.find_directive("upper").unwrap();
        assert!(!upper.is_builtin());
        assert!(upper.is_repeatable());
        assert_eq!(upper.locations(), &["FIELD".to_string(), "FIELD_DEFINITION".to_string()]);
        assert_eq!(
            upper.argument("enabled").unwrap().default_value(),
            Some(&InputValue::Boolean(true)),
        );

        Ok(())
    }

    #[test]
    fn redefining_builtin_directive_is_an_error() {
        let result = SchemaBuilder::from_str(
            "directive @skip(if: Boolean!) on FIELD\ntype Query { a: Int }",
        );

        assert!(matches!(
            result,
            Err(SchemaBuildError::RedefinitionOfBuiltinDirective { ref directive_name, .. })
                if directive_name == "skip",
        ));
    }
}
