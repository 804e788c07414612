use crate::document::QueryDocument;
use crate::document::QueryDocumentBuilder;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

/// Install a test-writer `tracing` subscriber. The level is read from the
/// `LOG_LEVEL` environment variable. Safe to call from every test.
pub(crate) fn init_test_logging() {
    let log_level =
        match std::env::var("LOG_LEVEL").map(|s| s.trim().to_string()).as_deref() {
            Ok("DEBUG" | "debug" | "VERBOSE" | "verbose") => tracing::Level::DEBUG,
            Ok("INFO" | "info") => tracing::Level::INFO,
            Ok("TRACE" | "trace") => tracing::Level::TRACE,
            _ => DEFAULT_LOG_LEVEL,
        };

    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_test_writer()
        .try_init();
}

pub(crate) const STARWARS_SCHEMA: &str = r#"
type Query {
  hero(episode: Episode, id: ID): Character
  human(id: ID!): Human
  node(id: ID!): Node
  pets: [Pet]
  search(filter: SearchFilter, limit: Int = 10): [SearchResult]
}

type Mutation {
  rename(id: ID!, name: String!): Human
}

enum Episode { NEWHOPE EMPIRE JEDI }
enum Unit { METER FOOT }

interface Node { id: ID! }

interface Character {
  id: ID!
  name: String
  friends: [Character]
}

type Human implements Character & Node {
  id: ID!
  name: String
  friends: [Character]
  height(unit: Unit = METER): Float
}

type Droid implements Character & Node {
  id: ID!
  name: String
  friends: [Character]
  primaryFunction: String
}

union SearchResult = Human | Droid

type Cat { name: String meows: Boolean }
type Dog { name: String barks: Boolean }
union Pet = Cat | Dog

input SearchFilter {
  text: String!
  tags: [String!]
  nested: SearchFilter
}

directive @upper on FIELD
"#;

pub(crate) fn starwars_schema() -> Schema {
    SchemaBuilder::from_str(STARWARS_SCHEMA)
        .and_then(|builder| builder.build())
        .unwrap()
}

pub(crate) fn build_document(schema: &Schema, query: &str) -> QueryDocument {
    init_test_logging();
    QueryDocumentBuilder::new(schema)
        .build_from_str(query)
        .unwrap()
}
