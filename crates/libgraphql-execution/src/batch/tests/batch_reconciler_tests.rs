use crate::batch::BatchAssignment;
use crate::batch::BatchKey;
use crate::batch::BatchReconciler;
use crate::batch::BatchResult;
use crate::value::DataValue;
use proptest::prelude::*;

fn source(key: i64) -> DataValue {
    DataValue::object("Author", [("id", DataValue::from(key))])
}

fn result(name: &str, keys: &[i64]) -> DataValue {
    DataValue::object("Book", [
        ("name", DataValue::from(name)),
        ("authorIds", DataValue::list(keys.iter().map(|key| DataValue::from(*key)))),
    ])
}

#[test]
fn list_field_receives_every_match() {
    let result_a = result("A", &[1, 2]);
    let result_b = result("B", &[2]);
    let batch = BatchResult::by_property(
        vec![result_a.clone(), result_b.clone()],
        "id",
        "authorIds",
    );
    let sources = [source(1), source(2), source(3)];

    let assignments = BatchReconciler::new(&batch).reconcile(&sources, true);

    assert_eq!(assignments, vec![
        BatchAssignment::Assigned(DataValue::list([result_a.clone()])),
        BatchAssignment::Assigned(DataValue::list([result_a, result_b])),
        BatchAssignment::Assigned(DataValue::Null),
    ]);
}

#[test]
fn single_field_with_many_matches_is_ambiguous() {
    let batch = BatchResult::by_property(
        vec![result("A", &[1, 2]), result("B", &[2])],
        "id",
        "authorIds",
    );
    let sources = [source(1), source(2)];

    let assignments = BatchReconciler::new(&batch).reconcile(&sources, false);

    assert_eq!(assignments[0], BatchAssignment::Assigned(result("A", &[1, 2])));
    assert_eq!(assignments[1], BatchAssignment::Ambiguous {
        key: BatchKey::Int(2),
        match_count: 2,
    });
}

#[test]
fn repeated_result_keys_match_once() {
    let batch = BatchResult::by_property(vec![result("A", &[7, 7])], "id", "authorIds");
    let assignments = BatchReconciler::new(&batch).reconcile(&[source(7)], false);
    assert_eq!(assignments, vec![BatchAssignment::Assigned(result("A", &[7, 7]))]);
}

#[test]
fn sources_without_a_key_get_null() {
    let batch = BatchResult::by_property(vec![result("A", &[1])], "id", "authorIds");
    let keyless = DataValue::object("Author", [("name", DataValue::from("anon"))]);

    let assignments = BatchReconciler::new(&batch).reconcile([&keyless, &DataValue::Null], true);

    assert_eq!(assignments, vec![
        BatchAssignment::Assigned(DataValue::Null),
        BatchAssignment::Assigned(DataValue::Null),
    ]);
}

#[test]
fn custom_key_functions_join_on_strings() {
    let batch = BatchResult::new(
        vec![DataValue::from("alpha"), DataValue::from("beta")],
        |source| source.as_leaf().and_then(BatchKey::from_json),
        |result| match result.as_leaf().and_then(|leaf| leaf.as_str()) {
            Some(text) => vec![BatchKey::from(&text[..1])],
            None => vec![],
        },
    );
    let sources = [DataValue::from("b"), DataValue::from("a")];

    let assignments = BatchReconciler::new(&batch).reconcile(&sources, false);

    assert_eq!(assignments, vec![
        BatchAssignment::Assigned(DataValue::from("beta")),
        BatchAssignment::Assigned(DataValue::from("alpha")),
    ]);
}

proptest! {
    #[test]
    fn list_reconciliation_matches_a_naive_join(
        source_keys in prop::collection::vec(0i64..8, 0..12),
        result_keys in prop::collection::vec(prop::collection::vec(0i64..8, 0..4), 0..12),
    ) {
        let results: Vec<DataValue> =
            result_keys.iter()
                .enumerate()
                .map(|(idx, keys)| result(&idx.to_string(), keys))
                .collect();
        let sources: Vec<DataValue> = source_keys.iter().map(|key| source(*key)).collect();
        let batch = BatchResult::by_property(results.clone(), "id", "authorIds");

        let assignments = BatchReconciler::new(&batch).reconcile(&sources, true);

        prop_assert_eq!(assignments.len(), sources.len());
        for (source_key, assignment) in source_keys.iter().zip(assignments) {
            let expected: Vec<DataValue> =
                result_keys.iter()
                    .zip(&results)
                    .filter(|(keys, _)| keys.contains(source_key))
                    .map(|(_, result)| result.clone())
                    .collect();
            let expected = if expected.is_empty() {
                DataValue::Null
            } else {
                DataValue::List(expected)
            };
            prop_assert_eq!(assignment, BatchAssignment::Assigned(expected));
        }
    }

    #[test]
    fn single_reconciliation_never_assigns_ambiguous_sources(
        source_keys in prop::collection::vec(0i64..5, 1..8),
        result_keys in prop::collection::vec(0i64..5, 0..8),
    ) {
        let results: Vec<DataValue> =
            result_keys.iter()
                .enumerate()
                .map(|(idx, key)| result(&idx.to_string(), &[*key]))
                .collect();
        let sources: Vec<DataValue> = source_keys.iter().map(|key| source(*key)).collect();
        let batch = BatchResult::by_property(results, "id", "authorIds");

        let assignments = BatchReconciler::new(&batch).reconcile(&sources, false);

        for (source_key, assignment) in source_keys.iter().zip(assignments) {
            let match_count = result_keys.iter().filter(|key| *key == source_key).count();
            match assignment {
                BatchAssignment::Ambiguous { match_count: count, .. } =>
                    prop_assert!(match_count >= 2 && count == match_count),
                BatchAssignment::Assigned(DataValue::Null) => prop_assert_eq!(match_count, 0),
                BatchAssignment::Assigned(_) => prop_assert_eq!(match_count, 1),
            }
        }
    }
}
