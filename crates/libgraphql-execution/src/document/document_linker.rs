use crate::document::PartId;
use crate::document::PartKind;
use crate::document::QueryDocument;
use crate::document::SuppliedValue;
use crate::error_codes;
use crate::messages::GraphMessage;
use crate::messages::SourceOrigin;
use crate::schema::NamedGraphTypeRef;
use std::collections::HashSet;

/// The linking pass that runs after construction.
///
/// * Binds every fragment spread to the named fragment it refers to.
/// * Reports spreads of unknown fragments and cycles between fragments.
/// * Resolves variable references inside named fragments against each
///   operation that (transitively) spreads them.
/// * Reports declared variables that nothing references.
#[derive(Debug, Default)]
pub struct DocumentLinker;
impl DocumentLinker {
    pub fn new() -> Self {
        Self
    }

    pub fn link(&self, document: &mut QueryDocument) {
        self.bind_fragment_spreads(document);
        self.report_fragment_cycles(document);
        self.resolve_fragment_variables(document);
        self.report_unused_variables(document);
    }

    fn bind_fragment_spreads(&self, document: &mut QueryDocument) {
        let spreads: Vec<(PartId, String)> =
            document.parts.iter()
                .filter_map(|part| match &part.kind {
                    PartKind::FragmentSpread { name, .. } => Some((part.id, name.to_string())),
                    _ => None,
                })
                .collect();

        for (spread_id, name) in spreads {
            let spread_location = *document.part(spread_id).location();
            let Some(fragment_id) = document.named_fragment(&name) else {
                document.add_message(GraphMessage::critical(
                    error_codes::UNKNOWN_FRAGMENT,
                    format!("No fragment named `{name}` is defined in this document"),
                    SourceOrigin::at_location(spread_location),
                ));
                continue;
            };

            let fragment_type_name =
                document.part(fragment_id).graph_type_name().map(str::to_string);
            let spread = document.part_mut(spread_id);
            if let PartKind::FragmentSpread { target, .. } = &mut spread.kind {
                *target = Some(fragment_id);
            }
            if let Some(type_name) = fragment_type_name {
                spread.assign_graph_type(NamedGraphTypeRef::new(type_name, spread_location));
            }
        }
    }

    fn report_fragment_cycles(&self, document: &mut QueryDocument) {
        let mut seen_normalized_cycles = HashSet::new();
        let mut cycles = vec![];

        for fragment_name in document.fragments.keys() {
            let mut path = vec![];
            self.find_fragment_cycles(
                document,
                fragment_name,
                &mut path,
                &mut seen_normalized_cycles,
                &mut cycles,
            );
        }

        for cycle in cycles {
            let location =
                document.named_fragment(&cycle[0])
                    .map(|id| *document.part(id).location());
            document.add_message(GraphMessage::critical(
                error_codes::FRAGMENT_CYCLE,
                format!("Fragment spreads form a cycle: {}", cycle.join(" -> ")),
                SourceOrigin {
                    location,
                    path: None,
                },
            ));
        }
    }

    fn find_fragment_cycles(
        &self,
        document: &QueryDocument,
        fragment_name: &str,
        path: &mut Vec<String>,
        seen_normalized: &mut HashSet<Vec<String>>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        if let Some(cycle_start) = path.iter().position(|name| name == fragment_name) {
            let mut cycle = path[cycle_start..].to_vec();
            cycle.push(fragment_name.to_string());
            if seen_normalized.insert(normalize_cycle(&cycle)) {
                cycles.push(cycle);
            }
            return;
        }

        // Unknown fragments are reported when spreads are bound.
        let Some(fragment_id) = document.named_fragment(fragment_name) else {
            return;
        };

        path.push(fragment_name.to_string());
        for spread_name in spread_names(document, fragment_id) {
            self.find_fragment_cycles(document, &spread_name, path, seen_normalized, cycles);
        }
        path.pop();
    }

    fn resolve_fragment_variables(&self, document: &mut QueryDocument) {
        for operation in document.operations.clone() {
            let reachable = reachable_fragments(document, operation);
            let referenced_names: Vec<String> =
                reachable.iter()
                    .flat_map(|fragment_id| document.descendants(*fragment_id))
                    .filter_map(|id| match &document.part(id).kind {
                        PartKind::SuppliedValue(SuppliedValue::VariableRef { name }) =>
                            Some(name.to_string()),
                        _ => None,
                    })
                    .collect();

            let declarations = document.variables_mut(operation);
            for name in referenced_names {
                if let Some(declaration) = declarations.get_mut(&name) {
                    declaration.referenced_count += 1;
                }
            }
        }
    }

    fn report_unused_variables(&self, document: &mut QueryDocument) {
        let mut unused = vec![];
        for operation in &document.operations {
            let Some(declarations) = document.variables.get(operation) else {
                continue;
            };
            for declaration in declarations.values() {
                if !declaration.is_referenced() {
                    unused.push((declaration.name.to_string(), declaration.def_location));
                }
            }
        }

        for (name, location) in unused {
            document.add_message(GraphMessage::warning(
                error_codes::UNUSED_VARIABLE,
                format!("The variable `${name}` is declared but never used"),
                SourceOrigin::at_location(location),
            ));
        }
    }
}

/// The names of fragments spread anywhere inside the subtree of `root`.
fn spread_names(document: &QueryDocument, root: PartId) -> Vec<String> {
    document.descendants(root)
        .into_iter()
        .filter_map(|id| match &document.part(id).kind {
            PartKind::FragmentSpread { name, .. } => Some(name.to_string()),
            _ => None,
        })
        .collect()
}

/// Every named fragment an operation spreads, directly or through other
/// fragments. Safe in the presence of cycles.
fn reachable_fragments(document: &QueryDocument, operation: PartId) -> Vec<PartId> {
    let mut reachable = vec![];
    let mut visited = HashSet::new();
    let mut pending = spread_names(document, operation);
    while let Some(name) = pending.pop() {
        if !visited.insert(name.to_string()) {
            continue;
        }
        if let Some(fragment_id) = document.named_fragment(&name) {
            reachable.push(fragment_id);
            pending.extend(spread_names(document, fragment_id));
        }
    }
    reachable
}

/// Rotate a cycle (`[A, B, C, A]`) so that it starts with its
/// lexicographically smallest name, dropping the repeated final element.
/// Rotations of the same cycle normalize to the same value.
fn normalize_cycle(cycle: &[String]) -> Vec<String> {
    if cycle.is_empty() {
        return vec![];
    }
    let without_repeat = &cycle[..cycle.len() - 1];
    let min_idx =
        without_repeat.iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(idx, _)| idx)
            .unwrap_or(0);

    let mut normalized = without_repeat[min_idx..].to_vec();
    normalized.extend_from_slice(&without_repeat[..min_idx]);
    normalized
}
