//! Additive merge of search states across iterations.

use std::collections::BTreeSet;

use crate::models::{SCALAR_FIELDS, SearchState, TRACKED_FIELDS};

/// Sorted union of two identifier sets.
pub fn sum_sets(a: &[String], b: &[String]) -> Vec<String> {
    let union: BTreeSet<&String> = a.iter().chain(b.iter()).collect();
    union.into_iter().cloned().collect()
}

/// Unions `incoming` into `prior`, field by field.
///
/// `prior` must be the older state and `incoming` the newer one — the
/// operation is not commutative: scalars are copied from `incoming`
/// (last-write-wins, it reflects the latest search window), and which
/// identifiers are reported as new depends on the direction.
///
/// For tracked fields the newly-queried side may carry a `<field>Found`
/// companion; those identifiers are folded into `<field>`. Every non-scalar
/// output field gets a `<field>New` companion listing the subset of the
/// incoming identifiers absent from `prior`, in the incoming order. Derived
/// `*Found`/`*New` keys on the inputs are never merged independently.
///
/// `merge_states(s, s)` leaves every set unchanged and empties every `*New`
/// companion, which is the convergence signal callers diff for.
pub fn merge_states(prior: &SearchState, incoming: &SearchState) -> SearchState {
    let mut merged = SearchState::new();

    let all_fields: BTreeSet<&str> = prior.fields().chain(incoming.fields()).collect();

    for field in all_fields {
        if SCALAR_FIELDS.contains(&field) {
            if let Some(value) = incoming.get(field) {
                merged.0.insert(field.to_string(), value.clone());
            }
            continue;
        }

        // derived companions, handled through their base field
        if field.ends_with("Found") || field.ends_with("New") {
            continue;
        }

        let prior_ids = prior.ids(field);
        let found: Vec<String> = if TRACKED_FIELDS.contains(&field) {
            sum_sets(incoming.ids(field), incoming.ids(&format!("{field}Found")))
        } else {
            incoming.ids(field).to_vec()
        };

        merged.set_ids(field, sum_sets(prior_ids, &found));
        merged.set_ids(
            &format!("{field}New"),
            found.iter().filter(|id| !prior_ids.contains(*id)).cloned().collect(),
        );
    }

    merged
}
