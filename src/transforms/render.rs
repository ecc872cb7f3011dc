use crate::models::{SCALAR_FIELDS, SearchState};

use super::rules::filter_field_for;

/// Renders a search state as filter text, one clause line per non-empty
/// identifier set. The time window is deliberately excluded; the state codec
/// appends it when building an executable query.
///
/// Clause shapes: `field="a"` for a single id, `field=("a" OR "b")` for
/// several, `NOT` prefixed for exclusion fields. Scalar fields and derived
/// `*Found`/`*New` companions never contribute clauses.
pub fn state_to_filter(state: &SearchState) -> String {
    let mut clauses = Vec::new();

    for field in state.fields() {
        if SCALAR_FIELDS.contains(&field) || field.ends_with("Found") || field.ends_with("New") {
            continue;
        }

        let ids = state.ids(field);
        if ids.is_empty() {
            continue;
        }

        let (filter_field, exclude) = filter_field_for(field);
        let clause = match ids {
            [only] => format!("{filter_field}=\"{only}\""),
            _ => {
                let alternatives =
                    ids.iter().map(|id| format!("\"{id}\"")).collect::<Vec<_>>().join(" OR ");
                format!("{filter_field}=({alternatives})")
            }
        };

        if exclude {
            clauses.push(format!("NOT {clause}"));
        } else {
            clauses.push(clause);
        }
    }

    clauses.join("\n")
}
