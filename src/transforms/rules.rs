//! The fixed field rule table shared by both transforms.
//!
//! Each rule ties a search-state field to the JSON pointer paths it is
//! extracted from in a raw log entry and to the field name it queries in the
//! log store's filter language. `insertIds` is the one exclusion rule: known
//! entry ids are filtered *out* of a regenerated query.

pub struct FieldRule {
    /// Search-state field name.
    pub state_field: &'static str,
    /// JSON pointer paths tried against each log entry during extraction.
    pub entry_paths: &'static [&'static str],
    /// Field name used in filter clauses.
    pub filter_field: &'static str,
    /// Render as a negated clause (already-seen entries).
    pub exclude: bool,
}

pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        state_field: "tasks",
        entry_paths: &["/protoPayload/taskName"],
        filter_field: "protoPayload.taskName",
        exclude: false,
    },
    FieldRule {
        state_field: "traces",
        entry_paths: &["/trace"],
        filter_field: "trace",
        exclude: false,
    },
    FieldRule {
        state_field: "pubSubMessageIds",
        entry_paths: &["/jsonPayload/messageId"],
        filter_field: "jsonPayload.messageId",
        exclude: false,
    },
    FieldRule {
        state_field: "posts",
        entry_paths: &["/jsonPayload/postId"],
        filter_field: "jsonPayload.postId",
        exclude: false,
    },
    FieldRule {
        state_field: "recipes",
        entry_paths: &["/jsonPayload/recipeId"],
        filter_field: "jsonPayload.recipeId",
        exclude: false,
    },
    FieldRule {
        state_field: "recipeCollections",
        entry_paths: &["/jsonPayload/recipeCollectionId"],
        filter_field: "jsonPayload.recipeCollectionId",
        exclude: false,
    },
    FieldRule {
        state_field: "insertIds",
        entry_paths: &["/insertId"],
        filter_field: "insertId",
        exclude: true,
    },
];

pub fn rule_for(state_field: &str) -> Option<&'static FieldRule> {
    FIELD_RULES.iter().find(|rule| rule.state_field == state_field)
}

/// Filter field name and exclusion flag for a state field. Unknown set
/// fields query the state field name itself.
pub fn filter_field_for(state_field: &str) -> (&str, bool) {
    match rule_for(state_field) {
        Some(rule) => (rule.filter_field, rule.exclude),
        None => (state_field, false),
    }
}
