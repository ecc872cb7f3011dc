//! The two pure state⇄filter transforms, realized as a fixed rule table.
//!
//! The contract: [`state_to_filter`] must produce a valid filter clause
//! reflecting every identifier set in a state (excluding the time window),
//! and [`entries_to_state`] must extract a deduplicated, sorted set per
//! tracked field from a batch of entries. Both are total over well-formed
//! input and side-effect free, so correlation logic composes them without
//! caring how they are implemented.

pub mod extract;
pub mod render;
pub mod rules;

pub use extract::entries_to_state;
pub use render::state_to_filter;
pub use rules::{FIELD_RULES, FieldRule};
