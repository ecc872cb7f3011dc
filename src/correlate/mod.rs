//! The correlation engine: state merging and the single-iteration driver.

pub mod driver;
pub mod merge;

pub use driver::{find_entries, state_from_url};
pub use merge::{merge_states, sum_sets};
