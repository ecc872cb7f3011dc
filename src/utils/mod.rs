pub mod environment;

pub use environment::{LOG_STORE_ENV, get_log_store_path};
