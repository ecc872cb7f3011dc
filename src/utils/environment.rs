use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable naming the JSON file the replay log client reads.
pub const LOG_STORE_ENV: &str = "CORRELATE_LOG_STORE";

/// Path to the local log store backing the replay client.
pub fn get_log_store_path() -> Result<PathBuf> {
    let path =
        env::var(LOG_STORE_ENV).with_context(|| format!("{LOG_STORE_ENV} environment variable not set"))?;
    Ok(PathBuf::from(path))
}
