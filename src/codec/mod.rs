//! Codecs surrounding the core transforms: state→filter/query policy and
//! the deep-link URL format.

pub mod state;
pub mod url;

pub use state::{build_filter, build_query, enforce_size_limit};
pub use url::{DEFAULT_PROJECT, LOGS_URL_BASE, decode_url, decode_url_at, encode_url};
