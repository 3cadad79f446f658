//! Utility functions and helpers.

pub mod http;
pub mod url;

pub use self::url::{get_domain, last_segment};
