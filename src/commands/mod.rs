//! Command entry points behind the CLI.
//!
//! - `run_validate`, `run_sections`, `run_chapters`, `run_lookup`: curriculum
//! - `run_subjects`, `run_search`, `run_visit`, `run_recent`: archive
//! - `run_parse`: problem metadata
//! - `run_progress_set`, `run_progress_show`: reading progress
//!
//! Each writes its report to the given writer so output can be captured.

pub mod archive;
pub mod catalog;
pub mod problems;
pub mod progress;

pub use archive::{run_recent, run_search, run_subjects, run_visit};
pub use catalog::{run_chapters, run_lookup, run_sections, run_validate};
pub use problems::run_parse;
pub use progress::{run_progress_set, run_progress_show};
