//! Service layer for the curriculum application.
//!
//! This module contains the business logic for:
//! - Archive search (`search_archive`) and browsing state (`ArchiveBrowser`)
//! - Reading progress summaries (`section_progress`, `active_modules`)
//! - Recently viewed archive items (`RecentlyViewed`)
//! - Problem metadata parsing (`ProblemParsers`, `fetch_and_parse`)

mod archive_search;
mod archive_view;
mod problems;
mod progress;
mod recent;

pub use archive_search::{
    ArchiveSearch, HighlightSegment, ItemMatch, SectionMatch, highlight_segments, search_archive,
};
pub use archive_view::{
    ArchiveBrowser, Breadcrumb, BreadcrumbTrail, ExpansionState, Highlight, SearchDebouncer,
};
pub use problems::{
    AtCoderParser, CodeforcesParser, CsesParser, ProblemParser, ProblemParsers, UsacoParser,
    fetch_and_parse, parse_many, parse_original, parse_url_only,
};
pub use progress::{
    ActiveModule, ProgressCounts, ProgressPercentages, active_modules, dashboard_section,
    section_progress,
};
pub use recent::{RecentItem, RecentlyViewed};
