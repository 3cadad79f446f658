// src/models/mod.rs

//! Domain models for the curriculum library.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod archive;
mod config;
mod module;
mod ordering;
mod problem;

// Re-export all public types
pub use archive::{
    ArchiveCatalog, ArchiveItem, ArchiveSection, ArchiveSubject, ArchiveSubsection, SectionPath,
};
pub use config::{
    ArchiveConfig, Config, DashboardConfig, DuplicatePolicy, HttpConfig, IndexConfig, PathsConfig,
};
pub use module::{ModuleFrequency, ModuleLinkInfo, ModuleProgress, ProgressMap, module_url};
pub use ordering::{Chapter, Ordering, SectionEntry, SectionId};
pub use problem::{ProblemMetadata, SolutionMetadata, placeholders};
