//! The curriculum: ordering plus derived lookups, built once at startup.
//!
//! [`Curriculum::build`] validates the ordering, traverses it once, and
//! returns an immutable value that callers share by reference (or `Arc`).
//! Every lookup answers `None` for unknown module IDs.

pub mod index;

use serde::Serialize;

use crate::error::Result;
use crate::models::{Chapter, DuplicatePolicy, ModuleLinkInfo, Ordering, SectionEntry, SectionId};

pub use index::{CurriculumIndex, DuplicateModule, IndexBuilder, ModuleEntry, build_index};

/// Implicit previous/next modules within a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleNeighbors<'a> {
    pub previous: Option<&'a str>,
    pub next: Option<&'a str>,
}

/// Immutable curriculum registry with its derived index.
#[derive(Debug, Clone)]
pub struct Curriculum {
    ordering: Ordering,
    sections: Vec<SectionId>,
    index: CurriculumIndex,
}

impl Curriculum {
    /// Validate the ordering and build the derived index.
    pub fn build(ordering: Ordering, policy: DuplicatePolicy) -> Result<Self> {
        ordering.validate()?;

        let mut builder = IndexBuilder::with_policy(policy);
        builder.add_ordering(&ordering)?;
        let index = builder.build();
        let sections = ordering.sections.iter().map(|s| s.id).collect();

        log::info!(
            "Curriculum ready: {} sections, {} modules",
            ordering.sections.len(),
            index.len()
        );

        Ok(Self {
            ordering,
            sections,
            index,
        })
    }

    /// Section declaring the module.
    pub fn section_of(&self, module_id: &str) -> Option<SectionId> {
        self.index.section_of(module_id)
    }

    /// Canonical URL path of the module.
    pub fn url_of(&self, module_id: &str) -> Option<&str> {
        self.index.url_of(module_id)
    }

    /// Sections in declaration order.
    pub fn all_sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionEntry> {
        self.ordering.sections.iter().find(|s| s.id == id)
    }

    /// Display label of a section, falling back to its identifier.
    pub fn label(&self, id: SectionId) -> &str {
        self.section(id)
            .map(|s| s.label.as_str())
            .unwrap_or_else(|| id.as_str())
    }

    /// Chapters of a section in order.
    pub fn chapters_of(&self, id: SectionId) -> &[Chapter] {
        self.section(id)
            .map(|s| s.chapters.as_slice())
            .unwrap_or_default()
    }

    /// Module IDs of a section in reading order.
    pub fn modules_of(&self, id: SectionId) -> Vec<&str> {
        self.index.sequence(id).iter().map(String::as_str).collect()
    }

    /// Chapter holding the module's winning declaration.
    pub fn chapter_of(&self, module_id: &str) -> Option<&Chapter> {
        let entry = self.index.entry(module_id)?;
        self.chapters_of(entry.section).get(entry.chapter)
    }

    /// Previous and next module in the same section.
    pub fn neighbors(&self, module_id: &str) -> Option<ModuleNeighbors<'_>> {
        let entry = self.index.entry(module_id)?;
        let sequence = self.index.sequence(entry.section);
        let previous = entry
            .position
            .checked_sub(1)
            .and_then(|i| sequence.get(i))
            .map(String::as_str);
        let next = sequence.get(entry.position + 1).map(String::as_str);
        Some(ModuleNeighbors { previous, next })
    }

    /// Link info for a known module with the given title.
    pub fn link_info(&self, module_id: &str, title: &str) -> Option<ModuleLinkInfo> {
        self.section_of(module_id)
            .map(|section| ModuleLinkInfo::new(module_id, section, title))
    }

    pub fn duplicates(&self) -> &[DuplicateModule] {
        self.index.duplicates()
    }

    pub fn module_count(&self) -> usize {
        self.index.len()
    }

    pub fn index(&self) -> &CurriculumIndex {
        &self.index
    }

    pub fn ordering(&self) -> &Ordering {
        &self.ordering
    }
}

impl Default for Curriculum {
    /// The built-in ordering, last-write-wins.
    fn default() -> Self {
        let ordering = Ordering::default();
        let index = build_index(&ordering);
        let sections = ordering.sections.iter().map(|s| s.id).collect();
        Self {
            ordering,
            sections,
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_all_sections_declaration_order_and_stable() {
        let curriculum = Curriculum::build(Ordering::default(), DuplicatePolicy::Reject).unwrap();
        let first = curriculum.all_sections().to_vec();
        assert_eq!(first, SectionId::ALL.to_vec());
        assert_eq!(curriculum.all_sections(), first.as_slice());
    }

    #[test]
    fn test_declaration_order_follows_ordering() {
        let mut ordering = Ordering::default();
        ordering.sections.reverse();
        let curriculum = Curriculum::build(ordering, DuplicatePolicy::default()).unwrap();
        assert_eq!(curriculum.all_sections()[0], SectionId::Beyond);
        assert_eq!(curriculum.all_sections()[5], SectionId::General);
    }

    #[test]
    fn test_build_rejects_missing_section() {
        let mut ordering = Ordering::default();
        ordering.sections.retain(|s| s.id != SectionId::Special);
        let err = Curriculum::build(ordering, DuplicatePolicy::default()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_lookups_on_default() {
        let curriculum = Curriculum::default();
        assert_eq!(curriculum.section_of("dsu"), Some(SectionId::Advanced));
        assert_eq!(curriculum.url_of("fft"), Some("/beyond/fft"));
        assert_eq!(curriculum.section_of("nope"), None);
        assert_eq!(curriculum.label(SectionId::General), "Предговор");
        assert_eq!(curriculum.chapters_of(SectionId::Beginner).len(), 5);
        assert_eq!(
            curriculum.chapter_of("two-pointers").unwrap().name,
            "Sorting & Searching"
        );
        assert!(curriculum.chapter_of("nope").is_none());
    }

    #[test]
    fn test_neighbors_cross_chapter_boundaries() {
        let curriculum = Curriculum::default();

        let first = curriculum.neighbors("time-comp").unwrap();
        assert_eq!(first.previous, None);
        assert_eq!(first.next, Some("intro-ds"));

        let boundary = curriculum.neighbors("simulation").unwrap();
        assert_eq!(boundary.previous, Some("intro-ds"));
        assert_eq!(boundary.next, Some("intro-complete"));

        let last = curriculum.neighbors("bronze-conclusion").unwrap();
        assert_eq!(last.next, None);

        assert!(curriculum.neighbors("nope").is_none());
    }

    #[test]
    fn test_modules_of_and_link_info() {
        let curriculum = Curriculum::default();
        let modules = curriculum.modules_of(SectionId::Intermediate);
        assert_eq!(modules.first(), Some(&"prefix-sums"));
        assert_eq!(modules.last(), Some(&"silver-conclusion"));

        let info = curriculum.link_info("lis", "Longest Increasing Subsequence").unwrap();
        assert_eq!(info.url, "/advanced/lis");
        assert!(curriculum.link_info("nope", "Nope").is_none());
    }
}
