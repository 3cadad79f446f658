//! Derived lookup tables over the curriculum ordering.
//!
//! One traversal of the ordering (sections, then chapters, then items, all
//! in declaration order) produces `module → section` and `module → URL`
//! tables. When a module ID is declared twice the later declaration wins,
//! unless the builder runs with [`DuplicatePolicy::Reject`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{DuplicatePolicy, Ordering, SectionEntry, SectionId, module_url};

/// Where a module lives in the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub section: SectionId,
    /// Canonical URL path: `/{section}/{module}`
    pub url: String,
    /// Index of the declaring chapter within its section
    pub chapter: usize,
    /// Position within the section's reading order
    pub position: usize,
    #[serde(skip)]
    ordinal: usize,
}

/// A module ID that was declared more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateModule {
    pub module_id: String,
    /// Section of the overwritten declaration
    pub first: SectionId,
    /// Section of the declaration that won
    pub second: SectionId,
}

/// Immutable lookup tables built once from an [`Ordering`].
#[derive(Debug, Clone, Default)]
pub struct CurriculumIndex {
    entries: HashMap<String, ModuleEntry>,
    sequences: HashMap<SectionId, Vec<String>>,
    duplicates: Vec<DuplicateModule>,
}

impl CurriculumIndex {
    /// Section declaring the module, if any.
    pub fn section_of(&self, module_id: &str) -> Option<SectionId> {
        self.entries.get(module_id).map(|e| e.section)
    }

    /// Canonical URL of the module, if any.
    pub fn url_of(&self, module_id: &str) -> Option<&str> {
        self.entries.get(module_id).map(|e| e.url.as_str())
    }

    pub fn entry(&self, module_id: &str) -> Option<&ModuleEntry> {
        self.entries.get(module_id)
    }

    /// Modules of a section in reading order, winners of duplicates only.
    pub fn sequence(&self, section: SectionId) -> &[String] {
        self.sequences
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn duplicates(&self) -> &[DuplicateModule] {
        &self.duplicates
    }

    /// Number of distinct module IDs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for constructing a [`CurriculumIndex`].
pub struct IndexBuilder {
    policy: DuplicatePolicy,
    entries: HashMap<String, ModuleEntry>,
    declarations: Vec<(SectionId, Vec<(String, usize)>)>,
    duplicates: Vec<DuplicateModule>,
    next_ordinal: usize,
}

impl IndexBuilder {
    /// Create a new index builder with last-write-wins duplicates.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create a new index builder with a custom duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
            declarations: Vec::new(),
            duplicates: Vec::new(),
            next_ordinal: 0,
        }
    }

    /// Add every module of a section.
    pub fn add_section(&mut self, entry: &SectionEntry) -> Result<()> {
        let mut declared = Vec::with_capacity(entry.module_count());

        for (chapter_idx, chapter) in entry.chapters.iter().enumerate() {
            for module_id in &chapter.items {
                let ordinal = self.next_ordinal;
                self.next_ordinal += 1;

                let new_entry = ModuleEntry {
                    section: entry.id,
                    url: module_url(entry.id, module_id),
                    chapter: chapter_idx,
                    position: 0,
                    ordinal,
                };

                if let Some(previous) = self.entries.insert(module_id.clone(), new_entry) {
                    if self.policy == DuplicatePolicy::Reject {
                        return Err(AppError::DuplicateModule {
                            module_id: module_id.clone(),
                            first: previous.section,
                            second: entry.id,
                        });
                    }
                    log::warn!(
                        "Module '{}' declared again in '{}' (was '{}'); later declaration wins",
                        module_id,
                        entry.id,
                        previous.section
                    );
                    self.duplicates.push(DuplicateModule {
                        module_id: module_id.clone(),
                        first: previous.section,
                        second: entry.id,
                    });
                }

                declared.push((module_id.clone(), ordinal));
            }
        }

        self.declarations.push((entry.id, declared));
        Ok(())
    }

    /// Add every section of an ordering, in declaration order.
    pub fn add_ordering(&mut self, ordering: &Ordering) -> Result<()> {
        for entry in &ordering.sections {
            self.add_section(entry)?;
        }
        Ok(())
    }

    /// Build the final index.
    pub fn build(self) -> CurriculumIndex {
        let mut entries = self.entries;
        let mut sequences: HashMap<SectionId, Vec<String>> = HashMap::new();

        for (section, declared) in self.declarations {
            let winners: Vec<String> = declared
                .into_iter()
                .filter(|(id, ordinal)| {
                    entries
                        .get(id)
                        .is_some_and(|e| e.section == section && e.ordinal == *ordinal)
                })
                .map(|(id, _)| id)
                .collect();

            // Positions index the whole section sequence, which may span
            // several add_section calls for the same section.
            let sequence = sequences.entry(section).or_default();
            for id in winners {
                if let Some(entry) = entries.get_mut(&id) {
                    entry.position = sequence.len();
                }
                sequence.push(id);
            }
        }

        log::debug!(
            "Curriculum index built: {} modules, {} duplicate declarations",
            entries.len(),
            self.duplicates.len()
        );

        CurriculumIndex {
            entries,
            sequences,
            duplicates: self.duplicates,
        }
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a last-write-wins index from an ordering.
pub fn build_index(ordering: &Ordering) -> CurriculumIndex {
    let mut builder = IndexBuilder::with_policy(DuplicatePolicy::LastWriteWins);
    let added = builder.add_ordering(ordering);
    debug_assert!(added.is_ok(), "last-write-wins never rejects: {added:?}");
    if let Err(err) = added {
        log::error!("Index build stopped early: {}", err);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Chapter;

    fn section(id: SectionId, chapters: &[(&str, &[&str])]) -> SectionEntry {
        SectionEntry {
            id,
            label: id.to_string(),
            seo_title: String::new(),
            seo_description: String::new(),
            chapters: chapters
                .iter()
                .map(|(name, items)| Chapter {
                    name: name.to_string(),
                    description: None,
                    items: items.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn ordering(sections: Vec<SectionEntry>) -> Ordering {
        Ordering { sections }
    }

    #[test]
    fn test_build_index_example() {
        let ordering = ordering(vec![
            section(SectionId::General, &[("Intro", &["a", "b"])]),
            section(SectionId::Beginner, &[("X", &["c"])]),
        ]);
        let index = build_index(&ordering);

        assert_eq!(index.section_of("c"), Some(SectionId::Beginner));
        assert_eq!(index.url_of("a"), Some("/general/a"));
        assert_eq!(index.len(), 3);
        assert!(index.duplicates().is_empty());
    }

    #[test]
    fn test_unknown_module_is_none() {
        let index = build_index(&Ordering::default());
        assert_eq!(index.section_of("does-not-exist"), None);
        assert_eq!(index.url_of("does-not-exist"), None);
        assert_eq!(index.url_of(""), None);
    }

    #[test]
    fn test_url_matches_section_for_every_module() {
        let ordering = Ordering::default();
        let index = build_index(&ordering);
        for entry in &ordering.sections {
            for chapter in &entry.chapters {
                for id in &chapter.items {
                    let section = index.section_of(id).unwrap();
                    assert_eq!(index.url_of(id).unwrap(), format!("/{}/{}", section, id));
                }
            }
        }
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let ordering = ordering(vec![
            section(SectionId::General, &[("One", &["shared", "x"])]),
            section(SectionId::Advanced, &[("Two", &["y", "shared"])]),
        ]);
        let index = build_index(&ordering);

        assert_eq!(index.section_of("shared"), Some(SectionId::Advanced));
        assert_eq!(index.url_of("shared"), Some("/advanced/shared"));
        assert_eq!(
            index.duplicates(),
            &[DuplicateModule {
                module_id: "shared".into(),
                first: SectionId::General,
                second: SectionId::Advanced,
            }]
        );

        // The overwritten declaration drops out of the earlier section's order.
        assert_eq!(index.sequence(SectionId::General), &["x".to_string()]);
        assert_eq!(
            index.sequence(SectionId::Advanced),
            &["y".to_string(), "shared".to_string()]
        );
        assert_eq!(index.entry("shared").unwrap().position, 1);
    }

    #[test]
    fn test_duplicate_within_one_section() {
        let ordering = ordering(vec![section(
            SectionId::Special,
            &[("A", &["m", "n"]), ("B", &["m"])],
        )]);
        let index = build_index(&ordering);

        let entry = index.entry("m").unwrap();
        assert_eq!(entry.chapter, 1);
        assert_eq!(entry.position, 1);
        assert_eq!(
            index.sequence(SectionId::Special),
            &["n".to_string(), "m".to_string()]
        );
    }

    #[test]
    fn test_reject_policy() {
        let ordering = ordering(vec![
            section(SectionId::General, &[("One", &["shared"])]),
            section(SectionId::Beyond, &[("Two", &["shared"])]),
        ]);
        let mut builder = IndexBuilder::with_policy(DuplicatePolicy::Reject);
        let err = builder.add_ordering(&ordering).unwrap_err();
        match err {
            AppError::DuplicateModule {
                module_id,
                first,
                second,
            } => {
                assert_eq!(module_id, "shared");
                assert_eq!(first, SectionId::General);
                assert_eq!(second, SectionId::Beyond);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_positions_span_repeated_section() {
        let mut builder = IndexBuilder::new();
        builder
            .add_section(&section(SectionId::Beginner, &[("A", &["a", "b"])]))
            .unwrap();
        builder
            .add_section(&section(SectionId::Beginner, &[("B", &["c", "d"])]))
            .unwrap();
        let index = builder.build();

        let sequence = index.sequence(SectionId::Beginner);
        assert_eq!(sequence, &["a", "b", "c", "d"].map(String::from));
        for (position, id) in sequence.iter().enumerate() {
            assert_eq!(index.entry(id).unwrap().position, position);
        }
    }

    #[test]
    fn test_build_index_keeps_every_section_on_duplicates() {
        let ordering = ordering(vec![
            section(SectionId::General, &[("One", &["shared"])]),
            section(SectionId::Beginner, &[("Two", &["shared", "after"])]),
            section(SectionId::Beyond, &[("Three", &["last"])]),
        ]);
        let index = build_index(&ordering);

        assert_eq!(index.section_of("shared"), Some(SectionId::Beginner));
        assert_eq!(index.section_of("after"), Some(SectionId::Beginner));
        assert_eq!(index.section_of("last"), Some(SectionId::Beyond));
        assert_eq!(index.duplicates().len(), 1);
    }

    #[test]
    fn test_empty_sections_and_chapters() {
        let ordering = ordering(vec![
            section(SectionId::General, &[]),
            section(SectionId::Beginner, &[("Empty", &[])]),
        ]);
        let index = build_index(&ordering);
        assert!(index.is_empty());
        assert!(index.sequence(SectionId::General).is_empty());
        assert!(index.sequence(SectionId::Intermediate).is_empty());
    }
}
