// src/services/archive_search.rs

//! Archive tree search.
//!
//! Filters a subject's archive tree by a search term without touching the
//! tree itself. A node whose name contains the term keeps its whole subtree;
//! otherwise only matching items and matching subsections survive.

use regex::RegexBuilder;
use serde::Serialize;

use crate::models::{ArchiveItem, ArchiveSection, ArchiveSubject, SectionPath};

/// An item kept in a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemMatch {
    pub item: ArchiveItem,
    /// The title itself contains the term
    pub direct: bool,
}

/// Search result for one archive node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMatch {
    pub name: String,
    pub path: SectionPath,
    /// The node name contains the term
    pub section_name_matched: bool,
    /// Kept because an ancestor matched by name
    pub inherited: bool,
    /// Open automatically: direct parent of a direct item match
    pub auto_expand: bool,
    pub items: Vec<ItemMatch>,
    pub subsections: Vec<SectionMatch>,
    #[serde(skip)]
    filtered: bool,
}

impl SectionMatch {
    /// Titles of items whose own title matched.
    pub fn matched_item_titles(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|m| m.direct)
            .map(|m| m.item.title.as_str())
            .collect()
    }

    /// Items plus subsections kept under this node, for the "(N matches)" hint.
    ///
    /// Zero for unfiltered, inherited, and name-matched nodes.
    pub fn match_count(&self) -> usize {
        if !self.filtered || self.inherited || self.section_name_matched {
            return 0;
        }
        self.items.len() + self.subsections.len()
    }

    /// This node or anything below it matched.
    pub fn has_matches_in_subtree(&self) -> bool {
        self.section_name_matched
            || self.items.iter().any(|m| m.direct)
            || self.subsections.iter().any(SectionMatch::has_matches_in_subtree)
    }

    /// A match sits somewhere below this node, and the node itself did not
    /// match by name.
    pub fn is_parent_of_match(&self) -> bool {
        if self.section_name_matched {
            return false;
        }
        self.items.iter().any(|m| m.direct)
            || self.subsections.iter().any(|sub| {
                sub.section_name_matched
                    || sub.items.iter().any(|m| m.direct)
                    || sub.is_parent_of_match()
            })
    }

    fn collect_auto_expanded(&self, out: &mut Vec<SectionPath>) {
        if self.auto_expand {
            out.push(self.path.clone());
        }
        for sub in &self.subsections {
            sub.collect_auto_expanded(out);
        }
    }
}

/// Result of searching one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSearch {
    /// Trimmed search term; empty when unfiltered
    pub term: String,
    pub sections: Vec<SectionMatch>,
}

impl ArchiveSearch {
    /// Whether a non-empty term was applied.
    pub fn is_filtered(&self) -> bool {
        !self.term.is_empty()
    }

    /// Nothing survived the filter.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Paths of every node that opens automatically.
    pub fn auto_expanded(&self) -> Vec<SectionPath> {
        let mut out = Vec::new();
        for section in &self.sections {
            section.collect_auto_expanded(&mut out);
        }
        out
    }

    /// Number of item titles that matched the term anywhere in the tree.
    pub fn direct_item_count(&self) -> usize {
        fn count(node: &SectionMatch) -> usize {
            node.items.iter().filter(|m| m.direct).count()
                + node.subsections.iter().map(count).sum::<usize>()
        }
        self.sections.iter().map(count).sum()
    }

    /// Find the result node for a path.
    pub fn find(&self, path: &SectionPath) -> Option<&SectionMatch> {
        let mut names = path.names().iter();
        let first = names.next()?;
        let mut node = self.sections.iter().find(|s| &s.name == first)?;
        for name in names {
            node = node.subsections.iter().find(|s| &s.name == name)?;
        }
        Some(node)
    }
}

/// Search a subject's archive tree for `term`, case-insensitively.
///
/// An empty or whitespace-only term returns the full tree with nothing
/// flagged as a match.
pub fn search_archive(subject: &ArchiveSubject, term: &str) -> ArchiveSearch {
    let term = term.trim();
    let root = SectionPath::root();

    let sections = if term.is_empty() {
        subject
            .sections
            .iter()
            .map(|s| include_all(s, &root, false, false))
            .collect()
    } else {
        let needle = term.to_lowercase();
        subject
            .sections
            .iter()
            .filter_map(|s| search_section(s, &root, &needle))
            .collect()
    };

    let search = ArchiveSearch {
        term: term.to_string(),
        sections,
    };
    log::debug!(
        "Archive search '{}' in '{}': {} top-level sections, {} item matches",
        search.term,
        subject.name,
        search.sections.len(),
        search.direct_item_count()
    );
    search
}

fn contains_term(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(needle)
}

fn search_section(
    section: &ArchiveSection,
    parent: &SectionPath,
    needle: &str,
) -> Option<SectionMatch> {
    if contains_term(&section.name, needle) {
        let mut node = include_all(section, parent, false, true);
        node.section_name_matched = true;
        return Some(node);
    }

    let path = parent.child(&section.name);
    let items: Vec<ItemMatch> = section
        .items
        .iter()
        .filter(|item| contains_term(&item.title, needle))
        .map(|item| ItemMatch {
            item: item.clone(),
            direct: true,
        })
        .collect();
    let subsections: Vec<SectionMatch> = section
        .subsections
        .iter()
        .filter_map(|sub| search_section(sub, &path, needle))
        .collect();

    if items.is_empty() && subsections.is_empty() {
        return None;
    }

    Some(SectionMatch {
        name: section.name.clone(),
        path,
        section_name_matched: false,
        inherited: false,
        auto_expand: !items.is_empty(),
        items,
        subsections,
        filtered: true,
    })
}

/// Copy a node and its whole subtree into the result, nothing flagged.
fn include_all(
    section: &ArchiveSection,
    parent: &SectionPath,
    inherited: bool,
    filtered: bool,
) -> SectionMatch {
    let path = parent.child(&section.name);
    let items = section
        .items
        .iter()
        .map(|item| ItemMatch {
            item: item.clone(),
            direct: false,
        })
        .collect();
    // Descendants of a name match are inherited; unfiltered trees stay plain.
    let subsections = section
        .subsections
        .iter()
        .map(|sub| include_all(sub, &path, filtered, filtered))
        .collect();

    SectionMatch {
        name: section.name.clone(),
        path,
        section_name_matched: false,
        inherited,
        auto_expand: false,
        items,
        subsections,
        filtered,
    }
}

/// A run of label text, either matching the search term or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSegment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Split `text` into matched and unmatched runs of `term`.
///
/// Matching is case-insensitive and the term is taken literally.
///
/// # Examples
/// ```
/// use curriculum::services::highlight_segments;
///
/// let segments = highlight_segments("Optics and optical fibres", "OPTIC");
/// let matched: Vec<_> = segments.iter().filter(|s| s.matched).map(|s| s.text).collect();
/// assert_eq!(matched, ["Optic", "optic"]);
/// ```
pub fn highlight_segments<'a>(text: &'a str, term: &str) -> Vec<HighlightSegment<'a>> {
    let term = term.trim();
    let whole = vec![HighlightSegment {
        text,
        matched: false,
    }];
    if term.is_empty() || text.is_empty() {
        return whole;
    }

    let pattern = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            log::debug!("Highlight pattern for '{}' rejected: {}", term, e);
            return whole;
        }
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            segments.push(HighlightSegment {
                text: &text[last..m.start()],
                matched: false,
            });
        }
        segments.push(HighlightSegment {
            text: m.as_str(),
            matched: true,
        });
        last = m.end();
    }
    if last < text.len() {
        segments.push(HighlightSegment {
            text: &text[last..],
            matched: false,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> ArchiveItem {
        ArchiveItem {
            title: title.to_string(),
            path: format!("/archive/{}", title.to_lowercase().replace(' ', "-")),
        }
    }

    fn node(name: &str, items: &[&str], subsections: Vec<ArchiveSection>) -> ArchiveSection {
        ArchiveSection {
            name: name.to_string(),
            items: items.iter().map(|t| item(t)).collect(),
            subsections,
        }
    }

    /// Mechanics > Kinematics > Projectiles, plus Optics.
    fn physics() -> ArchiveSubject {
        ArchiveSubject {
            name: "Physics".into(),
            sections: vec![
                node(
                    "Mechanics",
                    &["Newton's laws"],
                    vec![node(
                        "Kinematics",
                        &["Free fall", "Uniform motion"],
                        vec![node("Projectiles", &["Range of a cannon"], vec![])],
                    )],
                ),
                node("Optics", &["Lens formula", "Mirrors"], vec![]),
            ],
        }
    }

    #[test]
    fn test_item_match_expands_direct_parent_only() {
        let search = search_archive(&physics(), "motion");

        assert_eq!(search.sections.len(), 1);
        let mechanics = &search.sections[0];
        assert_eq!(mechanics.name, "Mechanics");
        assert!(mechanics.items.is_empty());
        assert!(!mechanics.auto_expand);

        let kinematics = &mechanics.subsections[0];
        assert_eq!(kinematics.matched_item_titles(), vec!["Uniform motion"]);
        assert!(kinematics.auto_expand);
        assert!(kinematics.subsections.is_empty());

        assert_eq!(
            search.auto_expanded(),
            vec![SectionPath::new(["Mechanics", "Kinematics"])]
        );
    }

    #[test]
    fn test_name_match_includes_subtree_without_direct_flags() {
        let search = search_archive(&physics(), "KINEMAT");
        let kinematics = &search.sections[0].subsections[0];

        assert!(kinematics.section_name_matched);
        assert!(!kinematics.auto_expand);
        assert!(!kinematics.inherited);
        assert_eq!(kinematics.items.len(), 2);
        assert!(kinematics.items.iter().all(|m| !m.direct));

        let projectiles = &kinematics.subsections[0];
        assert!(projectiles.inherited);
        assert!(!projectiles.auto_expand);
        assert_eq!(projectiles.items.len(), 1);

        assert!(search.auto_expanded().is_empty());
        assert_eq!(search.direct_item_count(), 0);
    }

    #[test]
    fn test_top_level_name_match_lists_every_descendant_item() {
        let search = search_archive(&physics(), "mechanics");
        assert_eq!(search.sections.len(), 1);

        let mechanics = &search.sections[0];
        assert!(mechanics.section_name_matched);
        assert_eq!(mechanics.match_count(), 0);

        fn items(node: &SectionMatch) -> Vec<(&str, bool)> {
            let mut out: Vec<_> = node
                .items
                .iter()
                .map(|m| (m.item.title.as_str(), m.direct))
                .collect();
            out.extend(node.subsections.iter().flat_map(items));
            out
        }
        assert_eq!(
            items(mechanics),
            vec![
                ("Newton's laws", false),
                ("Free fall", false),
                ("Uniform motion", false),
                ("Range of a cannon", false),
            ]
        );
    }

    #[test]
    fn test_no_match_prunes_everything() {
        let search = search_archive(&physics(), "thermodynamics");
        assert!(search.is_empty());
        assert!(search.is_filtered());
    }

    #[test]
    fn test_empty_term_is_unfiltered() {
        for term in ["", "   "] {
            let search = search_archive(&physics(), term);
            assert!(!search.is_filtered());
            assert_eq!(search.sections.len(), 2);
            assert!(search.auto_expanded().is_empty());
            assert_eq!(search.direct_item_count(), 0);
            let mechanics = &search.sections[0];
            assert!(!mechanics.has_matches_in_subtree());
            assert_eq!(mechanics.match_count(), 0);
            assert!(!mechanics.subsections[0].inherited);
            assert_eq!(mechanics.subsections[0].subsections[0].items.len(), 1);
        }
    }

    #[test]
    fn test_search_is_case_insensitive_and_leaves_tree_untouched() {
        let subject = physics();
        let before = subject.clone();
        let lower = search_archive(&subject, "lens");
        let upper = search_archive(&subject, "LENS");
        assert_eq!(lower.sections, upper.sections);
        assert_eq!(subject, before);
    }

    #[test]
    fn test_match_count_and_parent_helpers() {
        let search = search_archive(&physics(), "range");
        let mechanics = &search.sections[0];
        assert_eq!(mechanics.match_count(), 1);
        assert!(mechanics.is_parent_of_match());
        assert!(mechanics.has_matches_in_subtree());

        let projectiles = search
            .find(&SectionPath::new(["Mechanics", "Kinematics", "Projectiles"]))
            .unwrap();
        assert!(projectiles.auto_expand);
        assert_eq!(projectiles.match_count(), 1);

        let optics = search_archive(&physics(), "optics");
        assert!(!optics.sections[0].is_parent_of_match());
        assert!(optics.sections[0].has_matches_in_subtree());
    }

    #[test]
    fn test_deep_leaf_expands_only_its_parent() {
        let search = search_archive(&physics(), "range");

        assert_eq!(
            search.auto_expanded(),
            vec![SectionPath::new(["Mechanics", "Kinematics", "Projectiles"])]
        );
        assert_eq!(search.sections.len(), 1);

        let mechanics = &search.sections[0];
        assert_eq!(mechanics.name, "Mechanics");
        assert!(mechanics.items.is_empty());
        assert!(!mechanics.auto_expand);

        let kinematics = &mechanics.subsections[0];
        assert!(kinematics.items.is_empty());
        assert!(!kinematics.auto_expand);

        let projectiles = &kinematics.subsections[0];
        assert_eq!(projectiles.matched_item_titles(), vec!["Range of a cannon"]);
        assert!(search.find(&SectionPath::new(["Optics"])).is_none());
    }

    #[test]
    fn test_non_matching_siblings_dropped() {
        let search = search_archive(&physics(), "mirrors");
        let optics = &search.sections[0];
        assert_eq!(optics.name, "Optics");
        assert_eq!(optics.items.len(), 1);
        assert_eq!(optics.match_count(), 1);
    }

    #[test]
    fn test_highlight_segments() {
        let segments = highlight_segments("Free fall", "fall");
        assert_eq!(
            segments,
            vec![
                HighlightSegment {
                    text: "Free ",
                    matched: false
                },
                HighlightSegment {
                    text: "fall",
                    matched: true
                },
            ]
        );
    }

    #[test]
    fn test_highlight_segments_literal_term() {
        let segments = highlight_segments("a.b axb", ".");
        let matched: Vec<_> = segments.iter().filter(|s| s.matched).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].text, ".");

        let untouched = highlight_segments("Optics", " ");
        assert_eq!(untouched.len(), 1);
        assert!(!untouched[0].matched);
    }
}
