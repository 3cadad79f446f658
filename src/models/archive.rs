//! Archive taxonomy: per-subject trees of sections, subsections, and items.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A leaf entry of the archive with a navigable path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveItem {
    pub title: String,
    pub path: String,
}

/// A named node holding items and nested subsections.
///
/// Subsections have the same shape as sections, so the tree is a single
/// recursive type with owned children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSection {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ArchiveItem>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<ArchiveSection>,
}

/// Nested node of an [`ArchiveSection`].
pub type ArchiveSubsection = ArchiveSection;

impl ArchiveSection {
    /// Count items in this node and every descendant.
    pub fn item_count(&self) -> usize {
        self.items.len()
            + self
                .subsections
                .iter()
                .map(ArchiveSection::item_count)
                .sum::<usize>()
    }

    /// Collect the paths of this node and all of its descendants, depth-first.
    pub fn walk(&self, parent: &SectionPath) -> Vec<SectionPath> {
        let path = parent.child(&self.name);
        let mut result = vec![path.clone()];
        for sub in &self.subsections {
            result.extend(sub.walk(&path));
        }
        result
    }
}

/// All archive sections of one subject (physics, math, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSubject {
    /// Display name of the subject
    pub name: String,

    #[serde(default)]
    pub sections: Vec<ArchiveSection>,
}

impl ArchiveSubject {
    /// Load a subject from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(AppError::config(format!(
                "unsupported archive file {}",
                path.display()
            ))),
        }
    }

    /// Paths of every node in the subject.
    pub fn all_paths(&self) -> Vec<SectionPath> {
        let root = SectionPath::root();
        self.sections.iter().flat_map(|s| s.walk(&root)).collect()
    }

    /// Resolve a node by its path.
    pub fn find(&self, path: &SectionPath) -> Option<&ArchiveSection> {
        let mut names = path.names().iter();
        let first = names.next()?;
        let mut node = self.sections.iter().find(|s| &s.name == first)?;
        for name in names {
            node = node.subsections.iter().find(|s| &s.name == name)?;
        }
        Some(node)
    }

    /// Find the first item with the given title anywhere in the subject.
    pub fn find_item(&self, title: &str) -> Option<&ArchiveItem> {
        fn search<'a>(section: &'a ArchiveSection, title: &str) -> Option<&'a ArchiveItem> {
            section
                .items
                .iter()
                .find(|i| i.title == title)
                .or_else(|| section.subsections.iter().find_map(|s| search(s, title)))
        }
        self.sections.iter().find_map(|s| search(s, title))
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(ArchiveSection::item_count).sum()
    }
}

/// Archive subjects keyed by identifier (the file stem, e.g. `physics`).
#[derive(Debug, Clone, Default)]
pub struct ArchiveCatalog {
    subjects: BTreeMap<String, ArchiveSubject>,
}

impl ArchiveCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.toml` / `*.json` file of a directory as a subject.
    ///
    /// A missing directory yields an empty catalog.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut catalog = Self::new();
        if !dir.exists() {
            log::warn!("Archive directory {} not found", dir.display());
            return Ok(catalog);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let supported = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("toml") | Some("json")
            );
            if !supported {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let key = key.to_string();
            let subject = ArchiveSubject::load(&path)?;
            log::debug!(
                "Loaded archive subject '{}' with {} items from {}",
                key,
                subject.item_count(),
                path.display()
            );
            catalog.insert(key, subject);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, key: impl Into<String>, subject: ArchiveSubject) {
        self.subjects.insert(key.into(), subject);
    }

    pub fn get(&self, key: &str) -> Option<&ArchiveSubject> {
        self.subjects.get(key)
    }

    /// Subjects sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArchiveSubject)> {
        self.subjects.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

/// Names of the nodes from a top-level section down to one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionPath(Vec<String>);

impl SectionPath {
    /// The empty path above the top-level sections.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Extend the path by one child name.
    pub fn child(&self, name: &str) -> Self {
        let mut names = self.0.clone();
        names.push(name.to_string());
        Self(names)
    }

    /// Keep only the first `depth` names.
    pub fn truncated(&self, depth: usize) -> Self {
        Self(self.0.iter().take(depth).cloned().collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Element key of the node: names joined by `-`.
    ///
    /// # Examples
    /// ```
    /// use curriculum::models::SectionPath;
    ///
    /// let path = SectionPath::new(["Mechanics", "Kinematics"]);
    /// assert_eq!(path.key(), "Mechanics-Kinematics");
    /// ```
    pub fn key(&self) -> String {
        self.0.join("-")
    }

    /// Anchor id of the node: `section-` prefix, lowercase, whitespace runs as `-`.
    ///
    /// # Examples
    /// ```
    /// use curriculum::models::SectionPath;
    ///
    /// let path = SectionPath::new(["Mechanics", "Rigid  Bodies"]);
    /// assert_eq!(path.anchor(), "section-mechanics-rigid-bodies");
    /// ```
    pub fn anchor(&self) -> String {
        let joined = self.key().to_lowercase();
        let collapsed = joined.split_whitespace().collect::<Vec<_>>().join("-");
        format!("section-{collapsed}")
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" / "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn item(title: &str) -> ArchiveItem {
        ArchiveItem {
            title: title.to_string(),
            path: format!("/archive/{}", title.to_lowercase()),
        }
    }

    fn create_test_subject() -> ArchiveSubject {
        ArchiveSubject {
            name: "Physics".to_string(),
            sections: vec![ArchiveSection {
                name: "Mechanics".to_string(),
                items: vec![item("Intro")],
                subsections: vec![ArchiveSection {
                    name: "Kinematics".to_string(),
                    items: vec![item("Projectiles"), item("Circular")],
                    subsections: vec![],
                }],
            }],
        }
    }

    #[test]
    fn test_item_count_is_recursive() {
        assert_eq!(create_test_subject().item_count(), 3);
    }

    #[test]
    fn test_all_paths_depth_first() {
        let paths = create_test_subject().all_paths();
        assert_eq!(
            paths,
            vec![
                SectionPath::new(["Mechanics"]),
                SectionPath::new(["Mechanics", "Kinematics"]),
            ]
        );
    }

    #[test]
    fn test_find_and_find_item() {
        let subject = create_test_subject();
        let node = subject
            .find(&SectionPath::new(["Mechanics", "Kinematics"]))
            .unwrap();
        assert_eq!(node.items.len(), 2);
        assert!(subject.find(&SectionPath::new(["Optics"])).is_none());
        assert!(subject.find(&SectionPath::root()).is_none());
        assert_eq!(subject.find_item("Circular").unwrap().path, "/archive/circular");
    }

    #[test]
    fn test_path_helpers() {
        let path = SectionPath::new(["A", "B", "C"]);
        assert_eq!(path.truncated(2), SectionPath::new(["A", "B"]));
        assert_eq!(path.truncated(10), path);
        assert_eq!(path.last(), Some("C"));
        assert_eq!(path.to_string(), "A / B / C");
    }

    #[test]
    fn test_load_dir_reads_toml_and_json() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("physics.toml"),
            r#"
                name = "Physics"

                [[sections]]
                name = "Mechanics"

                [[sections.items]]
                title = "Intro"
                path = "/archive/physics/intro"
            "#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("math.json"),
            r#"{"name": "Math", "sections": [{"name": "Algebra", "subsections": [{"name": "Groups"}]}]}"#,
        )
        .unwrap();
        fs::write(tmp.path().join("README.md"), "ignored").unwrap();

        let catalog = ArchiveCatalog::load_dir(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        let keys: Vec<&str> = catalog.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["math", "physics"]);
        assert_eq!(catalog.get("physics").unwrap().item_count(), 1);
        assert_eq!(
            catalog.get("math").unwrap().sections[0].subsections[0].name,
            "Groups"
        );
    }

    #[test]
    fn test_load_dir_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let catalog = ArchiveCatalog::load_dir(tmp.path().join("nope")).unwrap();
        assert!(catalog.is_empty());
    }
}
