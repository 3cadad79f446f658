//! Section, Chapter, and Module ordering of the guide.
//!
//! The ordering is hand-authored content: a fixed set of sections, each with
//! an ordered list of chapters, each listing module identifiers in reading
//! order. It is either loaded from a TOML file or taken from the built-in
//! table in [`Ordering::default`].

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Top-level curriculum division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    General,
    Beginner,
    Intermediate,
    Advanced,
    Special,
    Beyond,
}

impl SectionId {
    /// Every section, in canonical order.
    pub const ALL: [SectionId; 6] = [
        SectionId::General,
        SectionId::Beginner,
        SectionId::Intermediate,
        SectionId::Advanced,
        SectionId::Special,
        SectionId::Beyond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::General => "general",
            SectionId::Beginner => "beginner",
            SectionId::Intermediate => "intermediate",
            SectionId::Advanced => "advanced",
            SectionId::Special => "special",
            SectionId::Beyond => "beyond",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str() == lower)
            .ok_or_else(|| AppError::UnknownSection(s.to_string()))
    }
}

/// A named, ordered group of modules within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Module identifiers in reading order
    #[serde(default)]
    pub items: Vec<String>,
}

/// A section with its display strings and chapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    pub id: SectionId,

    /// Display label (e.g., "Начинаещ 7-8 клас")
    pub label: String,

    #[serde(default)]
    pub seo_title: String,

    #[serde(default)]
    pub seo_description: String,

    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl SectionEntry {
    /// Count module declarations across all chapters.
    pub fn module_count(&self) -> usize {
        self.chapters.iter().map(|c| c.items.len()).sum()
    }
}

/// The full Section → Chapter → Module registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ordering {
    pub sections: Vec<SectionEntry>,
}

impl Ordering {
    /// Load an ordering from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse an ordering from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check that every section is declared exactly once and chapters are named.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.sections {
            if !seen.insert(entry.id) {
                return Err(AppError::config(format!(
                    "section '{}' is declared more than once",
                    entry.id
                )));
            }
            if entry.chapters.iter().any(|c| c.name.trim().is_empty()) {
                return Err(AppError::validation(format!(
                    "section '{}' has a chapter without a name",
                    entry.id
                )));
            }
        }

        let missing: Vec<&str> = SectionId::ALL
            .iter()
            .filter(|id| !seen.contains(id))
            .map(SectionId::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::config(format!(
                "missing section(s): {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for Ordering {
    fn default() -> Self {
        Self {
            sections: defaults::sections(),
        }
    }
}

mod defaults {
    use super::{Chapter, SectionEntry, SectionId};

    fn chapter(name: &str, description: Option<&str>, items: &[&str]) -> Chapter {
        Chapter {
            name: name.to_string(),
            description: description.map(str::to_string),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn section(
        id: SectionId,
        label: &str,
        seo_title: &str,
        seo_description: &str,
        chapters: Vec<Chapter>,
    ) -> SectionEntry {
        SectionEntry {
            id,
            label: label.to_string(),
            seo_title: seo_title.to_string(),
            seo_description: seo_description.to_string(),
            chapters,
        }
    }

    const CONCLUSION: &str = "Congratulations on making it this far!";
    const GRAPHS: &str = "Most Silver to Platinum contests have at least one graph problem.";

    pub fn sections() -> Vec<SectionEntry> {
        vec![
            section(
                SectionId::General,
                "Предговор",
                "Предговор",
                "Обща информация за какво представлява този сайт, как да го ползвате и какво са олимпиадите и състезанията по природни науки.",
                vec![
                    chapter(
                        "Getting Started",
                        Some("Start here if you're new to competitive programming."),
                        &[
                            "general-test",
                            "using-this-guide",
                            "intro-cp",
                            "choosing-lang",
                            "resources-learning-to-code",
                            "running-code-online",
                            "data-types",
                            "input-output",
                            "expected-knowledge",
                        ],
                    ),
                    chapter(
                        "Contributing",
                        Some("How you can add content to the guide."),
                        &["contributing", "adding-solution", "modules", "working-mdx"],
                    ),
                    chapter(
                        "General Resources",
                        Some("Useful for competitors of all levels."),
                        &[
                            "debugging-checklist",
                            "practicing",
                            "contest-strategy",
                            "resources-cp",
                            "contests",
                            "olympiads",
                        ],
                    ),
                    chapter(
                        "Language-Specific",
                        Some("Setup instructions and discussion of language-specific features."),
                        &[
                            "running-code-locally",
                            "cpp-command",
                            "fast-io",
                            "basic-debugging",
                            "debugging-cpp",
                            "generic-code",
                            "lambda-funcs",
                        ],
                    ),
                    chapter(
                        "USA",
                        Some("Information specific to USACO as well as USA camps and contests."),
                        &["usaco-faq", "usaco-monthlies", "usaco-camp", "resources-usa"],
                    ),
                ],
            ),
            section(
                SectionId::Beginner,
                "Начинаещ 7-8 клас",
                "Начинаещ 7-8 клас",
                "Секция, която включва подходящ материал на ниво 7-8 клас, нужен при подготовката за олимпиадите и състезания по природни науки.",
                vec![
                    chapter("Getting Started", None, &["time-comp", "intro-ds", "simulation"]),
                    chapter("Complete Search", None, &["intro-complete", "complete-rec"]),
                    chapter("Sorting & Sets", None, &["intro-sorting", "intro-sets"]),
                    chapter(
                        "Additional",
                        None,
                        &["ad-hoc", "intro-greedy", "intro-graphs", "rect-geo"],
                    ),
                    chapter("Conclusion", Some(CONCLUSION), &["bronze-conclusion"]),
                ],
            ),
            section(
                SectionId::Intermediate,
                "Междинен 9-10 клас",
                "Междинен 9-10 клас",
                "Секция, която включва подходящ материал на ниво 9-10 клас, нужен при подготовката за олимпиадите и състезания по природни науки.",
                vec![
                    chapter("Prefix Sums", None, &["prefix-sums", "more-prefix-sums"]),
                    chapter(
                        "Sorting & Searching",
                        None,
                        &[
                            "sorting-custom",
                            "two-pointers",
                            "intro-sorted-sets",
                            "custom-cpp-stl",
                            "greedy-sorting",
                            "binary-search",
                        ],
                    ),
                    chapter(
                        "Graphs",
                        Some(GRAPHS),
                        &["graph-traversal", "flood-fill", "intro-tree", "func-graphs"],
                    ),
                    chapter("Additional Topics", None, &["intro-bitwise"]),
                    chapter("Conclusion", Some(CONCLUSION), &["silver-conclusion"]),
                ],
            ),
            section(
                SectionId::Advanced,
                "Напреднал 11-12 клас",
                "Напреднал 11-12 клас",
                "Секция, която включва подходящ материал на ниво 11-12 клас, нужен при подготовката за олимпиадите и състезания по природни науки.",
                vec![
                    chapter("Math", None, &["divisibility", "modular", "combo"]),
                    chapter(
                        "Dynamic Programming",
                        Some("Most Gold and Platinum contests have at least one DP problem."),
                        &[
                            "intro-dp",
                            "knapsack",
                            "paths-grids",
                            "lis",
                            "dp-bitmasks",
                            "dp-ranges",
                            "digit-dp",
                        ],
                    ),
                    chapter(
                        "Graphs",
                        Some(GRAPHS),
                        &[
                            "unweighted-shortest-paths",
                            "dsu",
                            "toposort",
                            "shortest-paths",
                            "mst",
                        ],
                    ),
                    chapter("Data Structures", None, &["stacks", "sliding-window", "PURS"]),
                    chapter("Trees", None, &["tree-euler", "dp-trees", "all-roots"]),
                    chapter(
                        "Additional Topics",
                        Some("Rarely required."),
                        &["hashing", "hashmaps", "meet-in-the-middle"],
                    ),
                    chapter("Conclusion", Some(CONCLUSION), &["gold-conclusion"]),
                ],
            ),
            section(
                SectionId::Special,
                "Специален",
                "Специален, международния кръг",
                "Секция, която включва допълнителен материал на по-високо ниво, нужен при подготовката за Международните олимпиади по природни науки.",
                vec![
                    chapter(
                        "Range Queries",
                        None,
                        &[
                            "segtree-ext",
                            "range-sweep",
                            "RURQ",
                            "sparse-segtree",
                            "2DRQ",
                            "DC-SRQ",
                            "sqrt",
                        ],
                    ),
                    chapter("Trees", None, &["binary-jump", "merging", "hld", "centroid"]),
                    chapter(
                        "Geometry",
                        None,
                        &["geo-pri", "sweep-line", "convex-hull", "convex-hull-trick"],
                    ),
                    chapter("Misc. Topics", None, &["PIE", "matrix-expo", "bitsets", "DC-DP"]),
                    chapter("Conclusion", None, &["plat-conclusion"]),
                ],
            ),
            section(
                SectionId::Beyond,
                "Отвъд",
                "Отвъд, по-надълбоко",
                "Секция, която включва материал отвъд учебния план в училищата, както и отвъд стандарта на олимпиадите, но който задълбочава знанията на състезателите, особено на тези с напреднали интереси. Включва \"университетски\" теми и всичко на високо ниво, неподходящо за останалите секции.",
                vec![
                    chapter(
                        "Data Structures",
                        None,
                        &[
                            "springboards",
                            "wavelet",
                            "count-min",
                            "segtree-beats",
                            "persistent",
                            "treaps",
                        ],
                    ),
                    chapter("Convexity", None, &["line-container", "lagrange", "slope-trick"]),
                    chapter(
                        "Graphs",
                        None,
                        &[
                            "sp-neg",
                            "eulerian-tours",
                            "BCC-2CC",
                            "SCC",
                            "offline-del",
                            "eulers-formula",
                            "critical",
                            "link-cut-tree",
                        ],
                    ),
                    chapter("Dynamic Programming", None, &["comb-sub", "dp-more", "dp-sos"]),
                    chapter(
                        "Flows",
                        None,
                        &["max-flow", "min-cut", "flow-lb", "min-cost-flow"],
                    ),
                    chapter("Polynomials", None, &["fft", "fft-ext"]),
                    chapter(
                        "Strings",
                        None,
                        &["string-search", "suffix-array", "string-suffix"],
                    ),
                    chapter(
                        "Misc. Topics",
                        None,
                        &[
                            "extend-euclid",
                            "catalan",
                            "xor-basis",
                            "fracturing-search",
                            "game-theory",
                            "multiplicative",
                            "matroid-isect",
                            "interactive",
                            "vectorization",
                        ],
                    ),
                ],
            ),
        ]
    }
}
