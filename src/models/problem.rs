//! Problem metadata as stored alongside modules.

use serde::{Deserialize, Serialize};

/// Placeholder text for fields a contributor still has to fill in.
pub mod placeholders {
    pub const UNIQUE_ID: &str = "add-unique-solution-id-here";
    pub const SOURCE: &str = "Add the source here";
    pub const AUTHOR: &str = "Add the name of the author of the problem here";
    pub const DIFFICULTY: &str = "Add the difficulty here";
    pub const TAG: &str = "Add some tags here";
    pub const ORIGINAL_NAME: &str = "Original Problem";
}

/// Where a problem's solution lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SolutionMetadata {
    /// Solution written inside the guide
    #[serde(rename_all = "camelCase")]
    Internal { has_hints: bool },
    /// Solution hosted elsewhere
    Link { url: String },
    /// No solution yet
    #[serde(rename = "none")]
    Missing,
}

/// Metadata for a single practice problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemMetadata {
    pub unique_id: String,
    pub name: String,
    pub source: String,
    pub url: String,
    #[serde(default)]
    pub is_starred: bool,
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub solution_metadata: SolutionMetadata,
}

impl ProblemMetadata {
    /// Metadata for a problem hosted at `url`, with placeholders elsewhere.
    pub fn linked(
        unique_id: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<String>,
        url: &str,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            name: name.into(),
            source: source.into(),
            url: url.to_string(),
            is_starred: false,
            difficulty: placeholders::DIFFICULTY.to_string(),
            tags: vec![placeholders::TAG.to_string()],
            solution_metadata: SolutionMetadata::Link {
                url: url.to_string(),
            },
        }
    }
}
