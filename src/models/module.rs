//! Module link information, frequency ratings, and reading progress.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SectionId;

/// A module as linked from dashboards and sidebars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleLinkInfo {
    pub id: String,
    pub section: SectionId,
    pub title: String,
    pub url: String,
}

impl ModuleLinkInfo {
    pub fn new(id: impl Into<String>, section: SectionId, title: impl Into<String>) -> Self {
        let id = id.into();
        let url = module_url(section, &id);
        Self {
            id,
            section,
            title: title.into(),
            url,
        }
    }
}

/// Canonical URL path of a module.
///
/// # Examples
/// ```
/// use curriculum::models::{module_url, SectionId};
///
/// assert_eq!(module_url(SectionId::General, "intro-cp"), "/general/intro-cp");
/// ```
pub fn module_url(section: SectionId, module_id: &str) -> String {
    format!("/{}/{}", section, module_id)
}

/// How often a module's topic has appeared in contests of its division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ModuleFrequency {
    NotAppeared = 0,
    Rare = 1,
    NotFrequent = 2,
    SomewhatFrequent = 3,
    VeryFrequent = 4,
}

impl ModuleFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            ModuleFrequency::NotAppeared => "Has Not Appeared",
            ModuleFrequency::Rare => "Rare",
            ModuleFrequency::NotFrequent => "Not Frequent",
            ModuleFrequency::SomewhatFrequent => "Somewhat Frequent",
            ModuleFrequency::VeryFrequent => "Very Frequent",
        }
    }
}

impl TryFrom<u8> for ModuleFrequency {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(ModuleFrequency::NotAppeared),
            1 => Ok(ModuleFrequency::Rare),
            2 => Ok(ModuleFrequency::NotFrequent),
            3 => Ok(ModuleFrequency::SomewhatFrequent),
            4 => Ok(ModuleFrequency::VeryFrequent),
            other => Err(format!("frequency must be 0-4, got {other}")),
        }
    }
}

impl From<ModuleFrequency> for u8 {
    fn from(value: ModuleFrequency) -> Self {
        value as u8
    }
}

/// Progress per module ID, as stored in user data.
pub type ProgressMap = BTreeMap<String, ModuleProgress>;

/// A reader's status on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModuleProgress {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    Reading,
    Practicing,
    Complete,
    Skipped,
    Ignored,
}

impl ModuleProgress {
    pub const ALL: [ModuleProgress; 6] = [
        ModuleProgress::NotStarted,
        ModuleProgress::Reading,
        ModuleProgress::Practicing,
        ModuleProgress::Complete,
        ModuleProgress::Skipped,
        ModuleProgress::Ignored,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleProgress::NotStarted => "Not Started",
            ModuleProgress::Reading => "Reading",
            ModuleProgress::Practicing => "Practicing",
            ModuleProgress::Complete => "Complete",
            ModuleProgress::Skipped => "Skipped",
            ModuleProgress::Ignored => "Ignored",
        }
    }
}

impl fmt::Display for ModuleProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleProgress {
    type Err = AppError;

    /// Accepts the display string, case-insensitively, with `-`/`_` for spaces.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        ModuleProgress::ALL
            .into_iter()
            .find(|p| p.as_str().to_lowercase() == normalized)
            .ok_or_else(|| AppError::validation(format!("unknown progress status '{s}'")))
    }
}
