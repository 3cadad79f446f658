//! Reading progress summaries for the dashboard and syllabus pages.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::Curriculum;
use crate::models::{ModuleProgress, ProgressMap, SectionId};

/// Module counts by progress bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressCounts {
    pub completed: usize,
    pub in_progress: usize,
    pub skipped: usize,
    pub not_started: usize,
    pub total: usize,
}

/// Bar widths in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProgressPercentages {
    pub completed: f64,
    pub in_progress: f64,
    pub skipped: f64,
}

impl ProgressCounts {
    /// Tally the given modules against the stored progress.
    pub fn for_modules<'a, I>(module_ids: I, progress: &ProgressMap) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::default();
        for id in module_ids {
            counts.total += 1;
            match progress.get(id).copied().unwrap_or_default() {
                ModuleProgress::Complete => counts.completed += 1,
                ModuleProgress::Reading | ModuleProgress::Practicing => counts.in_progress += 1,
                ModuleProgress::Skipped | ModuleProgress::Ignored => counts.skipped += 1,
                ModuleProgress::NotStarted => counts.not_started += 1,
            }
        }
        counts
    }

    pub fn percentages(&self) -> ProgressPercentages {
        if self.total == 0 {
            return ProgressPercentages::default();
        }
        let pct = |n: usize| n as f64 / self.total as f64 * 100.0;
        ProgressPercentages {
            completed: pct(self.completed),
            in_progress: pct(self.in_progress),
            skipped: pct(self.skipped),
        }
    }
}

/// Progress across every module of a section.
pub fn section_progress(
    curriculum: &Curriculum,
    progress: &ProgressMap,
    section: SectionId,
) -> ProgressCounts {
    ProgressCounts::for_modules(curriculum.modules_of(section), progress)
}

/// Section the dashboard opens on: that of the last viewed module.
pub fn dashboard_section(curriculum: &Curriculum, last_viewed: Option<&str>) -> SectionId {
    last_viewed
        .and_then(|id| curriculum.section_of(id))
        .unwrap_or(SectionId::General)
}

/// A module the reader has started but not finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveModule {
    pub id: String,
    /// `"{section label}: {title}"`
    pub label: String,
    pub url: String,
    pub status: ModuleProgress,
}

/// Modules in an active state, ordered by module ID.
///
/// IDs the curriculum does not know are skipped.
pub fn active_modules(
    curriculum: &Curriculum,
    progress: &ProgressMap,
    titles: &HashMap<String, String>,
    show_ignored: bool,
) -> Vec<ActiveModule> {
    progress
        .iter()
        .filter(|(_, status)| match status {
            ModuleProgress::Reading | ModuleProgress::Practicing | ModuleProgress::Skipped => true,
            ModuleProgress::Ignored => show_ignored,
            _ => false,
        })
        .filter_map(|(id, status)| {
            let section = curriculum.section_of(id)?;
            let url = curriculum.url_of(id)?.to_string();
            let title = titles.get(id).map(String::as_str).unwrap_or(id);
            Some(ActiveModule {
                id: id.clone(),
                label: format!("{}: {}", curriculum.label(section), title),
                url,
                status: *status,
            })
        })
        .collect()
}
