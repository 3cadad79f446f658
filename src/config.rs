// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for loading the configuration,
//! the curriculum ordering, and the archive catalog from a data directory.

use std::path::{Path, PathBuf};

use crate::catalog::Curriculum;
use crate::error::Result;
use crate::models::{ArchiveCatalog, Config, Ordering};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// Falls back to defaults if loading fails; the result is validated either way.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path);
    config.validate()?;
    Ok(config)
}

/// Load the curriculum ordering.
///
/// A missing file means the built-in ordering. A file that exists but does
/// not parse or validate is an error.
pub fn load_ordering(path: &Path) -> Result<Ordering> {
    if !path.exists() {
        log::info!(
            "Ordering file {:?} not found. Using built-in ordering.",
            path
        );
        return Ok(Ordering::default());
    }
    let ordering = Ordering::load(path)?;
    ordering.validate()?;
    log::debug!(
        "Loaded ordering from {:?}: {} sections",
        path,
        ordering.sections.len()
    );
    Ok(ordering)
}

/// Everything loaded from one data directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub base: PathBuf,
    pub config: Config,
    pub curriculum: Curriculum,
    pub archive: ArchiveCatalog,
}

impl Workspace {
    /// Directory holding `user.json`.
    pub fn user_data_dir(&self) -> PathBuf {
        self.config.user_data_path(&self.base)
    }
}

/// Load config, ordering, curriculum, and archive from `base`.
pub fn load_all(base: impl Into<PathBuf>) -> Result<Workspace> {
    let base = base.into();
    let config = load_config(&base.join(CONFIG_FILE))?;
    let ordering = load_ordering(&config.ordering_path(&base))?;
    let curriculum = Curriculum::build(ordering, config.index.duplicate_policy)?;
    let archive = ArchiveCatalog::load_dir(config.archive_path(&base))?;

    log::info!(
        "Loaded data from {:?}: {} modules, {} archive subjects",
        base,
        curriculum.module_count(),
        archive.len()
    );

    Ok(Workspace {
        base,
        config,
        curriculum,
        archive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::SectionId;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_dir_uses_builtins() {
        let tmp = TempDir::new().unwrap();
        let workspace = load_all(tmp.path()).unwrap();

        assert_eq!(workspace.curriculum.all_sections(), &SectionId::ALL);
        assert!(workspace.archive.is_empty());
        assert_eq!(workspace.user_data_dir(), tmp.path().join("user"));
    }

    #[test]
    fn test_bundled_data_dir_loads() {
        let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let workspace = load_all(&base).unwrap();
        let physics = workspace.archive.get("physics").unwrap();

        let search = crate::services::search_archive(physics, "ДВИЖЕНИЕ");
        assert_eq!(search.direct_item_count(), 2);
        let circular = search
            .find(&crate::models::SectionPath::new([
                "Механика",
                "Кинематика",
                "Кръгово движение",
            ]))
            .unwrap();
        assert!(circular.section_name_matched);
    }

    #[test]
    fn test_invalid_ordering_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("ordering.toml"),
            "[[sections]]\nid = \"general\"\nlabel = \"General\"\n",
        )
        .unwrap();

        let err = load_all(tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_config_values_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[http]\nmax_concurrent = 0\n",
        )
        .unwrap();

        let err = load_all(tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_reject_policy_from_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[index]\nduplicate_policy = \"reject\"\n",
        )
        .unwrap();

        let mut ordering = Ordering::default();
        ordering.sections[1].chapters[0].items.push("dsu".into());
        fs::write(
            tmp.path().join("ordering.toml"),
            toml::to_string(&ordering).unwrap(),
        )
        .unwrap();

        let err = load_all(tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::DuplicateModule { .. }));
    }
}
