// src/commands/progress.rs

//! `progress set` and `progress show`.

use std::collections::HashMap;
use std::io::Write;

use crate::config::Workspace;
use crate::error::{AppError, Result};
use crate::models::{ModuleProgress, SectionId};
use crate::services::{active_modules, dashboard_section, section_progress};
use crate::storage::UserDataStorage;

/// Store a module's status.
pub async fn run_progress_set(
    workspace: &Workspace,
    storage: &impl UserDataStorage,
    module_id: &str,
    status: &str,
    out: &mut impl Write,
) -> Result<()> {
    let status: ModuleProgress = status.parse()?;
    let Some(url) = workspace.curriculum.url_of(module_id) else {
        return Err(AppError::validation(format!(
            "unknown module '{}'",
            module_id
        )));
    };

    let mut data = storage.load_user_data().await?;
    data.set_progress(module_id, status);
    storage.save_user_data(&data).await?;

    writeln!(out, "{} ({}): {}", module_id, url, status)?;
    Ok(())
}

/// Print per-section progress bars and the modules in progress.
pub async fn run_progress_show(
    workspace: &Workspace,
    storage: &impl UserDataStorage,
    section: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let curriculum = &workspace.curriculum;
    let data = storage.load_user_data().await?;

    let sections: Vec<SectionId> = match section {
        Some(s) => vec![s.parse()?],
        None => curriculum.all_sections().to_vec(),
    };
    let current = dashboard_section(curriculum, data.last_viewed_module.as_deref());

    for id in sections {
        let counts = section_progress(curriculum, &data.progress, id);
        let pct = counts.percentages();
        let marker = if id == current { "*" } else { " " };
        writeln!(
            out,
            "{} {:<13} {:>3}/{:<3} complete {:>5.1}%  in progress {:>5.1}%  skipped {:>5.1}%",
            marker,
            id.as_str(),
            counts.completed,
            counts.total,
            pct.completed,
            pct.in_progress,
            pct.skipped
        )?;
    }

    // Titles live in module content files; fall back to IDs here.
    let active = active_modules(
        curriculum,
        &data.progress,
        &HashMap::new(),
        workspace.config.dashboard.show_ignored,
    );
    if !active.is_empty() {
        writeln!(out, "Active modules:")?;
        for module in active {
            writeln!(out, "  [{}] {}  {}", module.status, module.label, module.url)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Curriculum;
    use crate::models::{ArchiveCatalog, Config};
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    fn workspace() -> Workspace {
        Workspace {
            base: ".".into(),
            config: Config::default(),
            curriculum: Curriculum::default(),
            archive: ArchiveCatalog::new(),
        }
    }

    #[tokio::test]
    async fn test_set_then_show() {
        let ws = workspace();
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let mut buf = Vec::new();
        run_progress_set(&ws, &storage, "time-comp", "complete", &mut buf)
            .await
            .unwrap();
        run_progress_set(&ws, &storage, "intro-ds", "reading", &mut buf)
            .await
            .unwrap();
        assert!(
            run_progress_set(&ws, &storage, "nope", "reading", &mut buf)
                .await
                .is_err()
        );
        assert!(
            run_progress_set(&ws, &storage, "dsu", "done", &mut buf)
                .await
                .is_err()
        );

        let mut buf = Vec::new();
        run_progress_show(&ws, &storage, Some("beginner"), &mut buf)
            .await
            .unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.starts_with("* beginner"));
        assert!(out.contains("  1/12 "));
        assert!(out.contains("[Reading] Начинаещ 7-8 клас: intro-ds  /beginner/intro-ds"));
    }
}
