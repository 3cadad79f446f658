// src/commands/catalog.rs

//! Curriculum commands: `validate`, `sections`, `chapters`, `lookup`.

use std::io::Write;

use crate::config::Workspace;
use crate::error::Result;
use crate::models::SectionId;

/// Report what was loaded and any duplicate module declarations.
pub fn run_validate(workspace: &Workspace, out: &mut impl Write) -> Result<()> {
    let config = &workspace.config;
    let curriculum = &workspace.curriculum;

    writeln!(out, "Config OK")?;
    writeln!(out, "  user agent: {}", config.http.user_agent)?;
    writeln!(out, "  duplicate policy: {:?}", config.index.duplicate_policy)?;
    writeln!(
        out,
        "Curriculum OK: {} sections, {} modules",
        curriculum.all_sections().len(),
        curriculum.module_count()
    )?;

    for dup in curriculum.duplicates() {
        writeln!(
            out,
            "  duplicate: '{}' in '{}' and '{}' (kept '{}')",
            dup.module_id, dup.first, dup.second, dup.second
        )?;
    }

    writeln!(
        out,
        "Archive OK: {} subjects, {} items",
        workspace.archive.len(),
        workspace
            .archive
            .iter()
            .map(|(_, s)| s.item_count())
            .sum::<usize>()
    )?;
    Ok(())
}

/// List sections in declaration order.
pub fn run_sections(workspace: &Workspace, out: &mut impl Write) -> Result<()> {
    let curriculum = &workspace.curriculum;
    for &id in curriculum.all_sections() {
        let chapters = curriculum.chapters_of(id).len();
        let modules = curriculum.modules_of(id).len();
        writeln!(
            out,
            "{:<13} {} ({} chapters, {} modules)",
            id.as_str(),
            curriculum.label(id),
            chapters,
            modules
        )?;
    }
    Ok(())
}

/// List the chapters of one section with their modules.
pub fn run_chapters(workspace: &Workspace, section: &str, out: &mut impl Write) -> Result<()> {
    let id: SectionId = section.parse()?;
    let curriculum = &workspace.curriculum;

    writeln!(out, "{}", curriculum.label(id))?;
    for chapter in curriculum.chapters_of(id) {
        writeln!(out, "  {}", chapter.name)?;
        if let Some(description) = &chapter.description {
            writeln!(out, "    {}", description)?;
        }
        for module_id in &chapter.items {
            // Overwritten duplicates point elsewhere.
            match curriculum.section_of(module_id) {
                Some(owner) if owner != id => {
                    writeln!(out, "    - {} (moved to {})", module_id, owner)?
                }
                _ => writeln!(out, "    - {}", module_id)?,
            }
        }
    }
    Ok(())
}

/// Resolve module IDs to section, URL, chapter, and neighbours.
pub fn run_lookup(
    workspace: &Workspace,
    module_ids: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let curriculum = &workspace.curriculum;
    for module_id in module_ids {
        let (Some(section), Some(url)) = (
            curriculum.section_of(module_id),
            curriculum.url_of(module_id),
        ) else {
            writeln!(out, "{}: unknown module", module_id)?;
            continue;
        };

        writeln!(out, "{}: {} {}", module_id, section, url)?;
        if let Some(chapter) = curriculum.chapter_of(module_id) {
            writeln!(out, "  chapter: {}", chapter.name)?;
        }
        if let Some(neighbors) = curriculum.neighbors(module_id) {
            writeln!(
                out,
                "  previous: {}, next: {}",
                neighbors.previous.unwrap_or("-"),
                neighbors.next.unwrap_or("-")
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Curriculum;
    use crate::models::{ArchiveCatalog, Config};

    fn workspace() -> Workspace {
        Workspace {
            base: ".".into(),
            config: Config::default(),
            curriculum: Curriculum::default(),
            archive: ArchiveCatalog::new(),
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_sections_listing() {
        let ws = workspace();
        let text = render(|out| run_sections(&ws, out));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("general"));
        assert!(lines[1].contains("(5 chapters, 12 modules)"));
    }

    #[test]
    fn test_chapters_and_unknown_section() {
        let ws = workspace();
        let text = render(|out| run_chapters(&ws, "Beyond", out));
        assert!(text.contains("  Polynomials"));
        assert!(text.contains("    - fft"));

        let mut buf = Vec::new();
        assert!(run_chapters(&ws, "bronze", &mut buf).is_err());
    }

    #[test]
    fn test_lookup() {
        let ws = workspace();
        let ids = vec!["simulation".to_string(), "nope".to_string()];
        let text = render(|out| run_lookup(&ws, &ids, out));
        assert!(text.contains("simulation: beginner /beginner/simulation"));
        assert!(text.contains("previous: intro-ds, next: intro-complete"));
        assert!(text.contains("nope: unknown module"));
    }

    #[test]
    fn test_validate_report() {
        let ws = workspace();
        let text = render(|out| run_validate(&ws, out));
        assert!(text.contains("Curriculum OK: 6 sections"));
        assert!(!text.contains("duplicate:"));
    }
}
