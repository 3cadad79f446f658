// src/commands/archive.rs

//! Archive commands: `subjects`, `search`, `visit`, `recent`.

use std::io::Write;

use chrono::Utc;

use crate::config::Workspace;
use crate::error::{AppError, Result};
use crate::models::ArchiveSubject;
use crate::services::{ArchiveBrowser, SectionMatch, highlight_segments};
use crate::storage::UserDataStorage;

fn subject<'a>(workspace: &'a Workspace, key: &str) -> Result<&'a ArchiveSubject> {
    workspace.archive.get(key).ok_or_else(|| {
        let known: Vec<&str> = workspace.archive.iter().map(|(k, _)| k).collect();
        AppError::validation(format!(
            "unknown archive subject '{}' (available: {})",
            key,
            known.join(", ")
        ))
    })
}

/// Wrap matched runs in brackets.
fn highlighted(text: &str, term: &str) -> String {
    highlight_segments(text, term)
        .into_iter()
        .map(|s| {
            if s.matched {
                format!("[{}]", s.text)
            } else {
                s.text.to_string()
            }
        })
        .collect()
}

/// List archive subjects.
pub fn run_subjects(workspace: &Workspace, out: &mut impl Write) -> Result<()> {
    if workspace.archive.is_empty() {
        writeln!(out, "No archive subjects found")?;
    }
    for (key, subject) in workspace.archive.iter() {
        writeln!(
            out,
            "{:<12} {} ({} sections, {} items)",
            key,
            subject.name,
            subject.sections.len(),
            subject.item_count()
        )?;
    }
    Ok(())
}

fn print_node(
    browser: &ArchiveBrowser<'_>,
    node: &SectionMatch,
    term: &str,
    depth: usize,
    out: &mut impl Write,
) -> Result<()> {
    let indent = "  ".repeat(depth);
    let open = browser.is_open(&node.path);
    let marker = if open { "v" } else { ">" };
    let mut line = format!("{indent}{marker} {}", highlighted(&node.name, term));
    if node.section_name_matched {
        line.push_str(" (section match)");
    } else if node.match_count() > 0 {
        line.push_str(&format!(" ({} matches)", node.match_count()));
    }
    writeln!(out, "{line}")?;

    if !open {
        return Ok(());
    }
    for item in &node.items {
        writeln!(
            out,
            "{indent}    - {}  {}",
            highlighted(&item.item.title, term),
            item.item.path
        )?;
    }
    for sub in &node.subsections {
        print_node(browser, sub, term, depth + 1, out)?;
    }
    Ok(())
}

/// Search a subject and print the filtered tree.
///
/// Nodes open the way a reader would see them after typing the term;
/// `expand_all` opens everything.
pub fn run_search(
    workspace: &Workspace,
    key: &str,
    term: &str,
    expand_all: bool,
    out: &mut impl Write,
) -> Result<()> {
    let subject = subject(workspace, key)?;
    let mut browser = ArchiveBrowser::new(subject, &workspace.config.archive);
    browser.set_term(term);
    if expand_all {
        browser.expand_all();
    }

    let results = browser.results();
    if results.is_empty() {
        writeln!(out, "No matches for '{}' in {}", results.term, subject.name)?;
        return Ok(());
    }

    writeln!(out, "{}", subject.name)?;
    for node in &results.sections {
        print_node(&browser, node, &results.term, 0, out)?;
    }
    if results.is_filtered() {
        writeln!(out, "{} matching items", results.direct_item_count())?;
    }
    Ok(())
}

/// Record that an archive item was opened.
pub async fn run_visit(
    workspace: &Workspace,
    storage: &impl UserDataStorage,
    key: &str,
    title: &str,
    out: &mut impl Write,
) -> Result<()> {
    let subject = subject(workspace, key)?;
    let item = subject.find_item(title).ok_or_else(|| {
        AppError::validation(format!("no item titled '{}' in {}", title, subject.name))
    })?;

    let mut data = storage.load_user_data().await?;
    data.recently_viewed
        .record(item, Utc::now(), workspace.config.archive.recent_limit);
    storage.save_user_data(&data).await?;

    writeln!(out, "{}", item.path)?;
    Ok(())
}

/// Print the recently viewed items.
pub async fn run_recent(
    workspace: &Workspace,
    storage: &impl UserDataStorage,
    out: &mut impl Write,
) -> Result<()> {
    let data = storage.load_user_data().await?;
    let recent = data
        .recently_viewed
        .display(workspace.config.archive.recent_display);
    if recent.is_empty() {
        writeln!(out, "Nothing viewed yet")?;
    }
    for item in recent {
        writeln!(
            out,
            "{}  {}  {}",
            item.timestamp.format("%Y-%m-%d %H:%M"),
            item.title,
            item.path
        )?;
    }
    Ok(())
}
