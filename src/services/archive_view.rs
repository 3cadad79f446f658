// src/services/archive_view.rs

//! Browsing state for one archive subject.
//!
//! Expansion, breadcrumbs, and the temporary highlight after a breadcrumb
//! jump. Time is passed in explicitly so the state stays deterministic.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::models::{ArchiveConfig, ArchiveSubject, SectionPath};
use crate::services::archive_search::{ArchiveSearch, search_archive};

/// Set of currently open archive nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    open: BTreeSet<SectionPath>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, path: &SectionPath) -> bool {
        self.open.contains(path)
    }

    pub fn open(&mut self, path: SectionPath) {
        self.open.insert(path);
    }

    pub fn close(&mut self, path: &SectionPath) {
        self.open.remove(path);
    }

    /// Flip a node; returns `true` when it is now open.
    pub fn toggle(&mut self, path: &SectionPath) -> bool {
        if self.open.remove(path) {
            false
        } else {
            self.open.insert(path.clone());
            true
        }
    }

    pub fn expand_all(&mut self, subject: &ArchiveSubject) {
        self.open = subject.all_paths().into_iter().collect();
    }

    /// Open every node without closing any.
    pub fn open_all(&mut self, subject: &ArchiveSubject) {
        self.open.extend(subject.all_paths());
    }

    pub fn collapse_all(&mut self) {
        self.open.clear();
    }

    /// Replace the open set with the nodes a search opens automatically.
    pub fn seed_from_search(&mut self, search: &ArchiveSearch) {
        self.open = search.auto_expanded().into_iter().collect();
    }

    pub fn open_paths(&self) -> impl Iterator<Item = &SectionPath> {
        self.open.iter()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// One entry of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: String,
    /// Node path; root for the subject crumb
    pub path: SectionPath,
}

/// A node temporarily highlighted after a breadcrumb jump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Element key of the node
    pub key: String,
    /// Scroll anchor of the node
    pub anchor: String,
    pub expires_at: Instant,
}

/// Breadcrumbs from the subject down to the most recently opened node.
#[derive(Debug, Clone)]
pub struct BreadcrumbTrail {
    subject: String,
    current: SectionPath,
    highlight: Option<Highlight>,
    highlight_for: Duration,
}

impl BreadcrumbTrail {
    pub fn new(subject: impl Into<String>, highlight_for: Duration) -> Self {
        Self {
            subject: subject.into(),
            current: SectionPath::root(),
            highlight: None,
            highlight_for,
        }
    }

    /// Replace the trail with the path of a node the user opened.
    pub fn open(&mut self, path: &SectionPath) {
        self.current = path.clone();
    }

    /// Crumbs in order, subject first.
    pub fn crumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs = Vec::with_capacity(self.current.depth() + 1);
        crumbs.push(Breadcrumb {
            name: self.subject.clone(),
            path: SectionPath::root(),
        });
        for depth in 1..=self.current.depth() {
            let path = self.current.truncated(depth);
            crumbs.push(Breadcrumb {
                name: path.last().unwrap_or_default().to_string(),
                path,
            });
        }
        crumbs
    }

    pub fn len(&self) -> usize {
        self.current.depth() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current(&self) -> &SectionPath {
        &self.current
    }

    /// Jump to the crumb at `index`.
    ///
    /// Index 0 returns to the subject root. Indices past the end are
    /// ignored and leave the trail unchanged.
    pub fn select(&mut self, index: usize, now: Instant) -> Option<Highlight> {
        if index > self.current.depth() {
            log::debug!("Breadcrumb {} out of range, ignoring", index);
            return None;
        }

        self.current = self.current.truncated(index);
        if index == 0 {
            self.highlight = None;
            return None;
        }

        let highlight = Highlight {
            key: self.current.key(),
            anchor: self.current.anchor(),
            expires_at: now + self.highlight_for,
        };
        self.highlight = Some(highlight.clone());
        Some(highlight)
    }

    /// The active highlight, cleared once it has expired.
    pub fn highlighted(&mut self, now: Instant) -> Option<&Highlight> {
        if self.highlight.as_ref().is_some_and(|h| now >= h.expires_at) {
            self.highlight = None;
        }
        self.highlight.as_ref()
    }
}

/// Holds typed input until it has been quiet for the debounce period.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a keystroke; replaces any pending input.
    pub fn input(&mut self, term: &str, now: Instant) {
        self.pending = Some((term.to_string(), now));
    }

    /// The pending term once no input arrived for the quiet period.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.quiet);
        if ready {
            self.pending.take().map(|(term, _)| term)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Search, expansion, and breadcrumbs for one subject.
#[derive(Debug, Clone)]
pub struct ArchiveBrowser<'a> {
    subject: &'a ArchiveSubject,
    term: String,
    results: ArchiveSearch,
    expansion: ExpansionState,
    trail: BreadcrumbTrail,
    debouncer: SearchDebouncer,
    /// Set by expand-all until collapse-all; every search reopens the whole tree
    expand_all_mode: bool,
}

impl<'a> ArchiveBrowser<'a> {
    pub fn new(subject: &'a ArchiveSubject, config: &ArchiveConfig) -> Self {
        Self {
            subject,
            term: String::new(),
            results: search_archive(subject, ""),
            expansion: ExpansionState::new(),
            trail: BreadcrumbTrail::new(
                subject.name.clone(),
                Duration::from_millis(config.highlight_ms),
            ),
            debouncer: SearchDebouncer::new(Duration::from_millis(config.search_debounce_ms)),
            expand_all_mode: false,
        }
    }

    pub fn subject(&self) -> &ArchiveSubject {
        self.subject
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Apply a new search term.
    ///
    /// Expansion is reseeded only when the trimmed term actually changes,
    /// so manual toggles survive repeated identical input. Clearing the
    /// term keeps whatever is open. While expand-all is on, the open set is
    /// the whole tree plus the search's auto-expanded nodes.
    pub fn set_term(&mut self, term: &str) {
        let term = term.trim();
        if term == self.term {
            return;
        }
        self.term = term.to_string();
        self.results = search_archive(self.subject, term);
        if self.results.is_filtered() {
            self.expansion.seed_from_search(&self.results);
            if self.expand_all_mode {
                self.expansion.open_all(self.subject);
            }
        }
    }

    /// Queue typed input; it is applied by [`ArchiveBrowser::tick`].
    pub fn type_term(&mut self, term: &str, now: Instant) {
        self.debouncer.input(term, now);
    }

    /// Apply queued input once it has settled. Returns `true` if the search ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(term) => {
                let before = self.term.clone();
                self.set_term(&term);
                before != self.term
            }
            None => false,
        }
    }

    pub fn results(&self) -> &ArchiveSearch {
        &self.results
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn trail(&self) -> &BreadcrumbTrail {
        &self.trail
    }

    pub fn is_open(&self, path: &SectionPath) -> bool {
        self.expansion.is_open(path)
    }

    /// Toggle a node from a user click; opening it also moves the trail.
    pub fn click(&mut self, path: &SectionPath) -> bool {
        let opened = self.expansion.toggle(path);
        if opened {
            self.trail.open(path);
        }
        opened
    }

    pub fn expand_all(&mut self) {
        self.expand_all_mode = true;
        self.expansion.expand_all(self.subject);
    }

    pub fn collapse_all(&mut self) {
        self.expand_all_mode = false;
        self.expansion.collapse_all();
    }

    pub fn is_expand_all(&self) -> bool {
        self.expand_all_mode
    }

    pub fn select_crumb(&mut self, index: usize, now: Instant) -> Option<Highlight> {
        self.trail.select(index, now)
    }

    pub fn highlighted(&mut self, now: Instant) -> Option<&Highlight> {
        self.trail.highlighted(now)
    }
}
