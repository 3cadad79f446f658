// src/services/problems.rs

//! Problem metadata parsers.
//!
//! Turns a pasted problem link into a [`ProblemMetadata`] skeleton. Known
//! judges get a dedicated parser that reads IDs from the URL and names from
//! the fetched page; any other URL gets a generic entry, and input that is
//! not a URL becomes an original-problem template.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ProblemMetadata, SolutionMetadata, placeholders};
use crate::utils::http::fetch_page_async;
use crate::utils::url::{last_segment, path_segments, query_param};

/// Parser for problems hosted on one judge.
pub trait ProblemParser: Send + Sync {
    /// Domain matched against the input text, e.g. `cses.fi`.
    fn domain(&self) -> &'static str;

    /// Build metadata from the URL and, when available, the problem page.
    fn parse(&self, url: &Url, html: Option<&Html>) -> Result<ProblemMetadata>;
}

/// Trimmed text of the first element matching `css`.
fn select_text(html: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    html.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trimmed texts of every element matching `css`.
fn select_all_text(html: &Html, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    html.select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

/// Drop a leading label such as `A. `, `A - `, or `Problem 2. `.
fn strip_label(title: &str, pattern: &str) -> String {
    match Regex::new(pattern) {
        Ok(re) => re.replace(title, "").trim().to_string(),
        Err(_) => title.trim().to_string(),
    }
}

fn site_problem(unique_id: String, name: String, source: &str, url: &Url) -> ProblemMetadata {
    ProblemMetadata {
        unique_id,
        name,
        source: source.to_string(),
        url: url.to_string(),
        is_starred: false,
        difficulty: placeholders::DIFFICULTY.to_string(),
        tags: vec![placeholders::TAG.to_string()],
        solution_metadata: SolutionMetadata::Internal { has_hints: false },
    }
}

fn unrecognized(url: &Url, site: &str) -> AppError {
    AppError::parse(url.as_str(), format!("not a {site} problem link"))
}

/// Codeforces contest, problemset, and gym problems.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeforcesParser;

impl ProblemParser for CodeforcesParser {
    fn domain(&self) -> &'static str {
        "codeforces.com"
    }

    fn parse(&self, url: &Url, html: Option<&Html>) -> Result<ProblemMetadata> {
        let segments = path_segments(url);
        let (prefix, contest, index) = match segments.as_slice() {
            ["contest", contest, "problem", index, ..] => ("cf", *contest, *index),
            ["problemset", "problem", contest, index, ..] => ("cf", *contest, *index),
            ["gym", contest, "problem", index, ..] => ("cfgym", *contest, *index),
            _ => return Err(unrecognized(url, "Codeforces")),
        };

        let name = html
            .and_then(|h| select_text(h, ".problem-statement .header .title"))
            .map(|t| strip_label(&t, r"^[A-Za-z0-9]+\.\s*"))
            .unwrap_or_else(|| format!("{contest}{index}"));

        Ok(site_problem(
            format!("{prefix}-{contest}{index}"),
            name,
            "CF",
            url,
        ))
    }
}

/// USACO problems addressed by `cpid`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsacoParser;

impl ProblemParser for UsacoParser {
    fn domain(&self) -> &'static str {
        "usaco.org"
    }

    fn parse(&self, url: &Url, html: Option<&Html>) -> Result<ProblemMetadata> {
        let cpid = query_param(url, "cpid").ok_or_else(|| unrecognized(url, "USACO"))?;

        // Page headings: "USACO 2020 December Contest, Bronze" then "Problem 1. Name".
        let headings = html.map(|h| select_all_text(h, "h2")).unwrap_or_default();
        let source = headings
            .first()
            .and_then(|h| h.rsplit(", ").next())
            .filter(|division| !division.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "USACO".to_string());
        let name = headings
            .get(1)
            .map(|t| strip_label(t, r"^Problem\s+\d+\.\s*"))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("USACO {cpid}"));

        Ok(site_problem(format!("usaco-{cpid}"), name, &source, url))
    }
}

/// CSES problem set tasks.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsesParser;

impl ProblemParser for CsesParser {
    fn domain(&self) -> &'static str {
        "cses.fi"
    }

    fn parse(&self, url: &Url, html: Option<&Html>) -> Result<ProblemMetadata> {
        let segments = path_segments(url);
        let task = match segments.as_slice() {
            ["problemset", "task" | "view", task, ..] => *task,
            _ => return Err(unrecognized(url, "CSES")),
        };

        let name = html
            .and_then(|h| select_text(h, "title"))
            .map(|t| strip_label(&t, r"^CSES\s*-\s*"))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("CSES {task}"));

        Ok(site_problem(format!("cses-{task}"), name, "CSES", url))
    }
}

/// AtCoder contest tasks.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtCoderParser;

impl ProblemParser for AtCoderParser {
    fn domain(&self) -> &'static str {
        "atcoder.jp"
    }

    fn parse(&self, url: &Url, html: Option<&Html>) -> Result<ProblemMetadata> {
        let segments = path_segments(url);
        let task = match segments.as_slice() {
            ["contests", _, "tasks", task, ..] => *task,
            _ => return Err(unrecognized(url, "AtCoder")),
        };

        let name = html
            .and_then(|h| select_text(h, "title"))
            .map(|t| strip_label(&t, r"^\S+\s+-\s+"))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| task.to_string());

        Ok(site_problem(format!("ac-{task}"), name, "AC", url))
    }
}

/// Generic entry for a URL no dedicated parser handles.
///
/// The link is kept as typed (trimmed), not normalized, so the name is the
/// text after its last `/`.
pub fn parse_url_only(input: &str) -> ProblemMetadata {
    let input = input.trim();
    ProblemMetadata::linked(
        placeholders::UNIQUE_ID,
        last_segment(input),
        placeholders::SOURCE,
        input,
    )
}

/// Template for a problem without an online source.
pub fn parse_original(now: DateTime<Utc>) -> ProblemMetadata {
    ProblemMetadata {
        unique_id: format!("original-{}", now.timestamp_millis()),
        name: placeholders::ORIGINAL_NAME.to_string(),
        source: placeholders::AUTHOR.to_string(),
        url: "#".to_string(),
        is_starred: false,
        difficulty: placeholders::DIFFICULTY.to_string(),
        tags: vec![placeholders::TAG.to_string()],
        solution_metadata: SolutionMetadata::Internal { has_hints: false },
    }
}

/// Registry of judge parsers, checked in order.
pub struct ProblemParsers {
    parsers: Vec<Box<dyn ProblemParser>>,
}

impl ProblemParsers {
    /// Registry with every built-in judge.
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(CodeforcesParser),
                Box::new(UsacoParser),
                Box::new(CsesParser),
                Box::new(AtCoderParser),
            ],
        }
    }

    /// Add a parser after the built-ins.
    pub fn register(&mut self, parser: Box<dyn ProblemParser>) {
        self.parsers.push(parser);
    }

    pub fn domains(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|p| p.domain()).collect()
    }

    /// Parser whose domain occurs in the input text.
    pub fn find(&self, input: &str) -> Option<&dyn ProblemParser> {
        self.parsers
            .iter()
            .find(|p| input.contains(p.domain()))
            .map(|p| p.as_ref())
    }

    /// Parse without fetching anything.
    pub fn parse_offline(&self, input: &str) -> ProblemMetadata {
        self.parse_url(input, None)
    }

    /// Parse a link with an optional fetched page.
    ///
    /// Input that is not a URL becomes the original-problem template. A judge
    /// parser that rejects the link falls back to the generic entry.
    pub fn parse_url(&self, input: &str, html: Option<&Html>) -> ProblemMetadata {
        let input = input.trim();
        let Ok(url) = Url::parse(input) else {
            return parse_original(Utc::now());
        };
        let Some(parser) = self.find(input) else {
            return parse_url_only(input);
        };
        parser.parse(&url, html).unwrap_or_else(|e| {
            log::warn!("{} parser failed: {}. Using generic entry.", parser.domain(), e);
            parse_url_only(input)
        })
    }
}

impl Default for ProblemParsers {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch the problem page and parse it.
///
/// Input that is not a URL never touches the network. A failed fetch falls
/// back to URL-only parsing.
pub async fn fetch_and_parse(
    client: &reqwest::Client,
    parsers: &ProblemParsers,
    input: &str,
) -> ProblemMetadata {
    let input = input.trim();
    let Ok(url) = Url::parse(input) else {
        log::debug!("'{}' is not a URL, using original problem template", input);
        return parse_original(Utc::now());
    };

    match fetch_page_async(client, url.as_str()).await {
        Ok(html) => parsers.parse_url(input, Some(&html)),
        Err(e) => {
            log::warn!("Failed to fetch {}: {}. Parsing URL only.", url, e);
            parsers.parse_url(input, None)
        }
    }
}

/// Parse many inputs with at most `concurrency` fetches in flight.
///
/// Results come back in input order.
pub async fn parse_many(
    client: &reqwest::Client,
    parsers: &ProblemParsers,
    inputs: &[String],
    concurrency: usize,
) -> Vec<ProblemMetadata> {
    stream::iter(inputs)
        .map(|input| fetch_and_parse(client, parsers, input))
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
}
