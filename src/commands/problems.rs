// src/commands/problems.rs

//! `parse`: turn problem links into metadata entries.

use std::io::Write;

use crate::config::Workspace;
use crate::error::Result;
use crate::models::ProblemMetadata;
use crate::services::{ProblemParsers, parse_many};
use crate::utils::http;

/// Parse every input and print the metadata as a JSON array.
///
/// With `offline`, pages are not fetched and names come from the URL alone.
pub async fn run_parse(
    workspace: &Workspace,
    inputs: &[String],
    offline: bool,
    out: &mut impl Write,
) -> Result<()> {
    let parsers = ProblemParsers::new();

    let problems: Vec<ProblemMetadata> = if offline {
        inputs.iter().map(|i| parsers.parse_offline(i)).collect()
    } else {
        let client = http::create_async_client(&workspace.config.http)?;
        log::info!(
            "Fetching {} problem pages ({} at a time)",
            inputs.len(),
            workspace.config.http.max_concurrent
        );
        parse_many(
            &client,
            &parsers,
            inputs,
            workspace.config.http.max_concurrent,
        )
        .await
    };

    serde_json::to_writer_pretty(&mut *out, &problems)?;
    writeln!(out)?;
    Ok(())
}
