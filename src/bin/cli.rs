//! Curriculum CLI
//!
//! Local entry point for inspecting the curriculum, searching the archive,
//! tracking progress, and drafting problem metadata.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use curriculum::{commands, config, error::Result, storage::LocalStorage};

/// Curriculum - olympiad guide registry and archive tools
#[derive(Parser, Debug)]
#[command(
    name = "curriculum",
    version,
    about = "Olympiad guide curriculum and archive tools"
)]
struct Cli {
    /// Path to data directory containing config.toml, ordering and archive
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate config, ordering and archive
    Validate,

    /// List curriculum sections
    Sections,

    /// List the chapters of a section
    Chapters {
        /// Section identifier, e.g. `beginner`
        section: String,
    },

    /// Resolve module IDs to their section and URL
    Lookup {
        #[arg(required = true)]
        modules: Vec<String>,
    },

    /// List archive subjects
    Subjects,

    /// Search an archive subject
    Search {
        /// Subject key, e.g. `physics`
        subject: String,
        /// Search term; empty shows the whole tree
        #[arg(default_value = "")]
        term: String,
        /// Open every section instead of only the auto-expanded ones
        #[arg(long)]
        expand_all: bool,
    },

    /// Draft problem metadata from links
    Parse {
        /// Do not fetch problem pages
        #[arg(long)]
        offline: bool,
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Read or update reading progress
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },

    /// Record opening an archive item
    Visit {
        subject: String,
        /// Exact item title
        title: String,
    },

    /// Show recently viewed archive items
    Recent,
}

#[derive(Subcommand, Debug)]
enum ProgressAction {
    /// Set the status of a module
    Set {
        module: String,
        /// Not Started, Reading, Practicing, Complete, Skipped or Ignored
        status: String,
    },

    /// Show progress per section
    Show {
        #[arg(long)]
        section: Option<String>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let workspace = config::load_all(&cli.data_dir)?;
    let storage = LocalStorage::new(workspace.user_data_dir());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Validate => commands::run_validate(&workspace, &mut out)?,
        Command::Sections => commands::run_sections(&workspace, &mut out)?,
        Command::Chapters { section } => commands::run_chapters(&workspace, &section, &mut out)?,
        Command::Lookup { modules } => commands::run_lookup(&workspace, &modules, &mut out)?,
        Command::Subjects => commands::run_subjects(&workspace, &mut out)?,
        Command::Search {
            subject,
            term,
            expand_all,
        } => commands::run_search(&workspace, &subject, &term, expand_all, &mut out)?,
        Command::Parse { offline, inputs } => {
            commands::run_parse(&workspace, &inputs, offline, &mut out).await?
        }
        Command::Progress { action } => match action {
            ProgressAction::Set { module, status } => {
                commands::run_progress_set(&workspace, &storage, &module, &status, &mut out)
                    .await?
            }
            ProgressAction::Show { section } => {
                commands::run_progress_show(&workspace, &storage, section.as_deref(), &mut out)
                    .await?
            }
        },
        Command::Visit { subject, title } => {
            commands::run_visit(&workspace, &storage, &subject, &title, &mut out).await?
        }
        Command::Recent => commands::run_recent(&workspace, &storage, &mut out).await?,
    }

    out.flush()?;
    Ok(())
}
