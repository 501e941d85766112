//! The worklog run: board in, report file out.

use crate::agent::{self, AgentError, GenerateError, TextGenerator};
use crate::board::{self, ExtractError};
use crate::category::{self, categorize};
use crate::config::{self, Config, ConfigError};
use crate::diagnostics::{DiagnosticSink, Warning};
use crate::llm::OpenAiClient;
use crate::report::build_markdown_summary;
use crate::storage::{StorageError, WorklogStore};
use crate::summary;
use chrono::{Datelike, Local, NaiveDate};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum WorklogError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("board file '{}' does not exist", .0.display())]
    BoardNotFound(PathBuf),
    #[error("failed to read board file '{}': {source}", path.display())]
    BoardRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("failed to set up LLM client: {0}")]
    Client(#[from] GenerateError),
    #[error("failed to generate summaries: {0}")]
    Agent(#[from] AgentError),
    #[error("failed to save worklog: {0}")]
    Storage(#[from] StorageError),
}

/// Everything a run needs besides the model and the date.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub board: PathBuf,
    pub column: String,
    pub output_folder: PathBuf,
    /// Explicit credential; `OPENAI_API_KEY` is used when absent
    pub credential: Option<String>,
    /// Ask the model to summarise each category
    pub summarize: bool,
    pub config: Config,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub report_path: PathBuf,
    pub listing_paths: Vec<PathBuf>,
    pub total_items: usize,
    pub year: i32,
    pub week: u32,
}

/// Run the pipeline with the configured OpenAI client for the current week.
///
/// The credential is resolved before the board is touched.
pub async fn run(options: &RunOptions, sink: &dyn DiagnosticSink) -> Result<RunOutcome, WorklogError> {
    let client = if options.summarize {
        let api_key = config::resolve_credential(options.credential.as_deref())?;
        Some(OpenAiClient::new(api_key, &options.config.agent)?)
    } else {
        None
    };

    let generator = client.as_ref().map(|c| c as &dyn TextGenerator);
    generate_worklog(options, generator, Local::now().date_naive(), sink).await
}

/// Run the pipeline against any generator for the ISO week containing `date`.
///
/// Without a generator the report lists the raw items of each category.
pub async fn generate_worklog(
    options: &RunOptions,
    generator: Option<&dyn TextGenerator>,
    date: NaiveDate,
    sink: &dyn DiagnosticSink,
) -> Result<RunOutcome, WorklogError> {
    let board_path = &options.board;
    if !board_path.exists() {
        return Err(WorklogError::BoardNotFound(board_path.clone()));
    }

    info!(path = %board_path.display(), "Reading board file");
    let content = std::fs::read_to_string(board_path).map_err(|source| WorklogError::BoardRead {
        path: board_path.clone(),
        source,
    })?;

    info!(column = %options.column, "Extracting items from column");
    let items = board::extract_column_items(&content, &options.column)?;
    if items.is_empty() {
        sink.warn(Warning::EmptyColumn {
            column: options.column.clone(),
        });
    } else {
        info!(count = items.len(), column = %options.column, "Found cards");
    }

    let report_config = &options.config.report;
    let categories = categorize(&items, report_config.policy);
    let store = WorklogStore::new(&options.output_folder);

    let listing_paths = if report_config.item_listings {
        store.save_item_listings(&categories)?
    } else {
        Vec::new()
    };

    let summaries = match generator {
        Some(generator) => {
            info!(model = %options.config.agent.model, "Generating summaries");
            agent::summarize(&categories, generator, sink).await?
        }
        None => summary::from_categories(&categories),
    };

    if summaries.values().all(|s| s.is_empty()) {
        sink.warn(Warning::AllSummariesEmpty);
    }

    let iso = date.iso_week();
    let (year, week) = (iso.year(), iso.week());

    info!(week, year, "Building worklog summary");
    let report = build_markdown_summary(&summaries, year, week, report_config.style);
    let report_path = store.save_worklog(year, week, &report)?;

    Ok(RunOutcome {
        report_path,
        listing_paths,
        total_items: category::total_items(&categories),
        year,
        week,
    })
}
