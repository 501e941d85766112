//! Worklog CLI - weekly worklogs from a Markdown Kanban board
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use worklog::diagnostics::TracingSink;
use worklog::{pipeline, CategoryPolicy, Config, ReportStyle, RunOptions};

#[derive(Parser)]
#[command(name = "worklog")]
#[command(author, version, about = "Summarise a Kanban board column into a weekly worklog", long_about = None)]
struct Cli {
    /// Path to the Kanban board markdown file
    #[arg(long)]
    board: PathBuf,
    /// Column to summarize
    #[arg(long)]
    column: String,
    /// Folder to write the summary
    #[arg(long)]
    output_folder: PathBuf,
    /// OpenAI API key (can also be set via OPENAI_API_KEY env var)
    #[arg(long, alias = "api-key")]
    credential: Option<String>,
    /// Config file (defaults to ./worklog.toml or ~/.config/worklog/worklog.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// How items are sorted into categories
    #[arg(long, value_enum)]
    policy: Option<CategoryPolicy>,
    /// Layout of the category blocks
    #[arg(long, value_enum)]
    style: Option<ReportStyle>,
    /// Also write a numbered `{category}_items.txt` per category
    #[arg(long)]
    item_listings: bool,
    /// Model used for summaries
    #[arg(long)]
    model: Option<String>,
    /// List raw items instead of calling the LLM
    #[arg(long)]
    no_summarize: bool,
}

impl Cli {
    fn into_options(self) -> anyhow::Result<RunOptions> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(policy) = self.policy {
            config.report.policy = policy;
        }
        if let Some(style) = self.style {
            config.report.style = style;
        }
        if self.item_listings {
            config.report.item_listings = true;
        }
        if let Some(model) = self.model {
            config.agent.model = model;
        }

        Ok(RunOptions {
            board: self.board,
            column: self.column,
            output_folder: self.output_folder,
            credential: self.credential,
            summarize: !self.no_summarize,
            config,
        })
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let options = cli.into_options()?;
    let outcome = pipeline::run(&options, &TracingSink).await?;

    println!(
        "{} Summarized {} items to {}",
        "✓".green().bold(),
        outcome.total_items,
        outcome.report_path.display()
    );
    Ok(())
}
