//! # Worklog
//!
//! Weekly worklog generation from a Markdown Kanban board.
//!
//! ## Pipeline
//!
//! - **Extraction**: checklist items are pulled from one `## Column` of the board
//! - **Categorisation**: items are bucketed by `#tag` or by leading word
//! - **Summarisation**: each non-empty bucket is condensed by an LLM (optional)
//! - **Report**: a `## Week N YYYY` Markdown worklog is written to the output folder

pub mod agent;
pub mod board;
pub mod category;
pub mod config;
pub mod diagnostics;
pub mod llm;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod summary;

pub use agent::TextGenerator;
pub use category::{Category, CategoryPolicy};
pub use config::Config;
pub use pipeline::{RunOptions, RunOutcome, WorklogError};
pub use report::ReportStyle;
pub use summary::Summary;
