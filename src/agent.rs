//! LLM agent module for per-category summarization.
//!
//! The agent only needs something that turns a prompt into text; that capability
//! is the [`TextGenerator`] trait, implemented for real by
//! [`crate::llm::OpenAiClient`].

use crate::category::{Categories, Category};
use crate::diagnostics::{DiagnosticSink, Warning};
use crate::summary::{Summaries, Summary};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

/// Failure of a single generation call.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("response contained no choices")]
    NoChoices,
}

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("error calling LLM API for category '{category}': {source}")]
    RemoteCallFailed {
        category: Category,
        #[source]
        source: GenerateError,
    },
    #[error("no response from LLM API for category '{0}'")]
    EmptyRemoteResponse(Category),
}

/// Prompt in, free text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Build the instruction sent to the model for one category.
pub fn build_prompt(category: Category, items: &[String]) -> String {
    format!(
        r#"As an expert software engineer with strong communication skills, write a concise technical summary of the following items in the '{}' category.
Focus on technical impact, architectural decisions, and engineering outcomes. Write in a clear, professional tone suitable for team communication or management updates.
Keep it brief but informative, highlighting key technical achievements and challenges.

Items to summarize:
- {}

Format your response as a brief technical summary paragraph, followed by key bullet points if needed."#,
        category,
        items.join("\n- ")
    )
}

/// Summarise every non-empty category, one model call each.
///
/// Stops at the first failed call; no partial result is returned.
pub async fn summarize<G>(
    categories: &Categories,
    generator: &G,
    sink: &dyn DiagnosticSink,
) -> Result<Summaries, AgentError>
where
    G: TextGenerator + ?Sized,
{
    let mut summaries = Summaries::new();

    for (&category, items) in categories {
        if items.is_empty() {
            continue;
        }

        info!(%category, items = items.len(), "Summarising category");
        let prompt = build_prompt(category, items);
        let reply = generator
            .generate(&prompt)
            .await
            .map_err(|source| match source {
                GenerateError::NoChoices => AgentError::EmptyRemoteResponse(category),
                source => AgentError::RemoteCallFailed { category, source },
            })?;

        let bullets = extract_bullet_points(&reply);
        debug!(%category, bullets = bullets.len(), "Parsed model reply");
        if bullets.is_empty() {
            sink.warn(Warning::EmptySummary { category });
        }

        summaries.insert(category, Summary::from_lines(bullets));
    }

    Ok(summaries)
}

/// Pull point-form lines out of a model reply.
///
/// Lines starting with `- `, `• `, `* ` or a `N.` number are kept with the
/// marker removed; any other line is dropped.
pub fn extract_bullet_points(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| strip_bullet(line.trim()))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> Option<&str> {
    for marker in ["- ", "• ", "* "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest);
        }
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    // "3.5 release" is prose, not a numbered line.
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        Some(line)
    }
}
