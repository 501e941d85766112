//! Non-fatal warnings raised while building a worklog.
//!
//! Components report warnings through a [`DiagnosticSink`] handed to them by the
//! caller. The CLI uses [`TracingSink`]; tests can use [`RecordingSink`] to
//! assert on what was reported.

use crate::category::Category;
use std::fmt;
use std::sync::Mutex;

/// Something worth telling the user that does not stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The column exists but holds no checklist items
    EmptyColumn { column: String },
    /// The model reply for a category had no usable bullet lines
    EmptySummary { category: Category },
    /// Every produced summary is empty
    AllSummariesEmpty,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptyColumn { column } => {
                write!(f, "no cards found in column '{}'", column)
            }
            Warning::EmptySummary { category } => {
                write!(f, "empty summary received for category '{}'", category)
            }
            Warning::AllSummariesEmpty => f.write_str("all summaries are empty"),
        }
    }
}

/// Receiver for warnings.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, warning: Warning);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, warning: Warning) {
        tracing::warn!("{}", warning);
    }
}

/// Keeps every warning it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    warnings: Mutex<Vec<Warning>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings received so far, oldest first
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings
            .lock()
            .map(|warnings| warnings.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, warning: Warning) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.warn(Warning::AllSummariesEmpty);
        sink.warn(Warning::EmptySummary {
            category: Category::Bugs,
        });
        assert_eq!(
            sink.warnings(),
            vec![
                Warning::AllSummariesEmpty,
                Warning::EmptySummary {
                    category: Category::Bugs
                }
            ]
        );
    }

    #[test]
    fn warning_messages() {
        let warning = Warning::EmptyColumn {
            column: "Done".to_string(),
        };
        assert_eq!(warning.to_string(), "no cards found in column 'Done'");
        assert_eq!(
            Warning::EmptySummary {
                category: Category::PlanningDesign
            }
            .to_string(),
            "empty summary received for category 'planning/design'"
        );
    }
}
