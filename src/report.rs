//! Markdown rendering of the weekly worklog.

use crate::category::Category;
use crate::summary::Summaries;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Layout of each category block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// `### Title` heading, lead paragraph, then a "Key Points" list
    #[default]
    Detailed,
    /// Category name on its own line followed by every line as a bullet
    Simple,
}

/// Render summaries as the weekly worklog.
///
/// Categories with an empty summary are omitted.
pub fn build_markdown_summary(
    summaries: &Summaries,
    year: i32,
    week: u32,
    style: ReportStyle,
) -> String {
    let mut out = format!("## Week {} {}\n\n", week, year);

    for (&category, summary) in summaries {
        if summary.is_empty() {
            continue;
        }
        match style {
            ReportStyle::Detailed => {
                let _ = write!(out, "### {}\n\n", category.title());
                if let Some(lead) = &summary.lead {
                    out.push_str(lead);
                    out.push_str("\n\n");
                }
                if !summary.key_points.is_empty() {
                    out.push_str("**Key Points:**\n");
                    for point in &summary.key_points {
                        let _ = writeln!(out, "- {}", point);
                    }
                    out.push('\n');
                }
            }
            ReportStyle::Simple => {
                let _ = writeln!(out, "{}", category);
                for line in summary.lines() {
                    let _ = writeln!(out, "- {}", line);
                }
                out.push('\n');
            }
        }
    }

    out
}

/// Numbered listing of a category's raw items, one per line.
pub fn build_items_listing(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .fold(String::new(), |mut out, (i, item)| {
            let _ = writeln!(out, "{}. {}", i + 1, item);
            out
        })
}

/// File name of the worklog for an ISO week.
pub fn worklog_filename(year: i32, week: u32) -> String {
    format!("worklog-week-{}-{}.md", week, year)
}

/// File name of a category's item listing.
pub fn items_filename(category: Category) -> String {
    format!("{}_items.txt", category.slug())
}
