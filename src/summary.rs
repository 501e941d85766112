//! Summary struct - the per-category result rendered into the worklog.

use crate::category::{Categories, Category};
use std::collections::BTreeMap;

/// Point-form summary of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Opening paragraph, when the summary has one
    pub lead: Option<String>,
    /// Supporting points, rendered as a bulleted list
    pub key_points: Vec<String>,
}

/// Summaries keyed by category, in category order.
pub type Summaries = BTreeMap<Category, Summary>;

impl Summary {
    /// Build a summary from lines parsed out of a model reply.
    ///
    /// The first line becomes the lead paragraph; the rest are key points.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut lines = lines.into_iter();
        Self {
            lead: lines.next(),
            key_points: lines.collect(),
        }
    }

    /// Build a summary that lists raw items without a lead paragraph.
    pub fn from_items(items: &[String]) -> Self {
        Self {
            lead: None,
            key_points: items.to_vec(),
        }
    }

    /// All lines in order, lead first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lead
            .as_deref()
            .into_iter()
            .chain(self.key_points.iter().map(String::as_str))
    }

    /// Check if the summary has any content
    pub fn is_empty(&self) -> bool {
        self.lead.is_none() && self.key_points.is_empty()
    }
}

/// Turn raw categories into summaries without consulting a model.
///
/// Empty categories are left out.
pub fn from_categories(categories: &Categories) -> Summaries {
    categories
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(&category, items)| (category, Summary::from_items(items)))
        .collect()
}
