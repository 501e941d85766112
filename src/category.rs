//! Sorting checklist items into worklog categories.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A worklog category. Variant order is the order categories appear in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Features,
    Bugs,
    #[serde(rename = "planning/design")]
    PlanningDesign,
    Documentation,
    Reviews,
    Learning,
    Other,
}

impl Category {
    /// Every category known to the tag policy.
    pub const ALL: [Category; 7] = [
        Category::Features,
        Category::Bugs,
        Category::PlanningDesign,
        Category::Documentation,
        Category::Reviews,
        Category::Learning,
        Category::Other,
    ];

    /// Lowercase name used in prompts and the simple report layout
    pub fn name(self) -> &'static str {
        match self {
            Category::Features => "features",
            Category::Bugs => "bugs",
            Category::PlanningDesign => "planning/design",
            Category::Documentation => "documentation",
            Category::Reviews => "reviews",
            Category::Learning => "learning",
            Category::Other => "other",
        }
    }

    /// Name with each word capitalised, e.g. `Planning/Design`.
    pub fn title(self) -> String {
        let mut title = String::with_capacity(self.name().len());
        let mut at_word_start = true;
        for c in self.name().chars() {
            if at_word_start {
                title.extend(c.to_uppercase());
            } else {
                title.push(c);
            }
            at_word_start = !c.is_alphanumeric();
        }
        title
    }

    /// File-name safe form of the name.
    pub fn slug(self) -> String {
        self.name().replace('/', "-")
    }

    /// Map a hashtag (without `#`, lowercased) to a category.
    pub fn from_tag(tag: &str) -> Option<Category> {
        match tag {
            "build" | "feat" | "feature" => Some(Category::Features),
            "bug" => Some(Category::Bugs),
            "plan" | "design" => Some(Category::PlanningDesign),
            "doc" | "docs" => Some(Category::Documentation),
            "review" => Some(Category::Reviews),
            "learn" => Some(Category::Learning),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How items are assigned to categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    /// First recognised `#tag` anywhere in the item
    #[default]
    Tags,
    /// Leading word of the item (`feat`, `bug`, `plan`, `design`)
    Prefix,
}

impl CategoryPolicy {
    /// Categories this policy always reports, even when empty.
    pub fn categories(self) -> &'static [Category] {
        match self {
            CategoryPolicy::Tags => &Category::ALL,
            CategoryPolicy::Prefix => &[
                Category::Features,
                Category::Bugs,
                Category::PlanningDesign,
                Category::Other,
            ],
        }
    }

    fn classify(self, item: &str) -> Category {
        match self {
            CategoryPolicy::Tags => classify_by_tags(item),
            CategoryPolicy::Prefix => classify_by_prefix(item),
        }
    }
}

/// Items grouped by category, in category order.
pub type Categories = BTreeMap<Category, Vec<String>>;

/// Group items by category under the given policy.
///
/// Every category of the policy is present in the result. Items keep their input
/// order within a category.
pub fn categorize<S: AsRef<str>>(items: &[S], policy: CategoryPolicy) -> Categories {
    let mut categories: Categories = policy
        .categories()
        .iter()
        .map(|&category| (category, Vec::new()))
        .collect();

    for item in items {
        let item = item.as_ref();
        categories
            .entry(policy.classify(item))
            .or_default()
            .push(item.to_string());
    }

    categories
}

/// Total number of items across all categories
pub fn total_items(categories: &Categories) -> usize {
    categories.values().map(Vec::len).sum()
}

fn classify_by_tags(item: &str) -> Category {
    item.split_whitespace()
        .filter_map(|word| word.strip_prefix('#'))
        .find_map(|tag| Category::from_tag(&tag.to_lowercase()))
        .unwrap_or(Category::Other)
}

fn classify_by_prefix(item: &str) -> Category {
    let lower = item.to_lowercase();
    if lower.starts_with("feat") {
        Category::Features
    } else if lower.starts_with("bug") {
        Category::Bugs
    } else if lower.starts_with("plan") || lower.starts_with("design") {
        Category::PlanningDesign
    } else {
        Category::Other
    }
}
