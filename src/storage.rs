//! Writing worklogs and item listings to the output folder.

use crate::category::Categories;
use crate::report::{build_items_listing, items_filename, worklog_filename};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create output folder {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Output folder for generated files.
///
/// The folder is created on first write.
#[derive(Debug, Clone)]
pub struct WorklogStore {
    folder: PathBuf,
}

impl WorklogStore {
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Write the worklog for an ISO week and return its path
    pub fn save_worklog(&self, year: i32, week: u32, content: &str) -> Result<PathBuf, StorageError> {
        let path = self.folder.join(worklog_filename(year, week));
        self.write(&path, content)?;
        info!(path = %path.display(), "Saved worklog");
        Ok(path)
    }

    /// Write one numbered listing per non-empty category and return their paths
    pub fn save_item_listings(&self, categories: &Categories) -> Result<Vec<PathBuf>, StorageError> {
        let mut written = Vec::new();
        for (&category, items) in categories {
            if items.is_empty() {
                continue;
            }
            let path = self.folder.join(items_filename(category));
            self.write(&path, &build_items_listing(items))?;
            info!(%category, path = %path.display(), "Saved item listing");
            written.push(path);
        }
        Ok(written)
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.folder).map_err(|source| StorageError::CreateDir {
            path: self.folder.clone(),
            source,
        })?;
        fs::write(path, content).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{categorize, CategoryPolicy};
    use tempfile::TempDir;

    #[test]
    fn creates_folder_and_writes_worklog() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path().join("nested").join("out"));

        let path = store.save_worklog(2024, 5, "## Week 5 2024\n\n").unwrap();

        assert_eq!(path, dir.path().join("nested/out/worklog-week-5-2024.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "## Week 5 2024\n\n");
    }

    #[test]
    fn writes_listings_for_non_empty_categories() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path());
        let categories = categorize(&["#plan roadmap", "#plan estimates", "misc"], CategoryPolicy::Tags);

        let written = store.save_item_listings(&categories).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("planning-design_items.txt"),
                dir.path().join("other_items.txt"),
            ]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("planning-design_items.txt")).unwrap(),
            "1. #plan roadmap\n2. #plan estimates\n"
        );
    }

    #[test]
    fn unwritable_folder_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let store = WorklogStore::new(blocker.join("out"));

        let err = store.save_worklog(2024, 1, "x").unwrap_err();
        assert!(matches!(err, StorageError::CreateDir { .. }));
    }
}
