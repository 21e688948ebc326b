//! Loads changelog documents from disk into a [`Catalog`].
//!
//! 1. Discover `*.json` files under the data directory (sorted by path)
//! 2. Parse each file into a [`Project`]
//! 3. Insert into the catalog; a repeated slug overwrites the earlier one
//!
//! Sorting makes "last-loaded wins" deterministic: for duplicate slugs, the
//! document with the greatest path is the one served.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_walkdir::WalkDir;
use futures::StreamExt;

use crate::catalog::Catalog;
use crate::model::Project;
use crate::{Error, Result};

/// Document extension, lowercase without the dot.
pub const DOCUMENT_EXTENSION: &str = "json";

// ============================================================================
// Loader configuration types
// ============================================================================

/// What to do when a document cannot be read or parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Stop on first error.
    #[default]
    FailFast,
    /// Log, record in [`LoadStats::errors`], and keep going.
    Skip,
}

/// A document that failed to load.
#[derive(Debug, Clone)]
pub struct LoadError {
    /// Path to the problematic file.
    pub file: PathBuf,
    /// Error message.
    pub message: String,
}

/// Statistics from a load.
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Documents found on disk.
    pub files_discovered: usize,
    /// Documents parsed successfully.
    pub projects_loaded: usize,
    /// Documents skipped due to errors.
    pub files_skipped: usize,
    /// Slugs that were overwritten by a later document.
    pub duplicates: Vec<String>,
    /// Errors encountered (only with [`ErrorHandling::Skip`]).
    pub errors: Vec<LoadError>,
}

// ============================================================================
// Loader
// ============================================================================

/// Builds a [`Catalog`] from a directory of project documents.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    error_handling: ErrorHandling,
}

impl Loader {
    /// Creates a fail-fast loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error handling strategy.
    pub fn with_error_handling(mut self, handling: ErrorHandling) -> Self {
        self.error_handling = handling;
        self
    }

    /// Load every document under `dir`.
    pub async fn load(&self, dir: &Path) -> Result<(Catalog, LoadStats)> {
        let files = discover_documents(dir).await?;
        log::info!("Loading {} changelog document(s) from {}", files.len(), dir.display());

        let mut stats = LoadStats {
            files_discovered: files.len(),
            ..LoadStats::default()
        };
        let mut catalog = Catalog::new();

        for file in &files {
            match load_document(file).await {
                Ok(project) => {
                    let slug = project.slug.clone();
                    if catalog.insert(project).is_some() {
                        log::warn!(
                            "Duplicate project '{slug}' in {}; replacing earlier document",
                            file.display()
                        );
                        stats.duplicates.push(slug);
                    }
                    stats.projects_loaded += 1;
                }
                Err(e) => match self.error_handling {
                    ErrorHandling::FailFast => return Err(e),
                    ErrorHandling::Skip => {
                        log::warn!("Skipping {}: {e}", file.display());
                        stats.files_skipped += 1;
                        stats.errors.push(LoadError {
                            file: file.clone(),
                            message: e.to_string(),
                        });
                    }
                },
            }
        }

        log::info!(
            "Loaded {} project(s) ({} skipped, {} duplicate)",
            catalog.len(),
            stats.files_skipped,
            stats.duplicates.len()
        );

        Ok((catalog, stats))
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Read and parse a single project document.
pub async fn load_document(path: &Path) -> Result<Project> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))?;
    serde_json::from_str(&content).map_err(|e| Error::parse(path, e.to_string()))
}

/// Recursively find project documents under `root`, sorted by path.
pub async fn discover_documents(root: &Path) -> Result<Vec<PathBuf>> {
    let meta = tokio::fs::metadata(root)
        .await
        .map_err(|e| Error::io_with_path(e, root))?;
    if !meta.is_dir() {
        return Err(Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            root,
        ));
    }

    let extensions: HashSet<String> = [DOCUMENT_EXTENSION.to_string()].into();
    find_files_with_extensions(root, &extensions).await
}

/// Find all files under `root` whose extension (case-insensitive) is in
/// `extensions`. Walk errors are logged and skipped.
async fn find_files_with_extensions(
    root: &Path,
    extensions: &HashSet<String>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut walker = WalkDir::new(root);

    while let Some(entry) = walker.next().await {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Walk error: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if extensions.contains(&ext_lower) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn doc(slug: &str, name: &str) -> String {
        format!(
            r#"{{"slug":"{slug}","name":"{name}","changes":[{{"version":"1.0","date":"2024-01-01","changes":[]}}]}}"#
        )
    }

    #[tokio::test]
    async fn test_discover_documents_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.json", "{}");
        write(dir.path(), "a.JSON", "{}");
        write(dir.path(), "nested/c.json", "{}");
        write(dir.path(), "readme.md", "# hi");

        let files = discover_documents(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.JSON", "b.json", "nested/c.json"]);
    }

    #[tokio::test]
    async fn test_discover_documents_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = discover_documents(&missing).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[tokio::test]
    async fn test_discover_documents_rejects_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", "{}");
        let err = discover_documents(&dir.path().join("a.json")).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_document_parse_error_has_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.json", r#"{"name":"no slug"}"#);
        let err = load_document(&dir.path().join("bad.json")).await.unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[tokio::test]
    async fn test_load_builds_catalog() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "one.json", &doc("one", "One"));
        write(dir.path(), "two.json", &doc("two", "Two"));

        let (catalog, stats) = Loader::new().load(dir.path()).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(stats.files_discovered, 2);
        assert_eq!(stats.projects_loaded, 2);
        assert!(stats.errors.is_empty());
        assert_eq!(catalog.get_latest_version("one").unwrap().version, "1.0");
    }

    #[tokio::test]
    async fn test_load_duplicate_last_wins() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", &doc("same", "From A"));
        write(dir.path(), "b.json", &doc("same", "From B"));

        let (catalog, stats) = Loader::new().load(dir.path()).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_project("same").unwrap().name, "From B");
        assert_eq!(stats.duplicates, vec!["same".to_string()]);
    }

    #[tokio::test]
    async fn test_load_fail_fast() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", &doc("a", "A"));
        write(dir.path(), "b.json", "not json");

        let result = Loader::new().load(dir.path()).await;
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[tokio::test]
    async fn test_load_skip_collects_errors() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", &doc("a", "A"));
        write(dir.path(), "b.json", "not json");

        let (catalog, stats) = Loader::new()
            .with_error_handling(ErrorHandling::Skip)
            .load(dir.path())
            .await
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(stats.errors.len(), 1);
        assert!(stats.errors[0].file.ends_with("b.json"));
    }

    #[tokio::test]
    async fn test_load_empty_dir() {
        let dir = TempDir::new().unwrap();
        let (catalog, stats) = Loader::new().load(dir.path()).await.unwrap();
        assert!(catalog.is_empty());
        assert_eq!(stats.files_discovered, 0);
    }
}
