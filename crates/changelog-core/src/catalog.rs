//! In-memory lookup service over loaded projects.
//!
//! A [`Catalog`] is built once and never mutated afterwards. Every lookup is
//! a pure read; a missing project or version comes back as `None` or an
//! empty slice.
//!
//! ```rust
//! use changelog_core::{Catalog, Project, Version};
//!
//! let catalog = Catalog::from_projects(vec![
//!     Project::new("demo", "Demo")
//!         .with_version(Version::new("2.0", "2024-02-01"))
//!         .with_version(Version::new("1.0", "2024-01-01")),
//! ]);
//!
//! assert_eq!(catalog.get_latest_version("demo").unwrap().version, "2.0");
//! assert!(catalog.get_version("demo", "9.9").is_none());
//! assert!(catalog.list_versions("missing").is_empty());
//! ```

use std::collections::HashMap;

use crate::model::{Project, Version};
use crate::search;
use crate::Result;

/// Projects keyed by identifier, kept in listing order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    projects: Vec<Project>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from projects in load order.
    ///
    /// A repeated identifier replaces the earlier project's data; the
    /// listing position of the first occurrence is kept.
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let mut catalog = Self::new();
        for project in projects {
            catalog.insert(project);
        }
        catalog
    }

    /// Parse a single JSON document into a one-project catalog.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let project: Project = serde_json::from_str(json)?;
        Ok(Self::from_projects([project]))
    }

    /// Insert a project, returning the one it replaced.
    pub(crate) fn insert(&mut self, project: Project) -> Option<Project> {
        match self.index.get(&project.slug) {
            Some(&pos) => Some(std::mem::replace(&mut self.projects[pos], project)),
            None => {
                self.index.insert(project.slug.clone(), self.projects.len());
                self.projects.push(project);
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    /// Project by identifier.
    pub fn get_project(&self, id: &str) -> Option<&Project> {
        self.index.get(id).map(|&pos| &self.projects[pos])
    }

    /// First version of `project_id` labelled `version_label`.
    pub fn get_version(&self, project_id: &str, version_label: &str) -> Option<&Version> {
        self.get_project(project_id)?.find_version(version_label)
    }

    /// All versions of a project in stored order; empty for an unknown id.
    pub fn list_versions(&self, project_id: &str) -> &[Version] {
        self.get_project(project_id)
            .map(|p| p.versions.as_slice())
            .unwrap_or(&[])
    }

    /// First version in the project's stored sequence.
    pub fn get_latest_version(&self, project_id: &str) -> Option<&Version> {
        self.get_project(project_id)?.latest_version()
    }

    /// All projects in listing order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects whose name or identifier contains `term` (case-insensitive).
    pub fn search(&self, term: &str) -> Vec<&Project> {
        search::filter_projects(&self.projects, term)
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns `true` if no projects are loaded.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
