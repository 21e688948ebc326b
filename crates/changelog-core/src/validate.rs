//! Data-quality checks over a loaded catalog.
//!
//! Nothing here rejects data: the catalog serves whatever parsed. These
//! diagnostics back the `validate` command so authors can spot documents
//! that will render oddly or have unreachable versions.

use std::collections::HashSet;
use std::fmt;

use crate::catalog::Catalog;
use crate::model::Project;

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Renders, but probably not as intended.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// One finding about a project or version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious it is.
    pub severity: Severity,
    /// Project identifier.
    pub project: String,
    /// Version label, when the finding is about one version.
    pub version: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    fn warning(project: &str, version: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            project: project.to_string(),
            version: version.map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}: {}@{}: {}", self.severity, self.project, v, self.message),
            None => write!(f, "{}: {}: {}", self.severity, self.project, self.message),
        }
    }
}

/// Returns `true` if `slug` is non-empty and made of ASCII alphanumerics,
/// `-`, `_` or `.`.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Check every project in the catalog.
pub fn validate_catalog(catalog: &Catalog) -> Vec<Diagnostic> {
    catalog.projects().iter().flat_map(validate_project).collect()
}

/// Check a single project.
pub fn validate_project(project: &Project) -> Vec<Diagnostic> {
    let slug = project.slug.as_str();
    let mut out = Vec::new();

    if !is_url_safe(slug) {
        out.push(Diagnostic::warning(
            slug,
            None,
            "identifier is empty or not URL-safe",
        ));
    }

    if project.versions.is_empty() {
        out.push(Diagnostic::warning(slug, None, "project has no versions"));
    }

    if project.thumbnail.as_deref().is_some_and(|t| t.trim().is_empty()) {
        out.push(Diagnostic::warning(slug, None, "thumbnail URL is empty"));
    }

    for (idx, item) in project.media.iter().enumerate() {
        if item.url.trim().is_empty() {
            out.push(Diagnostic::warning(
                slug,
                None,
                format!("media item {} has an empty URL", idx + 1),
            ));
        }
    }

    for link in &project.download_links {
        if link.url.trim().is_empty() {
            out.push(Diagnostic::warning(
                slug,
                None,
                format!("download link '{}' has an empty URL", link.label),
            ));
        }
    }

    let mut seen = HashSet::new();
    for version in &project.versions {
        let label = version.version.as_str();
        if !seen.insert(label) {
            out.push(Diagnostic::warning(
                slug,
                Some(label),
                "duplicate version label; only the first is reachable",
            ));
        }
        if version.changes.is_empty() {
            out.push(Diagnostic::warning(slug, Some(label), "version has no changes"));
        }
    }

    out
}
