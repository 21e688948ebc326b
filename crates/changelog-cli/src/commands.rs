//! Data commands: `serve`, `projects`, `versions`, `show`, `validate`.
//!
//! Text output is produced by the `format_*` functions so it can be checked
//! without capturing stdout.

use std::io::Write;
use std::path::Path;

use changelog_core::validate::Severity;
use changelog_core::{
    Catalog, Diagnostic, ErrorHandling, LoadStats, Loader, Project, Version, validate_catalog,
};
use changelog_web::Server;
use changelog_web::api::ProjectSummary;

use crate::cli::Command;
use crate::config::ChangelogConfig;
use crate::{Error, Result};

/// Run a non-`config` command.
pub async fn execute(command: Command, config: &ChangelogConfig) -> Result<()> {
    match command {
        Command::Serve { host, port } => cmd_serve(config, host, port).await,
        Command::Projects { search, json } => {
            cmd_projects(config, search.as_deref().unwrap_or(""), json).await
        }
        Command::Versions { slug, json } => cmd_versions(config, &slug, json).await,
        Command::Show {
            slug,
            version,
            json,
        } => cmd_show(config, &slug, version.as_deref(), json).await,
        Command::Validate => cmd_validate(config).await,
        Command::Config { .. } => Ok(()),
    }
}

/// Load the catalog, skipping documents that fail to parse.
pub async fn load_catalog(dir: &Path) -> Result<(Catalog, LoadStats)> {
    let loaded = Loader::new()
        .with_error_handling(ErrorHandling::Skip)
        .load(dir)
        .await?;
    Ok(loaded)
}

fn emit(text: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn emit_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    emit(&format!("{}\n", serde_json::to_string_pretty(value)?))
}

// ============================================================================
// Commands
// ============================================================================

/// Load data and serve until ctrl-c.
pub async fn cmd_serve(
    config: &ChangelogConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let (server, stats) = Server::load(&config.data_dir).await?;
    if stats.files_skipped > 0 {
        tracing::warn!(
            skipped = stats.files_skipped,
            "some documents failed to load; run `changelog validate` for details"
        );
    }

    let mut server_config = config.server_config();
    if let Some(host) = host {
        server_config.host = host;
    }
    if let Some(port) = port {
        server_config.port = port;
    }

    server
        .with_config(server_config)
        .with_site_settings(config.site_settings())
        .serve()
        .await?;
    Ok(())
}

/// List projects, optionally filtered.
pub async fn cmd_projects(config: &ChangelogConfig, search: &str, json: bool) -> Result<()> {
    let (catalog, _) = load_catalog(&config.data_dir).await?;
    let projects = catalog.search(search);
    if json {
        let summaries: Vec<ProjectSummary> =
            projects.into_iter().map(ProjectSummary::from).collect();
        emit_json(&summaries)
    } else {
        emit(&format_projects(&projects))
    }
}

/// List one project's versions.
pub async fn cmd_versions(config: &ChangelogConfig, slug: &str, json: bool) -> Result<()> {
    let (catalog, _) = load_catalog(&config.data_dir).await?;
    let project = catalog
        .get_project(slug)
        .ok_or_else(|| Error::NotFound(format!("project '{slug}'")))?;
    if json {
        emit_json(catalog.list_versions(slug))
    } else {
        emit(&format_versions(project))
    }
}

/// Print a version; the latest when `version` is `None`.
pub async fn cmd_show(
    config: &ChangelogConfig,
    slug: &str,
    version: Option<&str>,
    json: bool,
) -> Result<()> {
    let (catalog, _) = load_catalog(&config.data_dir).await?;
    let project = catalog
        .get_project(slug)
        .ok_or_else(|| Error::NotFound(format!("project '{slug}'")))?;
    let found = match version {
        Some(label) => catalog
            .get_version(slug, label)
            .ok_or_else(|| Error::NotFound(format!("version '{label}' of project '{slug}'")))?,
        None => catalog
            .get_latest_version(slug)
            .ok_or_else(|| Error::NotFound(format!("latest version of project '{slug}'")))?,
    };
    if json {
        emit_json(found)
    } else {
        emit(&format_version(project, found))
    }
}

/// Load every document, report load errors and diagnostics.
pub async fn cmd_validate(config: &ChangelogConfig) -> Result<()> {
    let (catalog, stats) = load_catalog(&config.data_dir).await?;
    let diagnostics = validate_catalog(&catalog);
    emit(&format_validation(&catalog, &stats, &diagnostics))?;
    if stats.errors.is_empty() {
        Ok(())
    } else {
        Err(Error::LoadFailed {
            count: stats.errors.len(),
        })
    }
}

// ============================================================================
// Text formatting
// ============================================================================

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(str::len).fold(header.len(), usize::max)
}

/// Project table: slug, name, latest version, release count.
pub fn format_projects(projects: &[&Project]) -> String {
    if projects.is_empty() {
        return "No projects found\n".to_string();
    }

    let latest: Vec<&str> = projects
        .iter()
        .map(|p| p.latest_version().map_or("-", |v| v.version.as_str()))
        .collect();
    let slug_w = column_width("SLUG", projects.iter().map(|p| p.slug.as_str()));
    let name_w = column_width("NAME", projects.iter().map(|p| p.name.as_str()));
    let latest_w = column_width("LATEST", latest.iter().copied());

    let mut lines = vec![format!(
        "{:<slug_w$}  {:<name_w$}  {:<latest_w$}  RELEASES",
        "SLUG", "NAME", "LATEST"
    )];
    for (project, latest) in projects.iter().zip(&latest) {
        lines.push(format!(
            "{:<slug_w$}  {:<name_w$}  {:<latest_w$}  {}",
            project.slug,
            project.name,
            latest,
            project.release_count()
        ));
    }
    lines.join("\n") + "\n"
}

/// One line per version, newest first.
pub fn format_versions(project: &Project) -> String {
    if project.versions.is_empty() {
        return format!("{} has no releases\n", project.name);
    }

    let width = column_width("", project.versions.iter().map(|v| v.version.as_str()));
    let lines: Vec<String> = project
        .versions
        .iter()
        .map(|v| {
            let count = v.changes.len();
            let noun = if count == 1 { "change" } else { "changes" };
            format!("{:<width$}  {}  {count} {noun}", v.version, v.date)
        })
        .collect();
    lines.join("\n") + "\n"
}

/// Heading, notes, then one line per change with its icon and label.
pub fn format_version(project: &Project, version: &Version) -> String {
    let mut lines = vec![
        format!("{} {}", project.name, version.version),
        format!("Released {}", version.date),
    ];

    let notes = version.note_lines();
    if !notes.is_empty() {
        lines.push(String::new());
        lines.extend(notes.iter().map(|line| line.replace("**", "")));
    }

    if !version.changes.is_empty() {
        lines.push(String::new());
        let width = column_width("", version.changes.iter().map(|c| c.kind.label()));
        lines.extend(version.changes.iter().map(|c| {
            format!("  {} {:<width$}  {}", c.kind.icon(), c.kind.label(), c.description)
        }));
    }
    lines.join("\n") + "\n"
}

/// Load errors, diagnostics, and a summary line.
pub fn format_validation(
    catalog: &Catalog,
    stats: &LoadStats,
    diagnostics: &[Diagnostic],
) -> String {
    let mut lines: Vec<String> = stats
        .errors
        .iter()
        .map(|e| format!("error: {}: {}", e.file.display(), e.message))
        .collect();
    lines.extend(
        stats
            .duplicates
            .iter()
            .map(|slug| format!("warning: {slug}: defined in more than one document")),
    );
    lines.extend(diagnostics.iter().map(Diagnostic::to_string));

    let warnings = stats.duplicates.len()
        + diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
    lines.push(format!(
        "{} project(s) from {} document(s): {} error(s), {} warning(s)",
        catalog.len(),
        stats.files_discovered,
        stats.errors.len(),
        warnings
    ));
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use changelog_core::ChangeKind;
    use changelog_core::loader::LoadError;

    fn voyager() -> Project {
        Project::new("voyager", "VoyagerApp")
            .with_version(
                Version::new("2.0", "2024-03-01")
                    .with_notes("**Big** release\n\n  Thanks  ")
                    .with_change(ChangeKind::Added, "Warp drive")
                    .with_change(ChangeKind::Removed, "Sails"),
            )
            .with_version(Version::new("1.0", "2024-01-01").with_change(ChangeKind::Added, "Hull"))
    }

    // ------------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------------

    #[test]
    fn test_format_projects_table() {
        let project = voyager();
        let empty = Project::new("x", "X");
        let text = format_projects(&[&project, &empty]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("SLUG"));
        assert!(lines[1].starts_with("voyager  VoyagerApp  2.0"));
        assert!(lines[1].ends_with('2'));
        assert!(lines[2].contains(" - "));
    }

    #[test]
    fn test_format_projects_empty() {
        assert_eq!(format_projects(&[]), "No projects found\n");
    }

    #[test]
    fn test_format_versions() {
        let text = format_versions(&voyager());
        assert_eq!(text, "2.0  2024-03-01  2 changes\n1.0  2024-01-01  1 change\n");
        assert_eq!(format_versions(&Project::new("e", "Empty")), "Empty has no releases\n");
    }

    #[test]
    fn test_format_version() {
        let project = voyager();
        let text = format_version(&project, &project.versions[0]);
        assert!(text.starts_with("VoyagerApp 2.0\nReleased 2024-03-01\n\nBig release\nThanks\n"));
        assert!(text.contains("  ▲ Added    Warp drive"));
        assert!(text.contains("  ✕ Removed  Sails"));
    }

    #[test]
    fn test_format_validation_summary() {
        let catalog = Catalog::from_projects([voyager()]);
        let stats = LoadStats {
            files_discovered: 2,
            projects_loaded: 1,
            files_skipped: 1,
            duplicates: Vec::new(),
            errors: vec![LoadError {
                file: "bad.json".into(),
                message: "oops".to_string(),
            }],
        };
        let diagnostics = validate_catalog(&catalog);
        let text = format_validation(&catalog, &stats, &diagnostics);
        assert!(text.contains("error: bad.json: oops"));
        assert!(text.ends_with("1 project(s) from 2 document(s): 1 error(s), 0 warning(s)\n"));
    }

    // ------------------------------------------------------------------------
    // Commands against a data directory
    // ------------------------------------------------------------------------

    fn config_for(dir: &Path) -> ChangelogConfig {
        ChangelogConfig {
            data_dir: dir.to_path_buf(),
            ..ChangelogConfig::default()
        }
    }

    fn write_voyager(dir: &Path) {
        std::fs::write(
            dir.join("voyager.json"),
            serde_json::to_string(&voyager()).unwrap(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_show_missing_version_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        write_voyager(dir.path());

        let err = cmd_show(&config_for(dir.path()), "voyager", Some("9.9"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.to_string().ends_with("not found"));
    }

    #[tokio::test]
    async fn test_versions_unknown_project() {
        let dir = tempfile::TempDir::new().unwrap();
        write_voyager(dir.path());

        let err = cmd_versions(&config_for(dir.path()), "nope", false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_validate_fails_on_bad_document() {
        let dir = tempfile::TempDir::new().unwrap();
        write_voyager(dir.path());
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();

        let err = cmd_validate(&config_for(dir.path())).await.unwrap_err();
        assert!(matches!(err, Error::LoadFailed { count: 1 }));
    }

    #[tokio::test]
    async fn test_validate_clean_data() {
        let dir = tempfile::TempDir::new().unwrap();
        write_voyager(dir.path());
        cmd_validate(&config_for(dir.path())).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_data_dir_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = cmd_projects(&config_for(&dir.path().join("absent")), "", false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Core(_)));
    }
}
