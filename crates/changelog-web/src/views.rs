//! HTML views.
//!
//! Each page is an askama template fed by a flat view model built from
//! catalog data. Templates only see strings, numbers, booleans and vectors
//! of those, so all presentation decisions (pluralisation, truncation,
//! links, lightbox wrap-around) are made here.

use askama::Template;
use changelog_core::{Catalog, Change, Project, Version, search};

use crate::lightbox::Lightbox;

/// Change badges shown per entry on the project page.
pub const BADGE_PREVIEW: usize = 3;
/// Change descriptions shown per entry on the project page.
pub const DESCRIPTION_PREVIEW: usize = 2;
/// Stagger between card fade-in animations.
const CARD_DELAY_STEP_MS: usize = 50;

// ============================================================================
// Links and text helpers
// ============================================================================

/// `/projects/{slug}`
pub fn project_href(slug: &str) -> String {
    format!("/projects/{}", urlencoding::encode(slug))
}

/// `/projects/{slug}/changelogs/{version}`
pub fn version_href(slug: &str, version: &str) -> String {
    format!(
        "/projects/{}/changelogs/{}",
        urlencoding::encode(slug),
        urlencoding::encode(version)
    )
}

/// Version page with the lightbox open at `index`.
pub fn media_href(slug: &str, version: &str, index: usize) -> String {
    format!("{}?media={index}", version_href(slug, version))
}

/// "1 release" / "N releases".
pub fn releases_text(count: usize) -> String {
    if count == 1 {
        "1 release".to_string()
    } else {
        format!("{count} releases")
    }
}

/// Version label without a leading `v`, for headings.
pub fn display_label(label: &str) -> &str {
    label.strip_prefix('v').unwrap_or(label)
}

// ============================================================================
// Shared view models
// ============================================================================

/// A change-kind badge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    /// Wire name, used as a CSS modifier.
    pub kind: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Icon glyph.
    pub icon: &'static str,
}

impl From<&Change> for Badge {
    fn from(change: &Change) -> Self {
        Self {
            kind: change.kind.as_str(),
            label: change.kind.label(),
            icon: change.kind.icon(),
        }
    }
}

// ============================================================================
// Home
// ============================================================================

/// A project card on the home page.
#[derive(Clone, Debug)]
pub struct ProjectCard {
    pub slug: String,
    pub name: String,
    pub href: String,
    pub has_latest: bool,
    pub latest_label: String,
    pub latest_date: String,
    pub releases_text: String,
    /// Hidden cards stay in the page so the client-side filter can show them.
    pub visible: bool,
    pub delay_ms: usize,
}

/// Project list with search box.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub query: String,
    pub cards: Vec<ProjectCard>,
    pub visible_count: usize,
    pub debounce_ms: u64,
}

impl HomeTemplate {
    /// Every project becomes a card; those not matching `query` are hidden.
    pub fn build(catalog: &Catalog, query: &str, debounce_ms: u64) -> Self {
        let mut visible_count = 0;
        let cards = catalog
            .projects()
            .iter()
            .map(|project| {
                let visible = search::matches(project, query);
                let delay_ms = visible_count * CARD_DELAY_STEP_MS;
                if visible {
                    visible_count += 1;
                }
                let latest = project.latest_version();
                ProjectCard {
                    slug: project.slug.clone(),
                    name: project.name.clone(),
                    href: project_href(&project.slug),
                    has_latest: latest.is_some(),
                    latest_label: latest.map(|v| v.version.clone()).unwrap_or_default(),
                    latest_date: latest.map(|v| v.date.clone()).unwrap_or_default(),
                    releases_text: releases_text(project.release_count()),
                    visible,
                    delay_ms,
                }
            })
            .collect();

        Self {
            query: query.to_string(),
            cards,
            visible_count,
            debounce_ms,
        }
    }
}

// ============================================================================
// Project
// ============================================================================

/// One release in the project's version list.
#[derive(Clone, Debug)]
pub struct VersionEntry {
    pub label: String,
    pub date: String,
    pub href: String,
    pub badges: Vec<Badge>,
    pub more_badges: usize,
    pub previews: Vec<String>,
    pub more_changes: usize,
    pub delay_ms: usize,
}

impl VersionEntry {
    fn build(slug: &str, version: &Version, position: usize) -> Self {
        let total = version.changes.len();
        Self {
            label: version.version.clone(),
            date: version.date.clone(),
            href: version_href(slug, &version.version),
            badges: version.changes.iter().take(BADGE_PREVIEW).map(Badge::from).collect(),
            more_badges: total.saturating_sub(BADGE_PREVIEW),
            previews: version
                .changes
                .iter()
                .take(DESCRIPTION_PREVIEW)
                .map(|c| c.description.clone())
                .collect(),
            more_changes: total.saturating_sub(DESCRIPTION_PREVIEW),
            delay_ms: position * CARD_DELAY_STEP_MS,
        }
    }
}

/// A project's version list.
#[derive(Template)]
#[template(path = "project.html")]
pub struct ProjectTemplate {
    pub name: String,
    pub releases_text: String,
    pub entries: Vec<VersionEntry>,
}

impl ProjectTemplate {
    pub fn build(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            releases_text: releases_text(project.release_count()),
            entries: project
                .versions
                .iter()
                .enumerate()
                .map(|(i, v)| VersionEntry::build(&project.slug, v, i))
                .collect(),
        }
    }
}

// ============================================================================
// Version
// ============================================================================

/// One line of release notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteLine {
    pub text: String,
    /// Lines marked with `**` render bold, markers removed.
    pub emphasized: bool,
    /// Blank lines render as a spacer.
    pub blank: bool,
}

impl NoteLine {
    pub fn parse(line: &str) -> Self {
        let emphasized = line.contains("**");
        Self {
            text: if emphasized {
                line.replace("**", "")
            } else {
                line.to_string()
            },
            emphasized,
            blank: line.trim().is_empty(),
        }
    }
}

/// A change in the flat change list.
#[derive(Clone, Debug)]
pub struct ChangeRow {
    pub badge: Badge,
    pub description: String,
}

/// A gallery thumbnail.
#[derive(Clone, Debug)]
pub struct MediaTile {
    pub number: usize,
    pub url: String,
    pub is_video: bool,
    pub href: String,
}

/// A download link.
#[derive(Clone, Debug)]
pub struct LinkRow {
    pub label: String,
    pub url: String,
}

/// A credit entry.
#[derive(Clone, Debug)]
pub struct CreditRow {
    pub name: String,
    pub has_url: bool,
    pub url: String,
    pub reason: String,
}

/// The open lightbox modal.
#[derive(Clone, Debug, Default)]
pub struct LightboxView {
    pub url: String,
    pub is_video: bool,
    pub position: usize,
    pub total: usize,
    pub prev_href: String,
    pub next_href: String,
    pub close_href: String,
}

/// A single version's detail page.
#[derive(Template)]
#[template(path = "version.html")]
pub struct VersionTemplate {
    pub project_name: String,
    pub project_href: String,
    pub label: String,
    pub heading: String,
    pub date: String,
    pub has_thumbnail: bool,
    pub thumbnail: String,
    pub notes: Vec<NoteLine>,
    pub changes: Vec<ChangeRow>,
    pub media: Vec<MediaTile>,
    pub downloads: Vec<LinkRow>,
    pub credits: Vec<CreditRow>,
    pub has_lightbox: bool,
    pub lightbox: LightboxView,
}

impl VersionTemplate {
    pub fn build(project: &Project, version: &Version, lightbox: Option<Lightbox>) -> Self {
        let slug = project.slug.as_str();
        let label = version.version.as_str();

        let lightbox_view = lightbox.and_then(|lb| {
            let item = project.media.get(lb.index())?;
            Some(LightboxView {
                url: item.url.clone(),
                is_video: item.kind == changelog_core::MediaKind::Video,
                position: lb.position(),
                total: lb.total(),
                prev_href: media_href(slug, label, lb.previous().index()),
                next_href: media_href(slug, label, lb.next().index()),
                close_href: version_href(slug, label),
            })
        });

        Self {
            project_name: project.name.clone(),
            project_href: project_href(slug),
            label: label.to_string(),
            heading: display_label(label).to_string(),
            date: version.date.clone(),
            has_thumbnail: project.thumbnail.is_some(),
            thumbnail: project.thumbnail.clone().unwrap_or_default(),
            notes: version
                .notes
                .as_deref()
                .map(|n| n.lines().map(NoteLine::parse).collect())
                .unwrap_or_default(),
            changes: version
                .changes
                .iter()
                .map(|c| ChangeRow {
                    badge: Badge::from(c),
                    description: c.description.clone(),
                })
                .collect(),
            media: project
                .media
                .iter()
                .enumerate()
                .map(|(i, item)| MediaTile {
                    number: i + 1,
                    url: item.url.clone(),
                    is_video: item.kind == changelog_core::MediaKind::Video,
                    href: media_href(slug, label, i),
                })
                .collect(),
            downloads: project
                .download_links
                .iter()
                .map(|l| LinkRow {
                    label: l.label.clone(),
                    url: l.url.clone(),
                })
                .collect(),
            credits: project
                .credits
                .iter()
                .map(|c| CreditRow {
                    name: c.name.clone(),
                    has_url: c.url.is_some(),
                    url: c.url.clone().unwrap_or_default(),
                    reason: c.reason.clone(),
                })
                .collect(),
            has_lightbox: lightbox_view.is_some(),
            lightbox: lightbox_view.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Not found
// ============================================================================

/// Placeholder for an unknown project or version.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub heading: String,
    pub message: String,
}

impl NotFoundTemplate {
    /// Unknown project.
    pub fn project(slug: &str) -> Self {
        Self {
            heading: "Project not found".to_string(),
            message: format!("The project \"{slug}\" does not exist."),
        }
    }

    /// Unknown version, or a version under an unknown project.
    pub fn version(project_name: &str, version: &str) -> Self {
        Self {
            heading: "Not found".to_string(),
            message: format!("The changelog for {project_name} {version} does not exist."),
        }
    }

    /// Any other unknown path.
    pub fn page() -> Self {
        Self {
            heading: "Page not found".to_string(),
            message: "There is nothing at this address.".to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
