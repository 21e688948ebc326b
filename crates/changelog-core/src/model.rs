//! Changelog data model.
//!
//! One [`Project`] per source document. Field names follow the on-disk JSON
//! format (`slug`, `downloadLinks`, `changes`, `type`, ...), so a document
//! round-trips through serde unchanged.
//!
//! ```rust
//! use changelog_core::model::{ChangeKind, Project};
//!
//! let project: Project = serde_json::from_str(r#"{
//!     "slug": "demo",
//!     "name": "Demo",
//!     "changes": [
//!         { "version": "1.0", "date": "2024-01-01",
//!           "changes": [{ "type": "added", "description": "First release" }] }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(project.latest_version().unwrap().version, "1.0");
//! assert_eq!(project.versions[0].changes[0].kind, ChangeKind::Added);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Project
// ============================================================================

/// A trackable software unit owning zero or more versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique, URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Banner image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Gallery items, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
    /// Download links, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub download_links: Vec<DownloadLink>,
    /// Credits, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credits: Vec<Credit>,
    /// Releases in stored order, newest first by convention.
    #[serde(rename = "changes", default)]
    pub versions: Vec<Version>,
}

impl Project {
    /// Create a project with no versions or extras.
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            thumbnail: None,
            media: Vec::new(),
            download_links: Vec::new(),
            credits: Vec::new(),
            versions: Vec::new(),
        }
    }

    /// Append a version to the end of the stored sequence.
    pub fn with_version(mut self, version: Version) -> Self {
        self.versions.push(version);
        self
    }

    /// First version in stored order.
    ///
    /// "Latest" is positional; dates are never compared.
    pub fn latest_version(&self) -> Option<&Version> {
        self.versions.first()
    }

    /// First version whose label equals `label`.
    pub fn find_version(&self, label: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.version == label)
    }

    /// Number of releases.
    pub fn release_count(&self) -> usize {
        self.versions.len()
    }
}

// ============================================================================
// Version
// ============================================================================

/// One release of a project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Version label; not required to be semantic.
    pub version: String,
    /// Release date, display-only.
    pub date: String,
    /// Free-text release notes; may span several lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Changes in this release.
    #[serde(default)]
    pub changes: Vec<Change>,
}

impl Version {
    /// Create a version with no notes or changes.
    pub fn new(version: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: date.into(),
            notes: None,
            changes: Vec::new(),
        }
    }

    /// Set the release notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Append a change.
    pub fn with_change(mut self, kind: ChangeKind, description: impl Into<String>) -> Self {
        self.changes.push(Change {
            kind,
            description: description.into(),
        });
        self
    }

    /// Non-empty note lines, trimmed.
    pub fn note_lines(&self) -> Vec<&str> {
        self.notes
            .as_deref()
            .map(|notes| {
                notes
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// Change
// ============================================================================

/// One atomic release note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Category tag.
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Free-text description.
    pub description: String,
}

/// Fixed change categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// New functionality.
    Added,
    /// Bug fix.
    Fixed,
    /// Behavior change.
    Changed,
    /// Removed functionality.
    Removed,
}

impl ChangeKind {
    /// All kinds in display order.
    pub const ALL: [ChangeKind; 4] = [
        ChangeKind::Added,
        ChangeKind::Fixed,
        ChangeKind::Changed,
        ChangeKind::Removed,
    ];

    /// Wire name (`added`, `fixed`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Fixed => "fixed",
            Self::Changed => "changed",
            Self::Removed => "removed",
        }
    }

    /// Capitalized display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Fixed => "Fixed",
            Self::Changed => "Changed",
            Self::Removed => "Removed",
        }
    }

    /// Badge icon.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Added => "▲",
            Self::Fixed => "✓",
            Self::Changed => "◆",
            Self::Removed => "✕",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Extras: media, downloads, credits
// ============================================================================

/// A gallery entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Image or video.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Location reference.
    pub url: String,
}

/// Kind of gallery entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video clip.
    Video,
}

impl MediaKind {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// A labelled download location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    /// Link text.
    pub label: String,
    /// Location.
    pub url: String,
}

/// Attribution for a contributor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    /// Contributor name.
    pub name: String,
    /// Optional profile or homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// What they are credited for.
    pub reason: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_DOC: &str = r#"{
        "slug": "voyager",
        "name": "VoyagerApp",
        "thumbnail": "/static/voyager.png",
        "media": [
            { "type": "image", "url": "/static/a.png" },
            { "type": "video", "url": "/static/b.mp4" }
        ],
        "downloadLinks": [{ "label": "Windows", "url": "https://example.com/win" }],
        "credits": [
            { "name": "Ana", "url": "https://example.com/ana", "reason": "Icons" },
            { "name": "Budi", "reason": "Testing" }
        ],
        "changes": [
            {
                "version": "2.0",
                "date": "2024-02-01",
                "notes": "Big release\n\nThanks all",
                "changes": [
                    { "type": "added", "description": "Dark mode" },
                    { "type": "removed", "description": "Legacy sync" }
                ]
            },
            { "version": "1.0", "date": "2024-01-01", "changes": [] }
        ]
    }"#;

    #[test]
    fn test_parse_full_document() {
        let project: Project = serde_json::from_str(FULL_DOC).unwrap();
        assert_eq!(project.slug, "voyager");
        assert_eq!(project.thumbnail.as_deref(), Some("/static/voyager.png"));
        assert_eq!(project.media.len(), 2);
        assert_eq!(project.media[1].kind, MediaKind::Video);
        assert_eq!(project.download_links[0].label, "Windows");
        assert_eq!(project.credits[1].url, None);
        assert_eq!(project.release_count(), 2);
        assert_eq!(project.versions[0].changes[1].kind, ChangeKind::Removed);
    }

    #[test]
    fn test_parse_minimal_document() {
        let project: Project = serde_json::from_str(r#"{"slug":"x","name":"X"}"#).unwrap();
        assert!(project.versions.is_empty());
        assert!(project.media.is_empty());
        assert!(project.latest_version().is_none());
    }

    #[test]
    fn test_unknown_change_type_rejected() {
        let doc = r#"{"slug":"x","name":"X","changes":[
            {"version":"1","date":"d","changes":[{"type":"security","description":"d"}]}
        ]}"#;
        assert!(serde_json::from_str::<Project>(doc).is_err());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let project: Project = serde_json::from_str(FULL_DOC).unwrap();
        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("downloadLinks").is_some());
        assert_eq!(value["changes"][0]["changes"][0]["type"], "added");
        assert_eq!(value["media"][0]["type"], "image");
        assert!(value["credits"][1].get("url").is_none());
    }

    #[test]
    fn test_latest_version_is_positional() {
        let project = Project::new("demo", "Demo")
            .with_version(Version::new("1.0", "2025-01-01"))
            .with_version(Version::new("2.0", "2024-01-01"));
        assert_eq!(project.latest_version().unwrap().version, "1.0");
    }

    #[test]
    fn test_find_version_returns_first_match() {
        let project = Project::new("demo", "Demo")
            .with_version(Version::new("1.0", "first"))
            .with_version(Version::new("1.0", "second"));
        assert_eq!(project.find_version("1.0").unwrap().date, "first");
        assert!(project.find_version("9.9").is_none());
    }

    #[test]
    fn test_note_lines_skip_blank_lines() {
        let version = Version::new("1.0", "d").with_notes("Line one\n\n  Line two  \n");
        assert_eq!(version.note_lines(), vec!["Line one", "Line two"]);
        assert!(Version::new("1.0", "d").note_lines().is_empty());
    }

    #[test]
    fn test_change_kind_labels() {
        for kind in ChangeKind::ALL {
            assert_eq!(kind.label().to_lowercase(), kind.as_str());
        }
        assert_eq!(ChangeKind::Fixed.icon(), "✓");
        assert_eq!(ChangeKind::Changed.to_string(), "changed");
    }
}
