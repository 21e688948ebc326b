//! Shared router state.

use std::sync::Arc;
use std::time::Instant;

use changelog_core::Catalog;

/// Default client-side search debounce.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Presentation settings that are not part of the data.
#[derive(Clone, Debug)]
pub struct SiteSettings {
    /// Delay before the search box re-filters the project list.
    pub search_debounce_ms: u64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// State handed to every handler. Cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Read-only project data.
    pub catalog: Arc<Catalog>,
    /// Presentation settings.
    pub site: Arc<SiteSettings>,
    /// When the state was created, for `/health`.
    pub started_at: Instant,
}

impl AppState {
    /// Wrap a catalog with default settings.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_settings(catalog, SiteSettings::default())
    }

    /// Wrap a catalog with explicit settings.
    pub fn with_settings(catalog: Catalog, site: SiteSettings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            site: Arc::new(site),
            started_at: Instant::now(),
        }
    }
}
