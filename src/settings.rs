//! Feature flags
//!
//! Read once at startup from the page URL or LocalStorage, written back
//! whenever the player toggles a flag.

use serde::{Deserialize, Serialize};

/// Process-wide feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Features {
    /// One-shot rod cast when the hook first drops
    pub casting: bool,
}

impl Features {
    /// URL query parameter that forces casting on (`?cast=1`)
    pub const QUERY_PARAM: &'static str = "cast";

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fd_casting";

    /// Combine the two flag sources; either one can switch casting on
    pub fn from_sources(query_value: Option<&str>, stored_value: Option<&str>) -> Self {
        Self {
            casting: query_value == Some("1") || stored_value == Some("1"),
        }
    }

    /// Stored representation of the casting flag
    pub fn stored_value(&self) -> &'static str {
        if self.casting { "1" } else { "0" }
    }

    /// Load flags from the URL and LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };

        let query_value = window
            .location()
            .href()
            .ok()
            .and_then(|href| web_sys::Url::new(&href).ok())
            .and_then(|url| url.search_params().get(Self::QUERY_PARAM));

        let stored_value = window
            .local_storage()
            .ok()
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        let features = Self::from_sources(query_value.as_deref(), stored_value.as_deref());
        log::info!("Casting feature: {}", features.casting);
        features
    }

    /// Save flags to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage {
            Some(storage) => {
                if storage
                    .set_item(Self::STORAGE_KEY, self.stored_value())
                    .is_err()
                {
                    log::warn!("Could not persist feature flags");
                }
            }
            None => log::warn!("LocalStorage unavailable, feature flags not saved"),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
