//! Locally persisted theme preference.

use crate::repo::kv_repo::KvRepository;
use log::warn;
use serde::{Deserialize, Serialize};

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "statusboard.theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Loads and persists the theme preference.
pub struct ThemeService<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> ThemeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stored preference, or `Light` when absent or unreadable.
    pub fn load(&self) -> ThemePreference {
        let raw = match self.repo.get(THEME_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ThemePreference::default(),
            Err(err) => {
                warn!("event=theme_load module=service status=error error={err}");
                return ThemePreference::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("event=theme_load module=service status=corrupt error={err}");
            ThemePreference::default()
        })
    }

    /// Persists `theme`. Returns whether the write succeeded.
    pub fn save(&self, theme: ThemePreference) -> bool {
        let result = serde_json::to_string(&theme)
            .map_err(|err| err.to_string())
            .and_then(|raw| self.repo.put(THEME_KEY, &raw).map_err(|err| err.to_string()));
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!("event=theme_save module=service status=error error={err}");
                false
            }
        }
    }

    /// Switches light/dark, persists, and returns the new preference.
    pub fn toggle(&self) -> ThemePreference {
        let next = self.load().toggled();
        self.save(next);
        next
    }
}
