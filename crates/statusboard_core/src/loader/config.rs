//! Loader configuration.
//!
//! # Responsibility
//! - Describe where the remote and local copies of the dashboard documents live.
//! - Derive the ordered candidate locations each data source tries.
//!
//! # Invariants
//! - `Default` reproduces the production deployment layout.
//! - Candidate order follows `local_prefixes` order.

use crate::loader::candidates::resolve_reference;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Raw-content host serving the tracked repository.
pub const DEFAULT_REMOTE_ORIGIN: &str = "https://raw.githubusercontent.com";
/// `owner/name` of the repository that publishes the documents.
pub const DEFAULT_REMOTE_REPO: &str = "haimXseb/xp-map";
pub const DEFAULT_REMOTE_BRANCH: &str = "main";
/// Repository-relative path of the sync summary document.
pub const SYNC_DOCUMENT_PATH: &str = "dashboard-sync.json";
/// Repository-relative path of the full data document.
pub const FULL_DOCUMENT_PATH: &str = "data/data.json";
/// Prefixes tried for local copies, covering the supported base paths.
pub const DEFAULT_LOCAL_PREFIXES: &[&str] = &["/xp-map/", "/", "./", "../"];

/// Where local copies of the documents are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOrigin {
    /// Static host origin, e.g. `http://localhost:5173`.
    Http(String),
    /// Static-site directory on disk.
    Directory(PathBuf),
}

/// Configuration for [`crate::loader::ProjectDataLoader::from_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub remote_origin: String,
    pub remote_repo: String,
    pub remote_branch: String,
    pub sync_path: String,
    pub full_path: String,
    pub local_origin: LocalOrigin,
    pub local_prefixes: Vec<String>,
    /// Path of the dashboard page; relative prefixes resolve against it.
    pub page_base: String,
    /// Per-request timeout. `None` waits for the network stack.
    pub request_timeout: Option<Duration>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            remote_origin: DEFAULT_REMOTE_ORIGIN.to_string(),
            remote_repo: DEFAULT_REMOTE_REPO.to_string(),
            remote_branch: DEFAULT_REMOTE_BRANCH.to_string(),
            sync_path: SYNC_DOCUMENT_PATH.to_string(),
            full_path: FULL_DOCUMENT_PATH.to_string(),
            local_origin: LocalOrigin::Directory(PathBuf::from(".")),
            local_prefixes: DEFAULT_LOCAL_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
            page_base: "/".to_string(),
            request_timeout: None,
        }
    }
}

impl LoaderConfig {
    /// Validates declaration-level invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("remote_origin", &self.remote_origin),
            ("remote_repo", &self.remote_repo),
            ("remote_branch", &self.remote_branch),
            ("sync_path", &self.sync_path),
            ("full_path", &self.full_path),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }

        if !is_http_origin(&self.remote_origin) {
            return Err(ConfigError::InvalidOrigin(self.remote_origin.clone()));
        }
        if let LocalOrigin::Http(origin) = &self.local_origin {
            if !is_http_origin(origin) {
                return Err(ConfigError::InvalidOrigin(origin.clone()));
            }
        }
        if self.local_prefixes.is_empty() {
            return Err(ConfigError::NoLocalCandidates);
        }
        Ok(())
    }

    /// Remote location (`/owner/repo/branch/path`) of one document.
    pub fn remote_location(&self, path: &str) -> String {
        format!(
            "/{}/{}/{}",
            self.remote_repo.trim_matches('/'),
            self.remote_branch.trim_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn remote_sync_location(&self) -> String {
        self.remote_location(&self.sync_path)
    }

    pub fn remote_full_location(&self) -> String {
        self.remote_location(&self.full_path)
    }

    /// Ordered local candidate locations for one document.
    pub fn local_candidates(&self, path: &str) -> Vec<String> {
        self.local_prefixes
            .iter()
            .map(|prefix| resolve_reference(&self.page_base, &format!("{prefix}{path}")))
            .collect()
    }
}

fn is_http_origin(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyField(&'static str),
    InvalidOrigin(String),
    NoLocalCandidates,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "loader config field `{field}` must not be empty"),
            Self::InvalidOrigin(value) => {
                write!(f, "origin must start with http:// or https://, got `{value}`")
            }
            Self::NoLocalCandidates => write!(f, "at least one local prefix is required"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, LoaderConfig, LocalOrigin};

    #[test]
    fn default_remote_locations_follow_repo_layout() {
        let config = LoaderConfig::default();
        assert_eq!(
            config.remote_sync_location(),
            "/haimXseb/xp-map/main/dashboard-sync.json"
        );
        assert_eq!(
            config.remote_full_location(),
            "/haimXseb/xp-map/main/data/data.json"
        );
    }

    #[test]
    fn local_candidates_keep_prefix_order() {
        let config = LoaderConfig {
            page_base: "/xp-map/dashboard/".to_string(),
            ..LoaderConfig::default()
        };
        assert_eq!(
            config.local_candidates("data/data.json"),
            vec![
                "/xp-map/data/data.json".to_string(),
                "/data/data.json".to_string(),
                "/xp-map/dashboard/data/data.json".to_string(),
                "/xp-map/data/data.json".to_string(),
            ]
        );
    }

    #[test]
    fn default_config_has_four_candidates_per_document() {
        let config = LoaderConfig::default();
        assert_eq!(config.local_candidates("dashboard-sync.json").len(), 4);
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn validate_rejects_blank_fields_and_bad_origins() {
        let blank = LoaderConfig {
            remote_branch: "  ".to_string(),
            ..LoaderConfig::default()
        };
        assert_eq!(
            blank.validate(),
            Err(ConfigError::EmptyField("remote_branch"))
        );

        let bad_local = LoaderConfig {
            local_origin: LocalOrigin::Http("localhost:5173".to_string()),
            ..LoaderConfig::default()
        };
        assert_eq!(
            bad_local.validate(),
            Err(ConfigError::InvalidOrigin("localhost:5173".to_string()))
        );
    }
}
