//! Data loading and view state for the project status dashboard.
//! Owns the fallback chain, the document model, and locally persisted UI state.

pub mod db;
pub mod files;
pub mod insight;
pub mod loader;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod site;

pub use files::{FileDocument, FileEndpoint, FileResponse};
pub use loader::config::{ConfigError, LoaderConfig, LocalOrigin};
pub use loader::source::{DataSource, LocalSource, RemoteSource, SourceError};
pub use loader::transport::{DirectoryTransport, FetchError, HttpTransport, Transport};
pub use loader::{DataOrigin, ProjectDataLoader};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::ProjectData;
pub use model::status::{BadgeStatus, CheckStatus, WorkStatus};
pub use model::sync_doc::SyncDocument;
pub use repo::kv_repo::{KvRepository, RepoError, RepoResult, SqliteKvRepository};
pub use service::checklist_service::{ChecklistService, ChecklistState, PIPELINE_CHECKLIST_KEY};
pub use service::theme_service::{ThemePreference, ThemeService, THEME_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
