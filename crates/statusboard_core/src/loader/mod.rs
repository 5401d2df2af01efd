//! Project data loader.
//!
//! # Responsibility
//! - Resolve one `ProjectData` through an ordered chain of sources
//!   (remote, then local), falling back to the built-in document.
//! - Memoize the first successfully sourced document per loader instance.
//!
//! # Invariants
//! - `load` never fails and never panics on source errors.
//! - Sources are tried strictly in order; a later source runs only after
//!   every earlier one failed.
//! - Only sourced documents are cached; the fallback document never is.
//! - Once cached, every caller receives the same `Arc` and no transport is
//!   touched again until `clear_cache`.

pub mod candidates;
pub mod config;
pub mod merge;
pub mod source;
pub mod transport;

use crate::model::project::ProjectData;
use config::{ConfigError, LoaderConfig, LocalOrigin};
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use source::{DataSource, LocalSource, RemoteSource};
use std::sync::Arc;
use std::time::Instant;
use transport::{DirectoryTransport, HttpTransport, Transport};

/// Where a loaded document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    /// Served from the loader cache.
    Cache,
    /// Produced by the named source on this call.
    Source(String),
    /// Built-in document; every source failed.
    Fallback,
}

/// Every source in the chain failed.
struct ChainExhausted;

/// Chain-of-sources loader with a per-instance cache.
pub struct ProjectDataLoader {
    sources: Vec<Box<dyn DataSource>>,
    cache: OnceCell<Arc<ProjectData>>,
}

impl ProjectDataLoader {
    /// Creates a loader over `sources`, tried in the given order.
    pub fn new(sources: Vec<Box<dyn DataSource>>) -> Self {
        Self {
            sources,
            cache: OnceCell::new(),
        }
    }

    /// Builds the production chain (remote over HTTP, then local copies).
    ///
    /// # Errors
    /// - Returns `ConfigError` when `config` fails validation.
    pub fn from_config(config: &LoaderConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let remote: Arc<dyn Transport> = Arc::new(HttpTransport::new(
            config.remote_origin.clone(),
            config.request_timeout,
        ));
        let local: Arc<dyn Transport> = match &config.local_origin {
            LocalOrigin::Http(origin) => {
                Arc::new(HttpTransport::new(origin.clone(), config.request_timeout))
            }
            LocalOrigin::Directory(root) => Arc::new(DirectoryTransport::new(root.clone())),
        };

        Ok(Self::new(vec![
            Box::new(RemoteSource::from_config(remote, config)),
            Box::new(LocalSource::from_config(local, config)),
        ]))
    }

    /// Source names in chain order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    /// Returns the project document; see [`Self::load_with_origin`].
    pub fn load(&self) -> Arc<ProjectData> {
        self.load_with_origin().0
    }

    /// Returns the project document and where it came from.
    ///
    /// Concurrent first calls block on one resolution; all of them observe
    /// the same cached document.
    pub fn load_with_origin(&self) -> (Arc<ProjectData>, DataOrigin) {
        if let Some(cached) = self.cache.get() {
            debug!("event=data_load module=loader status=ok origin=cache");
            return (Arc::clone(cached), DataOrigin::Cache);
        }

        let mut resolved_by: Option<String> = None;
        let result = self.cache.get_or_try_init(|| {
            let (name, data) = self.resolve_from_sources()?;
            resolved_by = Some(name);
            Ok::<_, ChainExhausted>(Arc::new(data))
        });

        match result {
            Ok(data) => {
                let origin = match resolved_by {
                    Some(name) => DataOrigin::Source(name),
                    None => DataOrigin::Cache,
                };
                (Arc::clone(data), origin)
            }
            Err(ChainExhausted) => {
                warn!(
                    "event=data_load module=loader status=fallback sources={}",
                    self.sources.len()
                );
                (Arc::new(ProjectData::fallback()), DataOrigin::Fallback)
            }
        }
    }

    /// Cached document, if any source has succeeded.
    pub fn cached(&self) -> Option<Arc<ProjectData>> {
        self.cache.get().cloned()
    }

    /// Drops the cached document so the next load runs the chain again.
    pub fn clear_cache(&mut self) {
        self.cache.take();
    }

    fn resolve_from_sources(&self) -> Result<(String, ProjectData), ChainExhausted> {
        for source in &self.sources {
            let started_at = Instant::now();
            match source.attempt() {
                Ok(data) => {
                    info!(
                        "event=data_load module=loader status=ok origin={} duration_ms={}",
                        source.name(),
                        started_at.elapsed().as_millis()
                    );
                    return Ok((source.name().to_string(), data));
                }
                Err(err) => {
                    warn!(
                        "event=data_load module=loader status=error origin={} duration_ms={} error={}",
                        source.name(),
                        started_at.elapsed().as_millis(),
                        err
                    );
                }
            }
        }
        Err(ChainExhausted)
    }
}
