//! Data source strategies for the loader chain.
//!
//! # Responsibility
//! - Expose each tier (remote, local) behind one uniform `attempt` contract.
//! - Fetch the sync and full documents of a tier concurrently.
//!
//! # Invariants
//! - `attempt` performs at most one fetch per candidate location.
//! - A source never returns partial data: either a full document or an error.

use crate::loader::candidates::CandidateChain;
use crate::loader::config::LoaderConfig;
use crate::loader::merge::{attach_local_sync, merge_remote};
use crate::loader::transport::{fetch_json, FetchError, FetchResult, Transport};
use crate::model::project::ProjectData;
use crate::model::sync_doc::SyncDocument;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::thread;

/// Name reported for the remote tier.
pub const REMOTE_SOURCE_NAME: &str = "remote";
/// Name reported for the local tier.
pub const LOCAL_SOURCE_NAME: &str = "local";

/// Why a source could not produce a document.
#[derive(Debug)]
pub enum SourceError {
    Fetch(FetchError),
    /// No candidate location produced the resource.
    NotFound { resource: String, tried: Vec<String> },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "{err}"),
            Self::NotFound { resource, tried } => write!(
                f,
                "resource `{resource}` not found at any of {} candidate locations",
                tried.len()
            ),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<FetchError> for SourceError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

/// One tier of the loader chain.
pub trait DataSource: Send + Sync {
    /// Stable name used in logs and load origins.
    fn name(&self) -> &str;

    /// Produces a complete document or explains why it cannot.
    fn attempt(&self) -> Result<ProjectData, SourceError>;
}

/// Remote tier: both documents from the published repository.
pub struct RemoteSource {
    transport: Arc<dyn Transport>,
    sync_location: String,
    full_location: String,
}

impl RemoteSource {
    pub fn new(
        transport: Arc<dyn Transport>,
        sync_location: impl Into<String>,
        full_location: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            sync_location: sync_location.into(),
            full_location: full_location.into(),
        }
    }

    pub fn from_config(transport: Arc<dyn Transport>, config: &LoaderConfig) -> Self {
        Self::new(
            transport,
            config.remote_sync_location(),
            config.remote_full_location(),
        )
    }
}

impl DataSource for RemoteSource {
    fn name(&self) -> &str {
        REMOTE_SOURCE_NAME
    }

    /// Fails if either document fails; succeeds with the merged document.
    fn attempt(&self) -> Result<ProjectData, SourceError> {
        let transport = self.transport.as_ref();
        let (sync, full) = thread::scope(|scope| {
            let sync_worker =
                scope.spawn(|| fetch_json::<SyncDocument>(transport, &self.sync_location));
            let full = fetch_json::<ProjectData>(transport, &self.full_location);
            let sync = join_fetch(sync_worker.join(), &self.sync_location);
            (sync, full)
        });

        let sync = sync?;
        let full = full?;
        Ok(merge_remote(full, sync))
    }
}

/// Local tier: documents looked up across base-path variants.
pub struct LocalSource {
    transport: Arc<dyn Transport>,
    sync_chain: CandidateChain,
    full_chain: CandidateChain,
}

impl LocalSource {
    pub fn new(
        transport: Arc<dyn Transport>,
        sync_chain: CandidateChain,
        full_chain: CandidateChain,
    ) -> Self {
        Self {
            transport,
            sync_chain,
            full_chain,
        }
    }

    pub fn from_config(transport: Arc<dyn Transport>, config: &LoaderConfig) -> Self {
        Self::new(
            transport,
            CandidateChain::new(
                config.sync_path.clone(),
                config.local_candidates(&config.sync_path),
            ),
            CandidateChain::new(
                config.full_path.clone(),
                config.local_candidates(&config.full_path),
            ),
        )
    }
}

impl DataSource for LocalSource {
    fn name(&self) -> &str {
        LOCAL_SOURCE_NAME
    }

    /// Requires the full document; the sync document is optional.
    fn attempt(&self) -> Result<ProjectData, SourceError> {
        let transport = self.transport.as_ref();
        let (sync, full) = thread::scope(|scope| {
            let sync_worker = scope.spawn(|| self.sync_chain.resolve::<SyncDocument>(transport));
            let full = self.full_chain.resolve::<ProjectData>(transport);
            let sync = match sync_worker.join() {
                Ok(result) => result,
                Err(_) => Err(SourceError::Fetch(worker_panicked(self.sync_chain.resource()))),
            };
            (sync, full)
        });

        let full = full?;
        debug!(
            "event=local_full module=loader status=ok location={}",
            full.location
        );
        let sync = match sync {
            Ok(resolved) => Some(resolved.value),
            Err(err) => {
                debug!("event=local_sync module=loader status=absent reason={err}");
                None
            }
        };

        Ok(attach_local_sync(full.value, sync))
    }
}

fn join_fetch<T>(
    joined: thread::Result<FetchResult<T>>,
    location: &str,
) -> FetchResult<T> {
    joined.unwrap_or_else(|_| Err(worker_panicked(location)))
}

fn worker_panicked(location: &str) -> FetchError {
    FetchError::Transport {
        location: location.to_string(),
        message: "fetch worker panicked".to_string(),
    }
}
