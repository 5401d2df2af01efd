//! Ordered candidate locations for one logical resource.
//!
//! # Responsibility
//! - Try a fixed list of locations in order and accept the first that
//!   fetches and parses.
//! - Resolve relative references against a page base path the way a browser
//!   resolves relative URLs.
//!
//! # Invariants
//! - Candidates are tried strictly in declaration order.
//! - A failing candidate never stops the search; only exhaustion does.

use crate::loader::source::SourceError;
use crate::loader::transport::{fetch_json, Transport};
use log::debug;
use serde::de::DeserializeOwned;

/// Value accepted from one candidate location.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub location: String,
    pub value: T,
}

/// Ordered candidate list for one resource (e.g. `data/data.json`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateChain {
    resource: String,
    locations: Vec<String>,
}

impl CandidateChain {
    pub fn new(resource: impl Into<String>, locations: Vec<String>) -> Self {
        Self {
            resource: resource.into(),
            locations,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the first candidate whose fetch and JSON decode succeed.
    ///
    /// # Errors
    /// - `SourceError::NotFound` when every candidate failed (or the list is
    ///   empty); carries the locations tried.
    pub fn resolve<T: DeserializeOwned>(
        &self,
        transport: &dyn Transport,
    ) -> Result<Resolved<T>, SourceError> {
        for location in &self.locations {
            match fetch_json::<T>(transport, location) {
                Ok(value) => {
                    debug!(
                        "event=candidate_fetch module=loader status=ok resource={} location={}",
                        self.resource, location
                    );
                    return Ok(Resolved {
                        location: location.clone(),
                        value,
                    });
                }
                Err(err) => {
                    debug!(
                        "event=candidate_fetch module=loader status=miss resource={} location={} error={}",
                        self.resource, location, err
                    );
                }
            }
        }

        Err(SourceError::NotFound {
            resource: self.resource.clone(),
            tried: self.locations.clone(),
        })
    }
}

/// Resolves `reference` against the page path `base`.
///
/// - Absolute references (`/x`) are kept, with `.`/`..` segments collapsed.
/// - Relative references resolve against the directory of `base`.
/// - `..` never climbs above `/`.
pub fn resolve_reference(base: &str, reference: &str) -> String {
    if reference.starts_with('/') {
        return normalize_url_path(reference);
    }

    let base_dir = match base.rfind('/') {
        Some(index) => &base[..=index],
        None => "/",
    };
    normalize_url_path(&format!("{base_dir}{reference}"))
}

fn normalize_url_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut normalized = format!("/{}", segments.join("/"));
    if path.ends_with('/') && !segments.is_empty() {
        normalized.push('/');
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::resolve_reference;

    #[test]
    fn absolute_references_are_kept() {
        assert_eq!(
            resolve_reference("/xp-map/dashboard/", "/xp-map/data/data.json"),
            "/xp-map/data/data.json"
        );
    }

    #[test]
    fn relative_references_use_base_directory() {
        assert_eq!(
            resolve_reference("/xp-map/dashboard/", "./dashboard-sync.json"),
            "/xp-map/dashboard/dashboard-sync.json"
        );
        assert_eq!(
            resolve_reference("/xp-map/dashboard/index.html", "../data/data.json"),
            "/xp-map/data/data.json"
        );
    }

    #[test]
    fn parent_segments_stop_at_root() {
        assert_eq!(resolve_reference("/", "../data/data.json"), "/data/data.json");
        assert_eq!(resolve_reference("/", "./dashboard-sync.json"), "/dashboard-sync.json");
        assert_eq!(resolve_reference("", "../../x.json"), "/x.json");
    }
}
