//! Byte transports used by data sources.
//!
//! # Responsibility
//! - Fetch one resource body by location (URL path or absolute URL).
//! - Map transport, status, and I/O failures into [`FetchError`].
//!
//! # Invariants
//! - A transport performs exactly one attempt per `get` call (no retry).
//! - Non-success HTTP statuses are errors, never bodies.
//! - `DirectoryTransport` never reads outside its root.

use crate::files::resolve_within_root;
use log::debug;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub type FetchResult<T> = Result<T, FetchError>;

/// Failure of a single fetch attempt.
#[derive(Debug)]
pub enum FetchError {
    /// Connection, DNS, TLS, or timeout failure.
    Transport { location: String, message: String },
    /// Server answered with a non-success status.
    Status { location: String, code: u16 },
    /// Body could not be read.
    Io {
        location: String,
        source: std::io::Error,
    },
    /// Body is not valid JSON for the expected document.
    Parse {
        location: String,
        source: serde_json::Error,
    },
    /// Location resolves outside the transport root.
    OutsideRoot { location: String },
}

impl FetchError {
    pub fn location(&self) -> &str {
        match self {
            Self::Transport { location, .. }
            | Self::Status { location, .. }
            | Self::Io { location, .. }
            | Self::Parse { location, .. }
            | Self::OutsideRoot { location } => location,
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { location, message } => {
                write!(f, "request to `{location}` failed: {message}")
            }
            Self::Status { location, code } => {
                write!(f, "request to `{location}` returned status {code}")
            }
            Self::Io { location, source } => write!(f, "failed to read `{location}`: {source}"),
            Self::Parse { location, source } => {
                write!(f, "invalid JSON document at `{location}`: {source}")
            }
            Self::OutsideRoot { location } => {
                write!(f, "location `{location}` resolves outside the site root")
            }
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Transport { .. } | Self::Status { .. } | Self::OutsideRoot { .. } => None,
        }
    }
}

/// One-shot resource fetcher.
///
/// Implementations must be shareable across threads: data sources issue the
/// sync and full document fetches concurrently.
pub trait Transport: Send + Sync {
    /// Returns the body of `location` or the reason it is unavailable.
    fn get(&self, location: &str) -> FetchResult<String>;
}

/// Fetches `location` and decodes the body as JSON.
pub fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    location: &str,
) -> FetchResult<T> {
    let body = transport.get(location)?;
    serde_json::from_str(&body).map_err(|source| FetchError::Parse {
        location: location.to_string(),
        source,
    })
}

/// HTTP(S) transport bound to one origin.
pub struct HttpTransport {
    agent: ureq::Agent,
    origin: String,
}

impl HttpTransport {
    /// Creates a transport for `origin` (e.g. `https://raw.githubusercontent.com`).
    ///
    /// `timeout = None` leaves requests bounded only by the network stack.
    pub fn new(origin: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let origin = origin.into();
        Self {
            agent: builder.build(),
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for `location`; absolute URLs pass through unchanged.
    pub fn url_for(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            return location.to_string();
        }
        if location.starts_with('/') {
            format!("{}{location}", self.origin)
        } else {
            format!("{}/{location}", self.origin)
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, location: &str) -> FetchResult<String> {
        let url = self.url_for(location);
        debug!("event=fetch module=transport status=start kind=http url={url}");
        match self.agent.get(&url).call() {
            Ok(response) => response
                .into_string()
                .map_err(|source| FetchError::Io {
                    location: url,
                    source,
                }),
            Err(ureq::Error::Status(code, _)) => Err(FetchError::Status {
                location: url,
                code,
            }),
            Err(ureq::Error::Transport(err)) => Err(FetchError::Transport {
                location: url,
                message: err.to_string(),
            }),
        }
    }
}

/// Transport over a static-site mirror on disk.
///
/// URL paths map onto files below `root`: `/data/data.json` reads
/// `<root>/data/data.json`.
#[derive(Debug, Clone)]
pub struct DirectoryTransport {
    root: PathBuf,
}

impl DirectoryTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Transport for DirectoryTransport {
    fn get(&self, location: &str) -> FetchResult<String> {
        let Some(path) = resolve_within_root(&self.root, location) else {
            return Err(FetchError::OutsideRoot {
                location: location.to_string(),
            });
        };
        debug!(
            "event=fetch module=transport status=start kind=directory path={}",
            path.display()
        );
        std::fs::read_to_string(&path).map_err(|source| FetchError::Io {
            location: location.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{fetch_json, DirectoryTransport, FetchError, HttpTransport, Transport};
    use serde_json::Value;

    #[test]
    fn http_url_joins_origin_and_location() {
        let transport = HttpTransport::new("https://example.test/", None);
        assert_eq!(
            transport.url_for("/owner/repo/main/data/data.json"),
            "https://example.test/owner/repo/main/data/data.json"
        );
        assert_eq!(
            transport.url_for("data.json"),
            "https://example.test/data.json"
        );
        assert_eq!(
            transport.url_for("http://other.test/x.json"),
            "http://other.test/x.json"
        );
    }

    #[test]
    fn directory_transport_reads_below_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("data")).expect("mkdir");
        std::fs::write(dir.path().join("data/data.json"), "{\"a\":1}").expect("write");

        let transport = DirectoryTransport::new(dir.path());
        let value: Value = fetch_json(&transport, "/data/data.json").expect("json");
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn directory_transport_refuses_escaping_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let transport = DirectoryTransport::new(dir.path().join("site"));
        let err = transport
            .get("/../secret.json")
            .expect_err("escape must fail");
        assert!(matches!(err, FetchError::OutsideRoot { .. }));
    }

    #[test]
    fn fetch_json_reports_parse_failures_with_location() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("broken.json"), "{not json").expect("write");

        let transport = DirectoryTransport::new(dir.path());
        let err = fetch_json::<Value>(&transport, "/broken.json").expect_err("parse must fail");
        assert!(matches!(err, FetchError::Parse { .. }));
        assert_eq!(err.location(), "/broken.json");
    }
}
