//! Project file endpoint.
//!
//! # Responsibility
//! - Serve one project file (content + metadata) by request parameter.
//! - Confine every read to a fixed project root.
//!
//! # Invariants
//! - Boundary checks are lexical and happen before any filesystem access.
//! - A path that leaves the root is denied without being read.
//! - Leading `/` in a parameter is treated as root-relative, never absolute.

use log::{info, warn};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Component, Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// File payload returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDocument {
    pub content: String,
    /// RFC 3339 modification time.
    pub modified: String,
    pub size: u64,
}

/// Endpoint outcome with an HTTP-equivalent status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResponse {
    Found(FileDocument),
    BadRequest,
    AccessDenied,
    NotFound,
}

impl FileResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Found(_) => 200,
            Self::BadRequest => 400,
            Self::AccessDenied => 403,
            Self::NotFound => 404,
        }
    }

    /// JSON response body.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Found(document) => json!({
                "content": document.content,
                "modified": document.modified,
                "size": document.size,
            }),
            Self::BadRequest => json!({ "error": "File parameter required" }),
            Self::AccessDenied => json!({ "error": "Access denied" }),
            Self::NotFound => json!({ "error": "File not found" }),
        }
    }
}

/// Read-only file endpoint rooted at one project directory.
#[derive(Debug, Clone)]
pub struct FileEndpoint {
    root: PathBuf,
}

impl FileEndpoint {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Serves the file named by `param`.
    pub fn serve(&self, param: Option<&str>) -> FileResponse {
        let Some(requested) = param.map(str::trim).filter(|value| !value.is_empty()) else {
            return FileResponse::BadRequest;
        };

        let Some(path) = resolve_within_root(&self.root, requested) else {
            warn!("event=file_serve module=files status=denied reason=outside_root");
            return FileResponse::AccessDenied;
        };

        match read_document(&path) {
            Ok(document) => {
                info!(
                    "event=file_serve module=files status=ok size={}",
                    document.size
                );
                FileResponse::Found(document)
            }
            Err(err) => {
                warn!("event=file_serve module=files status=not_found error={err}");
                FileResponse::NotFound
            }
        }
    }
}

/// Joins `requested` under `root`, collapsing `.` and `..` lexically.
///
/// Returns `None` when the result would leave `root`. Root and drive
/// prefixes inside `requested` are ignored, so `/etc/passwd` maps to
/// `<root>/etc/passwd`.
pub fn resolve_within_root(root: &Path, requested: &str) -> Option<PathBuf> {
    let mut relative: Vec<&std::ffi::OsStr> = Vec::new();
    for component in Path::new(requested).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::ParentDir => {
                relative.pop()?;
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    let mut resolved = root.to_path_buf();
    resolved.extend(relative);
    Some(resolved)
}

fn read_document(path: &Path) -> std::io::Result<FileDocument> {
    let content = std::fs::read_to_string(path)?;
    let metadata = std::fs::metadata(path)?;
    let modified = metadata
        .modified()
        .ok()
        .and_then(|time| OffsetDateTime::from(time).format(&Rfc3339).ok())
        .unwrap_or_default();

    Ok(FileDocument {
        content,
        modified,
        size: metadata.len(),
    })
}
