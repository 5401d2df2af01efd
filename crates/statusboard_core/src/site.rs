//! Static-hosting asset path rewrite.
//!
//! Rewrites `/dashboard/` asset prefixes in the built entry page to the
//! repository-qualified `/<repo>/dashboard/` form used by project pages.
//! The rewrite is idempotent: already-qualified prefixes are normalised
//! first, then qualified once.

use log::{info, warn};
use regex::Regex;
use std::path::Path;

/// Repository name used when `GITHUB_REPOSITORY` is not available.
pub const DEFAULT_REPO_NAME: &str = "figma-oz";
const DASHBOARD_PREFIX: &str = "/dashboard/";

/// Outcome of [`fix_index_html`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Entry page missing; nothing written.
    Skipped,
    Rewritten,
}

/// Repository name from an `owner/name` slug, or [`DEFAULT_REPO_NAME`].
pub fn repo_name_from(slug: Option<&str>) -> String {
    slug.and_then(|value| value.split('/').nth(1))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_REPO_NAME)
        .to_string()
}

/// Qualifies every `/dashboard/` prefix in `content` with `repo_name`.
///
/// # Errors
/// - Returns `regex::Error` when the repository name makes the pattern
///   exceed the regex size limit.
pub fn rewrite_asset_paths(content: &str, repo_name: &str) -> Result<String, regex::Error> {
    let qualified = format!("/{repo_name}{DASHBOARD_PREFIX}");
    let already_qualified = Regex::new(&regex::escape(&qualified))?;
    let bare = Regex::new(&regex::escape(DASHBOARD_PREFIX))?;

    let normalized = already_qualified.replace_all(content, regex::NoExpand(DASHBOARD_PREFIX));
    Ok(bare
        .replace_all(&normalized, regex::NoExpand(&qualified))
        .into_owned())
}

/// Rewrites the entry page at `index_path` in place.
///
/// # Errors
/// - Returns I/O errors from reading or writing an existing entry page.
pub fn fix_index_html(index_path: &Path, repo_name: &str) -> std::io::Result<RewriteOutcome> {
    if !index_path.exists() {
        warn!(
            "event=path_rewrite module=site status=skipped path={}",
            index_path.display()
        );
        return Ok(RewriteOutcome::Skipped);
    }

    let content = std::fs::read_to_string(index_path)?;
    let rewritten = rewrite_asset_paths(&content, repo_name)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    std::fs::write(index_path, rewritten)?;
    info!(
        "event=path_rewrite module=site status=ok repo={} path={}",
        repo_name,
        index_path.display()
    );
    Ok(RewriteOutcome::Rewritten)
}
