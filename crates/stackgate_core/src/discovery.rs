//! Configuration file discovery.
//!
//! Include and exclude filters use ignore-file style globs matched against the
//! path relative to the configuration root:
//!
//! - a pattern without `/` matches at any depth (`*.yaml`, `config.yaml`)
//! - a leading `/` or an inner `/` anchors the pattern to the root
//! - `*` stays within one path segment, `**` spans any number of segments
//! - a trailing `/` only matches directories, and a matching directory
//!   matches everything below it

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{CoreError, CoreResult};

/// Include patterns used when none are given.
pub const DEFAULT_INCLUDE: &[&str] = &["*.yaml", "*.yml"];

/// Stack-group settings file that is never a deployment configuration.
pub const RESERVED_CONFIG: &str = "config.yaml";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single compiled filter pattern.
#[derive(Debug, Clone)]
struct FilterPattern {
    pattern: Pattern,
    dir_only: bool,
}

impl FilterPattern {
    fn compile(raw: &str) -> CoreResult<Option<Self>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let dir_only = trimmed.ends_with('/');
        let body = trimmed.trim_end_matches('/');
        let anchored = body.starts_with('/') || body.contains('/');
        let body = body.trim_start_matches('/');

        let glob = if anchored {
            body.to_string()
        } else {
            format!("**/{}", body)
        };

        let pattern = Pattern::new(&glob).map_err(|e| CoreError::InvalidPattern {
            pattern: raw.to_string(),
            message: e.to_string(),
        })?;

        Ok(Some(Self { pattern, dir_only }))
    }

    fn matches(&self, candidates: &[String]) -> bool {
        let (file, dirs) = match candidates.split_last() {
            Some(split) => split,
            None => return false,
        };

        (!self.dir_only && self.pattern.matches_with(file, MATCH_OPTIONS))
            || dirs.iter().any(|d| self.pattern.matches_with(d, MATCH_OPTIONS))
    }
}

/// A set of ignore-style glob patterns.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    patterns: Vec<FilterPattern>,
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> CoreResult<Self> {
        let mut compiled = Vec::new();
        for raw in patterns {
            if let Some(pattern) = FilterPattern::compile(raw.as_ref())? {
                compiled.push(pattern);
            }
        }
        Ok(Self { patterns: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether any pattern matches `relative` or one of its parent directories.
    pub fn matches(&self, relative: &Path) -> bool {
        let candidates = prefixes(relative);
        self.patterns.iter().any(|p| p.matches(&candidates))
    }
}

/// Every directory prefix of `relative` followed by the full path, `/`-joined.
fn prefixes(relative: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for component in relative.components() {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(&component.as_os_str().to_string_lossy());
        out.push(current.clone());
    }
    out
}

/// Collect files under `root` that pass the include and exclude filters.
///
/// Returned paths are relative to `root`, sorted by name. An empty include
/// list admits every file. [`RESERVED_CONFIG`] is always excluded.
pub fn discover<I, E>(root: &Path, include: &[I], exclude: &[E]) -> CoreResult<Vec<PathBuf>>
where
    I: AsRef<str>,
    E: AsRef<str>,
{
    let include = PathFilter::new(include)?;

    let mut exclude_patterns: Vec<String> = exclude.iter().map(|s| s.as_ref().to_string()).collect();
    exclude_patterns.push(RESERVED_CONFIG.to_string());
    let exclude = PathFilter::new(&exclude_patterns)?;

    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => continue,
        };

        let included = include.is_empty() || include.matches(&relative);
        if included && !exclude.matches(&relative) {
            debug!("Discovered {:?}", relative);
            found.push(relative);
        }
    }

    info!("Discovered {} config files under {:?}", found.len(), root);
    Ok(found)
}
