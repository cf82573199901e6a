use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::substitute;
use crate::core::{BoilerError, Result};
use crate::fs::{EntryKind, FileSystem};
use crate::validate::RunConfig;

/// Restricts which rewritten paths a run touches.
#[derive(Debug, Clone)]
pub enum PathFilter {
    /// Keep paths containing this text
    Substring(String),
    /// Keep paths the expression matches anywhere
    Pattern(Regex),
}

impl PathFilter {
    pub fn pattern(expr: &str) -> Result<Self> {
        Regex::new(expr)
            .map(PathFilter::Pattern)
            .map_err(|e| BoilerError::invalid(format!("invalid filter expression ({e})"), expr, "--filter-rx"))
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathFilter::Substring(needle) => path.contains(needle.as_str()),
            PathFilter::Pattern(re) => re.is_match(path),
        }
    }
}

/// A template entry whose path changes under the run's rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: EntryKind,
}

/// Scan the source root and keep every entry whose path the rules rewrite.
///
/// Rules apply to the path relative to the source root, so the root itself is
/// never renamed. Files always take part; directories only when the run
/// rewrites directory trees. More survivors than the hard cap is an error.
pub fn plan(fs: &dyn FileSystem, config: &RunConfig) -> Result<Vec<PathEntry>> {
    let root = config.source_root.as_path();
    let mut entries = Vec::new();

    for listed in fs.list(root, config.limits.max_depth)? {
        let Some(relative) = relative_str(root, &listed.path) else {
            warn!("skipping non UTF-8 path {}", listed.path.display());
            continue;
        };

        let rewritten = substitute::apply(relative, &config.rules);
        if rewritten == relative {
            continue;
        }

        match listed.kind {
            EntryKind::File => {}
            EntryKind::Directory if config.include_dirs => {}
            EntryKind::Directory => continue,
            EntryKind::Other => {
                warn!("ignored path {} (not a file or directory)", listed.path.display());
                continue;
            }
        }

        if let Some(filter) = &config.filter {
            if !filter.matches(&rewritten) {
                debug!("filtered out {}", rewritten);
                continue;
            }
        }

        entries.push(PathEntry {
            destination: root.join(&rewritten),
            source: listed.path,
            kind: listed.kind,
        });
    }

    if entries.len() > config.limits.hard_max_files {
        return Err(BoilerError::TooManyMatches {
            count: entries.len(),
            cap: config.limits.hard_max_files,
        });
    }

    for entry in &entries {
        debug!("planned {} -> {}", entry.source.display(), entry.destination.display());
    }

    Ok(entries)
}

fn relative_str<'a>(root: &Path, path: &'a Path) -> Option<&'a str> {
    path.strip_prefix(root).ok()?.to_str()
}
