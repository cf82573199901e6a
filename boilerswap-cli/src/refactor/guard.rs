use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::write_plan::WritePlan;
use crate::core::{BoilerError, Result};
use crate::fs::{EntryKind, FileSystem};

/// Existing files a plan would replace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub to_overwrite: Vec<PathBuf>,
}

impl ConflictReport {
    /// Whether the run must stop without `--force`.
    pub fn blocked(&self, force: bool) -> bool {
        !self.to_overwrite.is_empty() && !force
    }

    /// Let the run proceed, or fail listing every file it would overwrite.
    pub fn approve(self, force: bool) -> Result<Self> {
        if self.blocked(force) {
            return Err(BoilerError::ExistingFileConflict {
                paths: self.to_overwrite,
            });
        }
        for path in &self.to_overwrite {
            warn!("will overwrite {}", path.display());
        }
        Ok(self)
    }
}

/// Two sources mapping to one destination means the name pair is broken;
/// never overridable.
pub fn ensure_unique_destinations(plan: &WritePlan) -> Result<()> {
    let mut seen: HashMap<&Path, &Path> = HashMap::new();

    for (source, destination) in plan.destinations() {
        if let Some(first) = seen.insert(destination.as_path(), source.as_path()) {
            return Err(BoilerError::DuplicateDestination {
                destination: destination.clone(),
                first: first.to_path_buf(),
                second: source.clone(),
            });
        }
    }

    Ok(())
}

/// Check every destination against what is already on disk.
///
/// Directories in the way of files (and the reverse) are always fatal.
/// Existing regular files are collected so the caller can decide with
/// [`ConflictReport::approve`].
pub fn check(plan: &WritePlan, fs: &dyn FileSystem) -> Result<ConflictReport> {
    ensure_unique_destinations(plan)?;

    for dir in &plan.directories {
        match fs.kind(&dir.destination)? {
            None | Some(EntryKind::Directory) => {}
            Some(_) => return Err(BoilerError::TargetNotDirectory(dir.destination.clone())),
        }
    }

    let mut report = ConflictReport::default();
    for file in &plan.files {
        match fs.kind(&file.destination)? {
            None => {}
            Some(EntryKind::File) => report.to_overwrite.push(file.destination.clone()),
            Some(EntryKind::Directory) => {
                return Err(BoilerError::TargetIsDirectory(file.destination.clone()))
            }
            Some(EntryKind::Other) => {
                return Err(BoilerError::NotARegularFile(file.destination.clone()))
            }
        }
    }

    if !report.to_overwrite.is_empty() {
        warn!(
            "{} planned file(s) already exist: {:?}",
            report.to_overwrite.len(),
            report.to_overwrite
        );
    }

    Ok(report)
}
