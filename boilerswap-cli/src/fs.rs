use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::{BoilerError, Result};

/// Directories never descended into while scanning a template.
pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git", ".hg", ".svn"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, sockets, fifos and anything else that is neither
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Filesystem access used by a run. Everything that touches disk goes
/// through here.
pub trait FileSystem {
    /// Entries under `root` (root excluded), sorted by path, at most
    /// `max_depth` levels deep, with [`IGNORED_DIRS`] pruned.
    fn list(&self, root: &Path, max_depth: usize) -> Result<Vec<ListedEntry>>;

    /// Kind of the entry at `path`, following symlinks. `None` if missing.
    fn kind(&self, path: &Path) -> Result<Option<EntryKind>>;

    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list(&self, root: &Path, max_depth: usize) -> Result<Vec<ListedEntry>> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_ignored(e))
        {
            let entry = entry?;
            let file_type = entry.file_type();
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            };
            entries.push(ListedEntry {
                path: entry.into_path(),
                kind,
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn kind(&self, path: &Path) -> Result<Option<EntryKind>> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(Some(EntryKind::File)),
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(_) => Ok(Some(EntryKind::Other)),
            Err(e) if e.kind() == ErrorKind::NotFound => match fs::symlink_metadata(path) {
                // dangling symlink
                Ok(_) => Ok(Some(EntryKind::Other)),
                Err(_) => Ok(None),
            },
            Err(e) => Err(BoilerError::io(path, e)),
        }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| BoilerError::io(path, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).map_err(|e| BoilerError::io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| BoilerError::io(path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| BoilerError::io(path, e))
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}
