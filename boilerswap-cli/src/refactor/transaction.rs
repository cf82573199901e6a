use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};

use super::write_plan::WritePlan;
use crate::core::{BoilerError, Result};
use crate::fs::{EntryKind, FileSystem};

/// A single file write in a transaction
#[derive(Debug, Clone)]
pub struct FileOperation {
    /// The destination path
    pub path: PathBuf,

    /// Bytes that were at the destination before, if any (for rollback)
    pub original_content: Option<Vec<u8>>,

    /// The new content to write
    pub new_content: Vec<u8>,

    /// Whether this operation has been applied
    pub applied: bool,
}

/// Transaction execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionMode {
    /// Actually write files
    Execute,

    /// Dry-run - don't write files
    DryRun,
}

/// Write transaction with all-or-nothing file semantics
#[derive(Debug)]
pub struct WriteTransaction {
    /// Directories to create, in order
    directories: Vec<PathBuf>,

    /// File writes, in order
    operations: Vec<FileOperation>,

    committed: bool,

    mode: TransactionMode,
}

impl WriteTransaction {
    pub fn new(mode: TransactionMode) -> Self {
        Self {
            directories: Vec::new(),
            operations: Vec::new(),
            committed: false,
            mode,
        }
    }

    /// Queue every directory and file of `plan`, backing up files that are
    /// about to be replaced.
    pub fn from_plan(plan: &WritePlan, mode: TransactionMode, fs: &dyn FileSystem) -> Result<Self> {
        let mut tx = Self::new(mode);
        for dir in &plan.directories {
            tx.add_directory(dir.destination.clone())?;
        }
        for file in &plan.files {
            tx.add_file_change(fs, file.destination.clone(), file.contents.clone())?;
        }
        Ok(tx)
    }

    pub fn add_directory(&mut self, path: PathBuf) -> Result<()> {
        self.ensure_open()?;
        self.directories.push(path);
        Ok(())
    }

    pub fn add_operation(
        &mut self,
        path: PathBuf,
        original_content: Option<Vec<u8>>,
        new_content: Vec<u8>,
    ) -> Result<()> {
        self.ensure_open()?;
        self.operations.push(FileOperation {
            path,
            original_content,
            new_content,
            applied: false,
        });
        Ok(())
    }

    /// Add a file write, reading whatever currently sits at `path`
    pub fn add_file_change(&mut self, fs: &dyn FileSystem, path: PathBuf, new_content: Vec<u8>) -> Result<()> {
        let original_content = match fs.kind(&path)? {
            Some(EntryKind::File) => Some(fs.read(&path)?),
            _ => None,
        };
        self.add_operation(path, original_content, new_content)
    }

    /// Execute all operations in the transaction
    pub fn commit(&mut self, fs: &dyn FileSystem) -> Result<TransactionResult> {
        self.ensure_open()?;

        let mut result = TransactionResult {
            mode: self.mode,
            total_operations: self.directories.len() + self.operations.len(),
            successful_operations: 0,
            directories_created: Vec::new(),
            files_written: Vec::new(),
        };

        // In dry-run mode, just report
        if self.mode == TransactionMode::DryRun {
            for dir in &self.directories {
                info!("DryRun skipped mkdir {}", dir.display());
            }
            for op in &self.operations {
                info!("DryRun skipped write {} bytes to {}", op.new_content.len(), op.path.display());
            }
            result.successful_operations = result.total_operations;
            result.directories_created = self.directories.clone();
            result.files_written = self.operations.iter().map(|op| op.path.clone()).collect();
            self.committed = true;
            return Ok(result);
        }

        for dir in self.directories.clone() {
            if let Err(e) = fs.create_dir_all(&dir) {
                return Err(self.abort(fs, e));
            }
            result.successful_operations += 1;
            result.directories_created.push(dir);
        }

        for i in 0..self.operations.len() {
            match Self::apply_operation(fs, &self.operations[i]) {
                Ok(()) => {
                    let op = &mut self.operations[i];
                    op.applied = true;
                    info!("Wrote {} bytes to {}", op.new_content.len(), op.path.display());
                    result.successful_operations += 1;
                    result.files_written.push(op.path.clone());
                }
                Err(e) => return Err(self.abort(fs, e)),
            }
        }

        self.committed = true;
        Ok(result)
    }

    fn apply_operation(fs: &dyn FileSystem, operation: &FileOperation) -> Result<()> {
        if let Some(parent) = operation.path.parent() {
            fs.create_dir_all(parent)?;
        }
        fs.write(&operation.path, &operation.new_content)
    }

    fn abort(&mut self, fs: &dyn FileSystem, cause: BoilerError) -> BoilerError {
        error!("write failed: {}", cause);
        match self.rollback(fs) {
            Ok(()) => BoilerError::WriteFailed(cause.to_string()),
            Err(rollback_err) => BoilerError::WriteFailed(format!(
                "{cause}. Rollback also failed: {rollback_err}. Manual recovery may be required"
            )),
        }
    }

    /// Undo applied writes, newest first: restore replaced files, remove new
    /// ones. Directories created along the way are left in place.
    pub fn rollback(&mut self, fs: &dyn FileSystem) -> Result<()> {
        let mut errors = Vec::new();

        for operation in self.operations.iter_mut().rev() {
            if !operation.applied {
                continue;
            }

            let undo = match &operation.original_content {
                Some(original) => fs.write(&operation.path, original),
                None => fs.remove_file(&operation.path),
            };
            match undo {
                Ok(()) => operation.applied = false,
                Err(e) => errors.push(e.to_string()),
            }
        }

        if !errors.is_empty() {
            return Err(BoilerError::WriteFailed(format!(
                "rollback encountered errors: {}",
                errors.join("; ")
            )));
        }

        warn!("rolled back all applied writes");
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.committed {
            return Err(BoilerError::WriteFailed(
                "transaction has already been committed".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a transaction execution
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResult {
    /// Transaction mode used
    pub mode: TransactionMode,

    /// Total number of operations
    pub total_operations: usize,

    /// Number of successful operations
    pub successful_operations: usize,

    /// Directories that were (or would be) created
    pub directories_created: Vec<PathBuf>,

    /// Files that were (or would be) written
    pub files_written: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::OsFileSystem;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_transaction_dry_run() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        fs::write(&file_path, "original").unwrap();
        let new_dir = temp_dir.path().join("fresh");

        let mut tx = WriteTransaction::new(TransactionMode::DryRun);
        tx.add_directory(new_dir.clone()).unwrap();
        tx.add_file_change(&OsFileSystem, file_path.clone(), b"modified".to_vec())
            .unwrap();

        let result = tx.commit(&OsFileSystem).unwrap();
        assert_eq!(result.successful_operations, 2);
        assert_eq!(result.files_written, vec![file_path.clone()]);

        // Nothing should be touched in dry-run
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "original");
        assert!(!new_dir.exists());
    }

    #[test]
    fn test_transaction_execute() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested/dir/test.txt");
        let empty_dir = temp_dir.path().join("empty");

        let mut tx = WriteTransaction::new(TransactionMode::Execute);
        tx.add_directory(empty_dir.clone()).unwrap();
        tx.add_file_change(&OsFileSystem, file_path.clone(), b"modified".to_vec())
            .unwrap();

        let result = tx.commit(&OsFileSystem).unwrap();
        assert!(tx.committed);
        assert_eq!(result.directories_created, vec![empty_dir.clone()]);
        assert_eq!(result.files_written, vec![file_path.clone()]);
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "modified");
        assert!(empty_dir.is_dir());
    }

    #[test]
    fn test_transaction_rollback() {
        let temp_dir = TempDir::new().unwrap();
        let replaced = temp_dir.path().join("file1.txt");
        let created = temp_dir.path().join("file2.txt");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&replaced, "original1").unwrap();
        fs::write(&blocker, "i am a file").unwrap();

        let mut tx = WriteTransaction::new(TransactionMode::Execute);
        tx.add_file_change(&OsFileSystem, replaced.clone(), b"modified1".to_vec())
            .unwrap();
        tx.add_file_change(&OsFileSystem, created.clone(), b"new".to_vec())
            .unwrap();
        // parent is a regular file, so this write fails
        tx.add_operation(blocker.join("file3.txt"), None, b"x".to_vec())
            .unwrap();

        let result = tx.commit(&OsFileSystem);
        assert!(matches!(result, Err(BoilerError::WriteFailed(_))));

        assert_eq!(fs::read_to_string(&replaced).unwrap(), "original1");
        assert!(!created.exists());
        assert!(tx.operations.iter().all(|op| !op.applied));
    }

    #[test]
    fn test_committed_transaction_is_closed() {
        let mut tx = WriteTransaction::new(TransactionMode::DryRun);
        tx.commit(&OsFileSystem).unwrap();
        assert!(tx.add_directory(PathBuf::from("x")).is_err());
        assert!(tx.commit(&OsFileSystem).is_err());
    }
}
