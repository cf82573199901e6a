use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoilerError>;

#[derive(Error, Debug)]
pub enum BoilerError {
    #[error("{message}: '{value}'. Override using {flag}")]
    InvalidConfig {
        message: String,
        value: String,
        flag: &'static str,
    },

    #[error("found {count} matching paths, more than the maximum {cap}. Override using --hard-max-files")]
    TooManyMatches { count: usize, cap: usize },

    #[error(
        "{} and {} both map to {}. Something is unsupported about the name pair",
        first.display(),
        second.display(),
        destination.display()
    )]
    DuplicateDestination {
        destination: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Target file is an existing directory: {0}")]
    TargetIsDirectory(PathBuf),

    #[error("Target directory is an existing non-directory: {0}")]
    TargetNotDirectory(PathBuf),

    #[error("Target exists but is not a regular file: {0}")]
    NotARegularFile(PathBuf),

    #[error("{} existing file(s) would be overwritten. Run with --force to overwrite them", paths.len())]
    ExistingFileConflict { paths: Vec<PathBuf> },

    #[error("Batch aborted at target '{target}': {source}")]
    BatchFailed {
        target: String,
        #[source]
        source: Box<BoilerError>,
    },

    #[error("Write failed and was rolled back: {0}")]
    WriteFailed(String),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl BoilerError {
    pub fn invalid(message: impl Into<String>, value: impl Into<String>, flag: &'static str) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            value: value.into(),
            flag,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_names_value_and_flag() {
        let err = BoilerError::invalid("name too short", "cat", "--min-name-length");
        let msg = err.to_string();
        assert!(msg.contains("'cat'"));
        assert!(msg.contains("--min-name-length"));
    }

    #[test]
    fn batch_failure_reports_target() {
        let err = BoilerError::BatchFailed {
            target: "widgets".to_string(),
            source: Box::new(BoilerError::TooManyMatches { count: 40, cap: 30 }),
        };
        let msg = err.to_string();
        assert!(msg.contains("'widgets'"));
        assert!(msg.contains("40"));
    }
}
