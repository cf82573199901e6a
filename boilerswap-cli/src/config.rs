use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::Result;

/// Project-level settings file, looked up in the working directory.
pub const PROJECT_FILE: &str = "boilerswap.toml";

/// Prefix of environment overrides, e.g. `BOILERSWAP_HARD_MAX_FILES=50`.
pub const ENV_PREFIX: &str = "BOILERSWAP";

/// Static options shared by every run of an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the boilerplate module
    pub source_dir: PathBuf,

    /// Placeholder singular name used by the boilerplate
    pub source_singular: String,

    /// Placeholder plural name used by the boilerplate
    pub source_plural: String,

    /// Abort if more than this many paths match
    pub hard_max_files: usize,

    pub min_name_length: usize,
    pub max_name_length: usize,

    /// Largest allowed length difference between singular and plural
    pub max_name_diff: usize,

    pub max_scan_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src"),
            source_singular: "boilerExample".to_string(),
            source_plural: "boilerExamples".to_string(),
            hard_max_files: 30,
            min_name_length: 5,
            max_name_length: 32,
            max_name_diff: 6,
            max_scan_depth: 15,
        }
    }
}

impl Settings {
    /// Layer defaults, the user config file, the project file (or `explicit`),
    /// and `BOILERSWAP_*` environment variables, lowest precedence first.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user_file = ProjectDirs::from("", "", "boilerswap")
            .map(|dirs| dirs.config_dir().join("config.toml"));
        Self::load_layers(user_file.as_deref(), explicit)
    }

    fn load_layers(user_file: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("source_dir", defaults.source_dir.to_string_lossy().to_string())?
            .set_default("source_singular", defaults.source_singular)?
            .set_default("source_plural", defaults.source_plural)?
            .set_default("hard_max_files", defaults.hard_max_files as i64)?
            .set_default("min_name_length", defaults.min_name_length as i64)?
            .set_default("max_name_length", defaults.max_name_length as i64)?
            .set_default("max_name_diff", defaults.max_name_diff as i64)?
            .set_default("max_scan_depth", defaults.max_scan_depth as i64)?;

        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::from(Path::new(PROJECT_FILE)).required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

/// Values given on the command line; each one beats every config layer.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub source_dir: Option<PathBuf>,
    pub source_singular: Option<String>,
    pub source_plural: Option<String>,
    pub hard_max_files: Option<usize>,
    pub min_name_length: Option<usize>,
    pub max_name_length: Option<usize>,
    pub max_name_diff: Option<usize>,
    pub max_scan_depth: Option<usize>,
}

impl SettingsOverrides {
    pub fn apply(self, mut settings: Settings) -> Settings {
        if let Some(v) = self.source_dir {
            settings.source_dir = v;
        }
        if let Some(v) = self.source_singular {
            settings.source_singular = v;
        }
        if let Some(v) = self.source_plural {
            settings.source_plural = v;
        }
        if let Some(v) = self.hard_max_files {
            settings.hard_max_files = v;
        }
        if let Some(v) = self.min_name_length {
            settings.min_name_length = v;
        }
        if let Some(v) = self.max_name_length {
            settings.max_name_length = v;
        }
        if let Some(v) = self.max_name_diff {
            settings.max_name_diff = v;
        }
        if let Some(v) = self.max_scan_depth {
            settings.max_scan_depth = v;
        }
        settings
    }
}
