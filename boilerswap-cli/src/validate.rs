use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Settings;
use crate::core::{BoilerError, Result};
use crate::fs::{EntryKind, FileSystem};
use crate::names::{pluralize, singularize, Axis, Name, NamePairSet, ReplacementRules};
use crate::refactor::{PathFilter, TransactionMode};

/// Everything the caller asked for, before any checking.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub target_singular: Option<String>,
    pub target_plural: Option<String>,
    pub settings: Settings,
    pub filter: Option<PathFilter>,
    pub force: bool,
    pub dry_run: bool,
    pub include_dirs: bool,
}

/// The four names of a run.
#[derive(Debug, Clone, Serialize)]
pub struct EntityNames {
    pub source_singular: Name,
    pub source_plural: Name,
    pub target_singular: Name,
    pub target_plural: Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanLimits {
    pub max_depth: usize,
    pub hard_max_files: usize,
}

/// A checked, immutable run configuration. Only [`validate`] builds one.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub names: EntityNames,
    pub source_root: PathBuf,
    pub rules: ReplacementRules,
    pub filter: Option<PathFilter>,
    pub limits: ScanLimits,
    pub include_dirs: bool,
    pub force: bool,
    pub mode: TransactionMode,
}

/// Check a request and turn it into a [`RunConfig`]. The first failing check
/// is returned; nothing is scanned or written before this succeeds.
pub fn validate(request: &RunRequest, fs: &dyn FileSystem) -> Result<RunConfig> {
    let settings = &request.settings;

    let (target_singular, target_plural) = resolve_targets(
        request.target_singular.as_deref(),
        request.target_plural.as_deref(),
    )?;

    let source_singular = Name::parse(&settings.source_singular, "--source-singular")?;
    let source_plural = Name::parse(&settings.source_plural, "--source-plural")?;
    let target_singular = Name::parse(&target_singular, "--singular")?;
    let target_plural = Name::parse(&target_plural, "--plural")?;

    if target_singular == target_plural {
        return Err(BoilerError::invalid(
            "plural and singular cannot be the same",
            target_plural.as_str(),
            "--plural",
        ));
    }
    if source_plural == target_plural {
        return Err(BoilerError::invalid(
            "target plural cannot equal the source plural",
            target_plural.as_str(),
            "--plural",
        ));
    }

    let distinct: HashSet<&Name> =
        [&target_plural, &target_singular, &source_plural, &source_singular].into_iter().collect();
    if distinct.len() != 4 {
        return Err(BoilerError::invalid(
            "source and target names must be four distinct names",
            format!("{source_singular}/{source_plural} -> {target_singular}/{target_plural}"),
            "--singular",
        ));
    }

    let diff = target_plural.len().abs_diff(target_singular.len());
    if diff > settings.max_name_diff {
        return Err(BoilerError::invalid(
            format!(
                "singular and plural differ in length by {diff}, more than {}",
                settings.max_name_diff
            ),
            target_plural.as_str(),
            "--max-name-diff",
        ));
    }

    for name in [&target_singular, &target_plural] {
        if name.len() < settings.min_name_length {
            return Err(BoilerError::invalid(
                format!("name shorter than {} characters", settings.min_name_length),
                name.as_str(),
                "--min-name-length",
            ));
        }
        if name.len() > settings.max_name_length {
            return Err(BoilerError::invalid(
                format!("name longer than {} characters", settings.max_name_length),
                name.as_str(),
                "--max-name-length",
            ));
        }
    }

    if fs.kind(&settings.source_dir)? != Some(EntryKind::Directory) {
        return Err(BoilerError::invalid(
            "source dir not found",
            settings.source_dir.display().to_string(),
            "--source-dir",
        ));
    }

    let plural = NamePairSet::from_names(Axis::Plural, &source_plural, &target_plural);
    let singular = NamePairSet::from_names(Axis::Singular, &source_singular, &target_singular);
    let rules = ReplacementRules::build(&plural, &singular);

    debug!(
        "{}/{} -> {}/{} with {} replacement rules",
        source_singular,
        source_plural,
        target_singular,
        target_plural,
        rules.len()
    );

    Ok(RunConfig {
        names: EntityNames {
            source_singular,
            source_plural,
            target_singular,
            target_plural,
        },
        source_root: settings.source_dir.clone(),
        rules,
        filter: request.filter.clone(),
        limits: ScanLimits {
            max_depth: settings.max_scan_depth,
            hard_max_files: settings.hard_max_files,
        },
        include_dirs: request.include_dirs,
        force: request.force,
        mode: if request.dry_run {
            TransactionMode::DryRun
        } else {
            TransactionMode::Execute
        },
    })
}

/// Fill in whichever target name is missing.
fn resolve_targets(singular: Option<&str>, plural: Option<&str>) -> Result<(String, String)> {
    let singular = singular.filter(|s| !s.is_empty());
    let plural = plural.filter(|p| !p.is_empty());

    match (singular, plural) {
        (Some(s), Some(p)) => Ok((s.to_string(), p.to_string())),
        (Some(s), None) => Ok((s.to_string(), pluralize(s))),
        (None, Some(p)) => Ok((singularize(p), p.to_string())),
        (None, None) => Err(BoilerError::invalid(
            "a target name is required, e.g. --singular fooBar --plural fooBars",
            "",
            "--singular",
        )),
    }
}
