use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::core::{BoilerError, Result};
use crate::fs::FileSystem;
use crate::refactor::{check, plan, TransactionMode, TransactionResult, WritePlan, WriteTransaction};
use crate::validate::{validate, EntityNames, RunRequest};

/// What one run planned and did.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub names: EntityNames,
    pub source_root: PathBuf,
    pub mode: TransactionMode,
    pub plan: WritePlan,

    /// Existing files replaced (or that would be, in a dry run)
    pub overwritten: Vec<PathBuf>,

    pub result: TransactionResult,
}

impl RunReport {
    pub fn is_dry_run(&self) -> bool {
        self.mode == TransactionMode::DryRun
    }
}

/// Validate, plan, guard and write one entity.
///
/// Every check happens before the first write. A dry run goes through the
/// same steps and skips only the mutations.
pub fn run(request: &RunRequest, fs: &dyn FileSystem) -> Result<RunReport> {
    let config = validate(request, fs)?;
    debug!("inputs: {:?}", config.names);

    let entries = plan(fs, &config)?;
    if entries.is_empty() {
        warn!(
            "no paths under {} contain {} or {}",
            config.source_root.display(),
            config.names.source_singular,
            config.names.source_plural
        );
    }

    let write_plan = WritePlan::build(fs, &entries, &config.rules)?;
    let conflicts = check(&write_plan, fs)?.approve(config.force)?;

    let mut transaction = WriteTransaction::from_plan(&write_plan, config.mode, fs)?;
    let result = transaction.commit(fs)?;

    match config.mode {
        TransactionMode::DryRun => info!("Dry run successful. Now remove the --dry-run flag"),
        TransactionMode::Execute => info!(
            "Created {} from {} ({} file(s))",
            config.names.target_singular,
            config.names.source_singular,
            result.files_written.len()
        ),
    }

    Ok(RunReport {
        names: config.names,
        source_root: config.source_root,
        mode: config.mode,
        plan: write_plan,
        overwritten: conflicts.to_overwrite,
        result,
    })
}

/// Run once per plural, each with its singular inferred, stopping at the
/// first failure.
pub fn run_batch(base: &RunRequest, plurals: &[String], fs: &dyn FileSystem) -> Result<Vec<RunReport>> {
    if base.target_singular.is_some() && plurals.len() > 1 {
        return Err(BoilerError::invalid(
            "--singular cannot be combined with several --plural values",
            plurals.join(","),
            "--singular",
        ));
    }

    let mut reports = Vec::with_capacity(plurals.len());
    for plural in plurals {
        info!("batch: {}", plural);
        let request = RunRequest {
            target_plural: Some(plural.clone()),
            ..base.clone()
        };
        let report = run(&request, fs).map_err(|e| BoilerError::BatchFailed {
            target: plural.clone(),
            source: Box::new(e),
        })?;
        reports.push(report);
    }

    Ok(reports)
}
