use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use boilerswap::core::{OutputFormat, OutputWriter};
use boilerswap::fs::OsFileSystem;
use boilerswap::pipeline;
use boilerswap::validate::RunRequest;

pub fn run(
    request: RunRequest,
    plurals: Vec<String>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let fs = OsFileSystem;

    let reports = if plurals.len() > 1 {
        debug!("batch of {} plurals", plurals.len());
        pipeline::run_batch(&request, &plurals, &fs).context("batch run failed")?
    } else {
        let request = RunRequest {
            target_plural: plurals.into_iter().next(),
            ..request
        };
        let report = pipeline::run(&request, &fs).context("run failed")?;
        vec![report]
    };

    OutputWriter::new(format, base, verbose).write_reports(&reports)
}
