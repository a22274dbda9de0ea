//! Harness orchestration
//!
//! This module wires the components together for one invocation: validate
//! the script, select the engine, seed attributes, ingest flow files, run
//! the script, and report the outcomes.

use std::collections::HashMap;
use std::io::Write;

use log::{debug, info};

use crate::attributes::load_attribute_file;
use crate::cli::RunOptions;
use crate::engine::runner::passes_for;
use crate::engine::{CommandScriptHost, EngineKind, Outcome, ScriptHost, ScriptRunner};
use crate::errors::{file_operation_error, script_not_found_error, Result};
use crate::flowfile::FlowFileQueue;
use crate::ingest::ingest_into;
use crate::report::report_category;

/// Counts from one finished harness run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Flow files admitted by ingestion
    pub admitted: usize,
    /// Flow files transferred to success
    pub success: usize,
    /// Flow files transferred to failure
    pub failure: usize,
}

/// Runs the full harness with the engine selected from the script path
pub fn run_harness<W: Write>(options: &RunOptions, out: &mut W) -> Result<RunSummary> {
    if !options.script_path.exists() {
        return Err(script_not_found_error(options.script_path.clone()));
    }

    let kind = EngineKind::from_script_path(&options.script_path);
    info!(
        "Selected {} engine for {}",
        kind.name(),
        options.script_path.display()
    );

    let host = CommandScriptHost::for_engine(
        kind,
        options.script_path.clone(),
        options.module_paths.clone(),
    );
    run_with_host(options, host, out)
}

/// Runs the harness against an explicit script host
///
/// Split out from [`run_harness`] so tests can substitute a host without
/// spawning interpreters.
pub fn run_with_host<H: ScriptHost, W: Write>(
    options: &RunOptions,
    host: H,
    out: &mut W,
) -> Result<RunSummary> {
    let mut runner = ScriptRunner::new(host);
    // Fail fast: an invalid run never consumes a single flow file
    runner.validate()?;

    let base_attributes = match &options.attribute_file {
        Some(path) => load_attribute_file(path)?,
        None => HashMap::new(),
    };

    let mut queue = FlowFileQueue::new();
    let admitted = ingest_into(options.input_dir.as_deref(), &base_attributes, &mut queue)?;
    info!("Admitted {admitted} flow file(s)");

    runner.run(&mut queue, passes_for(admitted));

    let report_options = options.selection.report_options();
    if options.selection.success {
        report_category(
            out,
            Outcome::Success.name(),
            runner.transferred_to(Outcome::Success),
            &report_options,
        )
        .map_err(|e| file_operation_error(e, options.script_path.clone(), "write report for"))?;
    }
    if options.selection.failure {
        report_category(
            out,
            Outcome::Failure.name(),
            runner.transferred_to(Outcome::Failure),
            &report_options,
        )
        .map_err(|e| file_operation_error(e, options.script_path.clone(), "write report for"))?;
    }

    let summary = RunSummary {
        admitted,
        success: runner.transferred_to(Outcome::Success).len(),
        failure: runner.transferred_to(Outcome::Failure).len(),
    };
    debug!("Run finished: {summary:?}");
    Ok(summary)
}
