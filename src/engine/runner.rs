//! Script runner
//!
//! Drives the queue through the script host one pass at a time and keeps
//! the per-category transfer lists.

use std::collections::HashMap;

use log::debug;

use crate::errors::Result;
use crate::flowfile::{FlowFile, FlowFileQueue};

use super::host::ScriptHost;
use super::Outcome;

/// Number of passes to run for the given admitted flow file count
///
/// More than one admitted flow file runs one pass per flow file; one or
/// zero runs a single pass, which tolerates an empty queue.
pub fn passes_for(admitted: usize) -> usize {
    if admitted > 1 {
        admitted
    } else {
        1
    }
}

/// Runs the script against queued flow files and partitions the outcomes
///
/// Flow files are consumed in FIFO order, exactly one pass each. Within a
/// category, transfer order is insertion order.
pub struct ScriptRunner<H: ScriptHost> {
    host: H,
    transferred: HashMap<Outcome, Vec<FlowFile>>,
}

impl<H: ScriptHost> ScriptRunner<H> {
    /// Creates a runner around a validated-later host
    pub fn new(host: H) -> Self {
        ScriptRunner {
            host,
            transferred: HashMap::new(),
        }
    }

    /// Validates the configured run before any flow file is processed
    pub fn validate(&self) -> Result<()> {
        self.host.validate()
    }

    /// Executes the given number of passes against the queue
    ///
    /// Each pass consumes the front of the queue, if any, and routes every
    /// resulting flow file to its outcome category.
    pub fn run(&mut self, queue: &mut FlowFileQueue, passes: usize) {
        debug!("Running {passes} pass(es) over {} queued flow file(s)", queue.len());
        for _ in 0..passes {
            let item = queue.dequeue();
            for (outcome, flow_file) in self.host.run_pass(item) {
                debug!("{flow_file} transferred to {}", outcome.name());
                self.transferred.entry(outcome).or_default().push(flow_file);
            }
        }
    }

    /// The flow files transferred to the given category, in insertion order
    pub fn transferred_to(&self, outcome: Outcome) -> &[FlowFile] {
        self.transferred
            .get(&outcome)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
