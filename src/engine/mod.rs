//! Script execution engine
//!
//! This module selects a script engine from the script path, runs the
//! script against each queued flow file, and partitions the results into
//! outcome categories.

pub mod host;
pub mod runner;
pub mod selector;

pub use host::{CommandScriptHost, ScriptHost};
pub use runner::ScriptRunner;
pub use selector::EngineKind;

use crate::constants::{REL_FAILURE, REL_SUCCESS};

/// Named outcome category a flow file is routed to after processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The script processed the flow file successfully
    Success,
    /// The script failed, raised an error, or could not be run
    Failure,
}

impl Outcome {
    /// The relationship name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Success => REL_SUCCESS,
            Outcome::Failure => REL_FAILURE,
        }
    }
}
