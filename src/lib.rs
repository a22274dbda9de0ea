pub mod attributes;
pub mod cli;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod flowfile;
pub mod harness;
pub mod ingest;
pub mod logging;
pub mod report;

pub mod prelude {
    pub use crate::cli::{parse_options, OutputFlags, OutputSelection, RunOptions};
    pub use crate::engine::{CommandScriptHost, EngineKind, Outcome, ScriptHost, ScriptRunner};
    pub use crate::errors::{Error, Result};
    pub use crate::flowfile::{FlowFile, FlowFileQueue};
    pub use crate::harness::{run_harness, run_with_host, RunSummary};
    pub use crate::logging::{init_logger, LogLevel};
    pub use crate::report::{report_category, ReportOptions};
}
