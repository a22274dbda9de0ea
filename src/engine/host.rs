//! Script hosts
//!
//! A script host is the opaque "run this script against a flow file"
//! capability the engine invokes. The host guarantees that every flow file
//! it consumes ends up in exactly one outcome category, success or failure,
//! even when the script itself blows up.

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use log::{debug, error};

use crate::constants::{ATTR_ENV_PREFIX, ATTR_UPDATE_PREFIX};
use crate::errors::{script_not_found_error, Result};
use crate::flowfile::FlowFile;

use super::selector::EngineKind;
use super::Outcome;

/// The capability of running the configured script against one flow file
pub trait ScriptHost {
    /// Validates the configured run before any flow file is processed
    ///
    /// A fail-fast contract: an invalid configuration must abort here,
    /// never partway through the queue.
    fn validate(&self) -> Result<()>;

    /// Executes one pass of the script
    ///
    /// A pass with no flow file (empty queue) is a no-op and yields no
    /// results. A pass with a flow file yields every derived flow file
    /// paired with the outcome category the script routed it to; the
    /// consumed flow file never disappears without a categorized result.
    fn run_pass(&mut self, item: Option<FlowFile>) -> Vec<(Outcome, FlowFile)>;
}

/// Script host that runs the script through its engine's interpreter binary
///
/// Per pass, the flow file payload is piped to the interpreter on stdin and
/// the attributes are exported as `FLOWFILE_ATTR_<KEY>` environment
/// variables. On success, stdout becomes the transformed payload; a failed
/// item keeps its original payload. Stderr lines of the form
/// `attr.key=value` update attributes; everything else on stderr is logged.
/// Exit status zero routes to success, anything else (including a failure
/// to launch the interpreter at all) routes to failure.
pub struct CommandScriptHost {
    script_path: PathBuf,
    program: String,
    module_path_variable: &'static str,
    module_search_path: String,
}

impl CommandScriptHost {
    /// Creates a host for the engine selected from the script path
    pub fn for_engine(kind: EngineKind, script_path: PathBuf, module_paths: Vec<String>) -> Self {
        CommandScriptHost {
            script_path,
            program: kind.program().to_string(),
            module_path_variable: kind.module_path_variable(),
            module_search_path: kind.module_search_path(&module_paths),
        }
    }

    /// Creates a host with an explicit interpreter program
    ///
    /// Used by tests to run scripts through `sh` regardless of extension.
    pub fn with_program(
        program: &str,
        script_path: PathBuf,
        module_paths: Vec<String>,
    ) -> Self {
        CommandScriptHost {
            script_path,
            program: program.to_string(),
            module_path_variable: "MODULE_PATH",
            module_search_path: module_paths.join(":"),
        }
    }

    fn execute(&self, item: &FlowFile) -> std::io::Result<Output> {
        let mut command = Command::new(&self.program);
        command
            .arg(&self.script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        for (key, value) in item.attributes() {
            command.env(attribute_env_name(key), value);
        }
        if !self.module_search_path.is_empty() {
            command.env(self.module_path_variable, &self.module_search_path);
        }

        let mut child = command.spawn()?;
        // Feed the payload from a separate thread so the child's output is
        // drained while we write; a payload larger than the pipe buffer
        // would otherwise wedge the pass with both sides blocked
        let writer = child.stdin.take().map(|mut stdin| {
            let payload = item.payload().to_vec();
            std::thread::spawn(move || {
                use std::io::Write;
                if let Err(e) = stdin.write_all(&payload) {
                    // The script may legitimately exit without reading its input
                    if e.kind() == std::io::ErrorKind::BrokenPipe {
                        debug!("Script closed stdin before the payload was fully written");
                    } else {
                        error!("Failed to write the payload to the script: {e}");
                    }
                }
            })
        });
        let output = child.wait_with_output();
        if let Some(writer) = writer {
            let _ = writer.join();
        }
        output
    }

    fn apply_stderr(&self, item: &mut FlowFile, stderr: &[u8]) {
        for line in String::from_utf8_lossy(stderr).lines() {
            if let Some(update) = line.strip_prefix(ATTR_UPDATE_PREFIX) {
                if let Some((key, value)) = update.split_once('=') {
                    item.set_attribute(key.to_string(), value.to_string());
                    continue;
                }
            }
            if !line.is_empty() {
                debug!("script stderr: {line}");
            }
        }
    }
}

impl ScriptHost for CommandScriptHost {
    fn validate(&self) -> Result<()> {
        if !self.script_path.exists() {
            return Err(script_not_found_error(self.script_path.clone()));
        }
        Ok(())
    }

    fn run_pass(&mut self, item: Option<FlowFile>) -> Vec<(Outcome, FlowFile)> {
        let mut item = match item {
            Some(item) => item,
            None => return Vec::new(),
        };

        match self.execute(&item) {
            Ok(output) => {
                self.apply_stderr(&mut item, &output.stderr);
                let outcome = if output.status.success() {
                    // The script's stdout is the transformed payload
                    item.set_payload(output.stdout);
                    Outcome::Success
                } else {
                    // A failed item keeps its original payload
                    debug!("Script exited with {} for {item}", output.status);
                    Outcome::Failure
                };
                vec![(outcome, item)]
            }
            Err(e) => {
                error!(
                    "Failed to run {} on {}: {e}",
                    self.program,
                    self.script_path.display()
                );
                vec![(Outcome::Failure, item)]
            }
        }
    }
}

/// Environment variable name for a flow file attribute key
///
/// Keys are uppercased and non-alphanumeric characters are replaced with
/// underscores so the result is always a valid variable name.
fn attribute_env_name(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{ATTR_ENV_PREFIX}{sanitized}")
}
