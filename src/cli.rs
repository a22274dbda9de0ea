use std::path::PathBuf;

use clap::{command, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command};
use shellexpand::tilde;

use crate::constants::{
    ALL_HELP, ALL_RELS_HELP, ATTRFILE_HELP, ATTRS_HELP, CONTENT_HELP, FAILURE_HELP, INPUT_HELP,
    MODULES_HELP, NO_SUCCESS_HELP, SCRIPT_HELP, SUCCESS_HELP, VERBOSE_HELP,
};
use crate::errors::{usage_error, Result};
use crate::logging::LogLevel;
use crate::report::ReportOptions;

/// Raw output-selection flags as given on the command line
///
/// Shorthand flags are resolved in a fixed order: `--all` first, then
/// `--all-rels`, then `--no-success`; the last applied wins for success.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFlags {
    pub attributes: bool,
    pub content: bool,
    pub failure: bool,
    pub all: bool,
    pub all_relationships: bool,
    pub no_success: bool,
}

/// Resolved output selection driving the reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSelection {
    pub attributes: bool,
    pub content: bool,
    pub success: bool,
    pub failure: bool,
}

impl OutputFlags {
    /// Applies the shorthand flags in their documented order
    pub fn resolve(self) -> OutputSelection {
        let mut selection = OutputSelection {
            attributes: self.attributes,
            content: self.content,
            success: true, // on by default
            failure: self.failure,
        };

        if self.all {
            selection.attributes = true;
            selection.content = true;
            selection.success = true;
            selection.failure = true;
        }
        if self.all_relationships {
            selection.success = true;
            selection.failure = true;
        }
        if self.no_success {
            selection.success = false;
        }

        selection
    }
}

impl OutputSelection {
    /// The per-item rendering options for the reporter
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            attributes: self.attributes,
            content: self.content,
        }
    }
}

/// Immutable configuration for one harness invocation
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Path to the script to execute
    pub script_path: PathBuf,
    /// Base attribute properties file, if any
    pub attribute_file: Option<PathBuf>,
    /// Module search paths handed to the script engine
    pub module_paths: Vec<String>,
    /// Directory to ingest instead of standard input
    pub input_dir: Option<PathBuf>,
    /// Which categories and item details to report
    pub selection: OutputSelection,
    /// Log verbosity from repeated -v flags
    pub verbosity: LogLevel,
}

/// Sets up the command-line definition
pub fn build_command() -> Command {
    let arg_script = Arg::new("script")
        .help(SCRIPT_HELP)
        .value_name("script file")
        .required(true);

    let arg_attrs = Arg::new("attrs")
        .long("attrs")
        .help(ATTRS_HELP)
        .action(ArgAction::SetTrue);

    let arg_content = Arg::new("content")
        .long("content")
        .help(CONTENT_HELP)
        .action(ArgAction::SetTrue);

    let arg_attrfile = Arg::new("attrfile")
        .long("attrfile")
        .help(ATTRFILE_HELP)
        .value_name("path");

    let arg_modules = Arg::new("modules")
        .long("modules")
        .help(MODULES_HELP)
        .value_name("csv");

    let arg_input = Arg::new("input")
        .long("input")
        .help(INPUT_HELP)
        .value_name("dir");

    let arg_failure = Arg::new("failure")
        .long("failure")
        .help(FAILURE_HELP)
        .action(ArgAction::SetTrue);

    let arg_success = Arg::new("success")
        .long("success")
        .help(SUCCESS_HELP)
        .action(ArgAction::SetTrue);

    let arg_all = Arg::new("all")
        .long("all")
        .help(ALL_HELP)
        .action(ArgAction::SetTrue);

    let arg_all_rels = Arg::new("all_rels")
        .long("all-rels")
        .help(ALL_RELS_HELP)
        .action(ArgAction::SetTrue);

    let arg_no_success = Arg::new("no_success")
        .long("no-success")
        .help(NO_SUCCESS_HELP)
        .action(ArgAction::SetTrue);

    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count);

    command!()
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .arg(arg_script)
        .arg(arg_attrs)
        .arg(arg_content)
        .arg(arg_attrfile)
        .arg(arg_modules)
        .arg(arg_input)
        .arg(arg_failure)
        .arg(arg_success)
        .arg(arg_all)
        .arg(arg_all_rels)
        .arg(arg_no_success)
        .arg(arg_verbose)
}

/// Parses the process arguments into run options
///
/// Malformed invocations print usage to stderr and surface as a usage
/// error; help and version requests exit the process directly.
pub fn parse_options() -> Result<RunOptions> {
    let matches = match build_command().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            use clap::error::ErrorKind;
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                let _ = err.print();
                std::process::exit(0);
            }
            eprintln!("{err}");
            return Err(usage_error("Invalid command line"));
        }
    };
    options_from_matches(&matches)
}

/// Builds run options from parsed matches
pub fn options_from_matches(matches: &ArgMatches) -> Result<RunOptions> {
    let script_path = matches
        .get_one::<String>("script")
        .map(|s| expand_path(s))
        .ok_or_else(|| usage_error("The script file argument is required"))?;

    let flags = OutputFlags {
        attributes: matches.get_flag("attrs"),
        content: matches.get_flag("content"),
        failure: matches.get_flag("failure"),
        all: matches.get_flag("all"),
        all_relationships: matches.get_flag("all_rels"),
        no_success: matches.get_flag("no_success"),
    };

    let module_paths = matches
        .get_one::<String>("modules")
        .map(|csv| {
            csv.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(RunOptions {
        script_path,
        attribute_file: matches.get_one::<String>("attrfile").map(|s| expand_path(s)),
        module_paths,
        input_dir: matches.get_one::<String>("input").map(|s| expand_path(s)),
        selection: flags.resolve(),
        verbosity: LogLevel::from_occurrences(matches.get_count("verbose")),
    })
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(tilde(raw).to_string())
}
