/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Separator line printed around each attribute block in the report
pub const DASHED_LINE: &str = "---------------------------------------------------------";

/// Name of the success outcome category
pub const REL_SUCCESS: &str = "success";

/// Name of the failure outcome category
pub const REL_FAILURE: &str = "failure";

/// Attribute added to flow files ingested from a directory
pub const ATTR_FILENAME: &str = "filename";

/// Prefix for environment variables carrying flow file attributes into a script
pub const ATTR_ENV_PREFIX: &str = "FLOWFILE_ATTR_";

/// Prefix for script stderr lines that update flow file attributes
pub const ATTR_UPDATE_PREFIX: &str = "attr.";

/// Help text for the positional script argument
pub const SCRIPT_HELP: &str = "The script to execute";

/// Help text for the attrs command-line option
pub const ATTRS_HELP: &str = "Output flow file attributes. Defaults to false";

/// Help text for the content command-line option
pub const CONTENT_HELP: &str = "Output flow file contents. Defaults to false";

/// Help text for the attrfile command-line option
pub const ATTRFILE_HELP: &str =
    "Path to a properties file specifying attributes to add to incoming flow files";

/// Help text for the modules command-line option
pub const MODULES_HELP: &str =
    "Comma-separated list of paths (files or directories) containing script modules";

/// Help text for the input command-line option
pub const INPUT_HELP: &str =
    "Send each file in the specified directory as a flow file to the script";

/// Help text for the failure command-line option
pub const FAILURE_HELP: &str =
    "Output information about flow files that were transferred to the failure relationship";

/// Help text for the success command-line option
pub const SUCCESS_HELP: &str =
    "Output information about flow files that were transferred to the success relationship. Defaults to true";

/// Help text for the all command-line option
pub const ALL_HELP: &str =
    "Output content, attributes, etc. about flow files that were transferred to any relationship";

/// Help text for the all-rels command-line option
pub const ALL_RELS_HELP: &str =
    "Output information about flow files that were transferred to any relationship";

/// Help text for the no-success command-line option
pub const NO_SUCCESS_HELP: &str =
    "Do not output information about flow files that were transferred to the success relationship";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";
