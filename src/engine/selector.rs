//! Script engine selection
//!
//! Maps a script path to the engine that should run it, based purely on
//! the file extension.

use std::path::Path;

/// The family of script engine used to run a script
///
/// This is a closed, total mapping over file extensions with an explicit
/// default; selection never fails on an unrecognized extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// ECMAScript-family engine (`.js`)
    EcmaScript,
    /// Python-family engine (`.py`)
    Python,
    /// Ruby-family engine (`.rb`)
    Ruby,
    /// Lua engine (`.lua`)
    Lua,
    /// Groovy-family engine, the default for any other extension
    Groovy,
}

impl EngineKind {
    /// Selects the engine from the lowercase extension of the script path
    pub fn from_script_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "js" => EngineKind::EcmaScript,
            "py" => EngineKind::Python,
            "rb" => EngineKind::Ruby,
            "lua" => EngineKind::Lua,
            _ => EngineKind::Groovy,
        }
    }

    /// Human-readable engine name for logs
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::EcmaScript => "ECMAScript",
            EngineKind::Python => "python",
            EngineKind::Ruby => "ruby",
            EngineKind::Lua => "lua",
            EngineKind::Groovy => "Groovy",
        }
    }

    /// The interpreter program used to run scripts for this engine
    pub fn program(&self) -> &'static str {
        match self {
            EngineKind::EcmaScript => "node",
            EngineKind::Python => "python3",
            EngineKind::Ruby => "ruby",
            EngineKind::Lua => "lua",
            EngineKind::Groovy => "groovy",
        }
    }

    /// The environment variable carrying module search paths for this engine
    pub fn module_path_variable(&self) -> &'static str {
        match self {
            EngineKind::EcmaScript => "NODE_PATH",
            EngineKind::Python => "PYTHONPATH",
            EngineKind::Ruby => "RUBYLIB",
            EngineKind::Lua => "LUA_PATH",
            EngineKind::Groovy => "CLASSPATH",
        }
    }

    /// Joins module directories into the search-path variable's value
    ///
    /// Lua's `LUA_PATH` holds `;`-separated `?.lua` patterns rather than
    /// plain directories; every other engine takes a `:`-joined list.
    pub fn module_search_path(&self, paths: &[String]) -> String {
        match self {
            EngineKind::Lua => paths
                .iter()
                .map(|p| format!("{p}/?.lua"))
                .collect::<Vec<_>>()
                .join(";"),
            _ => paths.join(":"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_known_extensions_map_to_their_engines() {
        assert_eq!(
            EngineKind::from_script_path(Path::new("script.js")),
            EngineKind::EcmaScript
        );
        assert_eq!(
            EngineKind::from_script_path(Path::new("script.py")),
            EngineKind::Python
        );
        assert_eq!(
            EngineKind::from_script_path(Path::new("script.rb")),
            EngineKind::Ruby
        );
        assert_eq!(
            EngineKind::from_script_path(Path::new("script.lua")),
            EngineKind::Lua
        );
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        assert_eq!(
            EngineKind::from_script_path(Path::new("script.PY")),
            EngineKind::Python
        );
        assert_eq!(
            EngineKind::from_script_path(Path::new("script.Lua")),
            EngineKind::Lua
        );
    }

    #[test]
    fn test_unknown_and_missing_extensions_default_to_groovy() {
        assert_eq!(
            EngineKind::from_script_path(Path::new("script.groovy")),
            EngineKind::Groovy
        );
        assert_eq!(
            EngineKind::from_script_path(Path::new("script.sh")),
            EngineKind::Groovy
        );
        assert_eq!(
            EngineKind::from_script_path(Path::new("script")),
            EngineKind::Groovy
        );
        assert_eq!(
            EngineKind::from_script_path(&PathBuf::from("dir.with.dots/script")),
            EngineKind::Groovy
        );
    }

    #[test]
    fn test_lua_module_paths_become_semicolon_joined_patterns() {
        let paths = vec!["/opt/lib-a".to_string(), "/opt/lib-b".to_string()];
        assert_eq!(
            EngineKind::Lua.module_search_path(&paths),
            "/opt/lib-a/?.lua;/opt/lib-b/?.lua"
        );
    }

    #[test]
    fn test_other_engines_join_module_paths_with_colons() {
        let paths = vec!["/opt/lib-a".to_string(), "/opt/lib-b".to_string()];
        assert_eq!(
            EngineKind::Python.module_search_path(&paths),
            "/opt/lib-a:/opt/lib-b"
        );
        assert_eq!(
            EngineKind::Groovy.module_search_path(&paths),
            "/opt/lib-a:/opt/lib-b"
        );
        assert_eq!(EngineKind::Lua.module_search_path(&[]), "");
    }
}
