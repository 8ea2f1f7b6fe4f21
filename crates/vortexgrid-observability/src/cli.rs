//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-vortexgrid-structures`, `--debug-generate_bricks`, etc.
//! to raise the log level of individual crates.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use vortexgrid_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(std::env::args());
/// if flags.is_enabled("vortexgrid-serialization") {
///     // Enable debug logging for vortexgrid-serialization crate
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut enabled_crates = HashMap::new();
        let mut debug_all = false;

        for arg in args {
            if arg == "--debug-all" {
                debug_all = true;
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                enabled_crates.insert(crate_name.to_string(), true);
            }
        }

        let mut flags = CrateDebugFlags { enabled_crates };
        if debug_all {
            flags.enable_all();
        }
        flags
    }

    /// Merge a `VORTEXGRID_DEBUG`-style value: `all` or comma-separated crate names
    pub fn apply_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in value.split(',') {
            let crate_name = crate_name.trim();
            if !crate_name.is_empty() {
                self.enabled_crates.insert(crate_name.to_string(), true);
            }
        }
    }

    fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enabled_crates.insert(crate_name.to_string(), true);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Get all enabled crates
    pub fn enabled_crates(&self) -> Vec<&String> {
        self.enabled_crates.keys().collect()
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Get log level filter for a crate
    ///
    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create a tracing filter from debug flags
    ///
    /// Returns a filter string that can be used with `EnvFilter`.
    /// Format: "vortexgrid-structures=debug,info" or "info" if none enabled.
    pub fn to_filter_string(&self) -> String {
        self.to_filter_string_with_base("info")
    }

    /// Like [`to_filter_string`](Self::to_filter_string) with `base_level`
    /// applied to every target without a debug flag.
    pub fn to_filter_string_with_base(&self, base_level: &str) -> String {
        let base_level = base_level.to_lowercase();
        if self.enabled_crates.is_empty() {
            return base_level;
        }

        let mut crate_names: Vec<&String> = self.enabled_crates.keys().collect();
        crate_names.sort();
        let mut filters: Vec<String> = crate_names
            .into_iter()
            .map(|crate_name| format!("{}=debug", crate_name))
            .collect();
        filters.push(base_level);
        filters.join(",")
    }
}

/// Helper function to parse debug flags from environment
///
/// Checks both command-line arguments and the `VORTEXGRID_DEBUG` environment variable.
/// Environment variable format: comma-separated crate names, e.g., "vortexgrid-structures,generate_bricks"
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(env_var) = env::var("VORTEXGRID_DEBUG") {
        flags.apply_env_value(&env_var);
    }
    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  VORTEXGRID_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  VORTEXGRID_DEBUG=all                               Enable debug for all crates

Examples:
  --debug-vortexgrid-serialization
  --debug-vortexgrid-structures --debug-generate_bricks
  VORTEXGRID_DEBUG=vortexgrid-structures,vortexgrid-serialization
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags =
            CrateDebugFlags::from_args(vec!["--debug-vortexgrid-structures".to_string()]);
        assert!(flags.is_enabled("vortexgrid-structures"));
        assert!(!flags.is_enabled("vortexgrid-serialization"));
    }

    #[test]
    fn test_non_flag_arguments_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "generate_bricks".to_string(),
            "--frames".to_string(),
            "3".to_string(),
        ]);
        assert!(!flags.any_enabled());
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_env_value() {
        let mut flags = CrateDebugFlags::default();
        flags.apply_env_value(" vortexgrid-serialization , ,generate_bricks");
        assert!(flags.is_enabled("vortexgrid-serialization"));
        assert!(flags.is_enabled("generate_bricks"));
        assert_eq!(flags.enabled_crates().len(), 2);

        let mut all = CrateDebugFlags::default();
        all.apply_env_value("all");
        assert_eq!(all.enabled_crates().len(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_args(vec![
            "--debug-vortexgrid-structures".to_string(),
            "--debug-generate_bricks".to_string(),
        ]);
        assert_eq!(
            flags.to_filter_string_with_base("WARN"),
            "generate_bricks=debug,vortexgrid-structures=debug,warn"
        );
        assert_eq!(CrateDebugFlags::default().to_filter_string(), "info");
    }

    #[test]
    fn test_log_level() {
        let flags =
            CrateDebugFlags::from_args(vec!["--debug-vortexgrid-structures".to_string()]);
        assert_eq!(flags.log_level("vortexgrid-structures"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("vortexgrid-serialization"), tracing::Level::INFO);
    }
}
