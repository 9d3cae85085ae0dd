//! Infrastructure constants

// ============================================================================
// Configuration
// ============================================================================

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "RIVET";

/// Separator between nested keys in environment variable names
/// (`RIVET_REMOTE__TIMEOUT_SECS` → `remote.timeout_secs`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "rivet.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "rivet";

// ============================================================================
// Logging
// ============================================================================

/// Environment variable holding an `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "RIVET_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log file stem when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "rivet";

// ============================================================================
// Remote invocation
// ============================================================================

/// Default request timeout in seconds
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_REMOTE_CONNECT_TIMEOUT_SECS: u64 = 10;
