//! Exit code constants for the yamlsettings CLI.
//!
//! - 0: Success
//! - 1: User error (bad args) or a missing setting
//! - 2: Source failure (nothing loadable, unreadable or unparseable input)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid usage.
pub const USER_ERROR: i32 = 1;

/// A requested key does not exist.
pub const MISSING_SETTING: i32 = 1;

/// No usable settings could be loaded from the configured sources.
pub const SOURCE_FAILURE: i32 = 2;
