//! Exit code constants for the CLI
//!
//! - 0: Success
//! - 1: Usage, parse or I/O failure

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Any failure; the registry file was not written
pub const EXIT_FAILURE: i32 = 1;
