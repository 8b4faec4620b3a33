//! update-registry CLI Library
//!
//! Argument parsing, logging setup and error reporting for the
//! `update-registry` binary.

// Re-export modules for use in tests
/// Command-line interface definitions and argument parsing
pub mod cli;
/// Error type and stderr reporting
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Logging setup
pub mod logging;
/// The update command
pub mod update;
