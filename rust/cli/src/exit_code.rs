//! Exit code constants for the CLI application.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code.
pub const ERROR: i32 = 2;

/// The human table owner walked away and nobody was left to run the table.
pub const INTERRUPTED: i32 = 130;
