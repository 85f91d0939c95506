//! CLI Exit Code Registry
//!
//! Single source of truth for `irecon` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success: every outcome is an exact `Match`           |
//! | 1    | Reconciled, but some outcomes are not exact matches  |
//! | 2    | Usage error (bad args, unreadable config path)       |
//! | 3    | Invalid config                                       |
//! | 4    | Input or runtime error (CSV, duplicate key, output)  |

/// Success - every record paired exactly.
pub const EXIT_SUCCESS: u8 = 0;

/// Partial matches or unmatched records found. Like `diff(1)`, 1 means "ledgers differ."
pub const EXIT_RECON_MISMATCH: u8 = 1;

/// Usage error - bad arguments, missing config file.
pub const EXIT_USAGE: u8 = 2;

/// Config failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 3;

/// Source CSV unreadable or malformed, duplicate key, or output write failure.
pub const EXIT_RECON_RUNTIME: u8 = 4;
