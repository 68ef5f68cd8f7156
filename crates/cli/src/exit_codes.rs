//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `nplb` exit codes.
//! Exit codes are part of the shell contract; upload scripts rely on them.
//!
//! | Code | Meaning                                                     |
//! |------|-------------------------------------------------------------|
//! | 0    | Success                                                     |
//! | 2    | Usage error (bad arguments, no report file given)           |
//! | 3    | I/O error (missing input, unwritable store)                 |
//! | 4    | Decode error (corrupt or image-only PDF, unreadable sheet)  |
//! | 5    | Config error (bad TOML, failed validation)                  |
//! | 6    | Partial upload (some kinds published, at least one failed)  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Input file missing/unreadable, or the artifact store cannot be written.
pub const EXIT_IO: u8 = 3;

/// The source file could not be decoded into lines or rows.
/// Fatal for that report kind only.
pub const EXIT_DECODE: u8 = 4;

/// Config file failed to parse or validate.
pub const EXIT_CONFIG: u8 = 5;

/// Upload published some report kinds but at least one failed.
/// Failed kinds keep their previously published artifact.
pub const EXIT_PARTIAL: u8 = 6;
