//! Process exit codes.
//!
//! Rejections exit with [`RejectionReason::exit_code`](ask_verify::RejectionReason::exit_code)
//! (1 through 7). The codes below cover everything else.

pub const SUCCESS: i32 = 0;
pub const INTERNAL_ERROR: i32 = 10; // Bad input files, config or I/O
