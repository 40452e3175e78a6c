#![feature(c_variadic)]
// C exports accept raw pointers; the contract is documented per symbol.
#![allow(clippy::missing_safety_doc)]
//! # cbase-abi
//!
//! Host-facing layer for the cbase helpers.
//!
//! `cbase-core` is pure computation. This crate adds what needs the host
//! libc: the thread-safe `strerror_r`, the realtime clock, the local
//! timezone, and `errno`. It also exports the helpers as `extern "C"`
//! symbols when built as a `cdylib`.
//!
//! ```text
//! C caller -> cbase_* export (this crate) -> safe wrapper -> cbase-core
//! ```
//!
//! Null pointers with a non-zero length are contract violations; see
//! [`config::SafetyLevel`] for how they are reported.

pub mod config;
pub mod errno_abi;
pub mod stdio_abi;
pub mod time_abi;

pub use cbase_core::{
    Arg, BrokenDownTime, ClockError, DescribeErrno, DescribeFailure, ErrnoTable, FormatError,
    TIMESTAMP_LEN, UNKNOWN_ERROR, array_end, array_size, c_text, format_template,
    format_to_buffer, max_of, min_of, try_format_template, try_format_to_buffer,
};
pub use config::{MODE_ENV, SafetyLevel};
pub use errno_abi::{HostStrerror, default_describer, describe_error};
pub use time_abi::{
    TIMESTAMP_ERROR, current_epoch, format_timestamp, format_timestamp_at,
    try_format_timestamp_at,
};
