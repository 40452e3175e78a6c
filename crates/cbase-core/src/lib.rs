//! # cbase-core
//!
//! Safe Rust core of the cbase helpers.
//!
//! - [`stdio`]: bounded, all-or-nothing formatted output into caller buffers,
//!   for both `format_args!` requests and printf-style templates.
//! - [`errno`]: errno constants, a built-in description table, and the
//!   describer strategy used by `describe_error`.
//! - [`time`]: epoch to broken-down time and the `Www Mmm dd hh:mm:ss yyyy`
//!   layout.
//! - [`cmp`] and the exported macros: min/max, array sizing, unused
//!   parameters, stringification.
//!
//! Nothing here allocates or keeps state between calls; every output goes
//! through a caller-supplied buffer. No `unsafe` code is permitted at the
//! crate level.

#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod cmp;
pub mod errno;
pub mod error;
pub mod stdio;
pub mod time;

pub use cmp::{array_end, array_size, max_of, min_of};
pub use errno::{DescribeErrno, ErrnoTable, UNKNOWN_ERROR, describe_error_with};
pub use error::{ClockError, DescribeFailure, FormatError};
pub use stdio::{Arg, c_text, format_template, format_to_buffer, try_format_template, try_format_to_buffer};
pub use time::{BrokenDownTime, TIMESTAMP_LEN, epoch_to_broken_down, render_timestamp};
