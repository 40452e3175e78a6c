//! Error types for the cbase helpers.
//!
//! The public C-shaped entry points collapse these into sentinels (`-1`,
//! `"unknown error"`, `"error"`); the `try_*` variants surface them directly.

use thiserror::Error;

/// Failure of a bounded formatting request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The rendered text plus its NUL terminator did not fit.
    #[error("buffer of {capacity} bytes is smaller than the {needed} bytes needed")]
    Truncated {
        /// Bytes required including the terminator.
        needed: usize,
        /// Capacity of the caller buffer.
        capacity: usize,
    },
    /// A `Display` implementation reported `fmt::Error`.
    #[error("formatting engine reported an encoding error")]
    Encoding,
    /// A printf directive had no matching argument, or the wrong kind.
    #[error("argument {index} does not satisfy conversion '%{conversion}'")]
    Argument {
        /// Zero-based argument position.
        index: usize,
        /// Conversion character of the directive.
        conversion: char,
    },
}

/// Failure of a single errno describer strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescribeFailure {
    /// The strategy has no text for this code.
    #[error("no description for error code {0}")]
    UnknownCode(i32),
    /// The description did not fit into the caller buffer.
    #[error("description needs {needed} bytes, buffer holds {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
    /// The host facility returned a non-zero status.
    #[error("host error-description facility failed with status {0}")]
    Host(i32),
}

/// Failure to obtain or render wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("reading the system clock failed")]
    ClockRead,
    #[error("converting {0} to local calendar time failed")]
    LocalConversion(i64),
    /// Year outside what the fixed layout can express.
    #[error("year {0} cannot be rendered")]
    YearOutOfRange(i64),
    /// strftime semantics: zero bytes produced because the text did not fit.
    #[error("timestamp needs {needed} bytes, buffer holds {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
}
