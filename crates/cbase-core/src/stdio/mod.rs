//! Bounded formatted output.
//!
//! Two front ends share one all-or-nothing writer: Rust `format_args!`
//! requests and printf-style templates with typed arguments.

pub mod buffer;
pub mod printf;

pub use buffer::{BoundedWriter, c_text, format_to_buffer, status_code, try_format_to_buffer};
pub use printf::{Arg, format_template, try_format_template};
