//! Error descriptions backed by the host `strerror_r`.
//!
//! The `libc` crate binds the XSI variant (`int` status, buffer filled by
//! the callee) on every unix target, so one strategy covers all of them.
//! Targets without it fall back to the built-in table.

use std::ffi::{c_char, c_int};

use cbase_core::errno::{DescribeErrno, ErrnoTable, describe_error_with};
use cbase_core::error::DescribeFailure;

use crate::config::contract_violation;

/// Host thread-safe `strerror_r` strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostStrerror;

#[cfg(unix)]
impl DescribeErrno for HostStrerror {
    fn describe_into(&self, code: i32, buf: &mut [u8]) -> Result<usize, DescribeFailure> {
        if buf.is_empty() {
            return Err(DescribeFailure::BufferTooSmall {
                needed: 1,
                capacity: 0,
            });
        }
        // SAFETY: `buf` is valid for `buf.len()` writable bytes.
        let rc = unsafe { libc::strerror_r(code, buf.as_mut_ptr().cast::<c_char>(), buf.len()) };
        if rc != 0 {
            return Err(DescribeFailure::Host(rc));
        }
        buf.iter()
            .position(|&b| b == 0)
            .ok_or(DescribeFailure::Host(libc::ERANGE))
    }
}

#[cfg(not(unix))]
impl DescribeErrno for HostStrerror {
    fn describe_into(&self, code: i32, buf: &mut [u8]) -> Result<usize, DescribeFailure> {
        ErrnoTable.describe_into(code, buf)
    }
}

/// The describer `describe_error` uses on this target.
pub fn default_describer() -> &'static dyn DescribeErrno {
    if cfg!(unix) { &HostStrerror } else { &ErrnoTable }
}

/// Human-readable description of `code`, written into `buf`.
///
/// Tries the host facility, then `"unknown error <code>"`; the returned
/// text is inside `buf` unless both failed, in which case it is the static
/// `"unknown error"`. Never empty.
pub fn describe_error(code: i32, buf: &mut [u8]) -> &str {
    describe_error_with(code, buf, default_describer())
}

const UNKNOWN_ERROR_C: &std::ffi::CStr = c"unknown error";

/// C entry point: `strerror_r_improved(err, str, len)`.
///
/// Returns `str` when it holds the description, else the static
/// `"unknown error"`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cbase_strerror_r_improved(
    err: c_int,
    str_buf: *mut c_char,
    len: usize,
) -> *const c_char {
    if str_buf.is_null() {
        if len != 0 {
            contract_violation("cbase_strerror_r_improved");
        }
        return UNKNOWN_ERROR_C.as_ptr();
    }
    // SAFETY: caller guarantees `str_buf` is valid for `len` writable bytes.
    let buf = unsafe { std::slice::from_raw_parts_mut(str_buf.cast::<u8>(), len) };
    let text = describe_error(err, buf);
    if std::ptr::eq(text.as_ptr(), str_buf.cast::<u8>()) {
        str_buf
    } else {
        UNKNOWN_ERROR_C.as_ptr()
    }
}
