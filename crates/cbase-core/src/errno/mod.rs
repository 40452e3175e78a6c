//! Error number descriptions.
//!
//! [`describe_error_with`] runs one [`DescribeErrno`] strategy and, when it
//! cannot produce text, synthesizes `"unknown error <code>"` into the same
//! buffer. Only when that does not fit either is the static
//! [`UNKNOWN_ERROR`] returned. The result is never empty.

use crate::error::{DescribeFailure, FormatError};
use crate::stdio::buffer::try_format_to_buffer;

/// Well-known errno constants (Linux numbering).
pub const EPERM: i32 = 1;
pub const ENOENT: i32 = 2;
pub const ESRCH: i32 = 3;
pub const EINTR: i32 = 4;
pub const EIO: i32 = 5;
pub const ENXIO: i32 = 6;
pub const E2BIG: i32 = 7;
pub const ENOEXEC: i32 = 8;
pub const EBADF: i32 = 9;
pub const ECHILD: i32 = 10;
pub const EAGAIN: i32 = 11;
pub const ENOMEM: i32 = 12;
pub const EACCES: i32 = 13;
pub const EFAULT: i32 = 14;
pub const ENOTBLK: i32 = 15;
pub const EBUSY: i32 = 16;
pub const EEXIST: i32 = 17;
pub const EXDEV: i32 = 18;
pub const ENODEV: i32 = 19;
pub const ENOTDIR: i32 = 20;
pub const EISDIR: i32 = 21;
pub const EINVAL: i32 = 22;
pub const ENFILE: i32 = 23;
pub const EMFILE: i32 = 24;
pub const ENOTTY: i32 = 25;
pub const ETXTBSY: i32 = 26;
pub const EFBIG: i32 = 27;
pub const ENOSPC: i32 = 28;
pub const ESPIPE: i32 = 29;
pub const EROFS: i32 = 30;
pub const EMLINK: i32 = 31;
pub const EPIPE: i32 = 32;
pub const EDOM: i32 = 33;
pub const ERANGE: i32 = 34;
pub const EDEADLK: i32 = 35;
pub const ENAMETOOLONG: i32 = 36;
pub const ENOLCK: i32 = 37;
pub const ENOSYS: i32 = 38;
pub const ENOTEMPTY: i32 = 39;
pub const ELOOP: i32 = 40;
pub const EOVERFLOW: i32 = 75;
pub const ENOTSUP: i32 = 95;
pub const EAFNOSUPPORT: i32 = 97;
pub const EADDRINUSE: i32 = 98;
pub const EADDRNOTAVAIL: i32 = 99;
pub const ENETUNREACH: i32 = 101;
pub const ECONNABORTED: i32 = 103;
pub const ECONNRESET: i32 = 104;
pub const ENOBUFS: i32 = 105;
pub const EISCONN: i32 = 106;
pub const ENOTCONN: i32 = 107;
pub const ETIMEDOUT: i32 = 110;
pub const ECONNREFUSED: i32 = 111;
pub const EALREADY: i32 = 114;
pub const EINPROGRESS: i32 = 115;

/// Returned when neither the strategy nor the synthesized message fits.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// A source of human-readable errno text.
///
/// Implementations write the description plus a NUL terminator into `buf`
/// and return its length, or report why they could not.
pub trait DescribeErrno {
    fn describe_into(&self, code: i32, buf: &mut [u8]) -> Result<usize, DescribeFailure>;
}

/// Built-in table of glibc's messages for the common errno values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrnoTable;

impl ErrnoTable {
    /// Static message for `code`, if the table knows it.
    pub fn lookup(code: i32) -> Option<&'static str> {
        let text = match code {
            0 => "Success",
            EPERM => "Operation not permitted",
            ENOENT => "No such file or directory",
            ESRCH => "No such process",
            EINTR => "Interrupted system call",
            EIO => "Input/output error",
            ENXIO => "No such device or address",
            E2BIG => "Argument list too long",
            ENOEXEC => "Exec format error",
            EBADF => "Bad file descriptor",
            ECHILD => "No child processes",
            EAGAIN => "Resource temporarily unavailable",
            ENOMEM => "Cannot allocate memory",
            EACCES => "Permission denied",
            EFAULT => "Bad address",
            ENOTBLK => "Block device required",
            EBUSY => "Device or resource busy",
            EEXIST => "File exists",
            EXDEV => "Invalid cross-device link",
            ENODEV => "No such device",
            ENOTDIR => "Not a directory",
            EISDIR => "Is a directory",
            EINVAL => "Invalid argument",
            ENFILE => "Too many open files in system",
            EMFILE => "Too many open files",
            ENOTTY => "Inappropriate ioctl for device",
            ETXTBSY => "Text file busy",
            EFBIG => "File too large",
            ENOSPC => "No space left on device",
            ESPIPE => "Illegal seek",
            EROFS => "Read-only file system",
            EMLINK => "Too many links",
            EPIPE => "Broken pipe",
            EDOM => "Numerical argument out of domain",
            ERANGE => "Numerical result out of range",
            EDEADLK => "Resource deadlock avoided",
            ENAMETOOLONG => "File name too long",
            ENOLCK => "No locks available",
            ENOSYS => "Function not implemented",
            ENOTEMPTY => "Directory not empty",
            ELOOP => "Too many levels of symbolic links",
            EOVERFLOW => "Value too large for defined data type",
            ENOTSUP => "Operation not supported",
            EAFNOSUPPORT => "Address family not supported by protocol",
            EADDRINUSE => "Address already in use",
            EADDRNOTAVAIL => "Cannot assign requested address",
            ENETUNREACH => "Network is unreachable",
            ECONNABORTED => "Software caused connection abort",
            ECONNRESET => "Connection reset by peer",
            ENOBUFS => "No buffer space available",
            EISCONN => "Transport endpoint is already connected",
            ENOTCONN => "Transport endpoint is not connected",
            ETIMEDOUT => "Connection timed out",
            ECONNREFUSED => "Connection refused",
            EALREADY => "Operation already in progress",
            EINPROGRESS => "Operation now in progress",
            _ => return None,
        };
        Some(text)
    }
}

impl DescribeErrno for ErrnoTable {
    fn describe_into(&self, code: i32, buf: &mut [u8]) -> Result<usize, DescribeFailure> {
        let text = Self::lookup(code).ok_or(DescribeFailure::UnknownCode(code))?;
        try_format_to_buffer(buf, format_args!("{text}")).map_err(|err| match err {
            FormatError::Truncated { needed, capacity } => {
                DescribeFailure::BufferTooSmall { needed, capacity }
            }
            _ => DescribeFailure::UnknownCode(code),
        })
    }
}

/// Describe `code` into `buf` using `describer`, falling back to a
/// synthesized `"unknown error <code>"` and finally to [`UNKNOWN_ERROR`].
///
/// The returned text lives in `buf` unless both paths failed.
pub fn describe_error_with<'a>(
    code: i32,
    buf: &'a mut [u8],
    describer: &dyn DescribeErrno,
) -> &'a str {
    let described = match describer.describe_into(code, buf) {
        Ok(len) if len > 0 && stored_text(buf, len).is_some() => Some(len),
        Ok(_) => {
            log::debug!("describer produced no usable text for error {code}");
            None
        }
        Err(err) => {
            log::debug!("unable to describe error {code}: {err}");
            None
        }
    };

    let len = match described {
        Some(len) => len,
        None => match try_format_to_buffer(buf, format_args!("{UNKNOWN_ERROR} {code}")) {
            Ok(len) => len,
            Err(err) => {
                log::warn!("unable to synthesize a description for error {code}: {err}");
                return UNKNOWN_ERROR;
            }
        },
    };
    stored_text(buf, len).unwrap_or(UNKNOWN_ERROR)
}

/// The first `len` bytes of `buf` as text, if terminated and valid UTF-8.
fn stored_text(buf: &[u8], len: usize) -> Option<&str> {
    if buf.get(len) != Some(&0) {
        return None;
    }
    core::str::from_utf8(&buf[..len]).ok()
}
