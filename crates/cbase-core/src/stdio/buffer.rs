//! Bounded output into a caller-owned byte buffer.
//!
//! [`BoundedWriter`] stores at most `capacity - 1` bytes and keeps counting
//! past that point, so the caller learns the would-be length of the whole
//! rendering. [`BoundedWriter::finish`] then applies the all-or-nothing
//! policy: either the full text plus a NUL terminator is in the buffer, or
//! `buf[0]` is reset to NUL and the request fails.
//!
//! Invariants:
//! - `stored <= capacity.saturating_sub(1)`
//! - `stored <= total`
//! - nothing is ever written to a zero-capacity buffer

use core::fmt;

use crate::error::FormatError;

/// Writer over a fixed-capacity caller buffer that tracks the would-be length.
#[derive(Debug)]
pub struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    /// Bytes actually copied into `buf`.
    stored: usize,
    /// Bytes the rendering would take with unlimited capacity.
    total: usize,
}

impl<'a> BoundedWriter<'a> {
    /// Wrap `buf`; its length is the capacity.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            stored: 0,
            total: 0,
        }
    }

    /// Capacity of the underlying buffer, terminator included.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes the rendering has produced so far, stored or not.
    pub fn would_be_len(&self) -> usize {
        self.total
    }

    /// Content room left before the terminator slot.
    fn room(&self) -> usize {
        self.buf.len().saturating_sub(1).saturating_sub(self.stored)
    }

    /// Append raw bytes, copying whatever still fits.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.total = self.total.saturating_add(bytes.len());
        let n = self.room().min(bytes.len());
        self.buf[self.stored..self.stored + n].copy_from_slice(&bytes[..n]);
        self.stored += n;
    }

    /// Append `count` copies of `byte`. Cost is bounded by the capacity,
    /// not by `count`.
    pub fn push_repeat(&mut self, byte: u8, count: usize) {
        self.total = self.total.saturating_add(count);
        let n = self.room().min(count);
        self.buf[self.stored..self.stored + n].fill(byte);
        self.stored += n;
    }

    /// Terminate the buffer and report the would-be length, or fail with
    /// [`FormatError::Truncated`] after clearing `buf[0]`.
    pub fn finish(self) -> Result<usize, FormatError> {
        let capacity = self.buf.len();
        if self.total >= capacity {
            if let Some(first) = self.buf.first_mut() {
                *first = 0;
            }
            log::debug!(
                "bounded write truncated: capacity {capacity}, needed {}",
                self.total.saturating_add(1)
            );
            return Err(FormatError::Truncated {
                needed: self.total.saturating_add(1),
                capacity,
            });
        }
        self.buf[self.stored] = 0;
        Ok(self.total)
    }

    /// Drop whatever was rendered, leaving an empty string behind.
    pub fn abandon(self) {
        if let Some(first) = self.buf.first_mut() {
            *first = 0;
        }
    }
}

impl fmt::Write for BoundedWriter<'_> {
    // Never fails: overflow is recorded in `total` and judged in `finish`.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

/// Render `args` into `buf` with the all-or-nothing contract.
///
/// Returns the rendered length (excluding the terminator) when it fits.
pub fn try_format_to_buffer(buf: &mut [u8], args: fmt::Arguments<'_>) -> Result<usize, FormatError> {
    let mut out = BoundedWriter::new(buf);
    if fmt::write(&mut out, args).is_err() {
        out.abandon();
        log::debug!("bounded write failed: a Display impl reported an error");
        return Err(FormatError::Encoding);
    }
    out.finish()
}

/// Bounded formatted print, `snprintf`-shaped.
///
/// Returns the rendered length when it is strictly less than `buf.len()`;
/// otherwise `-1` with `buf[0] == 0` (when `buf` is non-empty). A zero-length
/// buffer is never written and always yields `-1`.
pub fn format_to_buffer(buf: &mut [u8], args: fmt::Arguments<'_>) -> i32 {
    let result = try_format_to_buffer(buf, args);
    status_code(result, buf)
}

/// Collapse a formatting result into the C-style `int` status, clearing
/// `buf[0]` when the length does not fit the return type.
pub fn status_code(result: Result<usize, FormatError>, buf: &mut [u8]) -> i32 {
    match result.map(i32::try_from) {
        Ok(Ok(len)) => len,
        Ok(Err(_)) => {
            // Fits the buffer but not the return type.
            if let Some(first) = buf.first_mut() {
                *first = 0;
            }
            -1
        }
        Err(_) => -1,
    }
}

/// View the NUL-terminated text at the start of `buf`.
///
/// Returns `None` when there is no terminator or the bytes are not UTF-8.
pub fn c_text(buf: &[u8]) -> Option<&str> {
    let end = buf.iter().position(|&b| b == 0)?;
    core::str::from_utf8(&buf[..end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write as _;

    struct Failing;

    impl fmt::Display for Failing {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn fits_exactly_one_short_of_capacity() {
        let mut buf = [0xAAu8; 6];
        assert_eq!(format_to_buffer(&mut buf, format_args!("{}", 12345)), 5);
        assert_eq!(&buf, b"12345\0");
    }

    #[test]
    fn equal_to_capacity_is_truncation() {
        let mut buf = [0xAAu8; 5];
        assert_eq!(format_to_buffer(&mut buf, format_args!("{}", 12345)), -1);
        assert_eq!(buf[0], 0);
        assert_eq!(c_text(&buf), Some(""));
    }

    #[test]
    fn truncation_reports_needed_bytes() {
        let mut buf = [0u8; 4];
        let err = try_format_to_buffer(&mut buf, format_args!("hello")).unwrap_err();
        assert_eq!(
            err,
            FormatError::Truncated {
                needed: 6,
                capacity: 4
            }
        );
    }

    #[test]
    fn zero_capacity_writes_nothing() {
        let mut buf: [u8; 0] = [];
        assert_eq!(format_to_buffer(&mut buf, format_args!("")), -1);
        assert_eq!(format_to_buffer(&mut buf, format_args!("abc")), -1);
    }

    #[test]
    fn empty_text_in_one_byte_buffer() {
        let mut buf = [0xFFu8; 1];
        assert_eq!(format_to_buffer(&mut buf, format_args!("")), 0);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn display_error_is_encoding_failure() {
        let mut buf = [b'x'; 16];
        let err = try_format_to_buffer(&mut buf, format_args!("a{}b", Failing)).unwrap_err();
        assert_eq!(err, FormatError::Encoding);
        assert_eq!(buf[0], 0);
        assert_eq!(format_to_buffer(&mut buf, format_args!("{}", Failing)), -1);
    }

    #[test]
    fn writer_keeps_counting_past_capacity() {
        let mut buf = [0u8; 4];
        let mut w = BoundedWriter::new(&mut buf);
        w.write_str("abcdef").unwrap();
        w.push_repeat(b'-', 1_000_000);
        assert_eq!(w.would_be_len(), 1_000_006);
        assert_eq!(w.capacity(), 4);
        assert!(w.finish().is_err());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        let ra = format_to_buffer(&mut a, format_args!("{:>8}|{:x}", "id", 255));
        let rb = format_to_buffer(&mut b, format_args!("{:>8}|{:x}", "id", 255));
        assert_eq!(ra, rb);
        assert_eq!(a, b);
        assert_eq!(c_text(&a), Some("      id|ff"));
    }

    #[test]
    fn c_text_requires_terminator() {
        assert_eq!(c_text(b"abc"), None);
        assert_eq!(c_text(b"ab\0c"), Some("ab"));
    }
}
