//! Humanized wall-clock timestamps.
//!
//! The clock is read with `clock_gettime(CLOCK_REALTIME)` and converted to
//! local calendar time with the host `localtime_r`, so the process timezone
//! (`TZ`) applies. Rendering uses the fixed `%c` layout from `cbase-core`.
//! Targets without libc time functions render UTC.

use std::ffi::c_char;

use cbase_core::error::ClockError;
use cbase_core::time::{BrokenDownTime, render_timestamp};

use crate::config::contract_violation;

/// Text returned in place of a timestamp when rendering fails.
pub const TIMESTAMP_ERROR: &str = "error";

const TIMESTAMP_ERROR_C: &std::ffi::CStr = c"error";

/// Seconds since the Unix epoch, from the realtime clock.
#[cfg(unix)]
pub fn current_epoch() -> Result<i64, ClockError> {
    // SAFETY: zeroed timespec is a valid out-parameter.
    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut ts) };
    if rc != 0 {
        return Err(ClockError::ClockRead);
    }
    Ok(i64::from(ts.tv_sec))
}

#[cfg(not(unix))]
pub fn current_epoch() -> Result<i64, ClockError> {
    let since = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(|_| ClockError::ClockRead)?;
    i64::try_from(since.as_secs()).map_err(|_| ClockError::ClockRead)
}

/// Broken-down local time for `epoch` seconds.
#[cfg(unix)]
pub fn local_broken_down(epoch: i64) -> Result<BrokenDownTime, ClockError> {
    let timer =
        libc::time_t::try_from(epoch).map_err(|_| ClockError::LocalConversion(epoch))?;
    // SAFETY: zeroed tm is a valid out-parameter; both pointers are live locals.
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    let out = unsafe { libc::localtime_r(&timer, &mut tm) };
    if out.is_null() {
        return Err(ClockError::LocalConversion(epoch));
    }
    Ok(BrokenDownTime {
        tm_sec: tm.tm_sec,
        tm_min: tm.tm_min,
        tm_hour: tm.tm_hour,
        tm_mday: tm.tm_mday,
        tm_mon: tm.tm_mon,
        tm_year: tm.tm_year,
        tm_wday: tm.tm_wday,
        tm_yday: tm.tm_yday,
        tm_isdst: tm.tm_isdst,
    })
}

#[cfg(not(unix))]
pub fn local_broken_down(epoch: i64) -> Result<BrokenDownTime, ClockError> {
    cbase_core::time::epoch_to_broken_down(epoch)
}

/// Render the local time at `epoch` into `buf`, reporting why it failed.
pub fn try_format_timestamp_at(epoch: i64, buf: &mut [u8]) -> Result<usize, ClockError> {
    let tm = local_broken_down(epoch)?;
    render_timestamp(&tm, buf)
}

/// Render the local time at `epoch` into `buf`.
///
/// Returns the text inside `buf`, or the static [`TIMESTAMP_ERROR`] when the
/// conversion fails or `buf` cannot hold the text plus its terminator.
pub fn format_timestamp_at(epoch: i64, buf: &mut [u8]) -> &str {
    match try_format_timestamp_at(epoch, buf) {
        Ok(len) => std::str::from_utf8(&buf[..len]).unwrap_or(TIMESTAMP_ERROR),
        Err(err) => {
            log::debug!("timestamp for {epoch} not rendered: {err}");
            TIMESTAMP_ERROR
        }
    }
}

/// Render the current local time into `buf`, like [`format_timestamp_at`].
pub fn format_timestamp(buf: &mut [u8]) -> &str {
    match current_epoch() {
        Ok(now) => format_timestamp_at(now, buf),
        Err(err) => {
            log::warn!("timestamp not rendered: {err}");
            TIMESTAMP_ERROR
        }
    }
}

/// C entry point: `humanized_timestamp(str, len)`.
///
/// Returns `str` holding the timestamp, or the static `"error"`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cbase_humanized_timestamp(str_buf: *mut c_char, len: usize) -> *const c_char {
    if str_buf.is_null() {
        if len != 0 {
            contract_violation("cbase_humanized_timestamp");
        }
        return TIMESTAMP_ERROR_C.as_ptr();
    }
    // SAFETY: caller guarantees `str_buf` is valid for `len` writable bytes.
    let buf = unsafe { std::slice::from_raw_parts_mut(str_buf.cast::<u8>(), len) };
    let text = format_timestamp(buf);
    if std::ptr::eq(text.as_ptr(), str_buf.cast::<u8>()) {
        str_buf
    } else {
        TIMESTAMP_ERROR_C.as_ptr()
    }
}
