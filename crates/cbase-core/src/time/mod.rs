//! Calendar arithmetic and the humanized timestamp layout.
//!
//! Reading the clock and applying the local timezone are host concerns and
//! live in the ABI crate; this module converts epoch seconds to broken-down
//! UTC time and renders broken-down time as `Www Mmm dd hh:mm:ss yyyy`,
//! the C-locale `%c` layout (`%a %b %e %H:%M:%S %Y`).

use core::fmt;

use crate::error::{ClockError, FormatError};
use crate::stdio::buffer::try_format_to_buffer;

/// Length of a rendered timestamp with a four-digit year, terminator excluded.
pub const TIMESTAMP_LEN: usize = 24;

/// Broken-down time representation (like `struct tm`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrokenDownTime {
    /// Seconds (0-60, 60 for leap second).
    pub tm_sec: i32,
    /// Minutes (0-59).
    pub tm_min: i32,
    /// Hours (0-23).
    pub tm_hour: i32,
    /// Day of month (1-31).
    pub tm_mday: i32,
    /// Month (0-11).
    pub tm_mon: i32,
    /// Years since 1900.
    pub tm_year: i32,
    /// Day of week (0-6, Sunday = 0).
    pub tm_wday: i32,
    /// Day of year (0-365).
    pub tm_yday: i32,
    /// Daylight saving time flag.
    pub tm_isdst: i32,
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Days in each month for a non-leap year.
const DAYS_IN_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns `true` if `year` is a leap year (Gregorian).
#[inline]
fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Convert seconds since the Unix epoch to broken-down UTC time.
///
/// Handles negative epochs (pre-1970). Fails only when the year does not
/// fit `tm_year`.
pub fn epoch_to_broken_down(epoch_secs: i64) -> Result<BrokenDownTime, ClockError> {
    let days = epoch_secs.div_euclid(86_400);
    let rem = epoch_secs.rem_euclid(86_400);

    // Gregorian civil date from a day count (400-year eras, March-based years).
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy_march = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy_march + 2) / 153;
    let mday = doy_march - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 2 } else { mp - 10 };
    let year = yoe + era * 400 + i64::from(month <= 1);

    let tm_year = i32::try_from(year - 1900).map_err(|_| ClockError::YearOutOfRange(year))?;
    let mon = month as usize;
    let leap_day = i32::from(mon > 1 && is_leap_year(year));
    let tm_yday = DAYS_IN_MONTH[..mon].iter().sum::<i32>() + leap_day + mday as i32 - 1;

    Ok(BrokenDownTime {
        tm_sec: (rem % 60) as i32,
        tm_min: ((rem / 60) % 60) as i32,
        tm_hour: (rem / 3_600) as i32,
        tm_mday: mday as i32,
        tm_mon: month as i32,
        tm_year,
        // Jan 1 1970 was a Thursday (4).
        tm_wday: (days + 4).rem_euclid(7) as i32,
        tm_yday,
        tm_isdst: 0,
    })
}

/// `Display` adapter rendering the `%c` layout.
///
/// Out-of-range weekday or month fields print as `?`, like the host
/// `strftime`.
#[derive(Debug, Clone, Copy)]
pub struct Humanized<'a>(pub &'a BrokenDownTime);

impl fmt::Display for Humanized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tm = self.0;
        let name = |table: &[&'static str], idx: i32| {
            usize::try_from(idx)
                .ok()
                .and_then(|i| table.get(i).copied())
                .unwrap_or("?")
        };
        write!(
            f,
            "{} {} {:>2} {:02}:{:02}:{:02} {}",
            name(&WEEKDAYS, tm.tm_wday),
            name(&MONTHS, tm.tm_mon),
            tm.tm_mday,
            tm.tm_hour,
            tm.tm_min,
            tm.tm_sec,
            i64::from(tm.tm_year) + 1900
        )
    }
}

/// Render `tm` into `buf` in the `%c` layout.
///
/// Follows `strftime` sizing: the text plus its terminator must fit, or
/// nothing usable is produced and [`ClockError::BufferTooSmall`] is returned.
pub fn render_timestamp(tm: &BrokenDownTime, buf: &mut [u8]) -> Result<usize, ClockError> {
    let capacity = buf.len();
    try_format_to_buffer(buf, format_args!("{}", Humanized(tm))).map_err(|err| match err {
        FormatError::Truncated { needed, .. } => ClockError::BufferTooSmall { needed, capacity },
        _ => ClockError::BufferTooSmall {
            needed: TIMESTAMP_LEN + 1,
            capacity,
        },
    })
}
