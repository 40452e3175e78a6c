//! Integration tests for the humanized timestamp.

use std::ffi::{CStr, c_char};

use cbase_abi::time_abi::cbase_humanized_timestamp;
use cbase_abi::{
    ClockError, TIMESTAMP_ERROR, TIMESTAMP_LEN, format_timestamp, format_timestamp_at,
    try_format_timestamp_at,
};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `Www Mmm dd hh:mm:ss yyyy`, day space-padded.
fn assert_layout(text: &str) {
    assert_eq!(text.len(), TIMESTAMP_LEN, "{text:?}");
    let b = text.as_bytes();
    assert!(WEEKDAYS.contains(&&text[0..3]), "{text:?}");
    assert!(MONTHS.contains(&&text[4..7]), "{text:?}");
    for idx in [3, 7, 19] {
        assert_eq!(b[idx], b' ', "{text:?}");
    }
    assert_eq!(b[13], b':');
    assert_eq!(b[16], b':');
    assert!(b[8] == b' ' || b[8].is_ascii_digit());
    for idx in [9, 11, 12, 14, 15, 17, 18, 20, 21, 22, 23] {
        assert!(b[idx].is_ascii_digit(), "{text:?}");
    }
}

#[test]
fn current_time_has_layout() {
    let mut buf = [0u8; 64];
    let base = buf.as_ptr();
    let text = format_timestamp(&mut buf);
    assert_layout(text);
    assert_eq!(text.as_ptr(), base);
}

#[test]
fn capacity_boundary() {
    let epoch = 1_581_945_725;
    let mut short = [0u8; TIMESTAMP_LEN];
    assert_eq!(format_timestamp_at(epoch, &mut short), TIMESTAMP_ERROR);
    assert!(matches!(
        try_format_timestamp_at(epoch, &mut short),
        Err(ClockError::BufferTooSmall { .. })
    ));

    let mut exact = [0u8; TIMESTAMP_LEN + 1];
    assert_layout(format_timestamp_at(epoch, &mut exact));
    assert_eq!(exact[TIMESTAMP_LEN], 0);
}

#[test]
fn empty_buffer_is_error() {
    let mut buf: [u8; 0] = [];
    assert_eq!(format_timestamp(&mut buf), TIMESTAMP_ERROR);
}

#[test]
fn fixed_epoch_is_stable() {
    let epoch = 1_700_000_000;
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    let first = format_timestamp_at(epoch, &mut a).to_owned();
    let second = format_timestamp_at(epoch, &mut b);
    assert_eq!(first, second);
    assert_layout(&first);
    assert!(first.ends_with("2023"));
}

#[test]
fn c_export_renders_into_buffer() {
    let mut buf = [0 as c_char; 32];
    let ptr = buf.as_mut_ptr();
    let out = unsafe { cbase_humanized_timestamp(ptr, buf.len()) };
    assert_eq!(out, ptr.cast_const());
    assert_layout(unsafe { CStr::from_ptr(out) }.to_str().unwrap());
}

#[test]
fn c_export_small_buffer_returns_error() {
    let mut buf = [0 as c_char; 10];
    let out = unsafe { cbase_humanized_timestamp(buf.as_mut_ptr(), buf.len()) };
    assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), TIMESTAMP_ERROR);
    let null = unsafe { cbase_humanized_timestamp(std::ptr::null_mut(), 0) };
    assert_eq!(unsafe { CStr::from_ptr(null) }.to_str().unwrap(), TIMESTAMP_ERROR);
}

#[test]
fn unconvertible_epoch_is_error() {
    let mut buf = [0u8; 64];
    assert_eq!(format_timestamp_at(i64::MAX, &mut buf), TIMESTAMP_ERROR);
    assert_eq!(
        try_format_timestamp_at(i64::MAX, &mut buf),
        Err(ClockError::LocalConversion(i64::MAX))
    );
}

#[test]
fn c_export_null_buffer_with_length() {
    let out = unsafe { cbase_humanized_timestamp(std::ptr::null_mut(), 32) };
    assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), TIMESTAMP_ERROR);
    if cbase_abi::SafetyLevel::from_env().sets_errno() {
        let errno = std::io::Error::last_os_error().raw_os_error();
        assert_eq!(errno, Some(libc::EFAULT));
    }
}
