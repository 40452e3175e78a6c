//! In `hardened` mode the C exports fail the same way as in `strict` mode
//! but leave `errno` alone.
//!
//! Kept to a single test: it sets `CBASE_MODE` for this whole process.

#![cfg(target_os = "linux")]

use std::ffi::{CStr, c_char};

use cbase_abi::errno_abi::cbase_strerror_r_improved;
use cbase_abi::stdio_abi::{cbase_print_str, cbase_print_to_string};
use cbase_abi::time_abi::cbase_humanized_timestamp;
use cbase_abi::{MODE_ENV, SafetyLevel, TIMESTAMP_ERROR, UNKNOWN_ERROR};

fn set_errno(val: i32) {
    unsafe { *libc::__errno_location() = val };
}

fn errno() -> i32 {
    unsafe { *libc::__errno_location() }
}

#[test]
fn null_pointers_leave_errno_untouched() {
    unsafe { std::env::set_var(MODE_ENV, "hardened") };
    assert_eq!(SafetyLevel::from_env(), SafetyLevel::Hardened);

    set_errno(libc::EINTR);
    let out = unsafe { cbase_strerror_r_improved(libc::EIO, std::ptr::null_mut(), 64) };
    assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), UNKNOWN_ERROR);
    assert_eq!(errno(), libc::EINTR);

    let out = unsafe { cbase_humanized_timestamp(std::ptr::null_mut(), 64) };
    assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), TIMESTAMP_ERROR);
    assert_eq!(errno(), libc::EINTR);

    let rc = unsafe { cbase_print_str(std::ptr::null_mut(), 16, c"x".as_ptr()) };
    assert_eq!(rc, -1);
    assert_eq!(errno(), libc::EINTR);

    let mut buf = [0x55 as c_char; 8];
    let rc = unsafe { cbase_print_to_string(buf.as_mut_ptr(), buf.len(), std::ptr::null()) };
    assert_eq!(rc, -1);
    assert_eq!(buf[0], 0);
    assert_eq!(errno(), libc::EINTR);
}
