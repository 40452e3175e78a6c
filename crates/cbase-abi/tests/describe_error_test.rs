//! Integration tests for `describe_error` and its C export.

use std::ffi::{CStr, c_char};

use cbase_abi::config::SafetyLevel;
use cbase_abi::errno_abi::cbase_strerror_r_improved;
use cbase_abi::{UNKNOWN_ERROR, describe_error};

#[test]
fn known_code_matches_host_text() {
    let mut buf = [0u8; 128];
    let base = buf.as_ptr();
    let text = describe_error(libc::ENOENT, &mut buf);
    let host = std::io::Error::from_raw_os_error(libc::ENOENT).to_string();
    assert!(host.starts_with(text), "{host:?} vs {text:?}");
    assert_eq!(text.as_ptr(), base);
}

#[test]
fn unknown_code_lands_in_buffer() {
    let mut buf = [0u8; 64];
    let base = buf.as_ptr();
    let text = describe_error(9999, &mut buf);
    assert!(!text.is_empty());
    assert!(text.contains("9999"), "{text:?}");
    assert_eq!(text.as_ptr(), base);
}

#[test]
fn tiny_buffer_gets_static_fallback() {
    let mut buf = [0u8; 4];
    let base = buf.as_ptr();
    let text = describe_error(libc::ENOENT, &mut buf);
    assert_eq!(text, UNKNOWN_ERROR);
    assert_ne!(text.as_ptr(), base);
}

#[test]
fn never_empty_across_codes() {
    for code in (-5..200).chain([4096, i32::MAX, i32::MIN]) {
        for size in [0usize, 1, 8, 16, 256] {
            let mut buf = vec![0u8; size];
            assert!(!describe_error(code, &mut buf).is_empty(), "code {code} size {size}");
        }
    }
}

#[test]
fn c_export_returns_caller_buffer() {
    let mut buf = [0 as c_char; 128];
    let ptr = buf.as_mut_ptr();
    let out = unsafe { cbase_strerror_r_improved(libc::EACCES, ptr, buf.len()) };
    assert_eq!(out, ptr.cast_const());
    let text = unsafe { CStr::from_ptr(out) }.to_str().unwrap();
    assert!(!text.is_empty());
}

#[test]
fn c_export_small_buffer_returns_static() {
    let mut buf = [0 as c_char; 2];
    let ptr = buf.as_mut_ptr();
    let out = unsafe { cbase_strerror_r_improved(libc::EACCES, ptr, buf.len()) };
    assert_ne!(out, ptr.cast_const());
    assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), UNKNOWN_ERROR);
}

#[test]
fn c_export_null_buffer_is_contract_violation() {
    let out = unsafe { cbase_strerror_r_improved(libc::EIO, std::ptr::null_mut(), 32) };
    assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), UNKNOWN_ERROR);
    if SafetyLevel::from_env().sets_errno() {
        let errno = std::io::Error::last_os_error().raw_os_error();
        assert_eq!(errno, Some(libc::EFAULT));
    }
}

#[test]
fn c_export_null_zero_length_is_quiet() {
    let out = unsafe { cbase_strerror_r_improved(libc::EIO, std::ptr::null_mut(), 0) };
    assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), UNKNOWN_ERROR);
}
