//! Bounded print at the C boundary.
//!
//! `cbase_print_to_string` is the C-variadic form: the template is parsed
//! once to pull each `va_arg` by conversion and length modifier into an
//! [`Arg`], then rendered by [`try_format_template`] with the all-or-nothing
//! contract. `cbase_print_str` is the fixed-arity `"%s"` shortcut.

use std::ffi::{CStr, c_char, c_int, c_long, c_longlong, c_uint, c_ulong, c_ulonglong, c_void};

use cbase_core::stdio::printf::{FormatSegment, LengthMod, Precision, Segments, Width};
use cbase_core::stdio::{Arg, BoundedWriter, status_code, try_format_template};

use crate::config::contract_violation;

/// Maximum variadic arguments pulled per call.
pub const MAX_VA_ARGS: usize = 32;

/// Pull the variadic arguments `$segments` asks for into `$buf`.
///
/// Evaluates to `Some(count)`, or `None` when a directive has no C
/// argument type this crate can read (`%Lf`, wide `%lc`/`%ls`) or more
/// than [`MAX_VA_ARGS`] are needed. A macro avoids naming the unstable
/// `VaListImpl` type.
macro_rules! extract_va_args {
    ($segments:expr, $args:expr, $buf:expr) => {{
        let mut idx = 0usize;
        let mut supported = true;
        for seg in $segments {
            let FormatSegment::Spec(spec) = seg else {
                continue;
            };
            let stars = usize::from(spec.width == Width::FromArg)
                + usize::from(spec.precision == Precision::FromArg);
            if idx + stars + 1 > MAX_VA_ARGS {
                supported = false;
                break;
            }
            for _ in 0..stars {
                $buf[idx] = Arg::Int(i64::from(unsafe { $args.next_arg::<c_int>() }));
                idx += 1;
            }
            let arg = match (spec.conversion, spec.length) {
                (b'd' | b'i', LengthMod::L) => Arg::Int(i64::from(unsafe { $args.next_arg::<c_long>() })),
                (b'd' | b'i', LengthMod::Ll | LengthMod::BigL) => {
                    Arg::Int(i64::from(unsafe { $args.next_arg::<c_longlong>() }))
                }
                (b'd' | b'i', LengthMod::J) => Arg::Int(unsafe { $args.next_arg::<i64>() }),
                (b'd' | b'i', LengthMod::Z | LengthMod::T) => {
                    Arg::Int(unsafe { $args.next_arg::<isize>() } as i64)
                }
                // char and short are promoted to int.
                (b'd' | b'i', _) => Arg::Int(i64::from(unsafe { $args.next_arg::<c_int>() })),
                (b'u' | b'x' | b'X' | b'o', LengthMod::L) => {
                    Arg::Uint(u64::from(unsafe { $args.next_arg::<c_ulong>() }))
                }
                (b'u' | b'x' | b'X' | b'o', LengthMod::Ll | LengthMod::BigL) => {
                    Arg::Uint(u64::from(unsafe { $args.next_arg::<c_ulonglong>() }))
                }
                (b'u' | b'x' | b'X' | b'o', LengthMod::J) => Arg::Uint(unsafe { $args.next_arg::<u64>() }),
                (b'u' | b'x' | b'X' | b'o', LengthMod::Z | LengthMod::T) => {
                    Arg::Uint(unsafe { $args.next_arg::<usize>() } as u64)
                }
                (b'u' | b'x' | b'X' | b'o', _) => {
                    Arg::Uint(u64::from(unsafe { $args.next_arg::<c_uint>() }))
                }
                (b'c', LengthMod::None) => Arg::Int(i64::from(unsafe { $args.next_arg::<c_int>() })),
                (b's', LengthMod::None) => {
                    let ptr = unsafe { $args.next_arg::<*const c_char>() };
                    if ptr.is_null() {
                        Arg::Str("(null)")
                    } else {
                        // SAFETY: a non-null `%s` argument is a NUL-terminated string.
                        Arg::Bytes(unsafe { CStr::from_ptr(ptr) }.to_bytes())
                    }
                }
                (b'p', _) => Arg::Ptr(unsafe { $args.next_arg::<*const c_void>() } as usize),
                (b'f' | b'F' | b'e' | b'E' | b'g' | b'G', LengthMod::None | LengthMod::L) => {
                    Arg::Float(unsafe { $args.next_arg::<f64>() })
                }
                // `%n` is consumed so later arguments stay aligned; rendering rejects it.
                (b'n', _) => Arg::Ptr(unsafe { $args.next_arg::<*mut c_void>() } as usize),
                _ => {
                    supported = false;
                    break;
                }
            };
            $buf[idx] = arg;
            idx += 1;
        }
        if supported { Some(idx) } else { None }
    }};
}

/// C entry point: `print_to_string(str, len, fmt, ...)`.
///
/// Returns the rendered length when it is strictly less than `len`;
/// otherwise `-1` with `str[0] == '\0'`. A zero `len` writes nothing and
/// returns `-1`. Templates that are not UTF-8 fail with `-1`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cbase_print_to_string(
    str_buf: *mut c_char,
    len: usize,
    format: *const c_char,
    mut args: ...
) -> c_int {
    if len == 0 {
        return -1;
    }
    if str_buf.is_null() {
        contract_violation("cbase_print_to_string");
        return -1;
    }
    // SAFETY: caller guarantees `str_buf` is valid for `len` writable bytes.
    let buf = unsafe { std::slice::from_raw_parts_mut(str_buf.cast::<u8>(), len) };
    if format.is_null() {
        contract_violation("cbase_print_to_string");
        buf[0] = 0;
        return -1;
    }
    // SAFETY: caller guarantees `format` is NUL-terminated.
    let Ok(template) = unsafe { CStr::from_ptr(format) }.to_str() else {
        log::debug!("cbase_print_to_string: template is not UTF-8");
        buf[0] = 0;
        return -1;
    };

    let mut pulled = [Arg::Int(0); MAX_VA_ARGS];
    let Some(count) = extract_va_args!(Segments::new(template), &mut args, &mut pulled) else {
        log::debug!("cbase_print_to_string: unsupported arguments in {template:?}");
        buf[0] = 0;
        return -1;
    };
    let result = try_format_template(buf, template, &pulled[..count]);
    status_code(result, buf)
}

/// C entry point: bounded copy of `s` into `str` with the all-or-nothing
/// contract.
///
/// Returns the length of `s` when it fits with its terminator, else `-1`
/// with `str[0] == '\0'`. A zero `len` writes nothing and returns `-1`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cbase_print_str(str_buf: *mut c_char, len: usize, s: *const c_char) -> c_int {
    if len == 0 {
        return -1;
    }
    if str_buf.is_null() {
        contract_violation("cbase_print_str");
        return -1;
    }
    // SAFETY: caller guarantees `str_buf` is valid for `len` writable bytes.
    let buf = unsafe { std::slice::from_raw_parts_mut(str_buf.cast::<u8>(), len) };
    if s.is_null() {
        contract_violation("cbase_print_str");
        buf[0] = 0;
        return -1;
    }
    // SAFETY: caller guarantees `s` is NUL-terminated.
    let bytes = unsafe { CStr::from_ptr(s) }.to_bytes();
    let mut out = BoundedWriter::new(buf);
    out.push_bytes(bytes);
    let result = out.finish();
    status_code(result, buf)
}
