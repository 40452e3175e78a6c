//! printf-style template engine.
//!
//! Parses `%` directives out of a template and renders typed [`Arg`] values
//! straight into a [`BoundedWriter`]. Nothing is allocated: literal runs are
//! borrowed from the template, integers are rendered into a fixed digit
//! array, and floats go through a fixed-size scratch buffer.
//!
//! Reference: POSIX.1-2024 fprintf, ISO C11 7.21.6.1

use core::fmt::{self, Write as _};

use super::buffer::{BoundedWriter, status_code};
use crate::error::FormatError;

// ---------------------------------------------------------------------------
// Format spec types
// ---------------------------------------------------------------------------

/// Flags parsed from a printf format directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub left_justify: bool, // '-'
    pub force_sign: bool,   // '+'
    pub space_sign: bool,   // ' '
    pub alt_form: bool,     // '#'
    pub zero_pad: bool,     // '0'
}

/// Width specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    None,
    Fixed(usize),
    FromArg, // '*'
}

/// Precision specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    None,
    Fixed(usize),
    FromArg, // '.*'
}

/// Length modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMod {
    None,
    Hh,   // 'hh'
    H,    // 'h'
    L,    // 'l'
    Ll,   // 'll'
    Z,    // 'z'
    T,    // 't'
    J,    // 'j'
    BigL, // 'L'
}

/// A parsed printf format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub flags: FormatFlags,
    pub width: Width,
    pub precision: Precision,
    pub length: LengthMod,
    pub conversion: u8,
}

impl FormatSpec {
    /// A bare `%<conversion>` directive.
    pub const fn plain(conversion: u8) -> Self {
        Self {
            flags: FormatFlags {
                left_justify: false,
                force_sign: false,
                space_sign: false,
                alt_form: false,
                zero_pad: false,
            },
            width: Width::None,
            precision: Precision::None,
            length: LengthMod::None,
            conversion,
        }
    }
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Typed argument for a printf-style template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(&'a str),
    /// Raw C string bytes for `%s`; precision counts bytes.
    Bytes(&'a [u8]),
    Ptr(usize),
}

macro_rules! arg_from {
    ($variant:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(value: $t) -> Self {
                    Arg::$variant(value as $wide)
                }
            }
        )*
    };
}

arg_from!(Int as i64: i8, i16, i32, i64, isize);
arg_from!(Uint as u64: u8, u16, u32, u64, usize);
arg_from!(Float as f64: f32, f64);

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Arg::Str(value.as_str())
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(value: *const T) -> Self {
        Arg::Ptr(value as usize)
    }
}

/// Sequential argument consumer; tracks the position for error reports.
struct ArgCursor<'s, 'a> {
    args: &'s [Arg<'a>],
    index: usize,
}

impl<'a> ArgCursor<'_, 'a> {
    fn next(&mut self, conversion: u8) -> Result<Arg<'a>, FormatError> {
        let arg = self
            .args
            .get(self.index)
            .copied()
            .ok_or_else(|| self.mismatch(conversion))?;
        self.index += 1;
        Ok(arg)
    }

    fn mismatch(&self, conversion: u8) -> FormatError {
        FormatError::Argument {
            index: self.index,
            conversion: conversion as char,
        }
    }

    /// `*` width or precision: must be an integer argument.
    fn next_star(&mut self, conversion: u8) -> Result<i64, FormatError> {
        let mismatch = self.mismatch(conversion);
        match self.next(conversion)? {
            Arg::Int(v) => Ok(v),
            Arg::Uint(v) => i64::try_from(v).map_err(|_| mismatch),
            _ => Err(mismatch),
        }
    }
}

// ---------------------------------------------------------------------------
// Segment: parsed pieces of a format string
// ---------------------------------------------------------------------------

/// A segment of a parsed format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSegment<'a> {
    /// Literal text to emit verbatim.
    Literal(&'a str),
    /// A `%%` escape (emit a single '%').
    Percent,
    /// A conversion specifier requiring an argument.
    Spec(FormatSpec),
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse a single format specifier starting after the '%' character.
///
/// `fmt` points to the first byte AFTER '%'. Returns `(spec, bytes_consumed)`
/// where `bytes_consumed` counts from `fmt[0]`. Returns `None` if malformed.
pub fn parse_format_spec(fmt: &[u8]) -> Option<(FormatSpec, usize)> {
    let mut pos = 0;
    let len = fmt.len();

    let mut flags = FormatFlags::default();
    while pos < len {
        match fmt[pos] {
            b'-' => flags.left_justify = true,
            b'+' => flags.force_sign = true,
            b' ' => flags.space_sign = true,
            b'#' => flags.alt_form = true,
            b'0' => flags.zero_pad = true,
            _ => break,
        }
        pos += 1;
    }
    // POSIX: '+' overrides ' '; '-' overrides '0'.
    if flags.force_sign {
        flags.space_sign = false;
    }
    if flags.left_justify {
        flags.zero_pad = false;
    }

    let width = if pos < len && fmt[pos] == b'*' {
        pos += 1;
        Width::FromArg
    } else {
        let start = pos;
        while pos < len && fmt[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos > start {
            Width::Fixed(parse_decimal(&fmt[start..pos]))
        } else {
            Width::None
        }
    };

    let precision = if pos < len && fmt[pos] == b'.' {
        pos += 1;
        if pos < len && fmt[pos] == b'*' {
            pos += 1;
            Precision::FromArg
        } else {
            let start = pos;
            while pos < len && fmt[pos].is_ascii_digit() {
                pos += 1;
            }
            Precision::Fixed(parse_decimal(&fmt[start..pos]))
        }
    } else {
        Precision::None
    };

    let (length, used) = match (fmt.get(pos), fmt.get(pos + 1)) {
        (Some(b'h'), Some(b'h')) => (LengthMod::Hh, 2),
        (Some(b'h'), _) => (LengthMod::H, 1),
        (Some(b'l'), Some(b'l')) => (LengthMod::Ll, 2),
        (Some(b'l'), _) => (LengthMod::L, 1),
        (Some(b'z'), _) => (LengthMod::Z, 1),
        (Some(b't'), _) => (LengthMod::T, 1),
        (Some(b'j'), _) => (LengthMod::J, 1),
        (Some(b'L'), _) => (LengthMod::BigL, 1),
        _ => (LengthMod::None, 0),
    };
    pos += used;

    let conversion = *fmt.get(pos)?;
    pos += 1;
    match conversion {
        b'd' | b'i' | b'u' | b'x' | b'X' | b'o' | b's' | b'c' | b'p' | b'n' | b'f' | b'F'
        | b'e' | b'E' | b'g' | b'G' => {}
        _ => return None,
    }

    Some((
        FormatSpec {
            flags,
            width,
            precision,
            length,
            conversion,
        },
        pos,
    ))
}

/// Iterator over the segments of a printf template.
///
/// Malformed directives are yielded as a literal `%` and scanning resumes
/// right after it.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    fmt: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    pub fn new(fmt: &'a str) -> Self {
        Self { fmt, pos: 0 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = FormatSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.fmt.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }
        if bytes[start] != b'%' {
            let end = bytes[start..]
                .iter()
                .position(|&b| b == b'%')
                .map_or(bytes.len(), |off| start + off);
            self.pos = end;
            return Some(FormatSegment::Literal(&self.fmt[start..end]));
        }
        match bytes.get(start + 1) {
            None => {
                self.pos = start + 1;
                Some(FormatSegment::Literal("%"))
            }
            Some(b'%') => {
                self.pos = start + 2;
                Some(FormatSegment::Percent)
            }
            Some(_) => match parse_format_spec(&bytes[start + 1..]) {
                Some((spec, consumed)) => {
                    self.pos = start + 1 + consumed;
                    Some(FormatSegment::Spec(spec))
                }
                None => {
                    self.pos = start + 1;
                    Some(FormatSegment::Literal("%"))
                }
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Render a printf-style `template` with `args` into `buf`, all-or-nothing.
pub fn try_format_template(
    buf: &mut [u8],
    template: &str,
    args: &[Arg<'_>],
) -> Result<usize, FormatError> {
    let mut out = BoundedWriter::new(buf);
    match render_template(&mut out, template, args) {
        Ok(()) => out.finish(),
        Err(err) => {
            out.abandon();
            log::debug!("unable to print {template:?}: {err}");
            Err(err)
        }
    }
}

/// `snprintf`-shaped wrapper over [`try_format_template`]: rendered length
/// on success, `-1` on truncation or argument errors.
pub fn format_template(buf: &mut [u8], template: &str, args: &[Arg<'_>]) -> i32 {
    let result = try_format_template(buf, template, args);
    status_code(result, buf)
}

fn render_template(
    out: &mut BoundedWriter<'_>,
    template: &str,
    args: &[Arg<'_>],
) -> Result<(), FormatError> {
    let mut cursor = ArgCursor { args, index: 0 };
    for segment in Segments::new(template) {
        match segment {
            FormatSegment::Literal(text) => out.push_bytes(text.as_bytes()),
            FormatSegment::Percent => out.push_bytes(b"%"),
            FormatSegment::Spec(spec) => render_directive(out, spec, &mut cursor)?,
        }
    }
    Ok(())
}

/// Resolve `*` width/precision, then dispatch on the conversion.
fn render_directive(
    out: &mut BoundedWriter<'_>,
    mut spec: FormatSpec,
    cursor: &mut ArgCursor<'_, '_>,
) -> Result<(), FormatError> {
    let conv = spec.conversion;
    if spec.width == Width::FromArg {
        let w = cursor.next_star(conv)?;
        if w < 0 {
            spec.flags.left_justify = true;
            spec.flags.zero_pad = false;
        }
        spec.width = Width::Fixed(usize::try_from(w.unsigned_abs()).unwrap_or(usize::MAX));
    }
    if spec.precision == Precision::FromArg {
        let p = cursor.next_star(conv)?;
        // A negative precision is taken as if it were omitted.
        spec.precision = match usize::try_from(p) {
            Ok(p) => Precision::Fixed(p),
            Err(_) => Precision::None,
        };
    }

    let arg = cursor.next(conv)?;
    let mismatch = FormatError::Argument {
        index: cursor.index - 1,
        conversion: conv as char,
    };
    match (conv, arg) {
        (b'd' | b'i', Arg::Int(v)) => format_signed(narrow_signed(v, spec.length), &spec, out),
        (b'd' | b'i', Arg::Uint(v)) => {
            format_signed(narrow_signed(v as i64, spec.length), &spec, out)
        }
        (b'u' | b'x' | b'X' | b'o', Arg::Uint(v)) => {
            format_unsigned(narrow_unsigned(v, spec.length), &spec, out)
        }
        (b'u' | b'x' | b'X' | b'o', Arg::Int(v)) => {
            format_unsigned(narrow_unsigned(v as u64, spec.length), &spec, out)
        }
        (b'c', Arg::Char(c)) => format_char(c, &spec, out),
        // An integer `%c` is converted to `unsigned char` and emitted as one byte.
        (b'c', Arg::Int(v)) => format_byte(v as u8, &spec, out),
        (b'c', Arg::Uint(v)) => format_byte(v as u8, &spec, out),
        (b's', Arg::Str(s)) => format_str(s, &spec, out),
        (b's', Arg::Bytes(b)) => format_bytes(b, &spec, out),
        (b'p', Arg::Ptr(addr)) => format_pointer(addr, &spec, out),
        (b'p', Arg::Uint(v)) => format_pointer(v as usize, &spec, out),
        (b'f' | b'F' | b'e' | b'E' | b'g' | b'G', Arg::Float(v)) => {
            format_float(v, &spec, out).map_err(|_| FormatError::Encoding)?
        }
        // `%n` writes through a pointer; never honoured.
        _ => return Err(mismatch),
    }
    Ok(())
}

fn narrow_signed(value: i64, length: LengthMod) -> i64 {
    match length {
        LengthMod::Hh => value as i8 as i64,
        LengthMod::H => value as i16 as i64,
        LengthMod::None => value as i32 as i64,
        _ => value,
    }
}

fn narrow_unsigned(value: u64, length: LengthMod) -> u64 {
    match length {
        LengthMod::Hh => value as u8 as u64,
        LengthMod::H => value as u16 as u64,
        LengthMod::None => value as u32 as u64,
        _ => value,
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Render a signed integer according to `spec`.
pub fn format_signed(value: i64, spec: &FormatSpec, out: &mut BoundedWriter<'_>) {
    let negative = value < 0;
    let (base, uppercase) = int_base(spec.conversion);
    let mut digits = [0u8; 64];
    let count = render_digits(value.unsigned_abs(), base, uppercase, &mut digits);

    let sign = if negative {
        Some(b'-')
    } else {
        sign_flag(spec)
    };
    emit_integer(out, spec, sign, b"", value == 0, &digits[64 - count..]);
}

/// Render an unsigned integer according to `spec`.
pub fn format_unsigned(value: u64, spec: &FormatSpec, out: &mut BoundedWriter<'_>) {
    let (base, uppercase) = int_base(spec.conversion);
    let mut digits = [0u8; 64];
    let count = render_digits(value, base, uppercase, &mut digits);
    let digit_slice = &digits[64 - count..];

    let prefix = match spec.conversion {
        // '#' with octal forces a leading zero, which precision may already provide.
        b'o' if spec.flags.alt_form => {
            let min = match spec.precision {
                Precision::Fixed(p) => p,
                _ => 1,
            };
            if value != 0 && min <= count { b"0" as &[u8] } else { b"" }
        }
        _ if value != 0 => alt_prefix(spec),
        _ => b"",
    };
    emit_integer(out, spec, None, prefix, value == 0, digit_slice);
}

/// Shared padding logic for integer conversions.
fn emit_integer(
    out: &mut BoundedWriter<'_>,
    spec: &FormatSpec,
    sign: Option<u8>,
    prefix: &[u8],
    is_zero: bool,
    digits: &[u8],
) {
    // POSIX: an explicit precision of 0 with value 0 produces no digits,
    // except for the '#o' leading zero.
    let (digits, alt_zero): (&[u8], &[u8]) =
        if is_zero && spec.precision == Precision::Fixed(0) {
            let keep = spec.conversion == b'o' && spec.flags.alt_form;
            (b"", if keep { b"0" } else { b"" })
        } else {
            (digits, b"")
        };
    let leading_zeros = match spec.precision {
        Precision::Fixed(p) => p.saturating_sub(digits.len()),
        _ => 0,
    };
    // The '0' flag is ignored for integers once a precision is given.
    let zero_pad = spec.flags.zero_pad && spec.precision == Precision::None;
    let body_len = alt_zero.len() + leading_zeros + digits.len();
    emit_field(out, spec, sign, prefix, zero_pad, body_len, |out| {
        out.push_bytes(alt_zero);
        out.push_repeat(b'0', leading_zeros);
        out.push_bytes(digits);
    });
}

/// Emit `[pad][sign][prefix][zero-pad]<body>[pad]` for a field of `spec.width`.
fn emit_field(
    out: &mut BoundedWriter<'_>,
    spec: &FormatSpec,
    sign: Option<u8>,
    prefix: &[u8],
    zero_pad: bool,
    body_len: usize,
    body: impl FnOnce(&mut BoundedWriter<'_>),
) {
    let content = usize::from(sign.is_some()) + prefix.len() + body_len;
    let pad_total = resolve_width(spec).saturating_sub(content);
    let left = spec.flags.left_justify;

    if !left && !zero_pad {
        out.push_repeat(b' ', pad_total);
    }
    if let Some(s) = sign {
        out.push_bytes(&[s]);
    }
    out.push_bytes(prefix);
    if !left && zero_pad {
        out.push_repeat(b'0', pad_total);
    }
    body(out);
    if left {
        out.push_repeat(b' ', pad_total);
    }
}

/// Render a string argument. Precision limits the byte count, rounded down
/// to a character boundary.
pub fn format_str(s: &str, spec: &FormatSpec, out: &mut BoundedWriter<'_>) {
    let mut end = match spec.precision {
        Precision::Fixed(p) => p.min(s.len()),
        _ => s.len(),
    };
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let text = &s.as_bytes()[..end];
    emit_field(out, spec, None, b"", false, text.len(), |out| out.push_bytes(text));
}

/// Render raw string bytes. Precision limits the byte count.
pub fn format_bytes(bytes: &[u8], spec: &FormatSpec, out: &mut BoundedWriter<'_>) {
    let end = match spec.precision {
        Precision::Fixed(p) => p.min(bytes.len()),
        _ => bytes.len(),
    };
    let text = &bytes[..end];
    emit_field(out, spec, None, b"", false, text.len(), |out| out.push_bytes(text));
}

/// Render a single byte, as C does for `%c` with an `int` argument.
pub fn format_byte(byte: u8, spec: &FormatSpec, out: &mut BoundedWriter<'_>) {
    emit_field(out, spec, None, b"", false, 1, |out| out.push_bytes(&[byte]));
}

/// Render a character according to `spec`, UTF-8 encoded.
pub fn format_char(c: char, spec: &FormatSpec, out: &mut BoundedWriter<'_>) {
    let mut utf8 = [0u8; 4];
    let encoded = c.encode_utf8(&mut utf8).as_bytes();
    emit_field(out, spec, None, b"", false, encoded.len(), |out| {
        out.push_bytes(encoded)
    });
}

/// Render a pointer as `0x...` hex, or `(nil)` for null.
pub fn format_pointer(addr: usize, spec: &FormatSpec, out: &mut BoundedWriter<'_>) {
    if addr == 0 {
        emit_field(out, spec, None, b"", false, 5, |out| out.push_bytes(b"(nil)"));
        return;
    }
    let mut digits = [0u8; 64];
    let count = render_digits(addr as u64, 16, false, &mut digits);
    let digit_slice = &digits[64 - count..];
    emit_field(out, spec, None, b"0x", false, count, |out| {
        out.push_bytes(digit_slice)
    });
}

/// Largest precision accepted for floating-point conversions.
pub const MAX_FLOAT_PRECISION: usize = 160;

/// Room for the widest `%f` body: 309 integer digits, point, precision.
const FLOAT_SCRATCH: usize = 512;

/// Render a floating-point value: `%f`/`%F`, `%e`/`%E`, `%g`/`%G`.
///
/// Digit generation uses `core::fmt`; POSIX exponent layout, width and
/// flag rules are applied here.
pub fn format_float(
    value: f64,
    spec: &FormatSpec,
    out: &mut BoundedWriter<'_>,
) -> Result<(), fmt::Error> {
    let upper = spec.conversion.is_ascii_uppercase();
    let sign = if value.is_sign_negative() {
        Some(b'-')
    } else {
        sign_flag(spec)
    };

    if !value.is_finite() {
        let text: &[u8] = match (value.is_nan(), upper) {
            (true, false) => b"nan",
            (true, true) => b"NAN",
            (false, false) => b"inf",
            (false, true) => b"INF",
        };
        emit_field(out, spec, sign, b"", false, text.len(), |out| out.push_bytes(text));
        return Ok(());
    }

    let precision = match spec.precision {
        Precision::Fixed(p) => p,
        _ => 6,
    };
    if precision > MAX_FLOAT_PRECISION {
        return Err(fmt::Error);
    }

    let abs = value.abs();
    let alt = spec.flags.alt_form;
    let mut body = Scratch::new();
    match spec.conversion | 0x20 {
        b'e' => write_exponent(&mut body, abs, precision, upper, alt)?,
        b'g' => write_general(&mut body, abs, precision, upper, alt)?,
        _ => write_fixed(&mut body, abs, precision, alt)?,
    }

    let text = body.as_bytes();
    emit_field(out, spec, sign, b"", spec.flags.zero_pad, text.len(), |out| {
        out.push_bytes(text)
    });
    Ok(())
}

/// Fixed-capacity text buffer for float digit generation.
struct Scratch {
    bytes: [u8; FLOAT_SCRATCH],
    len: usize,
}

impl Scratch {
    fn new() -> Self {
        Self {
            bytes: [0; FLOAT_SCRATCH],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    fn push(&mut self, bytes: &[u8]) -> fmt::Result {
        let end = self.len.checked_add(bytes.len()).ok_or(fmt::Error)?;
        self.bytes.get_mut(self.len..end).ok_or(fmt::Error)?.copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    /// Drop trailing fractional zeros and a dangling decimal point.
    fn strip_fraction_zeros(&mut self) {
        if !self.as_bytes().contains(&b'.') {
            return;
        }
        while self.len > 0 && self.bytes[self.len - 1] == b'0' {
            self.len -= 1;
        }
        if self.len > 0 && self.bytes[self.len - 1] == b'.' {
            self.len -= 1;
        }
    }
}

impl fmt::Write for Scratch {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push(s.as_bytes())
    }
}

/// `%f`: fixed-point decimal.
fn write_fixed(out: &mut Scratch, value: f64, precision: usize, alt: bool) -> fmt::Result {
    write!(out, "{value:.precision$}")?;
    if precision == 0 && alt {
        out.push(b".")?;
    }
    Ok(())
}

/// Split `core::fmt`'s `{:e}` output into its mantissa and decimal exponent.
fn exponent_parts(value: f64, precision: usize) -> Result<(Scratch, i32), fmt::Error> {
    let mut raw = Scratch::new();
    write!(raw, "{value:.precision$e}")?;
    let bytes = raw.as_bytes();
    let e_pos = bytes.iter().position(|&b| b == b'e').ok_or(fmt::Error)?;
    let exp = core::str::from_utf8(&bytes[e_pos + 1..])
        .map_err(|_| fmt::Error)?
        .parse::<i32>()
        .map_err(|_| fmt::Error)?;
    raw.len = e_pos;
    Ok((raw, exp))
}

fn push_exponent(out: &mut Scratch, exp: i32, upper: bool) -> fmt::Result {
    out.push(if upper { b"E" } else { b"e" })?;
    out.push(if exp < 0 { b"-" } else { b"+" })?;
    write!(out, "{:02}", exp.unsigned_abs())
}

/// `%e`: `d.ddde±XX`.
fn write_exponent(
    out: &mut Scratch,
    value: f64,
    precision: usize,
    upper: bool,
    alt: bool,
) -> fmt::Result {
    let (mantissa, exp) = exponent_parts(value, precision)?;
    out.push(mantissa.as_bytes())?;
    if precision == 0 && alt {
        out.push(b".")?;
    }
    push_exponent(out, exp, upper)
}

/// `%g`: `%e` when the exponent is < -4 or >= precision, `%f` otherwise;
/// trailing zeros dropped unless '#'.
fn write_general(
    out: &mut Scratch,
    value: f64,
    precision: usize,
    upper: bool,
    alt: bool,
) -> fmt::Result {
    let p = precision.max(1);
    let (mut mantissa, exp) = exponent_parts(value, p - 1)?;
    let p_exp = i32::try_from(p).map_err(|_| fmt::Error)?;
    if (-4..p_exp).contains(&exp) {
        let frac = usize::try_from(p_exp - 1 - exp).map_err(|_| fmt::Error)?;
        write_fixed(out, value, frac, alt)?;
        if !alt {
            out.strip_fraction_zeros();
        }
        Ok(())
    } else {
        if !alt {
            mantissa.strip_fraction_zeros();
        } else if p == 1 {
            mantissa.push(b".")?;
        }
        out.push(mantissa.as_bytes())?;
        push_exponent(out, exp, upper)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn parse_decimal(digits: &[u8]) -> usize {
    digits.iter().fold(0_usize, |acc, &d| {
        acc.saturating_mul(10).saturating_add((d - b'0') as usize)
    })
}

fn resolve_width(spec: &FormatSpec) -> usize {
    match spec.width {
        Width::Fixed(w) => w,
        _ => 0,
    }
}

fn sign_flag(spec: &FormatSpec) -> Option<u8> {
    if spec.flags.force_sign {
        Some(b'+')
    } else if spec.flags.space_sign {
        Some(b' ')
    } else {
        None
    }
}

fn int_base(conversion: u8) -> (u64, bool) {
    match conversion {
        b'o' => (8, false),
        b'x' => (16, false),
        b'X' => (16, true),
        _ => (10, false),
    }
}

/// Render `value` in `base` right-aligned into `buf`; returns the digit count.
fn render_digits(mut value: u64, base: u64, uppercase: bool, buf: &mut [u8; 64]) -> usize {
    if value == 0 {
        buf[63] = b'0';
        return 1;
    }
    let alpha = if uppercase { b'A' } else { b'a' };
    let mut pos = 64;
    while value > 0 {
        pos -= 1;
        let digit = (value % base) as u8;
        buf[pos] = if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        };
        value /= base;
    }
    64 - pos
}

fn alt_prefix(spec: &FormatSpec) -> &'static [u8] {
    if !spec.flags.alt_form {
        return b"";
    }
    match spec.conversion {
        b'x' => b"0x",
        b'X' => b"0X",
        _ => b"",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
