//! Runtime mode configuration.
//!
//! The mode is set via the `CBASE_MODE` environment variable and only
//! matters when a C caller breaks a pointer contract (null buffer with a
//! non-zero length, null template):
//! - `strict` (default): the call fails with its sentinel and sets
//!   `errno = EFAULT`, like a conformant libc reporting a bad address.
//! - `hardened`: the call fails with the same sentinel and leaves `errno`
//!   untouched.
//!
//! The variable is read on each violation; nothing is cached.

use std::ffi::c_int;

use cbase_core::errno::EFAULT;

/// Environment variable selecting the [`SafetyLevel`].
pub const MODE_ENV: &str = "CBASE_MODE";

/// How pointer-contract violations at the C boundary are reported.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// Sentinel return plus `errno = EFAULT`.
    #[default]
    Strict,
    /// Sentinel return only.
    Hardened,
}

impl SafetyLevel {
    /// Parse from string (case-insensitive); unknown values mean `Strict`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "hardened" | "repair" | "tsm" | "full" => Self::Hardened,
            _ => Self::Strict,
        }
    }

    /// Current level from [`MODE_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(MODE_ENV)
            .map(|raw| Self::from_str_loose(&raw))
            .unwrap_or_default()
    }

    /// Returns true if violations are reported through `errno`.
    #[must_use]
    pub const fn sets_errno(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Record a pointer-contract violation by `symbol` according to the mode.
pub(crate) fn contract_violation(symbol: &str) {
    report_violation(symbol, SafetyLevel::from_env());
}

fn report_violation(symbol: &str, level: SafetyLevel) {
    log::warn!("{symbol}: null pointer argument ({level:?} mode)");
    if level.sets_errno() {
        // SAFETY: errno storage is thread-local and always writable.
        unsafe { set_abi_errno(EFAULT) };
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
unsafe fn set_abi_errno(val: c_int) {
    let p = unsafe { libc::__errno_location() };
    unsafe { *p = val };
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
unsafe fn set_abi_errno(val: c_int) {
    let p = unsafe { libc::__error() };
    unsafe { *p = val };
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
)))]
unsafe fn set_abi_errno(_val: c_int) {}
