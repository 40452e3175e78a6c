//! Exported macros.

/// Element count of an array field of a struct type: `member_size!(Type, field)`.
#[macro_export]
macro_rules! member_size {
    ($ty:ty, $field:ident) => {
        $crate::cmp::field_array_len::<$ty, _, _>(|s| &s.$field)
    };
}

/// Mark bindings as intentionally unused.
#[macro_export]
macro_rules! unreferenced {
    ($($param:expr),* $(,)?) => {
        $( let _ = &$param; )*
    };
}

/// Stringify tokens without expanding them.
#[macro_export]
macro_rules! str_of {
    ($($tokens:tt)*) => {
        ::core::stringify!($($tokens)*)
    };
}

/// Bounded `format!` into a caller buffer; see [`format_to_buffer`](crate::stdio::format_to_buffer).
///
/// ```
/// let mut buf = [0u8; 8];
/// assert_eq!(cbase_core::print_to_string!(&mut buf, "{}-{}", 1, 2), 3);
/// assert_eq!(cbase_core::print_to_string!(&mut buf, "{}", "too long"), -1);
/// ```
#[macro_export]
macro_rules! print_to_string {
    ($buf:expr, $($arg:tt)*) => {
        $crate::stdio::format_to_buffer($buf, ::core::format_args!($($arg)*))
    };
}

/// Bounded printf-style print; arguments convert through `Arg: From<T>`.
///
/// ```
/// let mut buf = [0u8; 16];
/// assert_eq!(cbase_core::printf_to_string!(&mut buf, "%05.1f|%s", 2.3, "ok"), 8);
/// ```
#[macro_export]
macro_rules! printf_to_string {
    ($buf:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::stdio::format_template(
            $buf,
            $template,
            &[$($crate::stdio::Arg::from($arg)),*],
        )
    };
}
