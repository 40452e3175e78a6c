//! Single-evaluation comparisons and fixed-size array helpers.

/// Smaller of `a` and `b`; `b` when they compare equal or are unordered.
#[inline]
pub fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}

/// Larger of `a` and `b`; `b` when they compare equal or are unordered.
#[inline]
pub fn max_of<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

/// Element count of a fixed-size array. Slices and pointers do not compile.
#[inline]
pub const fn array_size<T, const N: usize>(_arr: &[T; N]) -> usize {
    N
}

/// Pointer one past the last element, for pointer-walking loops.
#[inline]
pub fn array_end<T, const N: usize>(arr: &[T; N]) -> *const T {
    arr.as_ptr_range().end
}

/// Element count of the array a field accessor points at.
///
/// Backs [`member_size!`](crate::member_size); the accessor is never called.
#[doc(hidden)]
pub const fn field_array_len<S, T, const N: usize>(_field: fn(&S) -> &[T; N]) -> usize {
    N
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Header {
        magic: [u8; 4],
        _reserved: [u32; 3],
    }

    #[test]
    fn min_max_integers() {
        assert_eq!(min_of(3, 7), 3);
        assert_eq!(max_of(3, 7), 7);
        assert_eq!(min_of(-1i64, -1), -1);
        assert_eq!(max_of(u8::MAX, 0), u8::MAX);
    }

    #[test]
    fn min_max_floats() {
        assert_eq!(min_of(1.5, -2.0), -2.0);
        assert_eq!(max_of(1.5f32, 2.5), 2.5);
        // Unordered comparisons fall through to the second operand.
        assert!(min_of(1.0, f64::NAN).is_nan());
        assert_eq!(max_of(f64::NAN, 1.0), 1.0);
    }

    #[test]
    fn arguments_evaluated_once() {
        let mut calls = 0;
        let mut next = || {
            calls += 1;
            calls
        };
        let m = max_of(next(), next());
        assert_eq!(m, 2);
        assert_eq!(calls, 2);
    }

    #[test]
    fn array_helpers() {
        const TABLE: [u16; 5] = [1, 2, 3, 4, 5];
        const LEN: usize = array_size(&TABLE);
        assert_eq!(LEN, 5);
        assert_eq!(array_end(&TABLE), TABLE.as_ptr().wrapping_add(LEN));

        let empty: [u8; 0] = [];
        assert_eq!(array_size(&empty), 0);
        assert_eq!(array_end(&empty), empty.as_ptr());
    }

    #[test]
    fn member_size_counts_field_elements() {
        assert_eq!(crate::member_size!(Header, magic), 4);
        assert_eq!(crate::member_size!(Header, _reserved), 3);
        let h = Header {
            magic: *b"CBSE",
            _reserved: [0; 3],
        };
        assert_eq!(h.magic.len(), crate::member_size!(Header, magic));
    }
}
