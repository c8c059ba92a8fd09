//! Partial-update primitives.
//!
//! Update endpoints receive a full entity body and overlay it onto the stored
//! record. A field is copied only when it is non-zero: a non-empty string, a
//! non-zero number, a present reference or a non-empty collection. Zero values
//! are indistinguishable from an omitted field and leave the target untouched.

/// A value with a distinguished "zero" that means "leave alone" in a patch.
pub trait Zero {
    fn is_zero(&self) -> bool;
}

impl Zero for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Zero for i32 {
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl Zero for i64 {
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl Zero for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl<T> Zero for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

/// `None` is zero. `Some(v)` is zero only when `v` is.
impl<T: Zero> Zero for Option<T> {
    fn is_zero(&self) -> bool {
        self.as_ref().is_none_or(Zero::is_zero)
    }
}

/// Copy `src` into `dest` unless `src` is zero.
pub fn overlay<T: Zero>(dest: &mut T, src: T) {
    if !src.is_zero() {
        *dest = src;
    }
}

/// Entity-level merge. Implementations call [`overlay`] for every field the
/// patch may change and never touch the identifier.
pub trait Merge<P> {
    fn merge(&mut self, patch: P);
}
