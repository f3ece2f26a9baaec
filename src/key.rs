//! Canonical key normalization.
//!
//! Every mapping boundary in this crate (lookup, insertion, membership,
//! slicing) funnels its key through [`AsKey`], so `"0"` and `0usize`, or a
//! `String` and a `&str`, always address the same slot.

use std::borrow::Cow;

/// A value usable as a parameter key.
///
/// Implementations return the canonical string form of the key. Storage only
/// ever holds canonical strings.
///
/// # Examples
///
/// ```
/// use strong_params::AsKey;
///
/// assert_eq!(0usize.as_key(), "0");
/// assert_eq!("name".as_key(), "name");
/// assert_eq!(String::from("name").as_key(), "name");
/// ```
pub trait AsKey {
    /// Returns the canonical string form of this key.
    fn as_key(&self) -> Cow<'_, str>;
}

impl AsKey for str {
    fn as_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl AsKey for String {
    fn as_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl AsKey for Cow<'_, str> {
    fn as_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&**self)
    }
}

impl<T: AsKey + ?Sized> AsKey for &T {
    fn as_key(&self) -> Cow<'_, str> {
        (**self).as_key()
    }
}

macro_rules! integer_keys {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsKey for $ty {
                fn as_key(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

// Positional keys, as produced by fields-for style forms (`items[0][name]`).
integer_keys!(usize, u32, u64, i32, i64);

/// Normalizes a key into the owned canonical form used for storage.
pub fn canonical_key(key: impl AsKey) -> String {
    key.as_key().into_owned()
}
