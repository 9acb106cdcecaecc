//! Projections applied to raw stored values

use std::fmt;

use tallydb::{Error, Result};

type Apply<T> = Box<dyn Fn(Vec<u8>) -> Result<T> + Send + Sync>;

/// Projection from raw bytes to `T`
///
/// Only ever applied to values that exist; a missing key never reaches the
/// projection.
pub struct Transform<T> {
    name: &'static str,
    apply: Apply<T>,
}

impl Transform<Vec<u8>> {
    /// Raw bytes, unchanged
    pub fn raw() -> Self {
        Self::custom("raw", Ok)
    }
}

impl Transform<String> {
    /// Decode as UTF-8 text
    pub fn utf8() -> Self {
        Self::custom("utf8", parse_str)
    }
}

impl Transform<i64> {
    /// Parse decimal text as an integer
    pub fn integer() -> Self {
        Self::custom("integer", parse_int)
    }
}

impl<T> Transform<T> {
    /// Projection backed by an arbitrary function
    pub fn custom<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(Vec<u8>) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Box::new(f),
        }
    }

    /// Name given at construction
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply to a present value
    pub fn apply(&self, raw: Vec<u8>) -> Result<T> {
        (self.apply)(raw)
    }
}

impl<T> fmt::Debug for Transform<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}

pub(crate) fn parse_str(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|e| Error::Decode(e.to_string()))
}

pub(crate) fn parse_int(raw: Vec<u8>) -> Result<i64> {
    let s = parse_str(raw)?;
    s.trim()
        .parse::<i64>()
        .map_err(|e| Error::Decode(format!("{:?} is not an integer: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw() {
        assert_eq!(Transform::raw().apply(b"\xff".to_vec()).unwrap(), vec![0xff]);
    }

    #[test]
    fn test_utf8() {
        assert_eq!(Transform::utf8().apply(b"foo".to_vec()).unwrap(), "foo");
        assert!(matches!(
            Transform::utf8().apply(vec![0xff, 0xfe]),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_integer() {
        assert_eq!(Transform::integer().apply(b"42".to_vec()).unwrap(), 42);
        assert_eq!(Transform::integer().apply(b"-3".to_vec()).unwrap(), -3);
        assert!(matches!(
            Transform::integer().apply(b"4.2".to_vec()),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_custom() {
        let len = Transform::custom("len", |raw: Vec<u8>| Ok(raw.len()));
        assert_eq!(len.name(), "len");
        assert_eq!(len.apply(b"abcd".to_vec()).unwrap(), 4);
        assert_eq!(format!("{:?}", len), "Transform(\"len\")");
    }
}
