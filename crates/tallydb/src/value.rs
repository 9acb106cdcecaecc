//! Values accepted by `store`

use std::fmt;

/// A value that can be written to a backend
///
/// Backends only hold bytes, so every variant has a raw encoding:
/// text as UTF-8, integers and floats as their decimal text, bytes unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text
    Text(String),
    /// Signed integer
    Int(i64),
    /// Floating-point number
    Float(f64),
    /// Binary blob
    Bytes(Vec<u8>),
}

impl Value {
    /// Raw encoding written to the backend
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Text(s) => s.as_bytes().to_vec(),
            Value::Int(i) => i.to_string().into_bytes(),
            Value::Float(f) => format!("{:?}", f).into_bytes(),
            Value::Bytes(b) => b.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i as i64)
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);
