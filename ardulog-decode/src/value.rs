//!
//! The small tagged union a decoded field value carries, per design note "Dynamic
//! per-message field maps": every `ardu_format` character resolves, via the configured
//! alphabet, to exactly one of these variants.
//!

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Value {
    /// Multiplies a numeric value by `factor`, promoting integers to `f64`. Scaling
    /// always operates on the decoded value, never on raw bytes.
    pub fn scaled(self, factor: f64) -> Value {
        Value::F64(self.as_f64() * factor)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Value::I8(v) => v as f64,
            Value::U8(v) => v as f64,
            Value::I16(v) => v as f64,
            Value::U16(v) => v as f64,
            Value::I32(v) => v as f64,
            Value::U32(v) => v as f64,
            Value::I64(v) => v as f64,
            Value::U64(v) => v as f64,
            Value::F32(v) => v as f64,
            Value::F64(v) => v,
        }
    }

    /// Rounds a floating-point value to 3 decimal places; no-op on integers.
    pub fn round3(self) -> Value {
        match self {
            Value::F32(v) => Value::F32((v * 1000.0).round() / 1000.0),
            Value::F64(v) => Value::F64((v * 1000.0).round() / 1000.0),
            other => other,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::F32(_) | Value::F64(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I8(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
        }
    }
}

/// A decoded field value: either a scalar [`Value`] or a NUL-stripped ASCII string
/// decoded from a fixed-length byte blob.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Text(String),
}

impl FieldValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Scalar(v) => Some(match *v {
                Value::I8(x) => x as i64,
                Value::U8(x) => x as i64,
                Value::I16(x) => x as i64,
                Value::U16(x) => x as i64,
                Value::I32(x) => x as i64,
                Value::U32(x) => x as i64,
                Value::I64(x) => x,
                Value::U64(x) => x as i64,
                Value::F32(x) => x as i64,
                Value::F64(x) => x as i64,
            }),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}
