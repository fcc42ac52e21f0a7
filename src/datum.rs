//! Column data types and values.
//!
//! [`Type`] describes a column of an external relation and [`Value`] carries
//! one fetched column value. Values are always owned, so a row copied out of a
//! bridge session stays valid after the session ends.

use std::fmt;

/// Column data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean type.
    Bool,
    /// Variable-length binary string.
    Bytea,
    /// 2-byte integer.
    Int2,
    /// 4-byte integer.
    Int4,
    /// 8-byte integer.
    Int8,
    /// Single-precision floating-point.
    Float4,
    /// Double-precision floating-point.
    Float8,
    /// Variable-length string.
    Text,
}

/// Width assumed for variable-length values when no statistics exist.
const DEFAULT_VARLENA_WIDTH: u32 = 32;

impl Type {
    /// Returns the fixed byte size for fixed-length types, or `None` for variable-length types.
    pub const fn fixed_size(self) -> Option<u32> {
        match self {
            Type::Bool => Some(1),
            Type::Int2 => Some(2),
            Type::Int4 => Some(4),
            Type::Int8 => Some(8),
            Type::Float4 => Some(4),
            Type::Float8 => Some(8),
            Type::Text | Type::Bytea => None,
        }
    }

    /// Returns the average width used when estimating row width for planning.
    pub const fn typical_width(self) -> u32 {
        match self.fixed_size() {
            Some(size) => size,
            None => DEFAULT_VARLENA_WIDTH,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Bool => "boolean",
            Type::Bytea => "bytea",
            Type::Int2 => "smallint",
            Type::Int4 => "integer",
            Type::Int8 => "bigint",
            Type::Float4 => "real",
            Type::Float8 => "double precision",
            Type::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// A typed column value.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean (true/false).
    Boolean(bool),
    /// 16-bit signed integer (SMALLINT).
    Int16(i16),
    /// 32-bit signed integer (INTEGER).
    Int32(i32),
    /// 64-bit signed integer (BIGINT).
    Int64(i64),
    /// 32-bit floating point (REAL).
    Float32(f32),
    /// 64-bit floating point (DOUBLE PRECISION).
    Float64(f64),
    /// Variable-length text.
    Text(String),
    /// Variable-length binary.
    Bytea(Vec<u8>),
}

impl Value {
    /// Returns the data type for this value, or `None` for Null.
    pub fn data_type(&self) -> Option<Type> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(Type::Bool),
            Value::Int16(_) => Some(Type::Int2),
            Value::Int32(_) => Some(Type::Int4),
            Value::Int64(_) => Some(Type::Int8),
            Value::Float32(_) => Some(Type::Float4),
            Value::Float64(_) => Some(Type::Float8),
            Value::Text(_) => Some(Type::Text),
            Value::Bytea(_) => Some(Type::Bytea),
        }
    }

    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Widens integer values to `i64` for cross-width comparison.
    pub(crate) fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int16(n) => Some(i64::from(*n)),
            Value::Int32(n) => Some(i64::from(*n)),
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Widens numeric values to `f64` for cross-type comparison.
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(n) => Some(f64::from(*n)),
            Value::Float64(n) => Some(*n),
            other => other.as_i64().map(|n| n as f64),
        }
    }

    /// Converts this value to its text representation.
    ///
    /// Booleans render as `"t"`/`"f"`, bytea as hex with a `"\\x"` prefix and
    /// NULL as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => (if *b { "t" } else { "f" }).to_string(),
            Value::Int16(n) => n.to_string(),
            Value::Int32(n) => n.to_string(),
            Value::Int64(n) => n.to_string(),
            Value::Float32(n) => format_float(f64::from(*n)),
            Value::Float64(n) => format_float(*n),
            Value::Text(s) => s.clone(),
            Value::Bytea(b) => {
                let hex: String = b.iter().map(|byte| format!("{:02x}", byte)).collect();
                format!("\\x{}", hex)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            other => write!(f, "{}", other.to_text()),
        }
    }
}

fn format_float(n: f64) -> String {
    if n.is_infinite() {
        if n.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n.is_nan() {
        "NaN".to_string()
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_fixed_size() {
        assert_eq!(Type::Bool.fixed_size(), Some(1));
        assert_eq!(Type::Int4.fixed_size(), Some(4));
        assert_eq!(Type::Int8.fixed_size(), Some(8));
        assert_eq!(Type::Text.fixed_size(), None);
        assert_eq!(Type::Bytea.fixed_size(), None);
    }

    #[test]
    fn test_typical_width() {
        assert_eq!(Type::Int4.typical_width(), 4);
        assert_eq!(Type::Text.typical_width(), 32);
    }

    #[test]
    fn test_type_display() {
        assert_eq!(Type::Bool.to_string(), "boolean");
        assert_eq!(Type::Float8.to_string(), "double precision");
        assert_eq!(Type::Int8.to_string(), "bigint");
    }

    #[test]
    fn test_value_data_type() {
        assert_eq!(Value::Null.data_type(), None);
        assert_eq!(Value::Int32(0).data_type(), Some(Type::Int4));
        assert_eq!(Value::Text(String::new()).data_type(), Some(Type::Text));
        assert!(Value::Null.is_null());
        assert!(!Value::Int32(0).is_null());
    }

    #[test]
    fn test_numeric_widening() {
        assert_eq!(Value::Int16(7).as_i64(), Some(7));
        assert_eq!(Value::Int32(7).as_f64(), Some(7.0));
        assert_eq!(Value::Text("7".into()).as_i64(), None);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Boolean(true).to_text(), "t");
        assert_eq!(Value::Int64(100).to_text(), "100");
        assert_eq!(Value::Float64(f64::NEG_INFINITY).to_text(), "-Infinity");
        assert_eq!(Value::Bytea(vec![0xDE, 0xAD]).to_text(), "\\xdead");
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}
