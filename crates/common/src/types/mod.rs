pub mod compare;

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DataType {
    #[default]
    Unknown,
    Int64,
    Float64,
    Decimal,
    String,
    Bytes,
    Tuple,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Unknown => write!(f, "UNKNOWN"),
            DataType::Int64 => write!(f, "INT64"),
            DataType::Float64 => write!(f, "FLOAT64"),
            DataType::Decimal => write!(f, "DECIMAL"),
            DataType::String => write!(f, "STRING"),
            DataType::Bytes => write!(f, "BYTES"),
            DataType::Tuple => write!(f, "TUPLE"),
        }
    }
}

/// Declared type of an expression: the kind plus the signedness and
/// display width the planner carried over from the column definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct FieldType {
    pub data_type: DataType,
    pub unsigned: bool,
    pub display_width: Option<u32>,
}

impl FieldType {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            unsigned: false,
            display_width: None,
        }
    }

    pub fn unsigned_int() -> Self {
        Self {
            data_type: DataType::Int64,
            unsigned: true,
            display_width: None,
        }
    }

    pub fn with_display_width(mut self, width: u32) -> Self {
        self.display_width = Some(width);
        self
    }

    pub fn is_integral(&self) -> bool {
        matches!(self.data_type, DataType::Int64)
    }

    pub fn is_unsigned_integral(&self) -> bool {
        self.unsigned && self.is_integral()
    }

    pub fn is_stringy(&self) -> bool {
        matches!(self.data_type, DataType::String | DataType::Bytes)
    }
}

impl From<DataType> for FieldType {
    fn from(data_type: DataType) -> Self {
        Self::new(data_type)
    }
}

/// One scalar (or tuple) unit of data flowing through expression
/// evaluation. `Null` may stand in for any domain and propagates through
/// comparison as ternary-unknown. Decimals are carried in their text form
/// and parsed only where a numeric comparison needs them.
#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    #[default]
    Null,
    Int64(i64),
    UInt64(u64),
    Float64(OrderedFloat<f64>),
    Decimal(String),
    String(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn int64(v: i64) -> Self {
        Value::Int64(v)
    }

    pub fn uint64(v: u64) -> Self {
        Value::UInt64(v)
    }

    pub fn float64(v: f64) -> Self {
        Value::Float64(OrderedFloat(v))
    }

    pub fn decimal(v: impl Into<String>) -> Self {
        Value::Decimal(v.into())
    }

    pub fn string(v: impl Into<String>) -> Self {
        Value::String(v.into())
    }

    pub fn bytes(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }

    pub fn tuple(v: Vec<Value>) -> Self {
        Value::Tuple(v)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Unknown,
            Value::Int64(_) | Value::UInt64(_) => DataType::Int64,
            Value::Float64(_) => DataType::Float64,
            Value::Decimal(_) => DataType::Decimal,
            Value::String(_) => DataType::String,
            Value::Bytes(_) => DataType::Bytes,
            Value::Tuple(_) => DataType::Tuple,
        }
    }

    /// Declared type matching this value's runtime tag, including the
    /// unsigned flag for `UInt64`.
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::UInt64(_) => FieldType::unsigned_int(),
            other => FieldType::new(other.data_type()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(v.0),
            Value::Int64(v) => Some(*v as f64),
            Value::UInt64(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Raw byte view shared by the character and binary string forms.
    pub fn as_raw_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s.as_bytes()),
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Owned text form of the value, the coercion used by variable
    /// assignment. `Null` becomes the empty string rather than an error.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int64(v) => v.to_string(),
            Value::UInt64(v) => v.to_string(),
            Value::Float64(v) => v.0.to_string(),
            Value::Decimal(d) => d.clone(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Value::Tuple(elems) => {
                let parts: Vec<String> = elems.iter().map(|e| e.to_text()).collect();
                format!("({})", parts.join(","))
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Int64(v) => serde_json::Value::from(*v),
            Value::UInt64(v) => serde_json::Value::from(*v),
            Value::Float64(v) => serde_json::Value::from(v.0),
            Value::Decimal(d) => serde_json::Value::String(d.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::String(String::from_utf8_lossy(b).into_owned()),
            Value::Tuple(elems) => {
                serde_json::Value::Array(elems.iter().map(|e| e.to_json()).collect())
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}u", v),
            Value::Float64(v) => write!(f, "{}", v.0),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
            Value::Tuple(elems) => {
                write!(f, "(")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", elem)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_of_values() {
        assert_eq!(Value::null().data_type(), DataType::Unknown);
        assert_eq!(Value::int64(-3).data_type(), DataType::Int64);
        assert_eq!(Value::uint64(3).data_type(), DataType::Int64);
        assert_eq!(Value::float64(1.5).data_type(), DataType::Float64);
        assert_eq!(Value::decimal("1.10").data_type(), DataType::Decimal);
        assert_eq!(Value::string("x").data_type(), DataType::String);
        assert_eq!(Value::bytes(vec![1]).data_type(), DataType::Bytes);
    }

    #[test]
    fn test_field_type_carries_signedness() {
        assert!(Value::uint64(1).field_type().is_unsigned_integral());
        assert!(!Value::int64(1).field_type().is_unsigned_integral());
        assert!(Value::string("a").field_type().is_stringy());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::null().to_text(), "");
        assert_eq!(Value::int64(-7).to_text(), "-7");
        assert_eq!(Value::uint64(u64::MAX).to_text(), u64::MAX.to_string());
        assert_eq!(Value::decimal("1.10").to_text(), "1.10");
        assert_eq!(Value::bytes(b"abc".to_vec()).to_text(), "abc");
    }

    #[test]
    fn test_raw_bytes_shared_across_string_forms() {
        assert_eq!(Value::string("1.1").as_raw_bytes(), Some("1.1".as_bytes()));
        assert_eq!(
            Value::bytes(b"1.1".to_vec()).as_raw_bytes(),
            Some("1.1".as_bytes())
        );
        assert_eq!(Value::int64(1).as_raw_bytes(), None);
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::int64(5).to_json(), serde_json::json!(5));
        assert_eq!(
            Value::tuple(vec![Value::string("a"), Value::null()]).to_json(),
            serde_json::json!(["a", null])
        );
    }
}
