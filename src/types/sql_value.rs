/// Represents a SQL parameter or column value.
/// Compiled queries carry the dialect-neutral variants; the binding translator
/// rewrites `Bool`, `Bytes` and `Returning` into shapes the driver accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Text(String),
    Bytes(Vec<u8>),
    /// Request for an output parameter receiving the generated row identifier.
    Returning,
    /// Output parameter allocated by the driver.
    OutParam(OutParam),
}

/// Native type of an output parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutParamKind {
    /// Row identifiers are always returned as strings.
    String,
}

/// An output parameter slot, filled by the driver after execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutParam {
    pub kind: OutParamKind,
    pub slot: String,
}

impl OutParam {
    pub fn new(kind: OutParamKind, slot: impl Into<String>) -> Self {
        Self {
            kind,
            slot: slot.into(),
        }
    }
}

/// Name of the response slot holding the output parameter at `index` (0-based).
/// The first slot has no suffix, later ones are numbered from 2.
pub fn out_param_slot(index: usize) -> String {
    if index == 0 {
        "returnParam".to_string()
    } else {
        format!("returnParam{}", index + 1)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int64(i64::from(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int64(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float64(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Bytes(value)
    }
}

impl From<&[u8]> for SqlValue {
    fn from(value: &[u8]) -> Self {
        SqlValue::Bytes(value.to_vec())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_param_slot_names() {
        assert_eq!(out_param_slot(0), "returnParam");
        assert_eq!(out_param_slot(1), "returnParam2");
        assert_eq!(out_param_slot(2), "returnParam3");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("a")), SqlValue::Text("a".to_string()));
    }
}
