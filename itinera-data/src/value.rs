use serde::{Deserialize, Serialize};

/// A value supplied for one filter criterion, bound as a statement parameter.
///
/// Values never appear in generated SQL text; backends bind them positionally
/// in the order the predicate builder emitted its fragments.
///
/// The untagged serde representation maps JSON scalars directly onto the
/// variants, which is what lets a [`Filter`](crate::Filter) be built from an
/// arbitrary untyped JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl FilterValue {
    /// The text payload, if this is a `Text` value.
    ///
    /// The `keyword` convention only accepts text; everything else is a
    /// validation error at predicate-build time.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Short type label used in error messages.
    pub fn type_label(&self) -> &'static str {
        match self {
            FilterValue::Int(_) => "integer",
            FilterValue::Float(_) => "float",
            FilterValue::Bool(_) => "boolean",
            FilterValue::Text(_) => "text",
            FilterValue::Null => "null",
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Int(v as i64)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => FilterValue::Null,
        }
    }
}
