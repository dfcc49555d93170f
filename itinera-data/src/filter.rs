use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::value::FilterValue;

/// An unordered map of logical filter keys to values.
///
/// This is the caller-facing "query language": the keys are the logical
/// names an entity's column map exposes (`"country"`, `"minPrice"`,
/// `"keyword"`, ...), never storage column names. Key order carries no
/// meaning, but iteration is sorted so that two equal filters always
/// compose byte-identical statements.
///
/// # Example
///
/// ```
/// use itinera_data::Filter;
///
/// let filter = Filter::new()
///     .with("country", "France")
///     .with("minPrice", 100);
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, FilterValue>);

impl Filter {
    /// An empty filter. Searching with it behaves like `find_all`.
    pub fn new() -> Self {
        Filter(BTreeMap::new())
    }

    /// Fluent insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a criterion, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Build a filter from an untyped JSON object.
    ///
    /// Scalars map onto [`FilterValue`] variants; nested arrays or objects
    /// are rejected with [`DataError::Validation`], as is any non-object
    /// top-level value.
    pub fn from_json(value: serde_json::Value) -> Result<Filter, DataError> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(DataError::validation(format!(
                    "filter must be a JSON object, got {other}"
                )))
            }
        };
        let mut filter = Filter::new();
        for (key, raw) in map {
            let value = match raw {
                serde_json::Value::String(s) => FilterValue::Text(s),
                serde_json::Value::Bool(b) => FilterValue::Bool(b),
                serde_json::Value::Null => FilterValue::Null,
                serde_json::Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        FilterValue::Int(i)
                    } else if let Some(f) = n.as_f64() {
                        FilterValue::Float(f)
                    } else {
                        return Err(DataError::validation(format!(
                            "filter value for '{key}' is out of range"
                        )));
                    }
                }
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(DataError::validation(format!(
                        "filter value for '{key}' must be a scalar"
                    )))
                }
            };
            filter.0.insert(key, value);
        }
        Ok(filter)
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The filter's key set, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Criteria in sorted key order — the order predicates are emitted in.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn iteration_is_sorted_regardless_of_insertion_order() {
        let filter = Filter::new()
            .with("minPrice", 80)
            .with("country", "France")
            .with("keyword", "par");
        let keys: Vec<_> = filter.keys().collect();
        assert_eq!(keys, vec!["country", "keyword", "minPrice"]);
    }

    #[test]
    fn from_json_maps_scalars() {
        let filter = Filter::from_json(json!({
            "name": "Paris",
            "minPrice": 100,
            "rating": 4.5,
            "isActive": true,
            "note": null,
        }))
        .unwrap();
        assert_eq!(filter.get("name"), Some(&FilterValue::Text("Paris".into())));
        assert_eq!(filter.get("minPrice"), Some(&FilterValue::Int(100)));
        assert_eq!(filter.get("rating"), Some(&FilterValue::Float(4.5)));
        assert_eq!(filter.get("isActive"), Some(&FilterValue::Bool(true)));
        assert_eq!(filter.get("note"), Some(&FilterValue::Null));
    }

    #[test]
    fn from_json_rejects_nested_values() {
        let err = Filter::from_json(json!({ "ids": [1, 2, 3] })).unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn from_json_rejects_non_object() {
        let err = Filter::from_json(json!("just a string")).unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }
}
