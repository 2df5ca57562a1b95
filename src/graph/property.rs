//! Attribute values and the per-entity attribute store
//!
//! Attributes are untyped and caller-defined, so typed reads degrade to the
//! type's zero value instead of failing.

use super::store::{GraphError, GraphResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Dynamically-typed attribute value
///
/// Supports:
/// - Null (absent)
/// - Boolean
/// - Integer (i64)
/// - Float (f64)
/// - String
/// - Array (Vec<PropertyValue>)
/// - Map (insertion-ordered, nested)
///
/// Serialized untagged, so values map one-to-one onto plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<PropertyValue>),
    Map(IndexMap<String, PropertyValue>),
}

impl PropertyValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Float view, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "Null",
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::String(_) => "String",
            PropertyValue::Array(_) => "Array",
            PropertyValue::Map(_) => "Map",
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(arr: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(arr)
    }
}

impl From<IndexMap<String, PropertyValue>> for PropertyValue {
    fn from(map: IndexMap<String, PropertyValue>) -> Self {
        PropertyValue::Map(map)
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => PropertyValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Integer(i),
                None => PropertyValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => PropertyValue::String(s),
            Value::Array(arr) => PropertyValue::Array(arr.into_iter().map(Into::into).collect()),
            Value::Object(obj) => {
                PropertyValue::Map(obj.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// String-keyed attribute bag owned by a single node or edge
///
/// Keys keep their first-insertion position; overwriting a key does not
/// move it. Only top-level keys are addressable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, PropertyValue>);

impl Attributes {
    pub fn new() -> Self {
        Attributes(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// String view of `key`, or `""` when absent or not a string
    pub fn get_string(&self, key: &str) -> String {
        self.get(key)
            .and_then(PropertyValue::as_string)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Integer view of `key`, or `0` when absent or not an integer
    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key).and_then(PropertyValue::as_integer).unwrap_or_default()
    }

    /// Float view of `key`, or `0.0` when absent or not numeric
    pub fn get_float(&self, key: &str) -> f64 {
        self.get(key).and_then(PropertyValue::as_float).unwrap_or_default()
    }

    /// Boolean view of `key`, or `false` when absent or not a boolean
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(PropertyValue::as_boolean).unwrap_or_default()
    }

    /// Set an attribute, returning the previous value
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Merge every entry of `attrs`, overwriting existing keys
    pub fn set_all<K, V>(&mut self, attrs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        for (key, value) in attrs {
            self.0.insert(key.into(), value.into());
        }
    }

    /// Remove an attribute, keeping the order of the remaining keys
    pub fn del(&mut self, key: &str) -> Option<PropertyValue> {
        self.0.shift_remove(key)
    }

    /// Visit attributes in insertion order until `visitor` returns false
    pub fn range<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &PropertyValue) -> bool,
    {
        for (key, value) in &self.0 {
            if !visitor(key, value) {
                break;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode the whole map as a JSON object
    pub fn to_json(&self) -> GraphResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    /// Decode a JSON object and merge its fields into this map
    pub fn merge_json(&mut self, bytes: &[u8]) -> GraphResult<()> {
        match serde_json::from_slice::<PropertyValue>(bytes)? {
            PropertyValue::Map(map) => {
                self.0.extend(map);
                Ok(())
            }
            other => Err(GraphError::InvalidJson(format!(
                "expected a JSON object, found {}",
                other.type_name()
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        attrs.set_all(iter);
        attrs
    }
}

impl IntoIterator for Attributes {
    type Item = (String, PropertyValue);
    type IntoIter = indexmap::map::IntoIter<String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_types() {
        assert_eq!(PropertyValue::String("test".to_string()).type_name(), "String");
        assert_eq!(PropertyValue::Integer(42).type_name(), "Integer");
        assert_eq!(PropertyValue::Float(2.5).type_name(), "Float");
        assert_eq!(PropertyValue::Boolean(true).type_name(), "Boolean");
        assert_eq!(PropertyValue::Array(vec![]).type_name(), "Array");
        assert_eq!(PropertyValue::Map(IndexMap::new()).type_name(), "Map");
        assert_eq!(PropertyValue::Null.type_name(), "Null");
    }

    #[test]
    fn test_typed_getters_fall_back_to_zero() {
        let mut attrs = Attributes::new();
        attrs.set("name", "Alice");
        attrs.set("age", 30i64);
        attrs.set("active", true);

        assert_eq!(attrs.get_string("name"), "Alice");
        assert_eq!(attrs.get_int("age"), 30);
        assert!(attrs.get_bool("active"));

        // Absent keys
        assert_eq!(attrs.get_string("missing"), "");
        assert_eq!(attrs.get_int("missing"), 0);
        assert!(!attrs.get_bool("missing"));

        // Type mismatches
        assert_eq!(attrs.get_string("age"), "");
        assert_eq!(attrs.get_int("name"), 0);
        assert!(!attrs.get_bool("name"));
        assert_eq!(attrs.get_float("age"), 30.0);
        assert_eq!(attrs.get_float("name"), 0.0);
    }

    #[test]
    fn test_set_all_overwrites_in_place() {
        let mut attrs: Attributes = vec![("a", 1i64), ("b", 2i64)].into_iter().collect();
        attrs.set_all(vec![("b", PropertyValue::from("two")), ("c", PropertyValue::from(3i64))]);

        let keys: Vec<&str> = attrs.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(attrs.get_string("b"), "two");
    }

    #[test]
    fn test_del_keeps_order() {
        let mut attrs: Attributes =
            vec![("a", 1i64), ("b", 2i64), ("c", 3i64)].into_iter().collect();
        assert_eq!(attrs.del("b"), Some(PropertyValue::Integer(2)));
        assert_eq!(attrs.del("b"), None);
        let keys: Vec<&str> = attrs.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_range_stops_early() {
        let attrs: Attributes = vec![("a", 1i64), ("b", 2i64), ("c", 3i64), ("d", 4i64)]
            .into_iter()
            .collect();

        let mut seen = Vec::new();
        attrs.range(|key, _| {
            seen.push(key.to_string());
            seen.len() < 2
        });
        assert_eq!(seen, vec!["a", "b"]);

        let mut all = Vec::new();
        attrs.range(|key, _| {
            all.push(key.to_string());
            true
        });
        assert_eq!(all, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut nested = IndexMap::new();
        nested.insert("city".to_string(), PropertyValue::from("Paris"));
        nested.insert("zip".to_string(), PropertyValue::from(75001i64));

        let mut attrs = Attributes::new();
        attrs.set("name", "Alice");
        attrs.set("age", 30i64);
        attrs.set("score", 0.75);
        attrs.set("admin", false);
        attrs.set("nothing", PropertyValue::Null);
        attrs.set("tags", vec![PropertyValue::from("a"), PropertyValue::from(1i64)]);
        attrs.set("address", nested);

        let bytes = attrs.to_json().unwrap();
        let mut decoded = Attributes::new();
        decoded.merge_json(&bytes).unwrap();
        assert_eq!(decoded, attrs);
    }

    #[test]
    fn test_merge_json_rejects_non_objects() {
        let mut attrs = Attributes::new();
        let err = attrs.merge_json(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, GraphError::InvalidJson(_)));

        let err = attrs.merge_json(b"{not json").unwrap_err();
        assert!(matches!(err, GraphError::Serialization(_)));
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_from_json_value() {
        let value: PropertyValue =
            serde_json::json!({"n": 1, "f": 1.5, "s": "x", "l": [true, null]}).into();
        let PropertyValue::Map(map) = value else {
            panic!("expected a map");
        };
        assert_eq!(map["n"], PropertyValue::Integer(1));
        assert_eq!(map["f"], PropertyValue::Float(1.5));
        assert_eq!(map["s"], PropertyValue::from("x"));
        assert_eq!(
            map["l"],
            PropertyValue::Array(vec![PropertyValue::Boolean(true), PropertyValue::Null])
        );
    }
}
