//! Identity types shared by nodes and edges

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Attribute key that always mirrors an entity's type
pub const TYPE_KEY: &str = "_type";

/// Attribute key that always mirrors an entity's id
pub const ID_KEY: &str = "_id";

/// Identity of a node or edge: a `(type, id)` pair
///
/// Two entities with equal type and id are the same entity. For edges the
/// type is the relationship name (e.g. "friend", "follows").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct TypedId {
    #[serde(rename = "_type")]
    type_name: String,
    #[serde(rename = "_id")]
    id: String,
}

impl TypedId {
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        TypedId {
            type_name: type_name.into(),
            id: id.into(),
        }
    }

    /// Create an identity with a freshly generated (UUID v4) id
    pub fn generate(type_name: impl Into<String>) -> Self {
        TypedId::new(type_name, Uuid::new_v4().to_string())
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for TypedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.id)
    }
}

impl<T: Into<String>, I: Into<String>> From<(T, I)> for TypedId {
    fn from((type_name, id): (T, I)) -> Self {
        TypedId::new(type_name, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_typed_id() {
        let id = TypedId::new("user", "1");
        assert_eq!(id.type_name(), "user");
        assert_eq!(id.id(), "1");
        assert_eq!(format!("{}", id), "user:1");

        let id2: TypedId = ("user", "1").into();
        assert_eq!(id, id2);
    }

    #[test]
    fn test_equality_uses_both_fields() {
        let user = TypedId::new("user", "1");
        let group = TypedId::new("group", "1");
        let other_user = TypedId::new("user", "2");
        assert_ne!(user, group);
        assert_ne!(user, other_user);

        let mut set = HashSet::new();
        set.insert(user.clone());
        set.insert(group);
        set.insert(TypedId::new("user", "1"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = TypedId::generate("friend");
        let b = TypedId::generate("friend");
        assert_eq!(a.type_name(), "friend");
        assert!(!a.id().is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_uses_reserved_keys() {
        let id = TypedId::new("user", "7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"_type":"user","_id":"7"}"#);
    }
}
