use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Map nodes keep their keys sorted, which is also the order the shipped
/// stage list files store them in.
pub type NodeMap = BTreeMap<String, Node>;

/// Generic tree produced by the structured-encoding layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Int(i32),
    Str(String),
    List(Vec<Node>),
    Map(NodeMap),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Int,
    Str,
    List,
    Map,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Int => "int",
            Self::Str => "string",
            Self::List => "list",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Int(_) => NodeKind::Int,
            Self::Str(_) => NodeKind::Str,
            Self::List(_) => NodeKind::List,
            Self::Map(_) => NodeKind::Map,
        }
    }

    pub fn as_int(&self) -> Result<i32, SchemaError> {
        match self {
            Self::Int(value) => Ok(*value),
            other => Err(SchemaError::type_mismatch(NodeKind::Int, other.kind())),
        }
    }

    pub fn as_str(&self) -> Result<&str, SchemaError> {
        match self {
            Self::Str(value) => Ok(value),
            other => Err(SchemaError::type_mismatch(NodeKind::Str, other.kind())),
        }
    }

    pub fn as_list(&self) -> Result<&[Node], SchemaError> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(SchemaError::type_mismatch(NodeKind::List, other.kind())),
        }
    }

    pub fn as_map(&self) -> Result<&NodeMap, SchemaError> {
        match self {
            Self::Map(map) => Ok(map),
            other => Err(SchemaError::type_mismatch(NodeKind::Map, other.kind())),
        }
    }

    /// Looks up `key` when this node is a map. Returns `None` for every
    /// other variant.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn at(&self, index: usize) -> Option<&Node> {
        match self {
            Self::List(items) => items.get(index),
            _ => None,
        }
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::List(items)
    }
}

impl From<NodeMap> for Node {
    fn from(map: NodeMap) -> Self {
        Self::Map(map)
    }
}

pub(crate) fn required<'a>(map: &'a NodeMap, key: &str) -> Result<&'a Node, SchemaError> {
    map.get(key).ok_or_else(|| SchemaError::missing_key(key))
}

pub(crate) fn read_int(map: &NodeMap, key: &str) -> Result<i32, SchemaError> {
    required(map, key)?.as_int().map_err(|e| e.in_key(key))
}

pub(crate) fn read_string(map: &NodeMap, key: &str) -> Result<String, SchemaError> {
    required(map, key)?
        .as_str()
        .map(ToOwned::to_owned)
        .map_err(|e| e.in_key(key))
}

pub(crate) fn read_list<'a>(map: &'a NodeMap, key: &str) -> Result<&'a [Node], SchemaError> {
    required(map, key)?.as_list().map_err(|e| e.in_key(key))
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeKind, NodeMap, read_int, read_list, read_string};
    use crate::error::SchemaErrorKind;

    #[test]
    fn conversions_do_not_coerce() {
        let text = Node::from("500");
        let err = text.as_int().expect_err("string must not read as int");
        assert_eq!(
            err.kind,
            SchemaErrorKind::TypeMismatch {
                expected: NodeKind::Int,
                found: NodeKind::Str,
            }
        );

        let number = Node::from(7);
        assert!(number.as_str().is_err());
        assert!(number.as_list().is_err());
        assert!(number.as_map().is_err());
        assert_eq!(number.as_int(), Ok(7));
    }

    #[test]
    fn readers_name_the_key() {
        let mut map = NodeMap::new();
        map.insert("StageName".to_string(), Node::from(3));
        map.insert("StageId".to_string(), Node::from(101));

        let err = read_string(&map, "StageName").expect_err("int is not a string");
        assert_eq!(err.key(), Some("StageName"));

        let err = read_list(&map, "StageList").expect_err("key is absent");
        assert_eq!(err.kind, SchemaErrorKind::MissingKey);
        assert_eq!(err.key(), Some("StageList"));

        assert_eq!(read_int(&map, "StageId"), Ok(101));
    }

    #[test]
    fn get_and_at_only_follow_matching_variants() {
        let mut map = NodeMap::new();
        map.insert("WorldList".to_string(), Node::List(vec![Node::from(1)]));
        let root = Node::Map(map);

        assert_eq!(root.get("WorldList").and_then(|n| n.at(0)), Some(&Node::Int(1)));
        assert!(root.at(0).is_none());
        assert!(Node::from(1).get("WorldList").is_none());
    }

    #[test]
    fn map_keys_iterate_in_sorted_order() {
        let mut map = NodeMap::new();
        map.insert("StageType".to_string(), Node::from(""));
        map.insert("CourseId".to_string(), Node::from(0));
        map.insert("GhostId".to_string(), Node::from(-1));
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["CourseId", "GhostId", "StageType"]);
    }
}
