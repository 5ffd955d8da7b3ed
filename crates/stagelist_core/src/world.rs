use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::level::LevelRecord;
use crate::node::{Node, NodeMap, read_int, read_list};

pub const KEY_WORLD_ID: &str = "WorldId";
pub const KEY_STAGE_LIST: &str = "StageList";

/// A world and its levels, in in-game order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldGroup {
    pub world_id: i32,
    pub levels: Vec<LevelRecord>,
}

impl WorldGroup {
    pub fn from_node(node: &Node) -> Result<Self, SchemaError> {
        let map = node.as_map()?;
        let world_id = read_int(map, KEY_WORLD_ID)?;
        let levels = read_list(map, KEY_STAGE_LIST)?
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                LevelRecord::from_node(entry).map_err(|e| e.at_index(index).in_key(KEY_STAGE_LIST))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { world_id, levels })
    }

    pub fn to_node(&self) -> Node {
        let mut map = NodeMap::new();
        map.insert(
            KEY_STAGE_LIST.to_string(),
            Node::List(self.levels.iter().map(LevelRecord::to_node).collect()),
        );
        map.insert(KEY_WORLD_ID.to_string(), Node::Int(self.world_id));
        Node::Map(map)
    }
}

impl fmt::Display for WorldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "World {}", self.world_id)
    }
}
