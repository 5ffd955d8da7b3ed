use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::engine::Engine;
use crate::error::{CoreError, SchemaError};
use crate::node::{Node, NodeMap, read_list};
use crate::world::WorldGroup;

pub const KEY_WORLD_LIST: &str = "WorldList";

/// Loaded stage list. Edit `worlds` in place, then hand the document back to
/// the engine that loaded it to save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageList {
    source_path: PathBuf,
    pub worlds: Vec<WorldGroup>,
}

impl StageList {
    pub fn new(source_path: impl Into<PathBuf>, worlds: Vec<WorldGroup>) -> Self {
        Self {
            source_path: source_path.into(),
            worlds,
        }
    }

    pub fn from_node(source_path: impl Into<PathBuf>, root: &Node) -> Result<Self, SchemaError> {
        let map = root.as_map()?;
        let worlds = read_list(map, KEY_WORLD_LIST)?
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                WorldGroup::from_node(entry).map_err(|e| e.at_index(index).in_key(KEY_WORLD_LIST))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(source_path, worlds))
    }

    pub fn to_node(&self) -> Node {
        let mut root = NodeMap::new();
        root.insert(
            KEY_WORLD_LIST.to_string(),
            Node::List(self.worlds.iter().map(WorldGroup::to_node).collect()),
        );
        Node::Map(root)
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn level_count(&self) -> usize {
        self.worlds.iter().map(|world| world.levels.len()).sum()
    }

    /// Writes the edited stage list next to the file it came from. Returns
    /// the path written.
    pub fn save(&self, engine: &Engine) -> Result<PathBuf, CoreError> {
        engine.save(self)
    }
}

impl fmt::Display for StageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Worlds, {} Levels", self.worlds.len(), self.level_count())
    }
}
