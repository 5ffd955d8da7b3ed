use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::node::{Node, NodeMap, read_int, read_string};

pub const KEY_COURSE_ID: &str = "CourseId";
pub const KEY_DOUBLE_MARIO_NUM: &str = "DoubleMarioNum";
pub const KEY_GHOST_BASE_TIME: &str = "GhostBaseTime";
pub const KEY_GHOST_ID: &str = "GhostId";
pub const KEY_GREEN_STAR_LOCK: &str = "GreenStarLock";
pub const KEY_GREEN_STAR_NUM: &str = "GreenStarNum";
pub const KEY_ILLUST_ITEM_NUM: &str = "IllustItemNum";
pub const KEY_STAGE_ID: &str = "StageId";
pub const KEY_STAGE_NAME: &str = "StageName";
pub const KEY_STAGE_TIMER: &str = "StageTimer";
pub const KEY_STAGE_TYPE: &str = "StageType";

/// Every key of a level map, in stored order.
pub const LEVEL_KEYS: [&str; 11] = [
    KEY_COURSE_ID,
    KEY_DOUBLE_MARIO_NUM,
    KEY_GHOST_BASE_TIME,
    KEY_GHOST_ID,
    KEY_GREEN_STAR_LOCK,
    KEY_GREEN_STAR_NUM,
    KEY_ILLUST_ITEM_NUM,
    KEY_STAGE_ID,
    KEY_STAGE_NAME,
    KEY_STAGE_TIMER,
    KEY_STAGE_TYPE,
];

pub const DEFAULT_TIMER: i32 = 500;
pub const NO_GHOST: i32 = -1;

/// Parameters of a single level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Game-wide course id.
    pub course_id: i32,
    /// Id of the level within its world.
    pub stage_id: i32,
    /// Internal stage name, e.g. `"1-1"`.
    pub stage_name: String,
    pub stage_type: String,
    /// Seconds on the clock. Defaults to 500.
    pub timer: i32,
    pub green_star_count: i32,
    /// Green stars needed before the level unlocks.
    pub green_star_lock_threshold: i32,
    /// Number of double cherry clones allowed at once.
    pub clone_limit: i32,
    /// `-1` when the level has no ghost.
    pub ghost_id: i32,
    pub ghost_base_time: i32,
    /// Stamp collectible flag. Stored files only use 0 and 1, but other
    /// values are kept as-is.
    pub stamp_flag: i32,
}

impl Default for LevelRecord {
    fn default() -> Self {
        Self {
            course_id: 0,
            stage_id: 0,
            stage_name: String::new(),
            stage_type: String::new(),
            timer: DEFAULT_TIMER,
            green_star_count: 0,
            green_star_lock_threshold: 0,
            clone_limit: 0,
            ghost_id: NO_GHOST,
            ghost_base_time: 0,
            stamp_flag: 0,
        }
    }
}

impl LevelRecord {
    pub fn from_node(node: &Node) -> Result<Self, SchemaError> {
        let map = node.as_map()?;
        Ok(Self {
            course_id: read_int(map, KEY_COURSE_ID)?,
            stage_id: read_int(map, KEY_STAGE_ID)?,
            stage_name: read_string(map, KEY_STAGE_NAME)?,
            stage_type: read_string(map, KEY_STAGE_TYPE)?,
            timer: read_int(map, KEY_STAGE_TIMER)?,
            green_star_count: read_int(map, KEY_GREEN_STAR_NUM)?,
            green_star_lock_threshold: read_int(map, KEY_GREEN_STAR_LOCK)?,
            clone_limit: read_int(map, KEY_DOUBLE_MARIO_NUM)?,
            ghost_id: read_int(map, KEY_GHOST_ID)?,
            ghost_base_time: read_int(map, KEY_GHOST_BASE_TIME)?,
            stamp_flag: read_int(map, KEY_ILLUST_ITEM_NUM)?,
        })
    }

    pub fn to_node(&self) -> Node {
        let mut map = NodeMap::new();
        map.insert(KEY_COURSE_ID.to_string(), Node::Int(self.course_id));
        map.insert(KEY_DOUBLE_MARIO_NUM.to_string(), Node::Int(self.clone_limit));
        map.insert(
            KEY_GHOST_BASE_TIME.to_string(),
            Node::Int(self.ghost_base_time),
        );
        map.insert(KEY_GHOST_ID.to_string(), Node::Int(self.ghost_id));
        map.insert(
            KEY_GREEN_STAR_LOCK.to_string(),
            Node::Int(self.green_star_lock_threshold),
        );
        map.insert(
            KEY_GREEN_STAR_NUM.to_string(),
            Node::Int(self.green_star_count),
        );
        map.insert(KEY_ILLUST_ITEM_NUM.to_string(), Node::Int(self.stamp_flag));
        map.insert(KEY_STAGE_ID.to_string(), Node::Int(self.stage_id));
        map.insert(
            KEY_STAGE_NAME.to_string(),
            Node::Str(self.stage_name.clone()),
        );
        map.insert(KEY_STAGE_TIMER.to_string(), Node::Int(self.timer));
        map.insert(
            KEY_STAGE_TYPE.to_string(),
            Node::Str(self.stage_type.clone()),
        );
        Node::Map(map)
    }

    pub fn has_stamp(&self) -> bool {
        self.stamp_flag > 0
    }

    pub fn has_ghost(&self) -> bool {
        self.ghost_id != NO_GHOST
    }
}

impl fmt::Display for LevelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {} - {} ", self.stage_id, self.stage_name, self.timer)?;
        if self.green_star_count > 0 {
            let plural = if self.green_star_count > 1 { "s" } else { "" };
            write!(f, "[{} Green Star{}] ", self.green_star_count, plural)?;
        }
        if self.has_stamp() {
            f.write_str("[Stamp] ")?;
        }
        if self.green_star_lock_threshold > 0 {
            write!(f, "[Green Star Gate ({})] ", self.green_star_lock_threshold)?;
        }
        Ok(())
    }
}
