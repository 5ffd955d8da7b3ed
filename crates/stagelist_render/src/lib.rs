use std::fmt::Write as _;

use serde_json::{Map as JsonMap, Value as JsonValue};
use stagelist_core::{LevelRecord, Node, StageList, WorldGroup};

const LEVEL_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// Also print course id, type, ghost and clone settings per level.
    pub verbose: bool,
}

pub fn render_json(stage_list: &StageList, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(canonical_json(stage_list)),
    }
}

/// Dumps a raw node tree with the stored key names, for comparing decoded
/// entries outside the tool.
pub fn render_node_json(node: &Node) -> JsonValue {
    match node {
        Node::Int(value) => JsonValue::from(*value),
        Node::Str(value) => JsonValue::from(value.as_str()),
        Node::List(items) => JsonValue::Array(items.iter().map(render_node_json).collect()),
        Node::Map(map) => {
            let mut out = JsonMap::new();
            for (key, value) in map {
                out.insert(key.clone(), render_node_json(value));
            }
            JsonValue::Object(out)
        }
    }
}

pub fn render_text(stage_list: &StageList, options: TextRenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{stage_list}");
    for world in &stage_list.worlds {
        let _ = writeln!(out, "{world}");
        for level in &world.levels {
            let line = level.to_string();
            let _ = writeln!(out, "{LEVEL_INDENT}{}", line.trim_end());
            if options.verbose {
                let _ = writeln!(
                    out,
                    "{LEVEL_INDENT}{LEVEL_INDENT}course {} | type {} | clones {} | ghost {}",
                    level.course_id,
                    display_or_dash(&level.stage_type),
                    level.clone_limit,
                    ghost_label(level)
                );
            }
        }
    }
    out
}

fn canonical_json(stage_list: &StageList) -> JsonMap<String, JsonValue> {
    let mut root = JsonMap::new();
    root.insert(
        "source".to_string(),
        JsonValue::from(stage_list.source_path().to_string_lossy().to_string()),
    );
    root.insert(
        "world_count".to_string(),
        JsonValue::from(stage_list.worlds.len()),
    );
    root.insert(
        "level_count".to_string(),
        JsonValue::from(stage_list.level_count()),
    );
    root.insert(
        "worlds".to_string(),
        JsonValue::Array(stage_list.worlds.iter().map(world_json).collect()),
    );
    root
}

fn world_json(world: &WorldGroup) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("world_id".to_string(), JsonValue::from(world.world_id));
    out.insert(
        "levels".to_string(),
        JsonValue::Array(world.levels.iter().map(level_json).collect()),
    );
    JsonValue::Object(out)
}

fn level_json(level: &LevelRecord) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("stage_id".to_string(), JsonValue::from(level.stage_id));
    out.insert(
        "stage_name".to_string(),
        JsonValue::from(level.stage_name.as_str()),
    );
    out.insert(
        "stage_type".to_string(),
        JsonValue::from(level.stage_type.as_str()),
    );
    out.insert("course_id".to_string(), JsonValue::from(level.course_id));
    out.insert("timer".to_string(), JsonValue::from(level.timer));
    out.insert(
        "green_stars".to_string(),
        JsonValue::from(level.green_star_count),
    );
    out.insert(
        "green_star_lock".to_string(),
        JsonValue::from(level.green_star_lock_threshold),
    );
    out.insert("clone_limit".to_string(), JsonValue::from(level.clone_limit));
    out.insert("ghost_id".to_string(), JsonValue::from(level.ghost_id));
    out.insert(
        "ghost_base_time".to_string(),
        JsonValue::from(level.ghost_base_time),
    );
    out.insert("stamp".to_string(), JsonValue::from(level.stamp_flag));
    JsonValue::Object(out)
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn ghost_label(level: &LevelRecord) -> String {
    if level.has_ghost() {
        format!("{} @ {}", level.ghost_id, level.ghost_base_time)
    } else {
        "none".to_string()
    }
}
