pub mod codec;
pub mod diagnostics;
mod engine;
pub mod error;
pub mod level;
pub mod node;
pub mod options;
mod stage_list;
pub mod world;

pub use codec::{ArchiveCodec, ArchiveEntries, ByteOrder, Compressor, NodeCodec};
pub use diagnostics::{DiagnosticSink, DirectoryDiagnostics};
pub use engine::Engine;
pub use error::{CoreError, CoreErrorCode, PathSegment, SchemaError, SchemaErrorKind};
pub use level::LevelRecord;
pub use node::{Node, NodeKind, NodeMap};
pub use options::StageListOptions;
pub use stage_list::{KEY_WORLD_LIST, StageList};
pub use world::WorldGroup;
