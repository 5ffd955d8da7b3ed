use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::ByteOrder;

pub const DEFAULT_ENTRY_NAME: &str = "StageList.byml";
pub const DEFAULT_FORMAT_VERSION: u16 = 1;
pub const DEFAULT_OUTPUT_MARKER: &str = "2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageListOptions {
    /// Archive entry holding the encoded stage list.
    pub entry_name: String,
    pub byte_order: ByteOrder,
    /// Format version passed to the encoder on save.
    pub format_version: u16,
    /// Inserted before the extension of the input path to name the saved file.
    pub output_marker: String,
}

impl Default for StageListOptions {
    fn default() -> Self {
        Self {
            entry_name: DEFAULT_ENTRY_NAME.to_string(),
            byte_order: ByteOrder::Big,
            format_version: DEFAULT_FORMAT_VERSION,
            output_marker: DEFAULT_OUTPUT_MARKER.to_string(),
        }
    }
}

impl StageListOptions {
    /// `World/StageList.szs` becomes `World/StageList2.szs`. Paths without an
    /// extension get the marker appended.
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        let mut file_name = source.file_stem().map(OsStr::to_os_string).unwrap_or_default();
        file_name.push(&self.output_marker);
        if let Some(ext) = source.extension() {
            file_name.push(".");
            file_name.push(ext);
        }
        source.with_file_name(file_name)
    }
}
