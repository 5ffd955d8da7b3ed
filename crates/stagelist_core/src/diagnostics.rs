use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const ORIGINAL_ENTRY_FILE: &str = "Original.byml";
pub const SAVED_ENTRY_FILE: &str = "Broken.byml";

/// Receives the raw entry bytes seen by a load and produced by a save, for
/// byte-level comparison outside the tool.
pub trait DiagnosticSink {
    fn loaded_entry(&self, bytes: &[u8]) -> io::Result<()>;
    fn saved_entry(&self, bytes: &[u8]) -> io::Result<()>;
}

/// Writes both captures into a directory, replacing the previous ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryDiagnostics {
    dir: PathBuf,
}

impl DirectoryDiagnostics {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn working_dir() -> Self {
        Self::new(".")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn original_path(&self) -> PathBuf {
        self.dir.join(ORIGINAL_ENTRY_FILE)
    }

    pub fn saved_path(&self) -> PathBuf {
        self.dir.join(SAVED_ENTRY_FILE)
    }
}

impl DiagnosticSink for DirectoryDiagnostics {
    fn loaded_entry(&self, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.original_path(), bytes)
    }

    fn saved_entry(&self, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.saved_path(), bytes)
    }
}
