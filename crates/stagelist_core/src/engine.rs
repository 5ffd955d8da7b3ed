use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::codec::{ArchiveCodec, ArchiveEntries, Compressor, NodeCodec};
use crate::diagnostics::DiagnosticSink;
use crate::error::{CoreError, CoreErrorCode};
use crate::node::Node;
use crate::options::StageListOptions;
use crate::stage_list::StageList;

/// Runs stage lists through the compression, archive and structured-encoding
/// layers supplied by the host tool.
pub struct Engine {
    compressor: Box<dyn Compressor>,
    archive: Box<dyn ArchiveCodec>,
    codec: Box<dyn NodeCodec>,
    options: StageListOptions,
    diagnostics: Option<Box<dyn DiagnosticSink>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(
        compressor: impl Compressor + 'static,
        archive: impl ArchiveCodec + 'static,
        codec: impl NodeCodec + 'static,
    ) -> Self {
        Self {
            compressor: Box::new(compressor),
            archive: Box::new(archive),
            codec: Box::new(codec),
            options: StageListOptions::default(),
            diagnostics: None,
        }
    }

    pub fn with_options(mut self, options: StageListOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Some(Box::new(sink));
        self
    }

    pub fn options(&self) -> &StageListOptions {
        &self.options
    }

    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        self.options.output_path_for(source)
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<StageList, CoreError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;
        self.load_bytes(path, bytes)
    }

    /// Same as [`Engine::load`] but starts from archive bytes already in
    /// memory. `source_path` only decides where a later save goes.
    pub fn load_bytes<B: AsRef<[u8]>>(
        &self,
        source_path: impl Into<PathBuf>,
        bytes: B,
    ) -> Result<StageList, CoreError> {
        let source_path = source_path.into();
        let entry = self.extract_entry(bytes.as_ref())?;
        if let Some(sink) = &self.diagnostics
            && let Err(e) = sink.loaded_entry(&entry)
        {
            warn!("failed to capture loaded entry: {e}");
        }

        let root = self.decode_entry(&entry)?;
        let stage_list = StageList::from_node(source_path, &root)?;
        info!(
            "loaded {} from {}",
            stage_list,
            stage_list.source_path().display()
        );
        Ok(stage_list)
    }

    /// Decodes the root node of an archive without mapping it to the typed
    /// model. Skips diagnostics.
    pub fn read_root_node<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Node, CoreError> {
        let entry = self.extract_entry(bytes.as_ref())?;
        self.decode_entry(&entry)
    }

    /// Builds the complete archive for `stage_list` in memory.
    pub fn to_bytes(&self, stage_list: &StageList) -> Result<Vec<u8>, CoreError> {
        let (entry, archive) = self.build_archive(stage_list)?;
        self.capture_saved_entry(&entry);
        Ok(archive)
    }

    /// Saves to the derived output path and returns it. The source file is
    /// never overwritten, and nothing is written unless encoding succeeded.
    pub fn save(&self, stage_list: &StageList) -> Result<PathBuf, CoreError> {
        let source = stage_list.source_path();
        let output = self.output_path_for(source);
        if self.options.output_marker.is_empty() || output.as_path() == source {
            return Err(CoreError::new(
                CoreErrorCode::InvalidOptions,
                format!(
                    "output path {} would overwrite the source; set a non-empty output marker",
                    output.display()
                ),
            ));
        }

        let (entry, archive) = self.build_archive(stage_list)?;
        write_output(&output, &archive)?;
        self.capture_saved_entry(&entry);
        info!("saved {} to {}", stage_list, output.display());
        Ok(output)
    }

    fn build_archive(&self, stage_list: &StageList) -> Result<(Vec<u8>, Vec<u8>), CoreError> {
        let root = stage_list.to_node();
        let entry = self
            .codec
            .encode(&root, self.options.byte_order, self.options.format_version)
            .map_err(|e| CoreError::from_io(CoreErrorCode::Encoding, &e))?;
        debug!(
            "encoded {} as {} bytes (version {})",
            self.options.entry_name,
            entry.len(),
            self.options.format_version
        );

        let mut entries = ArchiveEntries::new();
        entries.insert(self.options.entry_name.clone(), entry);
        let packed = self
            .archive
            .pack(&entries)
            .map_err(|e| CoreError::from_io(CoreErrorCode::Archive, &e))?;
        debug!("packed archive: {} bytes", packed.len());

        let compressed = self
            .compressor
            .compress(&packed)
            .map_err(|e| CoreError::from_io(CoreErrorCode::Compression, &e))?;
        debug!("compressed archive: {} bytes", compressed.len());

        let entry = entries
            .remove(&self.options.entry_name)
            .unwrap_or_default();
        Ok((entry, compressed))
    }

    fn capture_saved_entry(&self, entry: &[u8]) {
        if let Some(sink) = &self.diagnostics
            && let Err(e) = sink.saved_entry(entry)
        {
            warn!("failed to capture saved entry: {e}");
        }
    }

    fn extract_entry(&self, bytes: &[u8]) -> Result<Vec<u8>, CoreError> {
        let unpacked = self
            .compressor
            .decompress(bytes)
            .map_err(|e| CoreError::from_io(CoreErrorCode::Compression, &e))?;
        debug!(
            "decompressed {} bytes into {} bytes",
            bytes.len(),
            unpacked.len()
        );

        let mut entries = self
            .archive
            .unpack(&unpacked)
            .map_err(|e| CoreError::from_io(CoreErrorCode::Archive, &e))?;
        debug!("archive holds {} entries", entries.len());

        entries.remove(&self.options.entry_name).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::MissingEntry,
                format!("archive has no {} entry", self.options.entry_name),
            )
        })
    }

    fn decode_entry(&self, entry: &[u8]) -> Result<Node, CoreError> {
        let root = self
            .codec
            .decode(entry, self.options.byte_order)
            .map_err(|e| CoreError::from_io(CoreErrorCode::Encoding, &e))?;
        debug!(
            "decoded {} ({} bytes)",
            self.options.entry_name,
            entry.len()
        );
        Ok(root)
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CoreError> {
    let mut staging_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    staging_name.push(".tmp");
    let staging = path.with_file_name(staging_name);

    if let Err(e) = fs::write(&staging, bytes) {
        let _ = fs::remove_file(&staging);
        return Err(CoreError::new(
            CoreErrorCode::Io,
            format!("failed to write {}: {e}", staging.display()),
        ));
    }
    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        CoreError::new(
            CoreErrorCode::Io,
            format!(
                "failed to move {} to {}: {e}",
                staging.display(),
                path.display()
            ),
        )
    })
}
