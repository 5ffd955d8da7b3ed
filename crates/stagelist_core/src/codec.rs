//! Seams for the three container layers wrapped around a stage list.
//!
//! The engine only orchestrates these layers. Concrete codecs live with the
//! host tool and are handed to [`crate::Engine::new`].

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// Named blobs held by an archive.
pub type ArchiveEntries = BTreeMap<String, Vec<u8>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

/// Outermost layer wrapping the whole file.
pub trait Compressor {
    fn decompress(&self, bytes: &[u8]) -> io::Result<Vec<u8>>;
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>>;
}

/// Packs named blobs into a single buffer and back.
pub trait ArchiveCodec {
    fn unpack(&self, bytes: &[u8]) -> io::Result<ArchiveEntries>;
    fn pack(&self, entries: &ArchiveEntries) -> io::Result<Vec<u8>>;
}

/// Structured binary encoding of a generic node tree.
pub trait NodeCodec {
    fn decode(&self, bytes: &[u8], order: ByteOrder) -> io::Result<Node>;
    fn encode(&self, node: &Node, order: ByteOrder, version: u16) -> io::Result<Vec<u8>>;
}
