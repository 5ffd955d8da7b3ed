#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Read as _, Write as _};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use stagelist_core::{
    ArchiveCodec, ArchiveEntries, ByteOrder, Compressor, DiagnosticSink, Engine, LevelRecord,
    Node, NodeCodec, StageList, WorldGroup,
};

pub struct ZlibCompressor;

impl Compressor for ZlibCompressor {
    fn decompress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        ZlibDecoder::new(bytes).read_to_end(&mut out)?;
        Ok(out)
    }

    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes)?;
        encoder.finish()
    }
}

pub struct FailingCompressor(pub &'static str);

impl Compressor for FailingCompressor {
    fn decompress(&self, _bytes: &[u8]) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::InvalidData, self.0))
    }

    fn compress(&self, _bytes: &[u8]) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::InvalidData, self.0))
    }
}

pub struct JsonArchive;

impl ArchiveCodec for JsonArchive {
    fn unpack(&self, bytes: &[u8]) -> io::Result<ArchiveEntries> {
        serde_json::from_slice(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn pack(&self, entries: &ArchiveEntries) -> io::Result<Vec<u8>> {
        serde_json::to_vec(entries).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Encodes nodes as JSON and remembers the byte order and version it was
/// asked for.
#[derive(Clone, Default)]
pub struct JsonNodeCodec {
    pub calls: Rc<RefCell<Vec<(ByteOrder, Option<u16>)>>>,
    pub fail_encode: bool,
}

impl NodeCodec for JsonNodeCodec {
    fn decode(&self, bytes: &[u8], order: ByteOrder) -> io::Result<Node> {
        self.calls.borrow_mut().push((order, None));
        serde_json::from_slice(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn encode(&self, node: &Node, order: ByteOrder, version: u16) -> io::Result<Vec<u8>> {
        self.calls.borrow_mut().push((order, Some(version)));
        if self.fail_encode {
            return Err(io::Error::other("encoder refused node"));
        }
        serde_json::to_vec(node).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    pub loaded: Rc<RefCell<Vec<Vec<u8>>>>,
    pub saved: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl DiagnosticSink for RecordingDiagnostics {
    fn loaded_entry(&self, bytes: &[u8]) -> io::Result<()> {
        self.loaded.borrow_mut().push(bytes.to_vec());
        Ok(())
    }

    fn saved_entry(&self, bytes: &[u8]) -> io::Result<()> {
        self.saved.borrow_mut().push(bytes.to_vec());
        Ok(())
    }
}

pub fn engine() -> Engine {
    Engine::new(ZlibCompressor, JsonArchive, JsonNodeCodec::default())
}

pub fn encode_entry(root: &Node) -> Vec<u8> {
    serde_json::to_vec(root).expect("node should encode")
}

/// Wraps `root` the way a shipped stage list archive is wrapped.
pub fn build_archive(entries: Vec<(&str, Vec<u8>)>) -> Vec<u8> {
    let mut map = ArchiveEntries::new();
    for (name, bytes) in entries {
        map.insert(name.to_string(), bytes);
    }
    let packed = JsonArchive.pack(&map).expect("archive should pack");
    ZlibCompressor.compress(&packed).expect("archive should compress")
}

pub fn stage_list_archive(root: &Node) -> Vec<u8> {
    build_archive(vec![("StageList.byml", encode_entry(root))])
}

pub fn first_level() -> LevelRecord {
    LevelRecord {
        course_id: 0,
        stage_id: 101,
        stage_name: "1-1".to_string(),
        stage_type: String::new(),
        timer: 500,
        green_star_count: 0,
        green_star_lock_threshold: 0,
        clone_limit: 0,
        ghost_id: -1,
        ghost_base_time: 0,
        stamp_flag: 0,
    }
}

pub fn single_world_root() -> Node {
    StageList::new(
        "unused.szs",
        vec![WorldGroup {
            world_id: 1,
            levels: vec![first_level()],
        }],
    )
    .to_node()
}

pub fn sample_root() -> Node {
    let worlds = vec![
        WorldGroup {
            world_id: 1,
            levels: vec![
                first_level(),
                LevelRecord {
                    course_id: 2,
                    stage_id: 2,
                    stage_name: "SideWaveDesertStage".to_string(),
                    stage_type: "Normal".to_string(),
                    timer: 400,
                    green_star_count: 3,
                    clone_limit: 2,
                    ghost_id: 5,
                    ghost_base_time: 6100,
                    stamp_flag: 1,
                    ..LevelRecord::default()
                },
            ],
        },
        WorldGroup {
            world_id: 2,
            levels: vec![LevelRecord {
                course_id: 10,
                stage_id: 1,
                stage_name: "KinopioHouseStage".to_string(),
                stage_type: "KinopioHouse".to_string(),
                green_star_lock_threshold: 5,
                ..LevelRecord::default()
            }],
        },
        WorldGroup {
            world_id: 3,
            levels: Vec::new(),
        },
    ];
    StageList::new("unused.szs", worlds).to_node()
}

pub fn temp_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "stagelist_se_{}_{}_{}",
        prefix,
        std::process::id(),
        nanos
    ));
    std::fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}
