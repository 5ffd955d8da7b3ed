use std::error::Error;
use std::fmt;
use std::io;

use crate::node::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    InvalidOptions,
    Compression,
    Archive,
    Encoding,
    MissingEntry,
    MissingKey,
    TypeMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Wraps a collaborator failure without rewording it.
    pub fn from_io(code: CoreErrorCode, err: &io::Error) -> Self {
        Self::new(code, err.to_string())
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    MissingKey,
    TypeMismatch { expected: NodeKind, found: NodeKind },
}

/// A node tree that does not match the stage list schema.
///
/// `path` runs from the outermost node to the offending key, so an error
/// raised while reading a level reads like `WorldList[0].StageList[3].StageTimer`
/// once every enclosing mapping has annotated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub path: Vec<PathSegment>,
}

impl SchemaError {
    pub fn missing_key(key: &str) -> Self {
        Self {
            kind: SchemaErrorKind::MissingKey,
            path: vec![PathSegment::Key(key.to_string())],
        }
    }

    pub fn type_mismatch(expected: NodeKind, found: NodeKind) -> Self {
        Self {
            kind: SchemaErrorKind::TypeMismatch { expected, found },
            path: Vec::new(),
        }
    }

    pub fn in_key(mut self, key: &str) -> Self {
        self.path.insert(0, PathSegment::Key(key.to_string()));
        self
    }

    pub fn at_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    /// The innermost key named by the path, if any.
    pub fn key(&self) -> Option<&str> {
        self.path.iter().rev().find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(index) => {
                    out.push_str(&format!("[{index}]"));
                }
            }
        }
        if out.is_empty() {
            out.push_str("<root>");
        }
        out
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SchemaErrorKind::MissingKey => {
                write!(f, "missing key {}", self.path_string())
            }
            SchemaErrorKind::TypeMismatch { expected, found } => write!(
                f,
                "type mismatch at {}: expected {}, found {}",
                self.path_string(),
                expected,
                found
            ),
        }
    }
}

impl Error for SchemaError {}

impl From<SchemaError> for CoreError {
    fn from(err: SchemaError) -> Self {
        let code = match err.kind {
            SchemaErrorKind::MissingKey => CoreErrorCode::MissingKey,
            SchemaErrorKind::TypeMismatch { .. } => CoreErrorCode::TypeMismatch,
        };
        CoreError::new(code, err.to_string())
    }
}
