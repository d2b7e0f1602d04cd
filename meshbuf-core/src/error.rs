/// Load errors and non-fatal diagnostics
use std::fmt;

use serde::Serialize;

/// Result alias used by every fallible loader entry point.
pub type Result<T> = std::result::Result<T, LoadError>;

/// The three per-vertex attribute tables a geometry file can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeKind {
    Position,
    TextureCoord,
    Normal,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::TextureCoord => "texture coordinate",
            AttributeKind::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Fatal load failures. A load that returns one of these produced no buffers.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read geometry source: {0}")]
    Io(#[from] std::io::Error),

    #[error("{attribute} index {index} is out of range ({available} available)")]
    IndexOutOfRange {
        attribute: AttributeKind,
        index: i64,
        available: usize,
    },

    #[error(
        "line {line}: {attribute} entry has {found} components, earlier entries have {expected}"
    )]
    InconsistentWidth {
        attribute: AttributeKind,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: face has {corners} corners, only triangles are accepted")]
    FaceArity { line: usize, corners: usize },
}

/// Non-fatal findings collected while loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// A numeric token did not parse cleanly and was coerced.
    MalformedNumber { line: usize, token: String },
    /// Some records are narrower than the layout stride because a corner
    /// omitted a texture or normal index.
    MisalignedRecords { records: usize },
    /// A face with fewer than three corners was discarded while triangulating.
    DroppedFace { line: usize, corners: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedNumber { line, token } => {
                write!(f, "line {line}: malformed number {token:?}")
            }
            Diagnostic::MisalignedRecords { records } => {
                write!(f, "{records} records are narrower than the stride")
            }
            Diagnostic::DroppedFace { line, corners } => {
                write!(f, "line {line}: face with {corners} corners dropped")
            }
        }
    }
}
