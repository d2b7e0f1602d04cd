/// meshbuf Core Library - geometry text to interleaved GPU buffers
///
/// Parses the line-oriented `v`/`vt`/`vn`/`f` geometry format and expands its
/// face-corner references into one flat vertex buffer, one sequential index
/// buffer and the layout integers a renderer needs to bind them.

pub mod error;
pub mod expand;
pub mod geometry;
pub mod index;
pub mod loader;
pub mod options;
pub mod parser;

// Re-export commonly used types
pub use error::{AttributeKind, Diagnostic, LoadError, Result};
pub use expand::{VertexAttribute, VertexLayout};
pub use geometry::{Bounds, Triangle};
pub use index::{decode_corner, decode_corner_checked, FaceCorner};
pub use loader::{DirectiveCounts, GeometryLoader, LoadedGeometry};
pub use options::{AbsentAttributes, CornerDecoding, FaceArity, LoadOptions, WidthCheck};
pub use parser::parse_number_or_zero;
