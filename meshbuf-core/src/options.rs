/// Loader configuration
use serde::{Deserialize, Serialize};

/// How `p/t/n` corner tokens are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerDecoding {
    /// `p/t/n` yields all three indices.
    #[default]
    Standard,
    /// `p/t/n` drops the texture index and yields `(p, 0, n)`, matching the
    /// output of the original tool byte for byte.
    Reference,
}

/// What to do with a face directive that does not have exactly three corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaceArity {
    /// Fail the load with `LoadError::FaceArity`.
    #[default]
    Reject,
    /// Append the corners unchanged. Expansion still groups them in threes.
    Flatten,
    /// Fan-split polygons into `(0, i, i + 1)` triangles. Faces with fewer
    /// than three corners are dropped.
    Triangulate,
}

/// How a corner that omits its texture or normal index is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbsentAttributes {
    /// Skip the slot entirely. The record becomes narrower than the stride
    /// and every following record is shifted; the loader reports this as
    /// `Diagnostic::MisalignedRecords`.
    #[default]
    Omit,
    /// Write zeros into the slot so every record is exactly one stride wide.
    ZeroFill,
}

/// Whether entries of one attribute kind must share a component count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidthCheck {
    #[default]
    Enforce,
    Ignore,
}

/// Options for a `GeometryLoader`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoadOptions {
    pub corner_decoding: CornerDecoding,
    pub face_arity: FaceArity,
    pub absent_attributes: AbsentAttributes,
    pub widths: WidthCheck,
    /// Clear the active accumulator on tokens that are not a known directive,
    /// so `s 1` or `o 2` cannot feed numbers into the previous table.
    pub isolate_unknown_directives: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            corner_decoding: CornerDecoding::default(),
            face_arity: FaceArity::default(),
            absent_attributes: AbsentAttributes::default(),
            widths: WidthCheck::default(),
            isolate_unknown_directives: true,
        }
    }
}

impl LoadOptions {
    /// Every behaviour of the original tool, including its known defects.
    pub fn reference() -> Self {
        Self {
            corner_decoding: CornerDecoding::Reference,
            face_arity: FaceArity::Flatten,
            absent_attributes: AbsentAttributes::Omit,
            widths: WidthCheck::Ignore,
            isolate_unknown_directives: false,
        }
    }
}
