/// Face-corner expansion into an interleaved vertex stream
use serde::Serialize;

use crate::error::{AttributeKind, LoadError, Result};
use crate::options::AbsentAttributes;
use crate::parser::{AttributeTable, RawGeometry};

/// Memory layout of one vertex record, in elements unless converted with
/// `in_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VertexLayout {
    pub stride: usize,
    pub color_offset: usize,
    pub texture_offset: usize,
    pub normal_offset: usize,
    pub position_width: usize,
    pub texture_width: usize,
    pub normal_width: usize,
}

impl VertexLayout {
    /// Layout for records that carry every attribute kind.
    ///
    /// Position components past the fourth are treated as packed color, so
    /// `color_offset` is `position_width - 3` for widths above 4 and `0`
    /// otherwise.
    pub fn from_widths(position_width: usize, texture_width: usize, normal_width: usize) -> Self {
        Self {
            stride: position_width + texture_width + normal_width,
            color_offset: if position_width > 4 {
                position_width - 3
            } else {
                0
            },
            texture_offset: position_width,
            normal_offset: position_width + texture_width,
            position_width,
            texture_width,
            normal_width,
        }
    }

    /// Same layout with stride and offsets scaled by `scalar_size` bytes.
    /// Widths stay in components.
    pub fn in_bytes(&self, scalar_size: usize) -> Self {
        Self {
            stride: self.stride * scalar_size,
            color_offset: self.color_offset * scalar_size,
            texture_offset: self.texture_offset * scalar_size,
            normal_offset: self.normal_offset * scalar_size,
            ..*self
        }
    }

    /// Attribute slots with a nonzero width, in record order.
    pub fn attributes(&self) -> Vec<VertexAttribute> {
        [
            (AttributeKind::Position, self.position_width, 0),
            (AttributeKind::TextureCoord, self.texture_width, self.texture_offset),
            (AttributeKind::Normal, self.normal_width, self.normal_offset),
        ]
        .into_iter()
        .filter(|&(_, components, _)| components > 0)
        .map(|(kind, components, offset)| VertexAttribute {
            kind,
            components,
            offset,
        })
        .collect()
    }
}

/// One attribute slot within a vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VertexAttribute {
    pub kind: AttributeKind,
    pub components: usize,
    pub offset: usize,
}

/// Buffers produced by `expand`.
#[derive(Debug, Clone, Default)]
pub struct Expanded {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub layout: VertexLayout,
    /// Records written narrower than `layout.stride`.
    pub narrow_records: usize,
}

/// Expand every face corner into its own vertex record.
///
/// No vertex sharing is attempted: record `i` is corner `i` and the index
/// buffer is simply `0..corners`.
pub fn expand(raw: &RawGeometry, absent: AbsentAttributes) -> Result<Expanded> {
    let layout = VertexLayout::from_widths(
        raw.positions.width(),
        raw.texture_coords.width(),
        raw.normals.width(),
    );

    let mut vertices = Vec::with_capacity(raw.corners.len() * layout.stride);
    let mut narrow_records = 0;

    for corner in &raw.corners {
        vertices.extend_from_slice(lookup(&raw.positions, AttributeKind::Position, corner.position)?);

        let mut narrow = false;
        for (kind, index) in [
            (AttributeKind::TextureCoord, corner.texture),
            (AttributeKind::Normal, corner.normal),
        ] {
            let table = raw.table(kind);
            if index != 0 {
                vertices.extend_from_slice(lookup(table, kind, index)?);
                continue;
            }
            match absent {
                AbsentAttributes::Omit => narrow |= table.width() > 0,
                AbsentAttributes::ZeroFill => {
                    vertices.resize(vertices.len() + table.width(), 0.0);
                }
            }
        }
        if narrow {
            narrow_records += 1;
        }
    }

    if narrow_records > 0 {
        tracing::warn!(
            records = narrow_records,
            stride = layout.stride,
            "corners without texture or normal indices shift the interleaving"
        );
    }

    let indices = (0..raw.corners.len() as u32).collect();

    Ok(Expanded {
        vertices,
        indices,
        layout,
        narrow_records,
    })
}

fn lookup(table: &AttributeTable, attribute: AttributeKind, index: i64) -> Result<&[f32]> {
    table.entry(index).ok_or(LoadError::IndexOutOfRange {
        attribute,
        index,
        available: table.entries(),
    })
}
