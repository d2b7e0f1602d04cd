/// Text and JSON reports for a loaded geometry file
use std::io::{self, Write};

use meshbuf_core::{DirectiveCounts, Diagnostic, LoadedGeometry, VertexAttribute, VertexLayout};
use serde::Serialize;

/// Everything the inspector prints about one load
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub counts: DirectiveCounts,
    pub layout: VertexLayout,
    pub byte_layout: VertexLayout,
    pub attributes: Vec<VertexAttribute>,
    pub records: usize,
    pub records_aligned: bool,
    pub bounds: Option<[[f32; 3]; 2]>,
    pub degenerate_triangles: Option<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Summary {
    pub fn new(mesh: &LoadedGeometry) -> Self {
        Self {
            counts: mesh.counts,
            layout: mesh.layout,
            byte_layout: mesh.layout.in_bytes(std::mem::size_of::<f32>()),
            attributes: mesh.layout.attributes(),
            records: mesh.record_count(),
            records_aligned: mesh.records_aligned(),
            bounds: mesh
                .bounds()
                .map(|b| [b.min.coords.into(), b.max.coords.into()]),
            degenerate_triangles: mesh
                .triangles()
                .map(|t| t.iter().filter(|t| t.calculate_normal().is_none()).count()),
            diagnostics: mesh.diagnostics.clone(),
        }
    }

    pub fn write_text<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let c = &self.counts;
        writeln!(
            writer,
            "directives: {} positions, {} texture coords, {} normals, {} faces",
            c.positions, c.texture_coords, c.normals, c.faces
        )?;

        let l = &self.layout;
        writeln!(
            writer,
            "layout: stride={} color_offset={} texture_offset={} normal_offset={}",
            l.stride, l.color_offset, l.texture_offset, l.normal_offset
        )?;
        writeln!(
            writer,
            "bytes: stride={} texture_offset={} normal_offset={}",
            self.byte_layout.stride, self.byte_layout.texture_offset, self.byte_layout.normal_offset
        )?;
        for attribute in &self.attributes {
            writeln!(
                writer,
                "  {}: {} components at element {}",
                attribute.kind, attribute.components, attribute.offset
            )?;
        }

        writeln!(writer, "records: {}", self.records)?;
        if !self.records_aligned {
            writeln!(writer, "warning: records do not match the stride")?;
        }
        if let Some([min, max]) = self.bounds {
            writeln!(writer, "bounds: {:?} .. {:?}", min, max)?;
        }
        if let Some(degenerate) = self.degenerate_triangles.filter(|&n| n > 0) {
            writeln!(writer, "degenerate triangles: {}", degenerate)?;
        }
        for diagnostic in &self.diagnostics {
            writeln!(writer, "diagnostic: {}", diagnostic)?;
        }
        Ok(())
    }
}

/// JSON document with the summary and both buffers
#[derive(Debug, Serialize)]
pub struct Dump<'a> {
    pub summary: Summary,
    pub vertices: &'a [f32],
    pub indices: &'a [u32],
}

impl<'a> Dump<'a> {
    pub fn new(mesh: &'a LoadedGeometry) -> Self {
        Self {
            summary: Summary::new(mesh),
            vertices: &mesh.vertices,
            indices: &mesh.indices,
        }
    }
}
