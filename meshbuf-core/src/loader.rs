/// GeometryLoader: the single entry point from source text to GPU buffers
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::{Diagnostic, Result};
use crate::expand::{expand, VertexLayout};
use crate::geometry::{record_positions, record_triangles, Bounds, Triangle};
use crate::options::LoadOptions;
use crate::parser::{parse_str, Parser, RawGeometry};

/// How many directives of each kind the source contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DirectiveCounts {
    pub positions: usize,
    pub texture_coords: usize,
    pub normals: usize,
    pub faces: usize,
}

impl DirectiveCounts {
    fn of(raw: &RawGeometry) -> Self {
        Self {
            positions: raw.positions.entries(),
            texture_coords: raw.texture_coords.entries(),
            normals: raw.normals.entries(),
            faces: raw.faces,
        }
    }
}

/// Result of a successful load. Owns both buffers outright.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadedGeometry {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub layout: VertexLayout,
    pub counts: DirectiveCounts,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadedGeometry {
    /// Number of emitted vertex records (one per face corner).
    pub fn record_count(&self) -> usize {
        self.indices.len()
    }

    /// Whether every record is exactly `layout.stride` elements wide.
    pub fn records_aligned(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::MisalignedRecords { .. }))
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Bounds of the first three position components, when records are
    /// aligned and positions are at least three wide.
    pub fn bounds(&self) -> Option<Bounds> {
        if !self.records_aligned() {
            return None;
        }
        Bounds::from_points(record_positions(&self.vertices, &self.layout)?)
    }

    /// Records read back three at a time as triangles.
    pub fn triangles(&self) -> Option<Vec<Triangle>> {
        if !self.records_aligned() {
            return None;
        }
        record_triangles(&self.vertices, &self.layout)
    }
}

/// Converts geometry text into interleaved buffers.
#[derive(Debug, Clone, Default)]
pub struct GeometryLoader {
    options: LoadOptions,
}

impl GeometryLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn load_str(&self, text: &str) -> Result<LoadedGeometry> {
        self.build(parse_str(text, &self.options)?)
    }

    /// Lines are read as raw bytes; comments are cut before decoding and any
    /// remaining invalid UTF-8 is replaced rather than failing the load.
    pub fn load_reader<R: BufRead>(&self, mut reader: R) -> Result<LoadedGeometry> {
        let mut parser = Parser::new(&self.options);
        let mut buf = Vec::new();
        let mut line_no = 0;
        while reader.read_until(b'\n', &mut buf)? > 0 {
            line_no += 1;
            let mut line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            line = line.strip_suffix(b"\r").unwrap_or(line);
            if let Some(comment) = line.iter().position(|&b| b == b'#') {
                line = &line[..comment];
            }
            parser.feed_line(line_no, &String::from_utf8_lossy(line))?;
            buf.clear();
        }
        self.build(parser.finish()?)
    }

    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<LoadedGeometry> {
        let path = path.as_ref();
        tracing::debug!(?path, "loading geometry file");
        let file = File::open(path)?;
        self.load_reader(BufReader::new(file))
    }

    fn build(&self, raw: RawGeometry) -> Result<LoadedGeometry> {
        let expanded = expand(&raw, self.options.absent_attributes)?;
        let counts = DirectiveCounts::of(&raw);

        let mut diagnostics = raw.diagnostics;
        if expanded.narrow_records > 0 {
            diagnostics.push(Diagnostic::MisalignedRecords {
                records: expanded.narrow_records,
            });
        }

        tracing::debug!(
            records = expanded.indices.len(),
            stride = expanded.layout.stride,
            diagnostics = diagnostics.len(),
            "expanded geometry"
        );

        Ok(LoadedGeometry {
            vertices: expanded.vertices,
            indices: expanded.indices,
            layout: expanded.layout,
            counts,
            diagnostics,
        })
    }
}
