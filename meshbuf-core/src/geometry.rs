/// Geometry views over an interleaved vertex buffer
use nalgebra::{Point3, Vector3};

use crate::expand::VertexLayout;

/// Axis-aligned box around every emitted position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Bounds {
    pub fn from_points<I: IntoIterator<Item = Point3<f32>>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self { min: first, max: first }, |bounds, p| Self {
            min: bounds.min.inf(&p),
            max: bounds.max.sup(&p),
        }))
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// A triangle read back from three consecutive vertex records
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices.
    /// Degenerate triangles have none.
    pub fn calculate_normal(&self) -> Option<Vector3<f32>> {
        self.cross().try_normalize(f32::EPSILON)
    }

    pub fn area(&self) -> f32 {
        0.5 * self.cross().norm()
    }

    fn cross(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        edge1.cross(&edge2)
    }
}

/// First three position components of each record.
///
/// Returns `None` unless the buffer is a whole number of records and each
/// position has at least three components.
pub fn record_positions<'a>(
    vertices: &'a [f32],
    layout: &VertexLayout,
) -> Option<impl Iterator<Item = Point3<f32>> + 'a> {
    if layout.position_width < 3 || layout.stride == 0 || vertices.len() % layout.stride != 0 {
        return None;
    }
    Some(
        vertices
            .chunks_exact(layout.stride)
            .map(|record| Point3::new(record[0], record[1], record[2])),
    )
}

/// Consecutive records grouped three at a time. A trailing partial group is
/// dropped.
pub fn record_triangles(vertices: &[f32], layout: &VertexLayout) -> Option<Vec<Triangle>> {
    let positions: Vec<Point3<f32>> = record_positions(vertices, layout)?.collect();
    Some(
        positions
            .chunks_exact(3)
            .map(|p| Triangle::new(p[0], p[1], p[2]))
            .collect(),
    )
}
