/// Geometry primitives shared by the converter and the previewer
use nalgebra::{Point3, Vector3};
use static_assertions::const_assert_eq;

/// A vertex position, laid out exactly as one record of the binary format
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Bitwise equality, so `-0.0` and `0.0` differ and NaN equals itself
    pub fn bit_eq(&self, other: &Vertex) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(p: Point3<f32>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vertex> for Point3<f32> {
    fn from(v: Vertex) -> Self {
        v.position()
    }
}

/// A triangle face defined by three vertices
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

const_assert_eq!(std::mem::size_of::<Vertex>(), 12);
const_assert_eq!(std::mem::size_of::<Triangle>(), 36);

impl Triangle {
    pub const fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal following the stored winding, `None` for degenerate triangles
    pub fn normal(&self) -> Option<Vector3<f32>> {
        let [v0, v1, v2] = self.vertices.map(|v| v.position());
        (v1 - v0).cross(&(v2 - v0)).try_normalize(f32::EPSILON)
    }

    pub fn centroid(&self) -> Point3<f32> {
        let [v0, v1, v2] = self.vertices.map(|v| v.position());
        Point3::from((v0.coords + v1.coords + v2.coords) / 3.0)
    }

    pub fn bit_eq(&self, other: &Triangle) -> bool {
        self.vertices
            .iter()
            .zip(&other.vertices)
            .all(|(a, b)| a.bit_eq(b))
    }
}

/// An ordered triangle list, the document stored in a binary mesh file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn bit_eq(&self, other: &Mesh) -> bool {
        self.len() == other.len()
            && self
                .triangles
                .iter()
                .zip(&other.triangles)
                .all(|(a, b)| a.bit_eq(b))
    }
}

impl From<Vec<Triangle>> for Mesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }
}
