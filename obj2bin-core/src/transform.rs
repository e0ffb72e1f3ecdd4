/// Coordinate conversion for imported vertices and view-side transforms
use nalgebra::{Matrix4, Point3};

use crate::geometry::Vertex;

/// Convert an OBJ position into the target's 2D convention: y points down and
/// depth is discarded. `z` always becomes `+0.0`, whatever the input.
pub fn flip_and_flatten(v: Vertex) -> Vertex {
    Vertex::new(v.x, -v.y, 0.0)
}

/// Camera position on a horizontal circle around a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Angle around the target in radians
    pub angle: f32,
    pub radius: f32,
    /// Eye height; negative is above the ground since imported meshes are y-down
    pub height: f32,
    pub target: Point3<f32>,
}

impl Orbit {
    pub fn new(angle: f32, radius: f32, height: f32, target: Point3<f32>) -> Self {
        Self {
            angle,
            radius,
            height,
            target,
        }
    }

    /// Rotate around the target by `delta` radians
    pub fn rotate(&mut self, delta: f32) {
        self.angle = (self.angle + delta).rem_euclid(std::f32::consts::TAU);
    }

    pub fn eye(&self) -> Point3<f32> {
        Point3::new(
            self.radius * self.angle.cos(),
            self.height,
            self.radius * self.angle.sin(),
        )
    }
}

impl Default for Orbit {
    fn default() -> Self {
        Self::new(
            std::f32::consts::FRAC_PI_2,
            20.0,
            -8.0,
            Point3::new(0.0, -2.0, 0.0),
        )
    }
}

/// Transform builder for view-side matrices
pub struct Transform;

impl Transform {
    /// Projective matrix that casts points from a point light onto the plane y = 0.
    ///
    /// The result is homogeneous; `w` is `p.y - light.y` and vanishes for points
    /// level with the light.
    pub fn ground_shadow(light: &Point3<f32>) -> Matrix4<f32> {
        let (lx, ly, lz) = (light.x, light.y, light.z);
        Matrix4::new(
            -ly, lx, 0.0, 0.0, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, lz, -ly, 0.0, //
            0.0, 1.0, 0.0, -ly,
        )
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}
