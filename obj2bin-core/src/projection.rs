/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::{Orbit, Transform};

/// A projected vertex: screen column, screen row, normalized depth
pub type ScreenPoint = (f32, f32, f32);

/// Camera configuration for perspective rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera looking at the orbit target from the orbit's eye
    ///
    /// Converted meshes are y-down, so "up" on screen is -y.
    pub fn orbiting(orbit: &Orbit, aspect: f32) -> Self {
        Self {
            position: orbit.eye(),
            target: orbit.target,
            up: -Vector3::y(),
            fov: 2.0 * (0.5f32).atan(),
            aspect,
            near: 1.0,
            far: 128.0,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        Transform::mvp_matrix(
            &Matrix4::identity(),
            &self.view_matrix(),
            &self.projection_matrix(),
        )
    }

    /// Project a world point into normalized device coordinates.
    ///
    /// Returns `None` for points behind the eye.
    pub fn project_to_ndc(
        &self,
        view_projection: &Matrix4<f32>,
        point: &Point3<f32>,
    ) -> Option<Point3<f32>> {
        let clip = view_projection * point.to_homogeneous();
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(Point3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w))
    }

    /// Map normalized device coordinates onto a `width` x `height` grid
    pub fn ndc_to_screen(ndc: &Point3<f32>, width: u32, height: u32) -> ScreenPoint {
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;
        (screen_x, screen_y, ndc.z)
    }

    /// Project a world point straight to screen space, `None` if behind the eye
    pub fn project_to_screen(
        &self,
        view_projection: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        self.project_to_ndc(view_projection, point)
            .map(|ndc| Self::ndc_to_screen(&ndc, width, height))
    }
}

/// True if a point in normalized device coordinates lies inside the view volume
pub fn in_view_volume(ndc: &Point3<f32>) -> bool {
    let unit = -1.0..=1.0;
    unit.contains(&ndc.x) && unit.contains(&ndc.y) && unit.contains(&ndc.z)
}

impl Default for Camera {
    fn default() -> Self {
        Self::orbiting(&Orbit::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::default();
        let vp = camera.view_projection();
        let (x, y, depth) = camera
            .project_to_screen(&vp, &camera.target, 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
        assert!((-1.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_up_is_negative_y() {
        let camera = Camera::default();
        let vp = camera.view_projection();
        let above = Point3::new(0.0, -4.0, 0.0);
        let (_, y, _) = camera.project_to_screen(&vp, &above, 80, 40).unwrap();
        // smaller rows are nearer the top of the screen
        assert!(y < 20.0);
    }

    #[test]
    fn test_point_behind_eye_is_rejected() {
        let camera = Camera::default();
        let vp = camera.view_projection();
        let behind = camera.position + (camera.position - camera.target);
        assert!(camera.project_to_ndc(&vp, &behind).is_none());
    }

    #[test]
    fn test_view_volume() {
        assert!(in_view_volume(&Point3::new(0.0, 0.5, -0.5)));
        assert!(!in_view_volume(&Point3::new(1.5, 0.0, 0.0)));
    }
}
