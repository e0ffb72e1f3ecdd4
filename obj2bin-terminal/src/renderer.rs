/// ASCII rasterizer for terminal previews
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use obj2bin_core::projection::ScreenPoint;
use obj2bin_core::{Camera, Mesh, Triangle};
use std::io::Write;

use crate::shadow;

/// Model shading ramp (grazing to facing the eye)
const MODEL_RAMP: &[char] = &['-', '=', '+', '*', '#', '%', '@'];

/// Character for ground shadows
const SHADOW_CHAR: char = '.';

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// ASCII renderer that converts triangle meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Aspect ratio of the grid in screen units
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / (self.height.max(1) as f32 * CELL_ASPECT)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Draw shadow triangles beneath everything else; they never write depth
    pub fn render_shadows(&mut self, shadows: &[Triangle], camera: &Camera) {
        let view_projection = camera.view_projection();
        for triangle in shadows {
            let Some(ndc) = project_ndc(triangle, camera, &view_projection) else {
                continue;
            };
            if !shadow::is_visible(&ndc) {
                continue;
            }
            let coords = ndc.map(|p| self.to_screen(&p));
            self.rasterize_triangle(&coords, SHADOW_CHAR, false);
        }
    }

    /// Draw model triangles with depth testing, shaded by how squarely they face the eye
    pub fn render_mesh(&mut self, mesh: &Mesh, camera: &Camera) {
        let view_projection = camera.view_projection();
        for triangle in &mesh.triangles {
            let Some(ndc) = project_ndc(triangle, camera, &view_projection) else {
                continue;
            };
            let coords = ndc.map(|p| self.to_screen(&p));
            self.rasterize_triangle(&coords, shade(triangle, camera), true);
        }
    }

    fn to_screen(&self, ndc: &Point3<f32>) -> ScreenPoint {
        Camera::ndc_to_screen(ndc, self.width as u32, self.height as u32)
    }

    fn rasterize_triangle(
        &mut self,
        coords: &[ScreenPoint; 3],
        character: char,
        depth_test: bool,
    ) {
        let [v0, v1, v2] = *coords;
        let area = edge(v0, v1, (v2.0, v2.1));
        if area.abs() < 1e-6 || self.width == 0 || self.height == 0 {
            return;
        }

        // Bounding box, clipped to the grid
        let min_x = v0.0.min(v1.0).min(v2.0).floor().max(0.0) as usize;
        let min_y = v0.1.min(v1.1).min(v2.1).floor().max(0.0) as usize;
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i64).min(self.width as i64 - 1);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i64).min(self.height as i64 - 1);
        if max_x < 0 || max_y < 0 {
            return;
        }

        for y in min_y..=max_y as usize {
            for x in min_x..=max_x as usize {
                let p = (x as f32 + 0.5, y as f32 + 0.5);

                // Barycentric weights; dividing by the signed area accepts both windings
                let w0 = edge(v1, v2, p) / area;
                let w1 = edge(v2, v0, p) / area;
                let w2 = edge(v0, v1, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let idx = y * self.width + x;
                if depth_test {
                    let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                    if depth >= self.depth_buffer[idx] {
                        continue;
                    }
                    self.depth_buffer[idx] = depth;
                }
                self.char_buffer[idx] = character;
            }
        }
    }

    /// One row of the character buffer
    pub fn row(&self, y: usize) -> String {
        self.char_buffer[y * self.width..(y + 1) * self.width]
            .iter()
            .collect()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for &c in &self.char_buffer[y * self.width..(y + 1) * self.width] {
                let color = match c {
                    ' ' => Color::Reset,
                    SHADOW_CHAR => Color::DarkGrey,
                    '-' | '=' | '+' => Color::DarkBlue,
                    '*' | '#' => Color::Blue,
                    _ => Color::Cyan,
                };
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(c))?;
            }
            // no newline after the last row, it would scroll the screen
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Project all three vertices, `None` if any lies behind the eye
fn project_ndc(
    triangle: &Triangle,
    camera: &Camera,
    view_projection: &Matrix4<f32>,
) -> Option<[Point3<f32>; 3]> {
    let [a, b, c] = triangle.vertices;
    Some([
        camera.project_to_ndc(view_projection, &a.position())?,
        camera.project_to_ndc(view_projection, &b.position())?,
        camera.project_to_ndc(view_projection, &c.position())?,
    ])
}

/// Pick a ramp character from the angle between the face and the eye
fn shade(triangle: &Triangle, camera: &Camera) -> char {
    let facing = triangle
        .normal()
        .zip((camera.position - triangle.centroid()).try_normalize(f32::EPSILON))
        .map(|(normal, to_eye)| normal.dot(&to_eye).abs())
        .unwrap_or(0.0);
    let index = (facing * (MODEL_RAMP.len() - 1) as f32).round() as usize;
    MODEL_RAMP[index.min(MODEL_RAMP.len() - 1)]
}

/// Twice the signed area of (a, b, p)
fn edge(a: ScreenPoint, b: ScreenPoint, p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use obj2bin_core::{Orbit, Vertex};

    fn facing_triangle() -> Triangle {
        Triangle::new(
            Vertex::new(-6.0, -8.0, 0.0),
            Vertex::new(6.0, -8.0, 0.0),
            Vertex::new(0.0, 4.0, 0.0),
        )
    }

    fn camera_for(renderer: &AsciiRenderer) -> Camera {
        Camera::orbiting(&Orbit::default(), renderer.aspect())
    }

    #[test]
    fn test_clear() {
        let mut renderer = AsciiRenderer::new(8, 4);
        renderer.char_buffer[3] = '#';
        renderer.clear();
        assert!((0..4).all(|y| renderer.row(y) == "        "));
    }

    #[test]
    fn test_mesh_covers_screen_center() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let camera = camera_for(&renderer);
        renderer.render_mesh(&Mesh::from(vec![facing_triangle()]), &camera);

        let center = renderer.row(10).chars().nth(20).unwrap();
        assert!(MODEL_RAMP.contains(&center), "got {center:?}");
        // the eye looks along the face normal, so shading is near the bright end
        assert!(MODEL_RAMP.iter().position(|&c| c == center).unwrap() >= 4);
    }

    #[test]
    fn test_either_winding_is_filled() {
        let t = facing_triangle();
        let [v0, v1, v2] = t.vertices;
        for triangle in [t, Triangle::new(v2, v1, v0)] {
            let mut renderer = AsciiRenderer::new(40, 20);
            let camera = camera_for(&renderer);
            renderer.render_mesh(&Mesh::from(vec![triangle]), &camera);
            assert_ne!(renderer.row(10).chars().nth(20), Some(' '));
        }
    }

    #[test]
    fn test_model_draws_over_shadow() {
        let mut renderer = AsciiRenderer::new(4, 1);
        let coords = [(0.0, 0.0, 0.5), (8.0, 0.0, 0.5), (0.0, 8.0, 0.5)];
        renderer.rasterize_triangle(&coords, SHADOW_CHAR, false);
        assert_eq!(renderer.row(0), "....");
        renderer.rasterize_triangle(&coords, '#', true);
        assert_eq!(renderer.row(0), "####");
    }

    #[test]
    fn test_depth_test_keeps_nearest() {
        let mut renderer = AsciiRenderer::new(2, 1);
        let near = [(0.0, 0.0, 0.1), (4.0, 0.0, 0.1), (0.0, 4.0, 0.1)];
        let far = [(0.0, 0.0, 0.9), (4.0, 0.0, 0.9), (0.0, 4.0, 0.9)];
        renderer.rasterize_triangle(&near, '@', true);
        renderer.rasterize_triangle(&far, '-', true);
        assert_eq!(renderer.row(0), "@@");
    }

    #[test]
    fn test_draw_emits_every_row() {
        let renderer = AsciiRenderer::new(3, 2);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("\r\n").count(), 1);
        assert_eq!(text.matches(' ').count(), 6);
    }
}
