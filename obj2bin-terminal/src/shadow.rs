/// Ground shadows cast by a point light
use nalgebra::Point3;
use obj2bin_core::{Mesh, Transform, Triangle, Vertex};

/// Light position used by the previewer
pub fn default_light() -> Point3<f32> {
    Point3::new(-8.0, -16.0, 16.0)
}

/// Project every triangle onto the ground plane y = 0 as seen from `light`.
///
/// Triangles with a vertex at or above the light (in y-down space) cast no shadow.
pub fn cast_shadows(mesh: &Mesh, light: &Point3<f32>) -> Vec<Triangle> {
    let projection = Transform::ground_shadow(light);

    mesh.triangles
        .iter()
        .filter_map(|triangle| {
            let mut shadow = [Vertex::default(); 3];
            for (out, vertex) in shadow.iter_mut().zip(&triangle.vertices) {
                let h = projection * vertex.position().to_homogeneous();
                if h.w <= f32::EPSILON {
                    return None;
                }
                *out = Vertex::new(h.x / h.w, h.y / h.w, h.z / h.w);
            }
            Some(Triangle::new(shadow[0], shadow[1], shadow[2]))
        })
        .collect()
}

/// Shadow culling in normalized device coordinates: drop triangles entirely
/// outside the view volume and triangles seen from their back side.
pub fn is_visible(ndc: &[Point3<f32>; 3]) -> bool {
    let all_outside = ndc
        .iter()
        .all(|p| !obj2bin_core::projection::in_view_volume(p));
    let a = ndc[1] - ndc[0];
    let b = ndc[2] - ndc[1];
    let facing = a.x * b.y - a.y * b.x;
    !all_outside && facing >= 0.0
}
