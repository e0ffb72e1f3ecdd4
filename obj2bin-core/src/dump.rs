/// Human-readable dumps of the vertex table and triangle list
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::{Triangle, Vertex};

struct Coords<'a>(&'a Vertex);

impl fmt::Display for Coords<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}, {:?}]", self.0.x, self.0.y, self.0.z)
    }
}

/// Bracketed list, one item per line
fn pretty_list<T>(items: &[T], item: impl Fn(&T) -> String) -> String {
    let lines: Vec<String> = items.iter().map(item).collect();
    format!("[{}]\n", lines.join(",\n "))
}

/// `[[x, y, z],\n [x, y, z]]`
pub fn format_vertices(vertices: &[Vertex]) -> String {
    pretty_list(vertices, |v| Coords(v).to_string())
}

/// `[([x, y, z], [x, y, z], [x, y, z]),\n ...]`
pub fn format_triangles(triangles: &[Triangle]) -> String {
    pretty_list(triangles, |t| {
        let [a, b, c] = &t.vertices;
        format!("({}, {}, {})", Coords(a), Coords(b), Coords(c))
    })
}

pub fn write_vertices(vertices: &[Vertex], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, format_vertices(vertices)).map_err(|e| Error::io(path, e))
}

pub fn write_triangles(triangles: &[Triangle], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, format_triangles(triangles)).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dumps() {
        assert_eq!(format_vertices(&[]), "[]\n");
        assert_eq!(format_triangles(&[]), "[]\n");
    }

    #[test]
    fn test_vertex_dump() {
        let vertices = [Vertex::new(1.0, -0.0, 0.0), Vertex::new(0.5, 2.0, 0.0)];
        assert_eq!(
            format_vertices(&vertices),
            "[[1.0, -0.0, 0.0],\n [0.5, 2.0, 0.0]]\n"
        );
    }

    #[test]
    fn test_triangle_dump() {
        let v = Vertex::new(1.0, 2.0, 0.0);
        let triangles = [Triangle::new(v, v, v)];
        assert_eq!(
            format_triangles(&triangles),
            "[([1.0, 2.0, 0.0], [1.0, 2.0, 0.0], [1.0, 2.0, 0.0])]\n"
        );
    }
}
