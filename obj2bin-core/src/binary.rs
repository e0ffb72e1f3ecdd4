/// Fixed-layout binary triangle format
///
/// ```text
/// UINT32          – Number of triangles N
/// foreach triangle
///     REAL32[3]   – Vertex 1 (x, y, z)
///     REAL32[3]   – Vertex 2
///     REAL32[3]   – Vertex 3
/// end
/// ```
///
/// All fields are little-endian. A file holds exactly `4 + 36 * N` bytes.
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::{Mesh, Triangle, Vertex};

/// Size of the triangle count header in bytes
pub const HEADER_SIZE: usize = 4;

/// Size of one vertex record (3 floats)
pub const VERTEX_SIZE: usize = 12;

/// Size of one triangle record (3 vertices)
pub const TRIANGLE_SIZE: usize = 3 * VERTEX_SIZE;

/// Exact byte length of a file holding `triangles` triangles
pub const fn encoded_len(triangles: usize) -> usize {
    HEADER_SIZE + TRIANGLE_SIZE * triangles
}

/// [`encoded_len`], or `None` if the length does not fit in a `usize`
pub const fn checked_encoded_len(triangles: usize) -> Option<usize> {
    match TRIANGLE_SIZE.checked_mul(triangles) {
        Some(records) => records.checked_add(HEADER_SIZE),
        None => None,
    }
}

/// Encode a mesh into the binary layout
pub fn encode(mesh: &Mesh) -> Result<Vec<u8>> {
    let count = u32::try_from(mesh.len()).map_err(|_| Error::TooManyTriangles(mesh.len()))?;

    let mut data = Vec::with_capacity(encoded_len(mesh.len()));
    data.extend_from_slice(&count.to_le_bytes());
    for vertex in mesh.triangles.iter().flat_map(|t| &t.vertices) {
        data.extend_from_slice(&vertex.x.to_le_bytes());
        data.extend_from_slice(&vertex.y.to_le_bytes());
        data.extend_from_slice(&vertex.z.to_le_bytes());
    }
    Ok(data)
}

/// Decode a binary mesh, rejecting truncated data and trailing bytes
pub fn decode(data: &[u8]) -> Result<Mesh> {
    if data.len() < HEADER_SIZE {
        return Err(Error::TooShort { len: data.len() });
    }

    let triangle_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    // A count too large to address can never be backed by the data
    let Some(expected) = checked_encoded_len(triangle_count) else {
        return Err(Error::Truncated {
            expected: usize::MAX,
            got: data.len(),
        });
    };
    if data.len() < expected {
        return Err(Error::Truncated {
            expected,
            got: data.len(),
        });
    }
    if data.len() > expected {
        return Err(Error::TrailingBytes {
            expected,
            got: data.len(),
        });
    }

    let mut mesh = Mesh::with_capacity(triangle_count);
    for record in data[HEADER_SIZE..].chunks_exact(TRIANGLE_SIZE) {
        mesh.add_triangle(Triangle::new(
            read_vertex(&record[0..12]),
            read_vertex(&record[12..24]),
            read_vertex(&record[24..36]),
        ));
    }

    Ok(mesh)
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::new(x, y, z)
}

/// Encode `mesh` and write it to `path` in one pass
pub fn save(mesh: &Mesh, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let data = encode(mesh)?;
    fs::write(path, &data).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "wrote binary mesh");
    Ok(data.len())
}

/// Read and decode the binary mesh at `path`
pub fn load(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| Error::io(path, e))?;
    let mesh = decode(&data)?;
    tracing::debug!(path = %path.display(), triangles = mesh.len(), "loaded binary mesh");
    Ok(mesh)
}
