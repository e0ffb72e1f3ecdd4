/// obj2bin Core Library - OBJ parsing, triangle assembly and the binary mesh format
///
/// This library provides the stateless core of the converter: reading OBJ
/// vertices and faces, the coordinate conversion, the fixed binary layout,
/// and the camera math used to preview converted meshes.

pub mod binary;
pub mod convert;
pub mod dump;
pub mod error;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use convert::{convert, ConvertOptions, ConvertSummary};
pub use error::{Error, Result};
pub use geometry::{Mesh, Triangle, Vertex};
pub use obj::{parse_obj, FaceRef, ObjModel};
pub use projection::Camera;
pub use transform::{flip_and_flatten, Orbit, Transform};
