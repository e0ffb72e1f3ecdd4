/// OBJ to binary conversion pipeline
use std::fs;
use std::path::{Path, PathBuf};

use crate::binary;
use crate::dump;
use crate::error::{Error, Result};
use crate::obj::{parse_obj, ObjModel};

pub const DEFAULT_INPUT: &str = "pg.obj";
pub const DEFAULT_OUTPUT: &str = "resources/pg.bin";
pub const DEFAULT_VERTEX_DUMP: &str = "v.txt";
pub const DEFAULT_TRIANGLE_DUMP: &str = "t.txt";

/// Where to read the OBJ document and where to put the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Vertex table dump, skipped when `None`
    pub vertex_dump: Option<PathBuf>,
    /// Triangle list dump, skipped when `None`
    pub triangle_dump: Option<PathBuf>,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            vertex_dump: None,
            triangle_dump: None,
        }
    }

    pub fn with_dumps(
        mut self,
        vertex_dump: impl Into<PathBuf>,
        triangle_dump: impl Into<PathBuf>,
    ) -> Self {
        self.vertex_dump = Some(vertex_dump.into());
        self.triangle_dump = Some(triangle_dump.into());
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_OUTPUT)
            .with_dumps(DEFAULT_VERTEX_DUMP, DEFAULT_TRIANGLE_DUMP)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub vertices: usize,
    pub triangles: usize,
    pub bytes_written: usize,
}

/// Read an OBJ file from disk and parse it
pub fn read_obj(path: impl AsRef<Path>) -> Result<ObjModel> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_obj(&text)
}

/// Run the whole pipeline: parse, dump, encode, write.
///
/// The output's parent directory is created when missing. Nothing is rolled
/// back on failure.
pub fn convert(options: &ConvertOptions) -> Result<ConvertSummary> {
    let _span = tracing::info_span!("convert", input = %options.input.display()).entered();

    let model = read_obj(&options.input)?;

    if let Some(path) = &options.vertex_dump {
        dump::write_vertices(&model.vertices, path)?;
        tracing::debug!(path = %path.display(), "wrote vertex dump");
    }
    if let Some(path) = &options.triangle_dump {
        dump::write_triangles(&model.mesh.triangles, path)?;
        tracing::debug!(path = %path.display(), "wrote triangle dump");
    }

    if let Some(parent) = options.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let bytes_written = binary::save(&model.mesh, &options.output)?;

    let summary = ConvertSummary {
        vertices: model.vertices.len(),
        triangles: model.mesh.len(),
        bytes_written,
    };
    tracing::info!(
        output = %options.output.display(),
        vertices = summary.vertices,
        triangles = summary.triangles,
        bytes = summary.bytes_written,
        "converted mesh"
    );
    Ok(summary)
}
