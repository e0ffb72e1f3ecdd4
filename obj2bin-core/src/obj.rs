/// Wavefront OBJ reader for triangle meshes
///
/// Only `v` and `f` statements are interpreted; every other statement is
/// skipped. Vertices pass through [`flip_and_flatten`] as they are read, and
/// faces are resolved against the vertices declared so far with their winding
/// reversed.
use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{char, space0, space1, u32 as index},
    combinator::{eof, opt, recognize, rest},
    multi::separated_list1,
    number::complete::double,
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Mesh, Triangle, Vertex};
use crate::transform::flip_and_flatten;

/// A single interpreted OBJ line
#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Blank,
    Vertex(Vec<f64>),
    Face(Vec<u32>),
    Other,
}

/// Three 1-based vertex indices as written on a face line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRef(pub [u32; 3]);

impl FaceRef {
    /// Resolve against `vertices`, storing the vertices in reverse order
    pub fn resolve(&self, vertices: &[Vertex], line: usize) -> Result<Triangle> {
        let [i, j, k] = self.0;
        Ok(Triangle::new(
            lookup(vertices, k, line)?,
            lookup(vertices, j, line)?,
            lookup(vertices, i, line)?,
        ))
    }
}

fn lookup(vertices: &[Vertex], index: u32, line: usize) -> Result<Vertex> {
    (index as usize)
        .checked_sub(1)
        .and_then(|i| vertices.get(i))
        .copied()
        .ok_or(Error::IndexOutOfRange {
            line,
            index,
            available: vertices.len(),
        })
}

/// Vertex table and triangle list read from an OBJ document
#[derive(Debug, Clone, Default)]
pub struct ObjModel {
    pub vertices: Vec<Vertex>,
    pub mesh: Mesh,
}

/// Parse an OBJ document into transformed vertices and reversed-winding triangles
pub fn parse_obj(input: &str) -> Result<ObjModel> {
    let mut model = ObjModel::default();

    for (n, text) in input.lines().enumerate() {
        let line = n + 1;
        match parse_statement(text, line)? {
            Statement::Vertex(coords) => {
                let &[x, y, z, ..] = coords.as_slice() else {
                    return Err(Error::parse(
                        line,
                        format!("vertex needs 3 coordinates, found {}", coords.len()),
                    ));
                };
                // Read at double precision, then round once to f32
                let vertex = Vertex::new(x as f32, y as f32, z as f32);
                model.vertices.push(flip_and_flatten(vertex));
            }
            Statement::Face(indices) => {
                let face = <[u32; 3]>::try_from(indices.as_slice()).map_err(|_| {
                    Error::FaceArity {
                        line,
                        count: indices.len(),
                    }
                })?;
                let triangle = FaceRef(face).resolve(&model.vertices, line)?;
                model.mesh.add_triangle(triangle);
            }
            Statement::Blank | Statement::Other => {}
        }
    }

    tracing::debug!(
        vertices = model.vertices.len(),
        triangles = model.mesh.len(),
        "parsed OBJ document"
    );
    Ok(model)
}

fn parse_statement(text: &str, line: usize) -> Result<Statement> {
    statement(text).map(|(_, s)| s).map_err(|e| match e {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            Error::parse(line, format!("unexpected input `{}`", e.input.trim_end()))
        }
        nom::Err::Incomplete(_) => Error::parse(line, "incomplete statement"),
    })
}

fn statement(input: &str) -> IResult<&str, Statement> {
    let (args, keyword) = opt(keyword)(input)?;
    match keyword {
        None => Ok((args, Statement::Blank)),
        Some("v") => {
            let (input, coords) = terminated(arguments(double), end_of_statement)(args)?;
            Ok((input, Statement::Vertex(coords)))
        }
        Some("f") => {
            let (input, indices) = terminated(arguments(vertex_ref), end_of_statement)(args)?;
            Ok((input, Statement::Face(indices)))
        }
        Some(_) => Ok(("", Statement::Other)),
    }
}

fn keyword(input: &str) -> IResult<&str, &str> {
    preceded(space0, take_till1(|c: char| c.is_whitespace()))(input)
}

/// Whitespace-separated arguments following a keyword, possibly none
fn arguments<'a, O, F>(element: F) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<O>>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    let mut list = opt(preceded(space1, separated_list1(space1, element)));
    move |input| {
        let (input, items) = list(input)?;
        Ok((input, items.unwrap_or_default()))
    }
}

/// Position index of a face vertex; `/vt/vn` references are skipped
fn vertex_ref(input: &str) -> IResult<&str, u32> {
    terminated(
        index,
        opt(pair(char('/'), opt(take_till1(|c: char| c.is_whitespace())))),
    )(input)
}

/// Trailing whitespace and an optional `#` comment
fn end_of_statement(input: &str) -> IResult<&str, &str> {
    preceded(space0, alt((eof, recognize(pair(char('#'), rest)))))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(x, y, z)
    }

    #[test]
    fn test_vertices_are_flipped_and_flattened() {
        let model = parse_obj("v 1.5 2 3\nv -1 -2 -3\n").unwrap();
        assert_eq!(model.vertices, vec![v(1.5, -2.0, 0.0), v(-1.0, 2.0, 0.0)]);
        assert!(model.mesh.is_empty());
    }

    #[test]
    fn test_face_winding_is_reversed() {
        let model = parse_obj("v 1 0 0\nv 2 0 0\nv 3 0 0\nf 1 2 3\n").unwrap();
        let [a, b, c] = model.mesh.triangles[0].vertices;
        assert_eq!((a.x, b.x, c.x), (3.0, 2.0, 1.0));
    }

    #[test]
    fn test_face_vertex_attributes_are_ignored() {
        let src = "v 1 0 0\nv 2 0 0\nv 3 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2//1 3/1\n";
        let model = parse_obj(src).unwrap();
        let [a, b, c] = model.mesh.triangles[0].vertices;
        assert_eq!((a.x, b.x, c.x), (3.0, 2.0, 1.0));
    }

    #[test]
    fn test_other_statements_and_blank_lines_are_skipped() {
        let src = "# comment\n\n   \no cube\ng side\nusemtl red\ns off\nv 0 1 0 # apex\n";
        let model = parse_obj(src).unwrap();
        assert_eq!(model.vertices, vec![v(0.0, -1.0, 0.0)]);
    }

    #[test]
    fn test_crlf_and_tabs() {
        let model = parse_obj("v\t1\t2\t3\r\nv 4 5 6\r\n").unwrap();
        assert_eq!(model.vertices.len(), 2);
        assert_eq!(model.vertices[0], v(1.0, -2.0, 0.0));
    }

    #[test]
    fn test_vertex_weight_is_ignored() {
        let model = parse_obj("v 1 2 3 0.5\n").unwrap();
        assert_eq!(model.vertices, vec![v(1.0, -2.0, 0.0)]);
    }

    #[test]
    fn test_coordinates_round_once_from_double() {
        // just above the midpoint between 1.0 and the next f32 when read directly,
        // but exactly on it (and so rounded to even) once read as f64
        let model = parse_obj("v 1.0000000596046447753906250001 0 0\n").unwrap();
        assert_eq!(model.vertices[0].x.to_bits(), 0x3f80_0000);

        let model = parse_obj("v 0.1 -0.7 3\n").unwrap();
        assert_eq!(model.vertices[0].x.to_bits(), (0.1f64 as f32).to_bits());
        assert_eq!(model.vertices[0].y.to_bits(), (0.7f64 as f32).to_bits());
    }

    #[test]
    fn test_vertex_with_too_few_coordinates() {
        let err = parse_obj("v 1 2\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }), "{err}");

        let err = parse_obj("v 0 0 0\nv\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_malformed_number() {
        let err = parse_obj("v 1 abc 2\n").unwrap_err();
        match err {
            Error::Parse { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("abc"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_quad_is_rejected() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let err = parse_obj(src).unwrap_err();
        assert!(matches!(err, Error::FaceArity { line: 5, count: 4 }), "{err}");
    }

    #[test]
    fn test_short_face_is_rejected() {
        let err = parse_obj("v 0 0 0\nf 1 1\n").unwrap_err();
        assert!(matches!(err, Error::FaceArity { line: 2, count: 2 }), "{err}");
    }

    #[test]
    fn test_forward_reference_is_rejected() {
        let err = parse_obj("v 0 0 0\nf 1 1 2\nv 1 1 1\n").unwrap_err();
        assert!(
            matches!(
                err,
                Error::IndexOutOfRange {
                    line: 2,
                    index: 2,
                    available: 1
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn test_zero_index_is_rejected() {
        let err = parse_obj("v 0 0 0\nf 0 1 1\n").unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 0, .. }), "{err}");
    }

    #[test]
    fn test_negative_index_is_a_parse_error() {
        let err = parse_obj("v 0 0 0\nf -1 -1 -1\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_statement_kinds() {
        assert_eq!(statement("").unwrap().1, Statement::Blank);
        assert_eq!(statement("vt 0.5 0.5").unwrap().1, Statement::Other);
        assert_eq!(
            statement("f 3 2 1 # tri").unwrap().1,
            Statement::Face(vec![3, 2, 1])
        );
        assert_eq!(
            statement("  v 1e2 -0.5 .25  ").unwrap().1,
            Statement::Vertex(vec![100.0, -0.5, 0.25])
        );
    }
}
