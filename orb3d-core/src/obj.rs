/// Wavefront OBJ loader for triangle meshes
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::RangeInclusive;
use std::path::Path;

use nalgebra::{Vector2, Vector3};
use nom::{
    bytes::complete::tag,
    character::complete::{char, i32 as index, space0, space1},
    combinator::all_consuming,
    multi::separated_list1,
    number::complete::float,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};
use tracing::{debug, info, trace};

use crate::error::{MeshError, Result};
use crate::geometry::Mesh;

/// Outcome of matching a face body against the two accepted layouts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceFormat {
    /// `v/vt/vn v/vt/vn v/vt/vn`
    Full([[i32; 3]; 3]),
    /// `v//vn v//vn v//vn`
    PositionNormalOnly([[i32; 2]; 3]),
    Invalid,
}

impl FaceFormat {
    /// Classify the text following an `f` tag
    pub fn classify(body: &str) -> Self {
        if let Ok((_, corners)) = three_corners(body, full_corner) {
            return Self::Full(corners);
        }
        if let Ok((_, corners)) = three_corners(body, position_normal_corner) {
            return Self::PositionNormalOnly(corners);
        }
        Self::Invalid
    }
}

fn full_corner(input: &str) -> IResult<&str, [i32; 3]> {
    let (input, (v, _, t, _, n)) = tuple((index, char('/'), index, char('/'), index))(input)?;
    Ok((input, [v, t, n]))
}

fn position_normal_corner(input: &str) -> IResult<&str, [i32; 2]> {
    let (input, (v, _, n)) = tuple((index, tag("//"), index))(input)?;
    Ok((input, [v, n]))
}

fn three_corners<'a, O>(
    input: &'a str,
    corner: fn(&'a str) -> IResult<&'a str, O>,
) -> IResult<&'a str, [O; 3]> {
    let (input, (a, b, c)) = all_consuming(terminated(
        tuple((
            preceded(space0, corner),
            preceded(space1, corner),
            preceded(space1, corner),
        )),
        space0,
    ))(input)?;
    Ok((input, [a, b, c]))
}

fn float_list(input: &str) -> IResult<&str, Vec<f32>> {
    all_consuming(delimited(space0, separated_list1(space1, float), space0))(input)
}

/// One triangle corner with indices already made positive (one-based)
#[derive(Debug, Clone, Copy)]
struct Corner {
    position: i64,
    uv: Option<i64>,
    normal: i64,
}

#[derive(Debug, Clone, Copy)]
struct Face {
    line: usize,
    corners: [Corner; 3],
}

/// Turn a possibly negative OBJ index into a one-based one, relative to the
/// table size at the time the face is read
fn absolute_index(index: i32, table_len: usize) -> i64 {
    if index < 0 {
        table_len as i64 + i64::from(index) + 1
    } else {
        i64::from(index)
    }
}

fn lookup<T: Copy>(table: &[T], index: i64, kind: &str, line: usize) -> Result<T> {
    if index < 1 || index > table.len() as i64 {
        return Err(MeshError::format(
            line,
            format!("{kind} index {index} is outside 1..={}", table.len()),
        ));
    }
    Ok(table[(index - 1) as usize])
}

/// Line-by-line OBJ state: attribute tables, pending faces and bounds
#[derive(Debug)]
pub struct ObjParser {
    positions: Vec<Vector3<f32>>,
    uvs: Vec<Vector2<f32>>,
    normals: Vec<Vector3<f32>>,
    faces: Vec<Face>,
    has_uv: bool,
    mesh: Mesh,
}

impl ObjParser {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            uvs: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
            has_uv: true,
            mesh: Mesh::new(),
        }
    }

    /// Consume one source line. `line_no` is one-based and only used in errors.
    pub fn parse_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (record, body) = line
            .split_once(|c: char| c.is_whitespace())
            .unwrap_or((line, ""));
        match record {
            "v" => {
                let v = parse_numbers(record, body, 3..=4, line_no)?;
                let position = Vector3::new(v[0], v[1], v[2]);
                self.mesh.fold_bounds(&position);
                self.positions.push(position);
            }
            "vt" => {
                let v = parse_numbers(record, body, 2..=3, line_no)?;
                self.uvs.push(Vector2::new(v[0], v[1]));
            }
            "vn" => {
                let v = parse_numbers(record, body, 3..=3, line_no)?;
                self.normals.push(Vector3::new(v[0], v[1], v[2]));
            }
            "f" => self.parse_face(line_no, body)?,
            other => trace!(line = line_no, tag = other, "Skipping unsupported OBJ record"),
        }
        Ok(())
    }

    fn parse_face(&mut self, line_no: usize, body: &str) -> Result<()> {
        let corners = match FaceFormat::classify(body) {
            FaceFormat::Full(raw) => raw.map(|[v, t, n]| Corner {
                position: absolute_index(v, self.positions.len()),
                uv: Some(absolute_index(t, self.uvs.len())),
                normal: absolute_index(n, self.normals.len()),
            }),
            FaceFormat::PositionNormalOnly(raw) => {
                self.has_uv = false;
                raw.map(|[v, n]| Corner {
                    position: absolute_index(v, self.positions.len()),
                    uv: None,
                    normal: absolute_index(n, self.normals.len()),
                })
            }
            FaceFormat::Invalid => {
                return Err(MeshError::format(
                    line_no,
                    format!(
                        "face '{}' is neither v/vt/vn nor v//vn with three corners",
                        body.trim()
                    ),
                ));
            }
        };

        self.faces.push(Face {
            line: line_no,
            corners,
        });
        Ok(())
    }

    /// Resolve every recorded face corner into the flat triangle list
    pub fn finish(self) -> Result<Mesh> {
        let Self {
            positions,
            uvs,
            normals,
            faces,
            has_uv,
            mut mesh,
        } = self;

        let corner_count = faces.len() * 3;
        mesh.vertices.reserve(corner_count);
        mesh.normals.reserve(corner_count);
        if has_uv {
            mesh.uvs.reserve(corner_count);
        }

        for face in &faces {
            for corner in &face.corners {
                let position = lookup(&positions, corner.position, "position", face.line)?;
                mesh.vertices.push(position.push(1.0));

                let normal = lookup(&normals, corner.normal, "normal", face.line)?;
                mesh.normals.push(normal);

                if has_uv {
                    if let Some(uv) = corner.uv {
                        mesh.uvs.push(lookup(&uvs, uv, "texture coordinate", face.line)?);
                    }
                }
            }
        }

        mesh.has_uv = has_uv;
        mesh.update_transform();

        info!(
            "Loaded OBJ mesh: {} positions, {} uvs, {} normals, {} triangles, has_uv={}",
            positions.len(),
            uvs.len(),
            normals.len(),
            mesh.triangle_count(),
            has_uv
        );
        Ok(mesh)
    }
}

impl Default for ObjParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_numbers(
    record: &str,
    body: &str,
    arity: RangeInclusive<usize>,
    line_no: usize,
) -> Result<Vec<f32>> {
    match float_list(body) {
        // nom's float also accepts nan/inf spellings
        Ok((_, values)) if values.iter().any(|v| !v.is_finite()) => Err(MeshError::format(
            line_no,
            format!("'{record}' has a non-finite value in '{}'", body.trim()),
        )),
        Ok((_, values)) if arity.contains(&values.len()) => Ok(values),
        Ok((_, values)) => Err(MeshError::format(
            line_no,
            format!(
                "'{record}' expects {} to {} numbers, found {}",
                arity.start(),
                arity.end(),
                values.len()
            ),
        )),
        Err(_) => Err(MeshError::format(
            line_no,
            format!("'{record}' has a non-numeric value in '{}'", body.trim()),
        )),
    }
}

/// Parse OBJ text already held in memory
pub fn parse_obj_str(input: &str) -> Result<Mesh> {
    let mut parser = ObjParser::new();
    for (i, line) in input.lines().enumerate() {
        parser.parse_line(i + 1, line)?;
    }
    parser.finish()
}

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    debug!("Loading OBJ mesh from {}", path.display());

    let io_error = |source: std::io::Error| MeshError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);

    let mut parser = ObjParser::new();
    // Byte lines: exporters write non-UTF-8 names into records we skip.
    // A mangled v/vt/vn/f record still fails as a format error.
    for (i, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(io_error)?;
        parser.parse_line(i + 1, &String::from_utf8_lossy(&line))?;
    }
    parser.finish()
}

impl Mesh {
    /// Load a triangle list from an OBJ file, replacing any previous contents
    pub fn load_obj<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = load_obj(path)?;
        Ok(())
    }
}
