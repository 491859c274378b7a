/// Command-line front end for the mesh acquisition core
use anyhow::{Context, Result};
use orb3d_core::{generate_sphere, load_obj, Mesh, VertexBuffer};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod report;

pub use report::{write_report, MeshSummary};

/// Resolution used when no other is requested
pub const DEFAULT_SPHERE_STEPS: u32 = 32;

/// Where a mesh comes from
#[derive(Debug, Clone, PartialEq)]
pub enum MeshSource {
    /// OBJ file, optionally falling back to a sphere of the given resolution
    Obj {
        path: PathBuf,
        fallback_steps: Option<u32>,
    },
    Sphere { steps: u32 },
}

/// Load or generate a mesh, then pad its attribute streams so every stream
/// matches the vertex count.
pub fn acquire(source: &MeshSource) -> Result<Mesh> {
    let mut mesh = match source {
        MeshSource::Obj {
            path,
            fallback_steps,
        } => match load_obj(path) {
            Ok(mesh) => mesh,
            Err(err) => {
                let Some(steps) = fallback_steps else {
                    return Err(err)
                        .with_context(|| format!("Failed to load mesh: {}", path.display()));
                };
                warn!("{}; falling back to a sphere with {} steps", err, steps);
                generate_sphere(*steps).context("Failed to generate fallback sphere")?
            }
        },
        MeshSource::Sphere { steps } => {
            generate_sphere(*steps).context("Failed to generate sphere")?
        }
    };

    mesh.pad_attributes();
    Ok(mesh)
}

/// Acquire a mesh and write its report to `writer`
pub fn run<W: Write>(source: &MeshSource, writer: &mut W) -> Result<Mesh> {
    let mesh = acquire(source)?;
    let buffer = VertexBuffer::from_mesh(&mesh)?;
    info!(
        "Packed {} vertices into {} bytes",
        buffer.vertex_count,
        buffer.byte_len()
    );

    write_report(&mesh, writer)?;
    Ok(mesh)
}
