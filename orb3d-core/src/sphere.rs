/// Procedural UV sphere built from latitude rings
use std::f64::consts::PI;
use std::mem::size_of;

use nalgebra::{Vector2, Vector3, Vector4};
use tracing::{debug, info};

use crate::error::{MeshError, Result};
use crate::geometry::Mesh;

/// One latitude ring of samples
#[derive(Debug, Default)]
struct Ring {
    positions: Vec<Vector3<f32>>,
    uvs: Vec<Vector2<f32>>,
}

/// Generate a unit sphere centered at the origin as a flat triangle list.
///
/// `steps` is both the number of latitude rings and the number of samples
/// per ring. Rings run pole to pole (`phi` in `[0, PI]`) and samples run a
/// full turn (`theta` in `[0, 2 PI]`), so the first and last column of each
/// ring sit at the same angle and the seam is not welded.
pub fn generate_sphere(steps: u32) -> Result<Mesh> {
    if steps < 2 {
        return Err(MeshError::Precondition(format!(
            "sphere needs at least 2 steps, got {steps}"
        )));
    }
    let corner_count = sphere_corner_count(steps).ok_or_else(|| {
        MeshError::Precondition(format!("sphere with {steps} steps does not fit in memory"))
    })?;
    debug!("Generating UV sphere with {} steps", steps);

    let divisions = f64::from(steps - 1);
    let step_theta = 2.0 * PI / divisions;
    let step_phi = PI / divisions;

    let mut mesh = Mesh::with_capacity(corner_count);
    let mut previous = Ring::default();

    for i in 0..steps {
        let phi = f64::from(i) * step_phi;
        let v = f64::from(i) / divisions;

        let mut ring = Ring {
            positions: Vec::with_capacity(steps as usize),
            uvs: Vec::with_capacity(steps as usize),
        };
        for j in 0..steps {
            let theta = f64::from(j) * step_theta;
            let u = f64::from(j) / divisions;

            let position = Vector3::new(
                (-theta.cos() * phi.sin()) as f32,
                phi.cos() as f32,
                (theta.sin() * phi.sin()) as f32,
            );
            mesh.fold_bounds(&position);
            ring.positions.push(position);
            ring.uvs.push(Vector2::new(u as f32, v as f32));
        }

        stitch(&mut mesh, &previous, &ring);
        previous = ring;
    }

    mesh.has_uv = true;
    mesh.update_transform();

    info!(
        "Generated UV sphere: {} steps, {} triangles",
        steps,
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Number of triangle corners for `steps`, or `None` when the position
/// stream alone would exceed the largest possible allocation
fn sphere_corner_count(steps: u32) -> Option<usize> {
    let divisions = usize::try_from(steps - 1).ok()?;
    let corners = divisions.checked_mul(divisions)?.checked_mul(6)?;
    let bytes = corners.checked_mul(size_of::<Vector4<f32>>())?;
    (bytes <= isize::MAX as usize).then_some(corners)
}

/// Emit two triangles per quad between ring `a` (above) and ring `b`.
/// Does nothing for the first ring, when `a` is still empty.
fn stitch(mesh: &mut Mesh, a: &Ring, b: &Ring) {
    for k in 0..a.positions.len().saturating_sub(1) {
        let corners = [
            (a, k),
            (b, k),
            (a, k + 1),
            (a, k + 1),
            (b, k),
            (b, k + 1),
        ];
        for (ring, index) in corners {
            let position = ring.positions[index];
            mesh.vertices.push(position.push(1.0));
            mesh.normals.push(position.normalize());
            mesh.uvs.push(ring.uvs[index]);
        }
    }
}

impl Mesh {
    /// Replace this mesh with a generated UV sphere
    pub fn make_sphere(&mut self, steps: u32) -> Result<()> {
        *self = generate_sphere(steps)?;
        Ok(())
    }
}
