/// Plain-text mesh report
use nalgebra::Vector3;
use orb3d_core::Mesh;
use std::fmt;
use std::io::Write;

/// Statistics gathered from a loaded mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSummary {
    pub vertices: usize,
    pub triangles: usize,
    pub normals: usize,
    pub uvs: usize,
    pub has_uv: bool,
    pub bounds: Option<(Vector3<f32>, Vector3<f32>)>,
    pub center: Vector3<f32>,
    pub scale: f32,
}

impl MeshSummary {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let bounds = (!mesh.bounds.is_empty()).then(|| (mesh.box_min(), mesh.box_max()));
        Self {
            vertices: mesh.vertices.len(),
            triangles: mesh.triangle_count(),
            normals: mesh.normals.len(),
            uvs: mesh.uvs.len(),
            has_uv: mesh.has_uv,
            bounds,
            center: mesh.center,
            scale: mesh.scale,
        }
    }
}

fn fmt_vec(v: &Vector3<f32>) -> String {
    format!("({:.4}, {:.4}, {:.4})", v.x, v.y, v.z)
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertices:  {}", self.vertices)?;
        writeln!(f, "triangles: {}", self.triangles)?;
        writeln!(f, "normals:   {}", self.normals)?;
        writeln!(f, "uvs:       {} (has_uv: {})", self.uvs, self.has_uv)?;
        match &self.bounds {
            Some((min, max)) => {
                writeln!(f, "box_min:   {}", fmt_vec(min))?;
                writeln!(f, "box_max:   {}", fmt_vec(max))?;
            }
            None => writeln!(f, "bounds:    empty")?,
        }
        writeln!(f, "center:    {}", fmt_vec(&self.center))?;
        write!(f, "scale:     {:.4}", self.scale)
    }
}

/// Write the summary of `mesh` to `writer`
pub fn write_report<W: Write>(mesh: &Mesh, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", MeshSummary::from_mesh(mesh))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh_summary() {
        let summary = MeshSummary::from_mesh(&Mesh::new());
        assert_eq!(summary.vertices, 0);
        assert_eq!(summary.bounds, None);
        assert!(summary.to_string().contains("bounds:    empty"));
    }

    #[test]
    fn test_report_lists_counts() {
        let mesh = orb3d_core::generate_sphere(3).unwrap();
        let mut out = Vec::new();
        write_report(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("vertices:  24"));
        assert!(text.contains("triangles: 8"));
        assert!(text.contains("has_uv: true"));
        assert!(text.contains("scale:     2.0000"));
    }
}
