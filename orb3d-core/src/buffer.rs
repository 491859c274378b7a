/// Render-ready packing of mesh attributes into one contiguous block
use std::mem::size_of;

use nalgebra::{Vector2, Vector3, Vector4};

use crate::error::{MeshError, Result};
use crate::geometry::Mesh;

/// Where one attribute section sits inside a [`VertexBuffer`], in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRange {
    pub offset: usize,
    pub size: usize,
    /// Number of floats per vertex
    pub components: usize,
}

/// All positions, then all normals, then all uvs, back to back
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    pub data: Vec<f32>,
    pub vertex_count: usize,
    pub positions: AttributeRange,
    pub normals: AttributeRange,
    pub uvs: AttributeRange,
}

impl VertexBuffer {
    /// Pack a padded mesh. Fails if the attribute streams differ in length.
    pub fn from_mesh(mesh: &Mesh) -> Result<Self> {
        let vertex_count = mesh.vertices.len();
        if mesh.normals.len() != vertex_count || mesh.uvs.len() != vertex_count {
            return Err(MeshError::AttributeMismatch {
                vertices: vertex_count,
                normals: mesh.normals.len(),
                uvs: mesh.uvs.len(),
            });
        }

        let positions = AttributeRange {
            offset: 0,
            size: vertex_count * size_of::<Vector4<f32>>(),
            components: 4,
        };
        let normals = AttributeRange {
            offset: positions.offset + positions.size,
            size: vertex_count * size_of::<Vector3<f32>>(),
            components: 3,
        };
        let uvs = AttributeRange {
            offset: normals.offset + normals.size,
            size: vertex_count * size_of::<Vector2<f32>>(),
            components: 2,
        };

        let mut data = Vec::with_capacity(vertex_count * 9);
        data.extend(mesh.vertices.iter().flat_map(|v| v.iter().copied()));
        data.extend(mesh.normals.iter().flat_map(|n| n.iter().copied()));
        data.extend(mesh.uvs.iter().flat_map(|uv| uv.iter().copied()));

        Ok(Self {
            data,
            vertex_count,
            positions,
            normals,
            uvs,
        })
    }

    /// Total size of the packed data in bytes
    pub fn byte_len(&self) -> usize {
        self.data.len() * size_of::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::parse_obj_str;

    #[test]
    fn test_layout_follows_attribute_order() {
        let mut mesh = parse_obj_str("v 0 0 0\nv 1 0 0\nv 1 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n")
            .unwrap();
        mesh.pad_attributes();
        let buffer = VertexBuffer::from_mesh(&mesh).unwrap();

        assert_eq!(buffer.vertex_count, 3);
        assert_eq!(buffer.positions.offset, 0);
        assert_eq!(buffer.positions.size, 48);
        assert_eq!(buffer.normals.offset, 48);
        assert_eq!(buffer.normals.size, 36);
        assert_eq!(buffer.uvs.offset, 84);
        assert_eq!(buffer.uvs.size, 24);
        assert_eq!(buffer.byte_len(), 108);

        // second position, then first normal, then first uv
        assert_eq!(&buffer.data[4..8], &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(&buffer.data[12..15], &[0.0, 0.0, 1.0]);
        assert_eq!(&buffer.data[21..23], &[0.0, 0.0]);
    }

    #[test]
    fn test_unpadded_mesh_is_rejected() {
        let mesh = parse_obj_str("v 0 0 0\nv 1 0 0\nv 1 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n")
            .unwrap();
        match VertexBuffer::from_mesh(&mesh) {
            Err(MeshError::AttributeMismatch { vertices, normals, uvs }) => {
                assert_eq!((vertices, normals, uvs), (3, 3, 0));
            }
            other => panic!("expected an attribute mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_mesh_packs_to_nothing() {
        let buffer = VertexBuffer::from_mesh(&Mesh::new()).unwrap();
        assert!(buffer.data.is_empty());
        assert_eq!(buffer.byte_len(), 0);
    }
}
