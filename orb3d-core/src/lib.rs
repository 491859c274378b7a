/// Orb3D Core Library - Mesh acquisition
///
/// Turns Wavefront OBJ text or a procedural sphere description into a flat,
/// render-ready triangle list with bounds and a normalizing transform.

pub mod bounds;
pub mod buffer;
pub mod geometry;
pub mod obj;
pub mod sphere;
pub mod transform;

mod error;

// Re-export commonly used types
pub use bounds::BoundingBox;
pub use buffer::{AttributeRange, VertexBuffer};
pub use error::{MeshError, Result};
pub use geometry::{Mesh, PaddingPolicy};
pub use obj::{load_obj, parse_obj_str, FaceFormat, ObjParser};
pub use sphere::generate_sphere;
pub use transform::{Normalization, Transform};
