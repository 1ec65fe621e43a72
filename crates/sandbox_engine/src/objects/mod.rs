//! Object templates, live instances and the instance registry

pub mod instance;
pub mod material;
pub mod mesh;
pub mod registry;
pub mod template;

pub use instance::{InstanceId, ObjectInstance};
pub use material::Material;
pub use mesh::{MeshData, MeshRef};
pub use registry::InstanceRegistry;
pub use template::{ShapeTemplate, TemplateError, TemplateRegistry};
