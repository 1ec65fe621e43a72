//! Camera, bounding volumes and the per-frame visibility pass

pub mod bounds;
pub mod camera;
pub mod visibility;

pub use bounds::{Aabb, Frustum, Plane};
pub use camera::Camera;
pub use visibility::{collect_visible, is_visible, RenderItem, RenderList};
