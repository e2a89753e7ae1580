pub mod constants;
pub mod model;
pub mod plane;
pub mod scene;
pub mod stars;
pub mod tween;

pub use plane::Plane;
pub use scene::{Camera, SceneState, Section, TimelineStatus};
pub use stars::{StarField, StarSpeed};

// Shaders bundled as string constants
pub static STARS_WGSL: &str = include_str!("../../shaders/stars.wgsl");
pub static MESH_WGSL: &str = include_str!("../../shaders/mesh.wgsl");
