use glam::Vec3;

// Scene layout and tuning shared between the choreography core and the renderer.

// Star field
pub const STAR_COUNT: usize = 6000;
pub const STAR_ACCEL_SLOW: f32 = 0.0005; // per-update velocity increment
pub const STAR_ACCEL_FAST: f32 = 0.0035;
pub const STAR_XY_SPAN: f32 = 50.0; // x, y spawn in [-span, span)
pub const STAR_DEPTH_MIN: f32 = -100.0; // recycle threshold
pub const STAR_DEPTH_MAX: f32 = 100.0; // initial spawn upper bound
pub const STAR_RESPAWN_BASE: f32 = 75.0; // recycled depth = base + rand * jitter
pub const STAR_RESPAWN_JITTER: f32 = 25.0;
pub const STAR_FIELD_Z_OFFSET: f32 = -20.0; // world-space offset of the whole field
pub const STAR_ROLL_PER_UPDATE: f32 = 0.002; // radians about +z
pub const STAR_SIZE: f32 = 0.35; // billboard edge length in world units

// Camera rig
pub const CAMERA_HOME: Vec3 = Vec3::new(0.0, 1.3, 3.0);
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0); // fixed look-at point
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.5;
pub const CAMERA_FAR: f32 = 200.0;

// Mouse-driven camera offset sensitivity, switched per transition
pub const MOUSE_SENS_HOME: f32 = 0.45;
pub const MOUSE_SENS_ABOUT: f32 = 0.2;
pub const MOUSE_SENS_CONNECT: f32 = 0.01;

// Plane model rest position once the asset has loaded
pub const PLANE_HOME: Vec3 = Vec3::new(0.0, 0.75, 0.0);

// Lighting: one white point light plus a sky/ground hemisphere fill
pub const POINT_LIGHT_POS: Vec3 = Vec3::new(2.0, 3.0, 4.0);
pub const POINT_LIGHT_INTENSITY: f32 = 5.0;
pub const HEMI_SKY_COLOR: [f32; 3] = [0.2, 0.52, 1.0];
pub const HEMI_GROUND_COLOR: [f32; 3] = [1.0, 0.785, 0.5];
pub const HEMI_INTENSITY: f32 = 2.0;
