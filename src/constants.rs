// Web-side tuning constants.

// Backing-store pixel ratio clamp applied on resize
pub const PIXEL_RATIO_MAX: f64 = 2.0;

// Seed for the star field layout
pub const SCENE_SEED: u64 = 42;
