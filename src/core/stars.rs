use rand::prelude::*;

use super::constants::{
    STAR_ACCEL_FAST, STAR_ACCEL_SLOW, STAR_COUNT, STAR_DEPTH_MAX, STAR_DEPTH_MIN,
    STAR_RESPAWN_BASE, STAR_RESPAWN_JITTER, STAR_ROLL_PER_UPDATE, STAR_XY_SPAN,
};

/// Acceleration preset for the star field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarSpeed {
    Slow,
    Fast,
}

/// Fixed-size point cloud streamed toward the camera.
///
/// Each star advances along -z with an accelerating per-star velocity; once a
/// star crosses the near recycle bound it respawns at the far end with zeroed
/// velocity. The whole field also rolls slowly about +z.
pub struct StarField {
    positions: Vec<[f32; 3]>,
    velocities: Vec<f32>,
    acceleration: f32,
    roll: f32,
    rng: StdRng,
}

impl StarField {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions = Vec::with_capacity(STAR_COUNT);
        for _ in 0..STAR_COUNT {
            let x = rng.gen::<f32>() * 2.0 * STAR_XY_SPAN - STAR_XY_SPAN;
            let y = rng.gen::<f32>() * 2.0 * STAR_XY_SPAN - STAR_XY_SPAN;
            let z = rng.gen::<f32>() * (STAR_DEPTH_MAX - STAR_DEPTH_MIN) + STAR_DEPTH_MIN;
            positions.push([x, y, z]);
        }
        Self {
            positions,
            velocities: vec![0.0; STAR_COUNT],
            acceleration: STAR_ACCEL_SLOW,
            roll: 0.0,
            rng,
        }
    }

    pub fn set_speed(&mut self, speed: StarSpeed) {
        self.acceleration = match speed {
            StarSpeed::Slow => STAR_ACCEL_SLOW,
            StarSpeed::Fast => STAR_ACCEL_FAST,
        };
    }

    /// One simulation step over every star.
    ///
    /// The recycle test uses the pre-step depth, so a star may overshoot the
    /// bound by at most one velocity step before respawning.
    pub fn update(&mut self) {
        for i in 0..self.positions.len() {
            let z = self.positions[i][2];
            self.velocities[i] += self.acceleration;
            self.positions[i][2] = z - self.velocities[i];
            if z < STAR_DEPTH_MIN {
                self.positions[i][2] =
                    STAR_RESPAWN_BASE + self.rng.gen::<f32>() * STAR_RESPAWN_JITTER;
                self.velocities[i] = 0.0;
            }
        }
        self.roll += STAR_ROLL_PER_UPDATE;
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    /// Accumulated roll angle of the field, radians about +z.
    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
