use glam::Vec3;

use super::constants::PLANE_HOME;
use super::model::{Mixer, ModelData};

/// The animated plane model.
///
/// Until the asset arrives the component is inert: position reads return the
/// origin, writes are dropped and updates do nothing.
#[derive(Default)]
pub struct Plane {
    model: Option<ModelData>,
    mixer: Mixer,
    position: Vec3,
}

impl Plane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a loaded model and move it to its rest position.
    pub fn install_model(&mut self, model: ModelData) {
        self.model = Some(model);
        self.position = PLANE_HOME;
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    pub fn position(&self) -> Vec3 {
        if self.model.is_some() {
            self.position
        } else {
            Vec3::ZERO
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        if self.model.is_some() {
            self.position = position;
        }
    }

    /// Advance the animation clip by the elapsed wall-clock delta.
    pub fn update(&mut self, dt: f32) {
        if let Some(model) = self.model.as_mut() {
            let ModelData { nodes, clip, .. } = model;
            if let Some(clip) = clip.as_ref() {
                self.mixer.advance(dt, clip, nodes);
            }
        }
    }

    pub fn model(&self) -> Option<&ModelData> {
        self.model.as_ref()
    }
}
