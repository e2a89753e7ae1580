// Scene orchestrator: camera rig, star field, plane and the five named
// section transitions.

use glam::{Mat4, Vec3};

use super::constants::{
    CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_HOME, CAMERA_NEAR, MOUSE_SENS_ABOUT, MOUSE_SENS_CONNECT,
    MOUSE_SENS_HOME, ORBIT_TARGET,
};
use super::plane::Plane;
use super::stars::{StarField, StarSpeed};
use super::tween::{Ease, Timeline, Track};

/// Named page sections the host navigates between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Home,
    About,
    Projects,
    Connect,
}

impl Section {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Home" => Some(Self::Home),
            "About" => Some(Self::About),
            "Projects" => Some(Self::Projects),
            "Connect" => Some(Self::Connect),
            _ => None,
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Result of advancing the scene one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineStatus {
    Idle,
    Running,
    Finished,
}

pub struct SceneState {
    pub stars: StarField,
    pub plane: Plane,
    camera_base: Vec3,
    mouse_sensitivity: f32,
    aspect: f32,
    active: Option<Timeline>,
}

impl SceneState {
    pub fn new(seed: u64, aspect: f32) -> Self {
        Self {
            stars: StarField::new(seed),
            plane: Plane::new(),
            camera_base: CAMERA_HOME,
            mouse_sensitivity: MOUSE_SENS_HOME,
            aspect,
            active: None,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn set_stars_speed(&mut self, speed: StarSpeed) {
        self.stars.set_speed(speed);
    }

    /// Install the transition timeline for a section change. Returns false
    /// for pairs with no authored choreography; nothing is started then.
    ///
    /// A new `play` replaces any in-flight timeline; sequencing is the
    /// caller's responsibility.
    pub fn play(&mut self, from: Section, to: Section) -> bool {
        use Section::{About, Connect, Home, Projects};
        let (timeline, sensitivity) = match (from, to) {
            (Home, About) => (Self::fly_to_about(), Some(MOUSE_SENS_ABOUT)),
            (About, Home) => (Self::fly_home(), Some(MOUSE_SENS_HOME)),
            (About, Projects) => (Self::fly_to_projects(), None),
            (Projects, About) => (Self::fly_to_about(), Some(MOUSE_SENS_ABOUT)),
            (Projects, Connect) => (Self::fly_to_connect(), Some(MOUSE_SENS_CONNECT)),
            _ => return false,
        };
        if let Some(s) = sensitivity {
            self.mouse_sensitivity = s;
        }
        self.active = Some(timeline);
        true
    }

    // The camera swings out beside the plane while it drifts up and right.
    fn fly_to_about() -> Timeline {
        Timeline::new()
            .to(
                Track::Camera,
                [Some(1.5), Some(2.45), Some(4.2)],
                3.0,
                Ease::QuadInOut,
                0.0,
            )
            .to(Track::Camera, [None, None, Some(1.6)], 3.0, Ease::QuadInOut, -1.15)
            .to(
                Track::Model,
                [Some(1.2), Some(1.2), None],
                3.0,
                Ease::QuadInOut,
                -1.5,
            )
    }

    fn fly_home() -> Timeline {
        Timeline::new()
            .to(
                Track::Model,
                [Some(0.0), Some(0.75), None],
                3.0,
                Ease::QuadInOut,
                0.0,
            )
            .to(Track::Camera, [None, None, Some(4.2)], 3.0, Ease::QuadInOut, -1.45)
            .to(
                Track::Camera,
                [Some(0.0), Some(1.3), Some(3.0)],
                3.0,
                Ease::QuadInOut,
                -2.75,
            )
    }

    fn fly_to_projects() -> Timeline {
        Timeline::new()
            .to(
                Track::Camera,
                [Some(4.2), None, Some(-0.15)],
                5.0,
                Ease::QuartInOut,
                0.0,
            )
            .to(Track::Model, [None, Some(1.95), None], 2.0, Ease::QuadInOut, -2.5)
            .to(Track::Camera, [Some(3.5), None, None], 2.0, Ease::QuartInOut, -0.95)
    }

    fn fly_to_connect() -> Timeline {
        Timeline::new()
            .to(
                Track::Camera,
                [Some(0.0), Some(6.0), None],
                5.0,
                Ease::QuadInOut,
                0.0,
            )
            .to(Track::Camera, [None, Some(4.3), None], 4.0, Ease::QuadInOut, -0.95)
            .to(Track::Model, [Some(0.9), None, None], 2.0, Ease::QuadInOut, -2.5)
    }

    /// Advance the active timeline, the star field and the plane mixer by one
    /// frame.
    ///
    /// `Finished` is reported on the tick the timeline's last-declared
    /// segment completes; segments with later end times keep interpolating
    /// until the timeline is fully complete and torn down.
    pub fn advance(&mut self, dt: f32) -> TimelineStatus {
        let status = match self.active.as_mut() {
            Some(timeline) => {
                let mut model_pos = self.plane.position();
                let fired = timeline.advance(dt, &mut self.camera_base, &mut model_pos);
                self.plane.set_position(model_pos);
                if timeline.is_complete() {
                    self.active = None;
                }
                if fired {
                    TimelineStatus::Finished
                } else {
                    TimelineStatus::Running
                }
            }
            None => TimelineStatus::Idle,
        };
        self.stars.update();
        self.plane.update(dt);
        status
    }

    /// Camera eye for this frame: base position plus the mouse-driven offset.
    pub fn camera_eye(&self, mouse_ndc: [f32; 2]) -> Vec3 {
        self.camera_base
            + Vec3::new(
                mouse_ndc[0] * self.mouse_sensitivity,
                mouse_ndc[1] * self.mouse_sensitivity,
                0.0,
            )
    }

    pub fn camera(&self, mouse_ndc: [f32; 2]) -> Camera {
        Camera {
            eye: self.camera_eye(mouse_ndc),
            target: ORBIT_TARGET,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn camera_base(&self) -> Vec3 {
        self.camera_base
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn is_transitioning(&self) -> bool {
        self.active.is_some()
    }
}
