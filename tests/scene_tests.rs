// Host-side tests for the scene orchestrator and the section transitions.
// The main crate is wasm-only, so the pure core modules are included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod input {
    include!("../src/input.rs");
}
mod model {
    include!("../src/core/model.rs");
}
mod plane {
    include!("../src/core/plane.rs");
}
mod stars {
    include!("../src/core/stars.rs");
}
mod tween {
    include!("../src/core/tween.rs");
}
mod scene {
    include!("../src/core/scene.rs");
}

use glam::Vec3;
use input::MouseState;
use model::ModelData;
use scene::{SceneState, Section, TimelineStatus};

const DT: f32 = 1.0 / 60.0;

fn ready_scene() -> SceneState {
    let mut scene = SceneState::new(1, 16.0 / 9.0);
    scene.plane.install_model(ModelData::default());
    scene
}

/// Step until the active timeline reports Finished, with a hard cap.
fn run_to_finish(scene: &mut SceneState, max_seconds: f32) -> f32 {
    let max_steps = (max_seconds / DT).ceil() as usize + 2;
    for step in 0..max_steps {
        if scene.advance(DT) == TimelineStatus::Finished {
            return step as f32 * DT;
        }
    }
    panic!("timeline did not finish within {max_seconds}s");
}

/// Keep stepping after the completion signal until any trailing segments end
/// and the timeline tears down.
fn settle(scene: &mut SceneState) {
    for _ in 0..120 {
        if !scene.is_transitioning() {
            return;
        }
        scene.advance(DT);
    }
    panic!("timeline never tore down");
}

fn assert_close(actual: Vec3, expected: Vec3, what: &str) {
    assert!(
        (actual - expected).length() < 1e-3,
        "{what}: expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn scene_starts_at_home_pose() {
    let scene = ready_scene();
    assert_eq!(scene.camera_base(), constants::CAMERA_HOME);
    assert_eq!(scene.plane.position(), constants::PLANE_HOME);
    assert_eq!(scene.mouse_sensitivity(), constants::MOUSE_SENS_HOME);
    assert!(!scene.is_transitioning());
}

#[test]
fn full_tour_lands_each_pose() {
    let mut scene = ready_scene();

    assert!(scene.play(Section::Home, Section::About));
    run_to_finish(&mut scene, 6.4);
    assert_close(scene.camera_base(), Vec3::new(1.5, 2.45, 1.6), "about camera");
    assert_close(scene.plane.position(), Vec3::new(1.2, 1.2, 0.0), "about model");

    assert!(scene.play(Section::About, Section::Projects));
    run_to_finish(&mut scene, 5.6);
    assert_close(
        scene.camera_base(),
        Vec3::new(3.5, 2.45, -0.15),
        "projects camera",
    );
    assert_close(
        scene.plane.position(),
        Vec3::new(1.2, 1.95, 0.0),
        "projects model",
    );

    assert!(scene.play(Section::Projects, Section::Connect));
    run_to_finish(&mut scene, 8.1);
    settle(&mut scene);
    assert_close(
        scene.camera_base(),
        Vec3::new(0.0, 4.3, -0.15),
        "connect camera",
    );
    assert_close(
        scene.plane.position(),
        Vec3::new(0.9, 1.95, 0.0),
        "connect model",
    );
}

#[test]
fn connect_signals_before_camera_settles() {
    let mut scene = ready_scene();
    assert!(scene.play(Section::Projects, Section::Connect));
    let fired_at = run_to_finish(&mut scene, 8.1);
    // The model segment ends first; the camera-y segment keeps easing.
    assert!(fired_at < 7.6, "completion signal at {fired_at}s");
    assert!(scene.is_transitioning());
    assert!((scene.plane.position().x - 0.9).abs() < 1e-3);
    assert!(scene.camera_base().y > 4.3 + 1e-3);
    settle(&mut scene);
    assert!((scene.camera_base().y - 4.3).abs() < 1e-3);
    assert!(!scene.is_transitioning());
}

#[test]
fn replay_replaces_in_flight_timeline() {
    let mut scene = ready_scene();
    assert!(scene.play(Section::Home, Section::About));
    for _ in 0..60 {
        scene.advance(DT);
    }
    assert!(scene.is_transitioning());
    // The new timeline starts from the mid-flight pose and lands home.
    assert!(scene.play(Section::About, Section::Home));
    run_to_finish(&mut scene, 4.9);
    settle(&mut scene);
    assert_close(scene.camera_base(), constants::CAMERA_HOME, "home camera");
    assert_close(scene.plane.position(), constants::PLANE_HOME, "home model");
}

#[test]
fn about_to_home_restores_rest_pose() {
    let mut scene = ready_scene();
    assert!(scene.play(Section::Home, Section::About));
    run_to_finish(&mut scene, 6.4);

    assert!(scene.play(Section::About, Section::Home));
    let elapsed = run_to_finish(&mut scene, 4.9);
    assert!(elapsed <= 4.8 + 2.0 * DT, "took {elapsed}s");
    assert_close(scene.camera_base(), constants::CAMERA_HOME, "home camera");
    assert_close(scene.plane.position(), constants::PLANE_HOME, "home model");
    assert!(!scene.is_transitioning());
}

#[test]
fn projects_to_about_reuses_about_choreography() {
    let mut fresh = ready_scene();
    assert!(fresh.play(Section::Projects, Section::About));
    run_to_finish(&mut fresh, 6.4);
    assert_close(fresh.camera_base(), Vec3::new(1.5, 2.45, 1.6), "about camera");
}

#[test]
fn unmatched_pairs_do_not_start() {
    let mut scene = ready_scene();
    assert!(!scene.play(Section::Home, Section::Connect));
    assert!(!scene.play(Section::Connect, Section::Home));
    assert!(!scene.play(Section::Home, Section::Home));
    assert!(!scene.is_transitioning());
    assert_eq!(scene.advance(DT), TimelineStatus::Idle);
    assert_eq!(scene.camera_base(), constants::CAMERA_HOME);
}

#[test]
fn sensitivity_follows_destination_section() {
    let mut scene = ready_scene();
    scene.play(Section::Home, Section::About);
    assert_eq!(scene.mouse_sensitivity(), constants::MOUSE_SENS_ABOUT);
    // Projects keeps whatever sensitivity was active
    scene.play(Section::About, Section::Projects);
    assert_eq!(scene.mouse_sensitivity(), constants::MOUSE_SENS_ABOUT);
    scene.play(Section::Projects, Section::Connect);
    assert_eq!(scene.mouse_sensitivity(), constants::MOUSE_SENS_CONNECT);
    scene.play(Section::About, Section::Home);
    assert_eq!(scene.mouse_sensitivity(), constants::MOUSE_SENS_HOME);
}

#[test]
fn camera_eye_offsets_by_scaled_ndc() {
    let scene = ready_scene();
    let eye = scene.camera_eye([1.0, -0.5]);
    let expected = constants::CAMERA_HOME
        + Vec3::new(
            constants::MOUSE_SENS_HOME,
            -0.5 * constants::MOUSE_SENS_HOME,
            0.0,
        );
    assert!((eye - expected).length() < 1e-6);
    // z never follows the pointer
    assert_eq!(eye.z, constants::CAMERA_HOME.z);
}

#[test]
fn camera_rig_is_fixed_on_orbit_target() {
    let scene = ready_scene();
    let camera = scene.camera([0.0, 0.0]);
    assert_eq!(camera.target, constants::ORBIT_TARGET);
    assert_eq!(camera.znear, constants::CAMERA_NEAR);
    assert_eq!(camera.zfar, constants::CAMERA_FAR);
    assert!((camera.fovy_radians - constants::CAMERA_FOV_DEG.to_radians()).abs() < 1e-6);
    let view = camera.view_matrix();
    let proj = camera.projection_matrix();
    assert!(view.determinant().abs() > 1e-6);
    assert!(proj.to_cols_array().iter().all(|v| v.is_finite()));
}

#[test]
fn invalid_aspect_is_ignored() {
    let mut scene = ready_scene();
    scene.set_aspect(0.0);
    scene.set_aspect(f32::NAN);
    scene.set_aspect(-2.0);
    assert!((scene.camera([0.0, 0.0]).aspect - 16.0 / 9.0).abs() < 1e-6);
    scene.set_aspect(2.0);
    assert!((scene.camera([0.0, 0.0]).aspect - 2.0).abs() < 1e-6);
}

#[test]
fn transition_without_model_moves_only_the_camera() {
    let mut scene = SceneState::new(1, 1.0);
    assert!(scene.play(Section::Home, Section::About));
    run_to_finish(&mut scene, 6.4);
    assert_close(scene.camera_base(), Vec3::new(1.5, 2.45, 1.6), "camera");
    // Position writes are dropped until the asset arrives
    assert_eq!(scene.plane.position(), Vec3::ZERO);
}

#[test]
fn mouse_ndc_maps_window_corners() {
    let center = input::mouse_ndc(800.0, 600.0, &MouseState { x: 400.0, y: 300.0 });
    assert!(center[0].abs() < 1e-6 && center[1].abs() < 1e-6);

    let top_left = input::mouse_ndc(800.0, 600.0, &MouseState { x: 0.0, y: 0.0 });
    assert_eq!(top_left, [-1.0, 1.0]);

    let bottom_right = input::mouse_ndc(800.0, 600.0, &MouseState { x: 800.0, y: 600.0 });
    assert_eq!(bottom_right, [1.0, -1.0]);
}

#[test]
fn mouse_ndc_survives_zero_window() {
    let ndc = input::mouse_ndc(0.0, 0.0, &MouseState { x: 10.0, y: 10.0 });
    assert!(ndc[0].is_finite() && ndc[1].is_finite());
}

#[test]
fn section_parse_round_trip() {
    assert_eq!(Section::parse("Home"), Some(Section::Home));
    assert_eq!(Section::parse("About"), Some(Section::About));
    assert_eq!(Section::parse("Projects"), Some(Section::Projects));
    assert_eq!(Section::parse("Connect"), Some(Section::Connect));
    assert_eq!(Section::parse("home"), None);
    assert_eq!(Section::parse(""), None);
}
