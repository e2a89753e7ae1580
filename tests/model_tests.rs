// Host-side tests for model data, clip sampling and the plane component.
// The main crate is wasm-only, so the pure core modules are included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod model {
    include!("../src/core/model.rs");
}
mod plane {
    include!("../src/core/plane.rs");
}

use glam::{Quat, Vec3};
use model::{
    global_transforms, AnimationClip, Channel, Interpolation, Mixer, ModelData, Node, TrackValues,
};
use plane::Plane;

fn translation_channel(node: usize, interpolation: Interpolation) -> Channel {
    Channel {
        node,
        times: vec![0.0, 1.0, 2.0],
        values: TrackValues::Translation(vec![
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 4.0, 0.0),
        ]),
        interpolation,
    }
}

#[test]
fn linear_sampling_interpolates_between_keyframes() {
    let channel = translation_channel(0, Interpolation::Linear);
    let mut node = Node::default();
    channel.sample_into(0.5, &mut node);
    assert!((node.translation - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    channel.sample_into(1.5, &mut node);
    assert!((node.translation - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-6);
}

#[test]
fn step_sampling_holds_previous_keyframe() {
    let channel = translation_channel(0, Interpolation::Step);
    let mut node = Node::default();
    channel.sample_into(0.99, &mut node);
    assert_eq!(node.translation, Vec3::ZERO);
    channel.sample_into(1.01, &mut node);
    assert_eq!(node.translation, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn sampling_clamps_outside_key_range() {
    let channel = translation_channel(0, Interpolation::Linear);
    let mut node = Node::default();
    channel.sample_into(-1.0, &mut node);
    assert_eq!(node.translation, Vec3::ZERO);
    channel.sample_into(10.0, &mut node);
    assert_eq!(node.translation, Vec3::new(2.0, 4.0, 0.0));
}

#[test]
fn rotation_sampling_slerps_halfway() {
    let channel = Channel {
        node: 0,
        times: vec![0.0, 1.0],
        values: TrackValues::Rotation(vec![
            Quat::IDENTITY,
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        ]),
        interpolation: Interpolation::Linear,
    };
    let mut node = Node::default();
    channel.sample_into(0.5, &mut node);
    let expected = Quat::from_rotation_z(std::f32::consts::FRAC_PI_4);
    assert!(node.rotation.angle_between(expected) < 1e-4);
}

#[test]
fn mixer_loops_over_clip_duration() {
    let clip = AnimationClip {
        channels: vec![translation_channel(0, Interpolation::Linear)],
        duration: 2.0,
    };
    let mut nodes = vec![Node::default()];
    let mut mixer = Mixer::default();
    mixer.advance(1.5, &clip, &mut nodes);
    assert!((mixer.time() - 1.5).abs() < 1e-6);
    mixer.advance(1.0, &clip, &mut nodes);
    // 2.5 wraps to 0.5
    assert!((mixer.time() - 0.5).abs() < 1e-6);
    assert!((nodes[0].translation - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn mixer_ignores_channels_for_missing_nodes() {
    let clip = AnimationClip {
        channels: vec![translation_channel(5, Interpolation::Linear)],
        duration: 2.0,
    };
    let mut nodes = vec![Node::default()];
    let mut mixer = Mixer::default();
    mixer.advance(0.5, &clip, &mut nodes);
    assert_eq!(nodes[0].translation, Vec3::ZERO);
}

#[test]
fn global_transforms_compose_parent_chains() {
    let nodes = vec![
        Node {
            translation: Vec3::new(1.0, 0.0, 0.0),
            ..Node::default()
        },
        Node {
            parent: Some(0),
            translation: Vec3::new(0.0, 2.0, 0.0),
            ..Node::default()
        },
        Node {
            parent: Some(1),
            scale: Vec3::splat(2.0),
            ..Node::default()
        },
    ];
    let globals = global_transforms(&nodes);
    let child = globals[1].transform_point3(Vec3::ZERO);
    assert!((child - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    let scaled = globals[2].transform_point3(Vec3::new(1.0, 0.0, 0.0));
    assert!((scaled - Vec3::new(3.0, 2.0, 0.0)).length() < 1e-6);
}

#[test]
fn plane_is_inert_until_model_arrives() {
    let mut plane = Plane::new();
    assert!(!plane.is_ready());
    assert_eq!(plane.position(), Vec3::ZERO);
    plane.set_position(Vec3::new(9.0, 9.0, 9.0));
    assert_eq!(plane.position(), Vec3::ZERO);
    plane.update(1.0);

    plane.install_model(ModelData::default());
    assert!(plane.is_ready());
    assert_eq!(plane.position(), constants::PLANE_HOME);
    plane.set_position(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(plane.position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn plane_update_advances_installed_clip() {
    let mut plane = Plane::new();
    plane.install_model(ModelData {
        nodes: vec![Node::default()],
        meshes: vec![],
        clip: Some(AnimationClip {
            channels: vec![translation_channel(0, Interpolation::Linear)],
            duration: 2.0,
        }),
    });
    plane.update(0.5);
    let model = plane.model().unwrap();
    assert!((model.nodes[0].translation - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
}
