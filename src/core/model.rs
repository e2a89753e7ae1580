// CPU-side model data and keyframe clip sampling.
//
// The loader fills these types from a parsed glTF document; the renderer
// uploads the mesh data and reads node global transforms each frame. Nothing
// here touches platform APIs, so the sampling logic is tested natively.

use glam::{Mat4, Quat, Vec3};

/// Keyframe interpolation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Linear,
    Step,
}

/// Sampled output values of one animation channel.
#[derive(Clone, Debug)]
pub enum TrackValues {
    Translation(Vec<Vec3>),
    Rotation(Vec<Quat>),
    Scale(Vec<Vec3>),
}

/// One animation channel: a keyframe track bound to a node property.
#[derive(Clone, Debug)]
pub struct Channel {
    pub node: usize,
    pub times: Vec<f32>,
    pub values: TrackValues,
    pub interpolation: Interpolation,
}

/// A looping animation clip, the first one found in the asset.
#[derive(Clone, Debug, Default)]
pub struct AnimationClip {
    pub channels: Vec<Channel>,
    pub duration: f32,
}

/// A node in the flattened model hierarchy. Parents precede children, so a
/// single forward pass yields global transforms.
#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<usize>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub mesh: Option<usize>,
}

impl Node {
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// One indexed triangle list with a flat base color.
#[derive(Clone, Debug)]
pub struct Primitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
}

impl Mesh {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }
}

/// Everything the renderer and mixer need from a loaded model.
#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub nodes: Vec<Node>,
    pub meshes: Vec<Mesh>,
    pub clip: Option<AnimationClip>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            parent: None,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            mesh: None,
        }
    }
}

/// Global (model-space) transform of every node. Relies on parents preceding
/// children in the node list.
pub fn global_transforms(nodes: &[Node]) -> Vec<Mat4> {
    let mut out: Vec<Mat4> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let local = node.local_matrix();
        let global = match node.parent {
            Some(p) => out[p] * local,
            None => local,
        };
        out.push(global);
    }
    out
}

fn keyframe_pair(times: &[f32], t: f32) -> (usize, usize, f32) {
    if times.is_empty() {
        return (0, 0, 0.0);
    }
    let hi = times.partition_point(|&kt| kt <= t);
    if hi == 0 {
        return (0, 0, 0.0);
    }
    if hi >= times.len() {
        let last = times.len() - 1;
        return (last, last, 0.0);
    }
    let lo = hi - 1;
    let span = times[hi] - times[lo];
    let alpha = if span > 0.0 { (t - times[lo]) / span } else { 0.0 };
    (lo, hi, alpha)
}

impl Channel {
    /// Sample the channel at clip time `t` and write the result into `node`.
    pub fn sample_into(&self, t: f32, node: &mut Node) {
        let (lo, hi, alpha) = keyframe_pair(&self.times, t);
        let alpha = match self.interpolation {
            Interpolation::Linear => alpha,
            Interpolation::Step => 0.0,
        };
        match &self.values {
            TrackValues::Translation(v) => {
                if let (Some(a), Some(b)) = (v.get(lo), v.get(hi)) {
                    node.translation = a.lerp(*b, alpha);
                }
            }
            TrackValues::Rotation(v) => {
                if let (Some(a), Some(b)) = (v.get(lo), v.get(hi)) {
                    node.rotation = a.slerp(*b, alpha);
                }
            }
            TrackValues::Scale(v) => {
                if let (Some(a), Some(b)) = (v.get(lo), v.get(hi)) {
                    node.scale = a.lerp(*b, alpha);
                }
            }
        }
    }
}

/// Advances a clip by wall-clock deltas, looping over the clip duration, and
/// writes sampled values back into node-local transforms.
#[derive(Clone, Debug, Default)]
pub struct Mixer {
    time: f32,
}

impl Mixer {
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn advance(&mut self, dt: f32, clip: &AnimationClip, nodes: &mut [Node]) {
        if clip.duration > 0.0 {
            self.time = (self.time + dt.max(0.0)) % clip.duration;
        }
        for channel in &clip.channels {
            if let Some(node) = nodes.get_mut(channel.node) {
                channel.sample_into(self.time, node);
            }
        }
    }
}
