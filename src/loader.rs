//! Async model fetch + glTF parse into [`crate::core::model`] data.
//!
//! Only GLB-embedded buffers are supported; the one asset this crate loads is
//! a self-contained binary glTF. External buffer URIs fail the load.

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::core::model::{
    AnimationClip, Channel, Interpolation, Mesh, ModelData, Node, Primitive, TrackValues,
};
use glam::{Quat, Vec3};

pub async fn load_model(url: &str) -> anyhow::Result<ModelData> {
    let bytes = fetch_bytes(url).await?;
    parse_model(&bytes)
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {e:?}"))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {url}: not a Response: {e:?}"))?;
    if !resp.ok() {
        return Err(anyhow::anyhow!("fetch {url}: HTTP {}", resp.status()));
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("array_buffer: {e:?}"))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("array_buffer await: {e:?}"))?;
    Ok(Uint8Array::new(&buf).to_vec())
}

pub fn parse_model(bytes: &[u8]) -> anyhow::Result<ModelData> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let buffers = collect_buffers(&gltf)?;

    let meshes: Vec<Mesh> = gltf
        .meshes()
        .map(|mesh| {
            let primitives = mesh
                .primitives()
                .filter_map(|p| read_primitive(&p, &buffers))
                .collect();
            Mesh::new(primitives)
        })
        .collect();

    // Flatten the default scene's node hierarchy depth-first so parents
    // precede children, remembering where each glTF node landed.
    let mut nodes = Vec::new();
    let mut index_map: Vec<Option<usize>> = vec![None; gltf.nodes().len()];
    if let Some(scene) = gltf.default_scene().or_else(|| gltf.scenes().next()) {
        for root in scene.nodes() {
            flatten_node(&root, None, &mut nodes, &mut index_map);
        }
    }

    let clip = gltf
        .animations()
        .next()
        .and_then(|a| read_clip(&a, &buffers, &index_map));

    Ok(ModelData {
        nodes,
        meshes,
        clip,
    })
}

fn collect_buffers(gltf: &gltf::Gltf) -> anyhow::Result<Vec<Vec<u8>>> {
    let mut buffers = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("GLB missing embedded buffer"))?;
                buffers.push(blob.clone());
            }
            gltf::buffer::Source::Uri(uri) => {
                return Err(anyhow::anyhow!("external buffer URI unsupported: {uri}"));
            }
        }
    }
    Ok(buffers)
}

fn flatten_node(
    node: &gltf::Node,
    parent: Option<usize>,
    nodes: &mut Vec<Node>,
    index_map: &mut [Option<usize>],
) {
    let (translation, rotation, scale) = node.transform().decomposed();
    let index = nodes.len();
    nodes.push(Node {
        parent,
        translation: Vec3::from_array(translation),
        rotation: Quat::from_xyzw(rotation[0], rotation[1], rotation[2], rotation[3]),
        scale: Vec3::from_array(scale),
        mesh: node.mesh().map(|m| m.index()),
    });
    index_map[node.index()] = Some(index);
    for child in node.children() {
        flatten_node(&child, Some(index), nodes, index_map);
    }
}

fn read_primitive(primitive: &gltf::Primitive, buffers: &[Vec<u8>]) -> Option<Primitive> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.as_slice()));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    if positions.is_empty() {
        return None;
    }

    let indices: Vec<u32> = reader
        .read_indices()
        .map(|iter| iter.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(iter) => iter.collect(),
        None => face_normals(&positions, &indices),
    };

    let base_color = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();

    Some(Primitive {
        positions,
        normals,
        indices,
        base_color,
    })
}

/// Area-weighted vertex normals for assets that ship without them.
fn face_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let a = Vec3::from_array(positions[i0]);
        let b = Vec3::from_array(positions[i1]);
        let c = Vec3::from_array(positions[i2]);
        let n = (b - a).cross(c - a);
        acc[i0] += n;
        acc[i1] += n;
        acc[i2] += n;
    }
    acc.into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}

fn read_clip(
    animation: &gltf::Animation,
    buffers: &[Vec<u8>],
    index_map: &[Option<usize>],
) -> Option<AnimationClip> {
    let mut channels = Vec::new();
    let mut duration: f32 = 0.0;

    for channel in animation.channels() {
        let Some(node) = index_map
            .get(channel.target().node().index())
            .copied()
            .flatten()
        else {
            continue;
        };
        let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|d| d.as_slice()));
        let Some(times) = reader.read_inputs().map(|i| i.collect::<Vec<f32>>()) else {
            continue;
        };
        if let Some(&last) = times.last() {
            duration = duration.max(last);
        }
        let Some(outputs) = reader.read_outputs() else {
            continue;
        };

        let interpolation = channel.sampler().interpolation();
        // Cubic-spline output carries [in-tangent, value, out-tangent] per
        // keyframe; keep the value element and fall back to linear blending.
        let cubic = interpolation == gltf::animation::Interpolation::CubicSpline;
        let values = match outputs {
            gltf::animation::util::ReadOutputs::Translations(iter) => {
                TrackValues::Translation(pick_values(iter.map(Vec3::from_array), cubic))
            }
            gltf::animation::util::ReadOutputs::Rotations(iter) => TrackValues::Rotation(
                pick_values(
                    iter.into_f32()
                        .map(|r| Quat::from_xyzw(r[0], r[1], r[2], r[3])),
                    cubic,
                ),
            ),
            gltf::animation::util::ReadOutputs::Scales(iter) => {
                TrackValues::Scale(pick_values(iter.map(Vec3::from_array), cubic))
            }
            gltf::animation::util::ReadOutputs::MorphTargetWeights(_) => continue,
        };

        channels.push(Channel {
            node,
            times,
            values,
            interpolation: match interpolation {
                gltf::animation::Interpolation::Step => Interpolation::Step,
                _ => Interpolation::Linear,
            },
        });
    }

    if channels.is_empty() {
        None
    } else {
        Some(AnimationClip { channels, duration })
    }
}

fn pick_values<T>(iter: impl Iterator<Item = T>, cubic: bool) -> Vec<T> {
    if cubic {
        iter.enumerate()
            .filter(|(i, _)| i % 3 == 1)
            .map(|(_, v)| v)
            .collect()
    } else {
        iter.collect()
    }
}
