use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::BufWriter,
    path::Path,
};

use sfmbridge_colmap::{self as colmap, PoseTable, TrackedPoint};

use crate::{
    schema::{Camera, Observation, Point, Reconstruction, Shot},
    OpenSfmError,
};

/// Assemble a reconstruction document from the parsed model tables.
///
/// Camera ids become string keys, shots reference their camera by that key
/// and point tracks become observation lists. A shot whose camera id has no
/// entry in the camera map is dropped with a warning, together with any
/// observations pointing at it, so the result never contains a dangling
/// reference.
///
/// # Arguments
///
/// * `cameras` - Normalized cameras keyed by source id.
/// * `poses` - Shot poses keyed by image file name.
/// * `points` - The resolved sparse cloud.
///
/// # Returns
///
/// A [`Reconstruction`] ready for serialization.
pub fn assemble(
    cameras: &HashMap<u32, colmap::Camera>,
    poses: &PoseTable,
    points: &[TrackedPoint],
) -> Reconstruction {
    let cameras_out = cameras
        .iter()
        .map(|(camera_id, camera)| {
            (
                camera_id.to_string(),
                Camera {
                    width: camera.width,
                    height: camera.height,
                    focal_x: camera.fx,
                    focal_y: camera.fy,
                    principal_x: camera.cx,
                    principal_y: camera.cy,
                    k1: camera.k1,
                    k2: camera.k2,
                    p1: camera.p1,
                    p2: camera.p2,
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

    let mut shots_out = BTreeMap::new();
    for (name, shot) in &poses.shots {
        if !cameras.contains_key(&shot.camera_id) {
            log::warn!(
                "dropping shot {} with unknown camera id {}",
                name,
                shot.camera_id
            );
            continue;
        }
        shots_out.insert(
            name.clone(),
            Shot {
                camera: shot.camera_id.to_string(),
                rotation: shot.rotation,
                translation: shot.translation,
            },
        );
    }

    let points_out = points
        .iter()
        .map(|point| Point {
            coordinates: point.xyz,
            color: point.rgb,
            observations: point
                .observations
                .iter()
                .filter(|name| shots_out.contains_key(*name))
                .map(|name| Observation {
                    shot_id: name.clone(),
                })
                .collect(),
        })
        .collect();

    Reconstruction {
        cameras: cameras_out,
        shots: shots_out,
        points: points_out,
    }
}

/// Serialize reconstructions to a document at the given path.
///
/// The file is created or truncated. Output is compact, with map keys in
/// sorted order, so converting the same model twice produces identical
/// bytes.
///
/// # Arguments
///
/// * `path` - Destination path, conventionally `reconstruction.json`.
/// * `reconstructions` - The document sequence, one element per model.
pub fn write_reconstruction_json(
    path: impl AsRef<Path>,
    reconstructions: &[Reconstruction],
) -> Result<(), OpenSfmError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, reconstructions)?;
    Ok(())
}
