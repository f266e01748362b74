use std::{collections::HashMap, path::Path};

use crate::{
    table::open_table,
    types::{Camera, ModelLayout, PoseTable, Shot, TrackedPoint},
    ColmapError,
};

/// Read the camera table and return the normalized cameras keyed by id.
///
/// # Arguments
///
/// * `path` - The path to the `cameras.txt` file.
///
/// # Returns
///
/// Normalized cameras keyed by their source-assigned id. A duplicate id
/// overwrites the earlier entry; malformed rows are skipped.
pub fn read_cameras_txt(path: impl AsRef<Path>) -> Result<HashMap<u32, Camera>, ColmapError> {
    let mut cameras = HashMap::new();
    for row in open_table(path)? {
        let row = row?;
        match parse_camera_row(&row) {
            Some((camera_id, camera)) => {
                cameras.insert(camera_id, camera);
            }
            None => log::debug!("skipping malformed camera row: {}", row),
        }
    }
    Ok(cameras)
}

/// Read the registered-image table and return the shot poses together with
/// the id→name lookup.
///
/// Exactly one record per line is expected; rows with fewer than 10 tokens
/// and rows whose fixed fields do not parse are skipped, which also lets
/// two-line exports through by dropping their keypoint lines. Tokens past
/// the image name are ignored.
///
/// # Arguments
///
/// * `path` - The path to the `images.txt` file.
///
/// # Returns
///
/// A [`PoseTable`] with shots keyed by file name (a repeated name keeps the
/// later record) and the numeric-id lookup for track resolution.
pub fn read_images_txt(path: impl AsRef<Path>) -> Result<PoseTable, ColmapError> {
    let mut table = PoseTable::default();
    for row in open_table(path)? {
        let row = row?;
        match parse_pose_row(&row) {
            Some((image_id, name, shot)) => {
                table.id_to_name.insert(image_id, name.clone());
                table.shots.insert(name, shot);
            }
            None => log::debug!("skipping non-pose row: {}", row),
        }
    }
    Ok(table)
}

/// Read the 3D point table, resolving every observation track through the
/// id→name lookup built from the registered-image table.
///
/// # Arguments
///
/// * `path` - The path to the `points3D.txt` file.
/// * `id_to_name` - The complete lookup from [`read_images_txt`]. A track
///   entry whose image id is absent drops that single observation; the
///   point itself is always kept.
///
/// # Returns
///
/// One point per well-formed row, in input order.
pub fn read_points3d_txt(
    path: impl AsRef<Path>,
    id_to_name: &HashMap<u32, String>,
) -> Result<Vec<TrackedPoint>, ColmapError> {
    let mut points = Vec::new();
    for row in open_table(path)? {
        let row = row?;
        match parse_point_row(&row, id_to_name) {
            Some(point) => points.push(point),
            None => log::debug!("skipping malformed point row: {}", row),
        }
    }
    Ok(points)
}

/// Parses one token, yielding `None` when it does not fit the target type.
fn parse_part<T: std::str::FromStr>(s: &str) -> Option<T> {
    s.parse::<T>().ok()
}

/// Parse a camera row into a normalized [`Camera`].
/// NOTE: CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS[0], PARAMS[1], ...
fn parse_camera_row(row: &str) -> Option<(u32, Camera)> {
    // split the row into parts by whitespace
    let parts = row.split_whitespace().collect::<Vec<_>>();

    // both layouts read parameter positions 0 through 3
    if parts.len() < 8 {
        return None;
    }

    let camera_id = parse_part::<u32>(parts[0])?;
    let width = parse_part::<u32>(parts[2])?;
    let height = parse_part::<u32>(parts[3])?;
    if width == 0 || height == 0 {
        return None;
    }

    let params = parts[4..]
        .iter()
        .map(|s| parse_part::<f64>(s))
        .collect::<Option<Vec<_>>>()?;

    let (fx, fy, cx, cy) = match ModelLayout::from_tag(parts[1]) {
        ModelLayout::FourParameter => (params[0], params[1], params[2], params[3]),
        // shared focal length first, principal point in the third and
        // fourth slots; parameters past position 3 never carry over
        ModelLayout::Isotropic => (params[0], params[0], params[2], params[3]),
    };

    Some((
        camera_id,
        Camera {
            width,
            height,
            fx,
            fy,
            cx,
            cy,
            k1: 0.0,
            k2: 0.0,
            p1: 0.0,
            p2: 0.0,
        },
    ))
}

/// Parse a registered-image row.
/// NOTE: IMAGE_ID, QW, QX, QY, QZ, TX, TY, TZ, CAMERA_ID, NAME
fn parse_pose_row(row: &str) -> Option<(u32, String, Shot)> {
    // split the row into parts by whitespace
    let parts = row.split_whitespace().collect::<Vec<_>>();

    if parts.len() < 10 {
        return None;
    }

    let image_id = parse_part::<u32>(parts[0])?;
    let rotation: [f64; 4] = parts[1..5]
        .iter()
        .map(|s| parse_part(s))
        .collect::<Option<Vec<_>>>()?
        .try_into()
        .ok()?;
    let translation: [f64; 3] = parts[5..8]
        .iter()
        .map(|s| parse_part(s))
        .collect::<Option<Vec<_>>>()?
        .try_into()
        .ok()?;
    let camera_id = parse_part::<u32>(parts[8])?;
    let name = parts[9].to_string();

    Some((
        image_id,
        name,
        Shot {
            camera_id,
            rotation,
            translation,
        },
    ))
}

/// Parse a 3D point row, resolving its track to shot names.
/// NOTE: POINT3D_ID, X, Y, Z, R, G, B, ERROR, TRACK[] as (IMAGE_ID, POINT2D_IDX)
fn parse_point_row(row: &str, id_to_name: &HashMap<u32, String>) -> Option<TrackedPoint> {
    // split the row into parts by whitespace
    let parts = row.split_whitespace().collect::<Vec<_>>();

    if parts.len() < 8 {
        return None;
    }

    // the point id (parts[0]) and reprojection error (parts[7]) are opaque
    let xyz: [f64; 3] = parts[1..4]
        .iter()
        .map(|s| parse_part(s))
        .collect::<Option<Vec<_>>>()?
        .try_into()
        .ok()?;
    let rgb: [u8; 3] = parts[4..7]
        .iter()
        .map(|s| parse_part(s))
        .collect::<Option<Vec<_>>>()?
        .try_into()
        .ok()?;

    let observations = parts[8..]
        .chunks_exact(2)
        .filter_map(|pair| {
            let image_id = parse_part::<u32>(pair[0])?;
            // the keypoint index (pair[1]) is dropped by the target schema
            id_to_name.get(&image_id).cloned()
        })
        .collect();

    Some(TrackedPoint {
        xyz,
        rgb,
        observations,
    })
}
