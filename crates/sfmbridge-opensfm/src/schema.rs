use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A complete reconstruction: cameras, posed shots and the sparse cloud.
///
/// The document on disk is a sequence of these; a converted model always
/// produces exactly one element. Maps are ordered so that serializing the
/// same model twice yields byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Camera models keyed by their stringified source id.
    pub cameras: BTreeMap<String, Camera>,
    /// Posed shots keyed by image file name.
    pub shots: BTreeMap<String, Shot>,
    /// The sparse point cloud.
    pub points: Vec<Point>,
}

/// A perspective camera model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Sensor width in pixels.
    pub width: u32,
    /// Sensor height in pixels.
    pub height: u32,
    /// Focal length along x in pixels.
    pub focal_x: f64,
    /// Focal length along y in pixels.
    pub focal_y: f64,
    /// Principal point x coordinate.
    pub principal_x: f64,
    /// Principal point y coordinate.
    pub principal_y: f64,
    /// First radial distortion coefficient.
    pub k1: f64,
    /// Second radial distortion coefficient.
    pub k2: f64,
    /// First tangential distortion coefficient.
    pub p1: f64,
    /// Second tangential distortion coefficient.
    pub p2: f64,
}

/// A posed shot referencing its camera by stringified id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Key of the camera this shot was taken with.
    pub camera: String,
    /// World-to-camera rotation as a `[w, x, y, z]` quaternion.
    pub rotation: [f64; 4],
    /// World-to-camera translation vector.
    pub translation: [f64; 3],
}

/// A reconstructed 3D point with its resolved observation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// World coordinates of the point.
    pub coordinates: [f64; 3],
    /// RGB color of the point.
    pub color: [u8; 3],
    /// Shots this point was observed in, duplicates preserved.
    pub observations: Vec<Observation>,
}

/// A single point-in-shot incidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// File name of the observing shot.
    pub shot_id: String,
}
