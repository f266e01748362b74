use std::collections::{BTreeMap, HashMap};

/// Parameter layout of a source camera model tag.
///
/// The source toolkit writes `fx fy cx cy ...` for pinhole-family models and
/// leads every other model with a single shared focal length. Tags that are
/// not recognized fall back to the isotropic interpretation, so no camera
/// row is ever rejected for its model name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLayout {
    /// Leading parameters are `fx fy cx cy`.
    FourParameter,
    /// A single shared focal length at parameter position 0 and the
    /// principal point at positions 2 and 3.
    Isotropic,
}

impl ModelLayout {
    /// Classifies a model tag.
    pub fn from_tag(tag: &str) -> Self {
        if tag.starts_with("PINHOLE") {
            Self::FourParameter
        } else {
            // known single-focal-length models and unknown tags alike
            Self::Isotropic
        }
    }
}

/// A camera normalized to the pinhole-equivalent parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Focal length along x, in pixels.
    pub fx: f64,
    /// Focal length along y, in pixels.
    pub fy: f64,
    /// Principal point x, in pixels.
    pub cx: f64,
    /// Principal point y, in pixels.
    pub cy: f64,
    /// First radial distortion coefficient.
    pub k1: f64,
    /// Second radial distortion coefficient.
    pub k2: f64,
    /// First tangential distortion coefficient.
    pub p1: f64,
    /// Second tangential distortion coefficient.
    pub p2: f64,
}

/// A registered image pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    /// Id of the owning camera.
    pub camera_id: u32,
    /// Orientation as a unit quaternion `w, x, y, z`, passed through
    /// without re-normalization.
    pub rotation: [f64; 4],
    /// Translation `x, y, z`.
    pub translation: [f64; 3],
}

/// The two outputs of the registered-image table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseTable {
    /// Shot poses keyed by image file name. A repeated name overwrites the
    /// earlier record.
    pub shots: BTreeMap<String, Shot>,
    /// Lookup from the source's numeric image id to the file name. Built
    /// completely before any observation track is resolved.
    pub id_to_name: HashMap<u32, String>,
}

/// A triangulated point with its resolved observation track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedPoint {
    /// `x, y, z` coordinates.
    pub xyz: [f64; 3],
    /// `r, g, b` color.
    pub rgb: [u8; 3],
    /// File names of the shots that observed this point. Duplicates are
    /// preserved and the list may be empty.
    pub observations: Vec<String>,
}
