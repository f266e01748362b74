use std::path::Path;

use little_exif::{exif_tag::ExifTag, filetype::FileExtension, metadata::Metadata, rational::uR64};
use serde::{Deserialize, Serialize};

/// Metadata extracted from one image file.
///
/// Every field is optional; an image without usable metadata yields an
/// empty record, which serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geotags {
    /// Focal length as recorded by the camera.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_ratio: Option<f64>,
    /// Geodetic position, present only when the file records a complete one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsPosition>,
}

/// A geodetic position in signed decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsPosition {
    /// Latitude, negative south of the equator.
    pub latitude: f64,
    /// Longitude, negative west of the prime meridian.
    pub longitude: f64,
}

/// Extract geotags from an image file.
///
/// Never fails the caller: unreadable files, foreign formats and absent or
/// truncated metadata all produce an empty record.
///
/// # Arguments
///
/// * `path` - Path to an image file (JPEG, PNG, or TIFF).
pub fn read_geotags(path: impl AsRef<Path>) -> Geotags {
    match load_metadata(path.as_ref()) {
        Some(metadata) => Geotags {
            focal_ratio: focal_ratio(&metadata),
            gps: gps_position(&metadata),
        },
        None => Geotags::default(),
    }
}

fn load_metadata(path: &Path) -> Option<Metadata> {
    // File type must be determined from extension
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let file_type = match ext.as_deref() {
        Some("jpg") | Some("jpeg") => FileExtension::JPEG,
        Some("tif") | Some("tiff") => FileExtension::TIFF,
        Some("png") => FileExtension::PNG {
            as_zTXt_chunk: false,
        },
        _ => return None,
    };

    let buffer = std::fs::read(path).ok()?;
    Metadata::new_from_vec(&buffer, file_type).ok()
}

fn focal_ratio(metadata: &Metadata) -> Option<f64> {
    metadata
        .get_tag(&ExifTag::FocalLength(Vec::new()))
        .into_iter()
        .find_map(|tag| {
            if let ExifTag::FocalLength(values) = tag {
                values.first().and_then(ratio)
            } else {
                None
            }
        })
}

fn gps_position(metadata: &Metadata) -> Option<GpsPosition> {
    let mut latitude = metadata
        .get_tag(&ExifTag::GPSLatitude(Vec::new()))
        .into_iter()
        .find_map(|tag| {
            if let ExifTag::GPSLatitude(values) = tag {
                dms_to_degrees(values)
            } else {
                None
            }
        })?;
    let mut longitude = metadata
        .get_tag(&ExifTag::GPSLongitude(Vec::new()))
        .into_iter()
        .find_map(|tag| {
            if let ExifTag::GPSLongitude(values) = tag {
                dms_to_degrees(values)
            } else {
                None
            }
        })?;

    if hemisphere(metadata, &ExifTag::GPSLatitudeRef(String::new())) == Some('S') {
        latitude = -latitude;
    }
    if hemisphere(metadata, &ExifTag::GPSLongitudeRef(String::new())) == Some('W') {
        longitude = -longitude;
    }

    Some(GpsPosition {
        latitude,
        longitude,
    })
}

/// Reads a hemisphere reference tag down to its letter.
fn hemisphere(metadata: &Metadata, query: &ExifTag) -> Option<char> {
    metadata.get_tag(query).into_iter().find_map(|tag| {
        let value = match tag {
            ExifTag::GPSLatitudeRef(value) => value,
            ExifTag::GPSLongitudeRef(value) => value,
            _ => return None,
        };
        value.trim_end_matches('\0').trim().chars().next()
    })
}

/// Converts a degrees/minutes/seconds rational triple to decimal degrees.
fn dms_to_degrees(values: &[uR64]) -> Option<f64> {
    if values.len() < 3 {
        return None;
    }
    let degrees = ratio(&values[0])?;
    let minutes = ratio(&values[1])?;
    let seconds = ratio(&values[2])?;
    Some(degrees + minutes / 60.0 + seconds / 3600.0)
}

fn ratio(value: &uR64) -> Option<f64> {
    if value.denominator == 0 {
        return None;
    }
    Some(value.nominator as f64 / value.denominator as f64)
}
