#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Line-oriented reading of model tables.
pub mod table;

/// Parsers for the three model tables.
pub mod text;

/// Normalized model records.
pub mod types;

pub use table::{open_table, TableRows};
pub use text::{read_cameras_txt, read_images_txt, read_points3d_txt};
pub use types::{Camera, ModelLayout, PoseTable, Shot, TrackedPoint};

/// File name of the camera table inside a sparse model directory.
pub const CAMERAS_TXT: &str = "cameras.txt";

/// File name of the registered-image table inside a sparse model directory.
pub const IMAGES_TXT: &str = "images.txt";

/// File name of the 3D point table inside a sparse model directory.
pub const POINTS3D_TXT: &str = "points3D.txt";

/// Error types for the model reader.
#[derive(Debug, thiserror::Error)]
pub enum ColmapError {
    /// A required model table does not exist.
    #[error("model table not found: {0}")]
    MissingTable(std::path::PathBuf),

    /// Error reading a model table.
    #[error("error reading model table")]
    Io(#[from] std::io::Error),
}
