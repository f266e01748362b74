#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Geotag extraction from image metadata.
pub mod geotag;

/// Image staging into a project layout.
pub mod stage;

pub use geotag::{read_geotags, Geotags, GpsPosition};
pub use stage::stage_images;

/// Error types for image ingestion.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Error staging an image file.
    #[error("error staging image file")]
    Io(#[from] std::io::Error),

    /// Error writing a metadata sidecar.
    #[error("error writing metadata sidecar")]
    Json(#[from] serde_json::Error),
}
