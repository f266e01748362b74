#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Reconstruction assembly from parsed model tables.
pub mod assemble;

/// Serializable reconstruction document types.
pub mod schema;

pub use assemble::{assemble, write_reconstruction_json};
pub use schema::{Camera, Observation, Point, Reconstruction, Shot};

/// File name of the reconstruction document inside an OpenSfM project.
pub const RECONSTRUCTION_JSON: &str = "reconstruction.json";

/// Error types for reconstruction assembly and serialization.
#[derive(Debug, thiserror::Error)]
pub enum OpenSfmError {
    /// Error writing the reconstruction document.
    #[error("error writing reconstruction document")]
    Io(#[from] std::io::Error),

    /// Error serializing the reconstruction document.
    #[error("error serializing reconstruction document")]
    Json(#[from] serde_json::Error),
}
