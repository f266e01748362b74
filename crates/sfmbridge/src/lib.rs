#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use sfmbridge_colmap as colmap;

#[doc(inline)]
pub use sfmbridge_ingest as ingest;

#[doc(inline)]
pub use sfmbridge_opensfm as opensfm;
