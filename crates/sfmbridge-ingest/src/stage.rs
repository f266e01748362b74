use std::{
    fs,
    io::BufWriter,
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use rayon::prelude::*;

use crate::{geotag::read_geotags, IngestError};

/// Mirror the files of a source directory into the staging directory and
/// write one geotag sidecar per staged image.
///
/// Each file is hard linked when the filesystem allows it and copied
/// otherwise. The sidecar is named after the file stem, `IMG_0042.JPG`
/// producing `IMG_0042.json`. Files are processed in parallel; a file that
/// cannot be staged is logged and skipped without failing the run.
///
/// # Arguments
///
/// * `src_dir` - Directory whose files are mirrored. Nested directories
///   are not descended into.
/// * `images_dir` - Destination for the image files, created if absent.
/// * `exif_dir` - Destination for the sidecars, created if absent.
///
/// # Returns
///
/// The number of files fully staged.
pub fn stage_images(
    src_dir: impl AsRef<Path>,
    images_dir: impl AsRef<Path>,
    exif_dir: impl AsRef<Path>,
) -> Result<usize, IngestError> {
    let images_dir = images_dir.as_ref();
    let exif_dir = exif_dir.as_ref();
    fs::create_dir_all(images_dir)?;
    fs::create_dir_all(exif_dir)?;

    // Walk the source directory and collect its own files
    let sources = walkdir::WalkDir::new(src_dir.as_ref())
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .collect::<Vec<_>>();

    let staged = AtomicUsize::new(0);
    sources.into_par_iter().for_each(|entry| {
        match stage_one(&entry, images_dir, exif_dir) {
            Ok(()) => {
                staged.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => log::warn!("skipping {}: {}", entry.path().display(), e),
        }
    });

    Ok(staged.load(Ordering::Relaxed))
}

fn stage_one(
    entry: &walkdir::DirEntry,
    images_dir: &Path,
    exif_dir: &Path,
) -> Result<(), IngestError> {
    let src = entry.path();
    let dst = images_dir.join(entry.file_name());

    // remove any stale destination first: copying onto a live hard link of
    // the source would truncate both
    match fs::remove_file(&dst) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    if let Err(e) = fs::hard_link(src, &dst) {
        log::debug!("hard link failed for {} ({}), copying", src.display(), e);
        fs::copy(src, &dst)?;
    }

    let mut sidecar_name = src
        .file_stem()
        .unwrap_or_else(|| entry.file_name())
        .to_os_string();
    sidecar_name.push(".json");
    let sidecar = BufWriter::new(fs::File::create(exif_dir.join(sidecar_name))?);
    serde_json::to_writer(sidecar, &read_geotags(src))?;
    Ok(())
}
