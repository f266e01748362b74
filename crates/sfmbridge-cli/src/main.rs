use argh::FromArgs;
use std::path::PathBuf;

use sfmbridge::{colmap, ingest, opensfm};

#[derive(FromArgs)]
/// Convert a COLMAP sparse text model into an OpenSfM project layout
struct Args {
    /// path to the sparse model directory holding cameras.txt, images.txt and points3D.txt
    #[argh(option)]
    colmap: PathBuf,

    /// path to the directory of source images
    #[argh(option)]
    images: PathBuf,

    /// task identifier; the project is created under <out-root>/<task>/opensfm
    #[argh(option)]
    task: String,

    /// root of the media tree
    #[argh(option, default = "PathBuf::from(\"/webodm/app/media\")")]
    out_root: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    run(argh::from_env())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let opensfm_dir = args.out_root.join(&args.task).join("opensfm");
    std::fs::create_dir_all(&opensfm_dir)?;

    // read the three model tables; poses come before points so that the
    // observation tracks can be resolved to image names
    let cameras = colmap::read_cameras_txt(args.colmap.join(colmap::CAMERAS_TXT))?;
    let poses = colmap::read_images_txt(args.colmap.join(colmap::IMAGES_TXT))?;
    let points =
        colmap::read_points3d_txt(args.colmap.join(colmap::POINTS3D_TXT), &poses.id_to_name)?;
    log::info!(
        "read {} cameras, {} shots, {} points",
        cameras.len(),
        poses.shots.len(),
        points.len()
    );

    // mirror the images and their geotag sidecars into the project
    let staged = ingest::stage_images(
        &args.images,
        opensfm_dir.join("images"),
        opensfm_dir.join("exif"),
    )?;
    if staged == 0 {
        return Err(format!("no images staged from {}", args.images.display()).into());
    }
    log::info!("staged {} images", staged);

    let reconstruction = opensfm::assemble(&cameras, &poses, &points);
    opensfm::write_reconstruction_json(
        opensfm_dir.join(opensfm::RECONSTRUCTION_JSON),
        &[reconstruction],
    )?;

    log::info!("✅ OpenSfM project ready at {}", opensfm_dir.display());
    Ok(())
}
