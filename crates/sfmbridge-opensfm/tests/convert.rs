use std::path::{Path, PathBuf};

use sfmbridge_colmap::{read_cameras_txt, read_images_txt, read_points3d_txt};
use sfmbridge_opensfm::{assemble, write_reconstruction_json, Reconstruction};

fn write_sparse_model(dir: &Path) -> std::io::Result<()> {
    std::fs::write(
        dir.join("cameras.txt"),
        "# Camera list with one line of data per camera:\n\
         #   CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS[]\n\
         1 PINHOLE 1920 1080 1000 1000 960 540\n\
         2 SIMPLE_RADIAL 640 480 500 320 240 0.01\n",
    )?;
    std::fs::write(
        dir.join("images.txt"),
        "# Image list with two lines of data per image:\n\
         5 1 0 0 0 0.5 -0.25 2 1 img_005.jpg\n\
         7 0.7071 0 0.7071 0 1 2 3 2 img_007.jpg\n\
         8 1 0 0 0 0 0 0 1 img_008.jpg\n",
    )?;
    std::fs::write(
        dir.join("points3D.txt"),
        "# 3D point list with one line of data per point:\n\
         1 0.5 -0.25 2.0 255 128 0 1.2 5 0 7 3\n\
         2 1 1 1 0 0 0 0.5 99 0 8 1\n\
         3 2 2 2 10 20 30 0.1\n",
    )?;
    Ok(())
}

fn convert(dir: &Path) -> Result<Reconstruction, Box<dyn std::error::Error>> {
    let cameras = read_cameras_txt(dir.join("cameras.txt"))?;
    let poses = read_images_txt(dir.join("images.txt"))?;
    let points = read_points3d_txt(dir.join("points3D.txt"), &poses.id_to_name)?;
    Ok(assemble(&cameras, &poses, &points))
}

#[test]
fn test_convert_sparse_model() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    write_sparse_model(dir.path())?;

    let recon = convert(dir.path())?;

    assert_eq!(recon.cameras.len(), 2);
    assert_eq!(recon.shots.len(), 3);
    assert_eq!(recon.points.len(), 3);

    // four-parameter layout passes through verbatim
    let pinhole = &recon.cameras["1"];
    assert_eq!(pinhole.focal_x, 1000.0);
    assert_eq!(pinhole.focal_y, 1000.0);
    assert_eq!(pinhole.principal_x, 960.0);
    assert_eq!(pinhole.principal_y, 540.0);

    // single-focal-length layout reads positions 0, 2 and 3
    let radial = &recon.cameras["2"];
    assert_eq!(radial.focal_x, 500.0);
    assert_eq!(radial.focal_y, 500.0);
    assert_eq!(radial.principal_x, 240.0);
    assert_eq!(radial.principal_y, 0.01);
    assert_eq!(radial.k1, 0.0);

    assert_eq!(recon.shots["img_005.jpg"].camera, "1");
    assert_eq!(recon.shots["img_007.jpg"].camera, "2");
    assert_eq!(recon.shots["img_005.jpg"].translation, [0.5, -0.25, 2.0]);

    // track of point 1 resolves both ids; point 2 loses only the dangling
    // reference to image 99; point 3 has no track at all
    assert_eq!(recon.points[0].observations.len(), 2);
    assert_eq!(recon.points[0].observations[0].shot_id, "img_005.jpg");
    assert_eq!(recon.points[0].observations[1].shot_id, "img_007.jpg");
    assert_eq!(recon.points[1].observations.len(), 1);
    assert_eq!(recon.points[1].observations[0].shot_id, "img_008.jpg");
    assert!(recon.points[2].observations.is_empty());
    Ok(())
}

#[test]
fn test_every_shot_camera_resolves() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    write_sparse_model(dir.path())?;

    let recon = convert(dir.path())?;
    for (name, shot) in &recon.shots {
        assert!(
            recon.cameras.contains_key(&shot.camera),
            "shot {} references missing camera {}",
            name,
            shot.camera
        );
    }
    for point in &recon.points {
        for obs in &point.observations {
            assert!(recon.shots.contains_key(&obs.shot_id));
        }
    }
    Ok(())
}

#[test]
fn test_written_document_is_single_element_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    write_sparse_model(dir.path())?;
    let recon = convert(dir.path())?;

    let out = dir.path().join("reconstruction.json");
    write_reconstruction_json(&out, std::slice::from_ref(&recon))?;

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
    let sequence = value.as_array().unwrap();
    assert_eq!(sequence.len(), 1);
    assert_eq!(sequence[0]["shots"]["img_007.jpg"]["camera"], "2");
    assert_eq!(
        sequence[0]["points"][0]["observations"][0]["shot_id"],
        "img_005.jpg"
    );
    Ok(())
}

#[test]
fn test_conversion_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    write_sparse_model(dir.path())?;

    let paths: Vec<PathBuf> = (0..2)
        .map(|i| dir.path().join(format!("reconstruction_{}.json", i)))
        .collect();
    for path in &paths {
        let recon = convert(dir.path())?;
        write_reconstruction_json(path, &[recon])?;
    }

    let first = std::fs::read(&paths[0])?;
    let second = std::fs::read(&paths[1])?;
    assert_eq!(first, second);
    Ok(())
}
