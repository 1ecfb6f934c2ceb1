//! Config file drives the snapshot location and photo preparation.

use dutyboard::DutyConfig;
use dutyboard::photo::prepare_upload;
use dutyboard::store::{ChecklistStore, SnapshotStore};
use dutyboard::{TaskDefinition, User};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

#[test]
fn config_points_store_at_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let snapshot = dir.path().join("store").join("checklist.json");
    std::fs::write(
        &config_path,
        format!(
            "[store]\nsnapshot_path = {:?}\n\n[logging]\nfilter = \"dutyboard=debug\"\n",
            snapshot.display().to_string()
        ),
    )
    .unwrap();

    let config = DutyConfig::from_file(&config_path).unwrap();
    assert_eq!(config.store.resolved_snapshot_path(), snapshot);
    assert_eq!(config.logging.filter, "dutyboard=debug");

    let mut store = SnapshotStore::open(config.store.resolved_snapshot_path()).unwrap();
    store
        .upsert_task(TaskDefinition::new("t", "floor", "Task").at("10:00"))
        .unwrap();
    assert!(snapshot.exists());
}

#[test]
fn profile_photo_is_resized_per_config() {
    let config: DutyConfig = toml::from_str("[photo]\nmax_dimension = 100\njpeg_quality = 60\n").unwrap();

    let img = RgbImage::from_pixel(400, 300, image::Rgb([200, 10, 10]));
    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut png, ImageFormat::Png)
        .unwrap();

    let prepared = prepare_upload(png.get_ref(), &config.photo).unwrap();
    assert_eq!((prepared.width, prepared.height), (100, 75));

    let dir = tempfile::tempdir().unwrap();
    let mut store = SnapshotStore::open(dir.path().join("checklist.json")).unwrap();
    let mut user = User::new("u1", "Ana", "floor");
    user.photo = Some(format!("photos/{}.jpg", user.id));
    store.upsert_user(user).unwrap();
    assert_eq!(
        store.users().unwrap()[0].photo.as_deref(),
        Some("photos/u1.jpg")
    );
}
