//! Media store round trips through a real temporary directory.

use gripen_integration_tests::TEST_USER;
use gripen_web::images;
use gripen_web::storage::MediaStore;

#[tokio::test]
async fn test_save_serve_delete_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path()).await.unwrap();

    let path = store.save(TEST_USER, "jpg", b"not really a jpeg").await.unwrap();
    assert!(path.starts_with("1/"));
    assert!(path.ends_with(".jpg"));

    // The stored file is addressable under the public media prefix.
    let url = MediaStore::public_url(&path);
    assert_eq!(url, format!("/media/{path}"));

    store.delete(&path).await.unwrap();
    // Deleting again is a no-op, not an error.
    store.delete(&path).await.unwrap();
}

#[tokio::test]
async fn test_traversal_paths_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path()).await.unwrap();

    assert!(store.delete("../outside.jpg").await.is_err());
    assert!(store.delete("1/../../outside.jpg").await.is_err());
}

#[test]
fn test_upload_validation_matches_accepted_formats() {
    assert!(images::validate_upload("image/jpeg", 1024).is_ok());
    assert!(images::validate_upload("image/webp", 1024).is_ok());
    assert!(images::validate_upload("application/pdf", 1024).is_err());
    assert!(images::validate_upload("image/png", 11 * 1024 * 1024).is_err());
}

#[test]
fn test_legacy_cdn_urls_get_sized_variants() {
    let original = "https://res.cloudinary.com/demo/image/upload/v123/box.jpg";
    let thumb = images::thumbnail_url(original, 200);
    assert!(thumb.contains("/upload/w_200,h_200,c_fill/"));

    // Non-CDN urls pass through untouched.
    let local = "/media/1/box.jpg";
    assert_eq!(images::thumbnail_url(local, 200), local);
}
