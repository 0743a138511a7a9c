use std::path::PathBuf;

use catalog::{CatalogError, EntryRepository, JsonBundle};
use quiz_core::model::Region;

async fn bundle_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flag-quiz-{name}-{}", std::process::id()));
    let _ = tokio::fs::remove_dir_all(&dir).await;
    tokio::fs::create_dir_all(&dir).await.unwrap();
    dir
}

#[tokio::test]
async fn loads_region_file_from_disk() {
    let dir = bundle_dir("single").await;
    tokio::fs::write(
        dir.join("north_america.json"),
        r#"{ "North America": { "Canada": "🇨🇦", "Mexico": "🇲🇽", "Cuba": "🇨🇺" } }"#,
    )
    .await
    .unwrap();

    let bundle = JsonBundle::new(&dir);
    let pool = bundle.load_pool(Region::NorthAmerica).await.unwrap();
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.get("Canada").unwrap().glyph(), "🇨🇦");

    let err = bundle.load_pool(Region::Asia).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(Region::Asia)));

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn whole_world_skips_missing_files() {
    let dir = bundle_dir("world").await;
    tokio::fs::write(
        dir.join("europe.json"),
        r#"{ "Europe": { "Norway": "🇳🇴", "Russia": "🇷🇺" } }"#,
    )
    .await
    .unwrap();
    tokio::fs::write(
        dir.join("asia.json"),
        r#"{ "Asia": { "Russia": "🇷🇺", "Nepal": "🇳🇵" } }"#,
    )
    .await
    .unwrap();

    let pool = JsonBundle::new(&dir)
        .load_pool(Region::WholeWorld)
        .await
        .unwrap();
    assert_eq!(pool.len(), 3);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn malformed_file_fails_whole_world() {
    let dir = bundle_dir("broken").await;
    tokio::fs::write(dir.join("africa.json"), "[1, 2, 3]")
        .await
        .unwrap();

    let err = JsonBundle::new(&dir)
        .load_pool(Region::WholeWorld)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Json(_)));

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
