use reel_scout::models::VideoRecord;
use reel_scout::services::csv_backup::save_to_csv;
use reel_scout::services::keywords::KeywordStore;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

fn record(id: &str, views: u64) -> VideoRecord {
    VideoRecord {
        video_id: id.to_string(),
        title: format!("Title, with \"quotes\" {id}"),
        url: format!("https://www.youtube.com/watch?v={id}"),
        views,
        duration_minutes: 10.5,
        score: 61.2,
        ..Default::default()
    }
}

#[test]
fn csv_backup_writes_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let csv_dir = dir.path().join("output").join("csv");

    let path = save_to_csv(&[record("a", 10), record("b", 20)], &csv_dir, "discovery").unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("discovery_"));
    assert!(name.ends_with(".csv"));

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "video_id");
    assert!(headers.iter().any(|h| h == "score"));

    let rows: Vec<VideoRecord> = reader.deserialize().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Title, with \"quotes\" a");
    assert_eq!(rows[1].views, 20);
    assert_eq!(rows[1].has_script, None);
}

#[test]
fn csv_backup_skips_empty_input() {
    let dir = TempDir::new().unwrap();
    let csv_dir = dir.path().join("csv");

    let path = save_to_csv(&[], &csv_dir, "processed").unwrap();

    assert_eq!(path, csv_dir);
    assert!(!csv_dir.exists());
}

#[test]
fn keywords_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config").join("keywords.json");

    let mut categories = BTreeMap::new();
    categories.insert("automation".to_string(), vec!["n8n tutorial".to_string()]);
    categories.insert(
        "ai_tools".to_string(),
        vec!["claude projects".to_string(), "notion ai".to_string()],
    );
    let store = KeywordStore::new(categories);
    store.save(&path).unwrap();

    let loaded = KeywordStore::load(&path).unwrap();
    assert_eq!(loaded, store);
    assert_eq!(loaded.categories(), vec!["ai_tools", "automation"]);
    assert_eq!(
        loaded.all_keywords(),
        vec!["claude projects", "notion ai", "n8n tutorial"]
    );
}

#[test]
fn keywords_fall_back_to_builtin() {
    let dir = TempDir::new().unwrap();
    let loaded = KeywordStore::load(&dir.path().join("missing.json")).unwrap();
    assert_eq!(loaded, KeywordStore::builtin());
}

#[test]
fn keywords_reject_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keywords.json");
    fs::write(&path, "[\"not\", \"a\", \"map\"]").unwrap();
    assert!(KeywordStore::load(&path).is_err());
}
