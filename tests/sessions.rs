//! Session persistence through the file-backed store

use std::fs;

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use snake_arcade::config::{MAX_HIGH_SCORES, SESSIONS_KEY};
use snake_arcade::session::{BlobStore, FileStore, SessionStore};

#[test]
fn test_sessions_survive_reopen() {
    let dir = tempdir().unwrap();
    let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    let (id, original) = {
        let mut store = SessionStore::load(FileStore::open(dir.path()).unwrap());
        let id = store.create_session_at(t0).unwrap();
        store.submit_score_at(&id, 40, 3, t0).unwrap();
        store.submit_score_at(&id, 70, 4, t0).unwrap();
        (id.clone(), store.session(&id).unwrap().clone())
    };

    let reopened = SessionStore::load(FileStore::open(dir.path()).unwrap());
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.session(&id), Some(&original));
    let scores: Vec<u32> = original.scores.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![70, 40]);
}

#[test]
fn test_document_layout() {
    let dir = tempdir().unwrap();
    let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let mut store = SessionStore::load(FileStore::open(dir.path()).unwrap());
    let id = store.create_session_at(t0).unwrap();
    store.submit_score_at(&id, 12, 2, t0).unwrap();

    let path = dir.path().join(format!("{SESSIONS_KEY}.json"));
    let text = fs::read_to_string(path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

    let session = &doc[id.as_str()];
    assert_eq!(session["id"], id.as_str());
    assert_eq!(session["startTime"], "2025-03-01T12:00:00Z");
    assert_eq!(session["scores"][0]["score"], 12);
    assert_eq!(session["scores"][0]["level"], 2);
    assert_eq!(session["scores"][0]["timestamp"], t0.timestamp_millis());
    assert!(session["scores"][0]["date"].is_string());
}

#[test]
fn test_corrupt_file_starts_fresh() {
    let dir = tempdir().unwrap();
    let mut blob = FileStore::open(dir.path()).unwrap();
    blob.set(SESSIONS_KEY, "[1, 2").unwrap();

    let store = SessionStore::load(FileStore::open(dir.path()).unwrap());
    assert_eq!(store.len(), 1);
    let current = store.current_session().unwrap();
    assert!(current.scores.is_empty());

    // The fresh session replaced the broken document
    let text = blob.get(SESSIONS_KEY).unwrap().unwrap();
    assert!(text.contains(&current.id));
}

#[test]
fn test_score_table_is_capped() {
    let dir = tempdir().unwrap();
    let mut store = SessionStore::load(FileStore::open(dir.path()).unwrap());
    let id = store.current_id().to_string();
    for score in 0..25 {
        store.submit_score(&id, score * 3, 1).unwrap();
    }

    let reopened = SessionStore::load(FileStore::open(dir.path()).unwrap());
    let scores = &reopened.session(&id).unwrap().scores;
    assert_eq!(scores.len(), MAX_HIGH_SCORES);
    assert_eq!(scores[0].score, 72);
    assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_missing_directory_is_created() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("saves").join("snake");
    let store = SessionStore::load(FileStore::open(&nested).unwrap());
    assert_eq!(store.len(), 1);
    assert!(nested.join(format!("{SESSIONS_KEY}.json")).exists());
}
