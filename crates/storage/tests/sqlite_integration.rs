use chrono::NaiveDate;
use flashcards_core::model::{CardId, ProgressSnapshot};
use storage::repository::{PROGRESS_KEY, ProgressStore, Storage, StorageError};
use storage::sqlite::SqliteRepository;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn id(raw: &str) -> CardId {
    CardId::new(raw).unwrap()
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_load_without_slot_is_empty() {
    let repo = connect("memdb_empty").await;
    let snapshot = repo.load().await.expect("load");
    assert!(snapshot.is_empty());
    assert!(repo.get_slot(PROGRESS_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_roundtrip_persists_due_dates() {
    let repo = connect("memdb_roundtrip").await;

    let mut snapshot = ProgressSnapshot::new();
    snapshot
        .set_due_date(id("b"), date(2024, 1, 1))
        .set_due_date(id("a"), date(2024, 1, 5));
    repo.save(&snapshot).await.expect("save");

    let loaded = repo.load().await.expect("load");
    assert_eq!(loaded, snapshot);

    let raw = repo.get_slot(PROGRESS_KEY).await.unwrap().unwrap();
    assert_eq!(
        raw,
        r#"{"a":{"dueDate":"2024-01-05"},"b":{"dueDate":"2024-01-01"}}"#
    );
}

#[tokio::test]
async fn sqlite_save_overwrites_previous_snapshot() {
    let repo = connect("memdb_overwrite").await;

    let mut first = ProgressSnapshot::new();
    first.set_due_date(id("a"), date(2024, 1, 2));
    repo.save(&first).await.unwrap();

    let mut second = ProgressSnapshot::new();
    second.set_due_date(id("b"), date(2024, 1, 8));
    repo.save(&second).await.unwrap();

    let loaded = repo.load().await.unwrap();
    assert_eq!(loaded, second);
    assert_eq!(loaded.due_date(&id("a")), None);
}

#[tokio::test]
async fn sqlite_corrupt_slot_surfaces_error() {
    let repo = connect("memdb_corrupt").await;
    repo.put_slot(PROGRESS_KEY, "{\"a\":").await.unwrap();

    let err = repo.load().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn sqlite_migrate_is_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");

    let mut snapshot = ProgressSnapshot::new();
    snapshot.set_due_date(id("a"), date(2024, 2, 29));
    repo.save(&snapshot).await.unwrap();
    assert_eq!(repo.load().await.unwrap(), snapshot);
}

#[tokio::test]
async fn storage_sqlite_exposes_progress_store() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");

    let mut snapshot = ProgressSnapshot::new();
    snapshot.set_due_date(id("z"), date(2030, 6, 1));
    storage.progress.save(&snapshot).await.unwrap();
    assert_eq!(storage.progress.load().await.unwrap(), snapshot);
}
