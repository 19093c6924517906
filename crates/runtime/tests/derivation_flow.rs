use std::sync::Arc;
use std::time::Duration;

use sheet_core::{
    Abilities, CharacterSheet, ItemId, Pool, RecordId, RestKind, SheetConfig, SheetRecord,
    StoredItem,
};
use sheet_runtime::{
    BatchTicket, InMemoryDocumentStore, Notice, RuntimeConfig, RuntimeError, SheetRuntime,
};
use tokio::sync::broadcast::error::TryRecvError;

fn hero(items: Vec<StoredItem>) -> SheetRecord {
    let sheet = CharacterSheet {
        abilities: Abilities::new(0, 0, 0, 0, 0, 0),
        hit_points: Pool::new(4, 8),
        wounds: Pool::new(10, 10),
        ..CharacterSheet::default()
    };
    SheetRecord::character("hero", sheet).with_items(items)
}

fn hero_id() -> RecordId {
    RecordId::new("hero")
}

async fn runtime_with(
    store: Arc<InMemoryDocumentStore>,
    watch_changes: bool,
) -> SheetRuntime {
    SheetRuntime::builder()
        .config(RuntimeConfig {
            watch_changes,
            ..RuntimeConfig::default()
        })
        .store(store)
        .sheet_config(Arc::new(SheetConfig::default()))
        .build()
        .await
        .expect("runtime should build")
}

fn stored_item(store: &InMemoryDocumentStore, item: &str) -> StoredItem {
    store
        .get(&hero_id())
        .unwrap()
        .unwrap()
        .item(&ItemId::new(item))
        .cloned()
        .unwrap()
}

#[tokio::test]
async fn first_pass_writes_and_second_pass_is_settled() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store
        .insert(hero(vec![StoredItem::new("rope", 2, 1.0)]))
        .unwrap();
    let runtime = runtime_with(Arc::clone(&store), false).await;

    let report = runtime.derive(&hero_id()).await.unwrap();
    assert_eq!(report.derivation.patches.len(), 1);
    report.batch.wait().await.unwrap();

    let rope = stored_item(&store, "rope");
    assert_eq!(rope.held, Some(2.0));
    assert_eq!(rope.dropped, Some(false));

    let again = runtime.derive(&hero_id()).await.unwrap();
    assert!(again.derivation.is_settled());
    assert!(matches!(again.batch, BatchTicket::Settled));
}

#[tokio::test]
async fn overlapping_batches_are_suppressed() {
    let store = Arc::new(
        InMemoryDocumentStore::new().with_write_delay(Duration::from_millis(50)),
    );
    store
        .insert(hero(vec![StoredItem::new("rope", 2, 1.0)]))
        .unwrap();
    let runtime = runtime_with(Arc::clone(&store), false).await;

    let first = runtime.derive(&hero_id()).await.unwrap();
    assert!(first.batch.is_scheduled());
    assert!(runtime.is_batch_in_flight(&hero_id()));

    let second = runtime.derive(&hero_id()).await.unwrap();
    assert!(matches!(second.batch, BatchTicket::Suppressed));

    first.batch.wait().await.unwrap();
    assert!(!runtime.is_batch_in_flight(&hero_id()));

    let third = runtime.derive(&hero_id()).await.unwrap();
    assert!(matches!(third.batch, BatchTicket::Settled));
}

#[tokio::test]
async fn failed_batch_notifies_and_releases_the_guard() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store
        .insert(hero(vec![StoredItem::new("rope", 2, 1.0)]))
        .unwrap();
    store.reject_item_writes(true);
    let runtime = runtime_with(Arc::clone(&store), false).await;
    let mut notices = runtime.subscribe_notices();

    runtime.derive(&hero_id()).await.unwrap().batch.wait().await.unwrap();

    let notice = notices.recv().await.unwrap();
    assert!(matches!(notice, Notice::BatchWriteFailed { .. }));
    assert!(!runtime.is_batch_in_flight(&hero_id()));

    store.reject_item_writes(false);
    let retry = runtime.derive(&hero_id()).await.unwrap();
    assert!(retry.batch.is_scheduled());
    retry.batch.wait().await.unwrap();
    assert_eq!(stored_item(&store, "rope").held, Some(2.0));
}

#[tokio::test]
async fn over_capacity_warning_fires_once_per_episode() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store
        .insert(hero(vec![
            StoredItem::new("anvil", 1, 6.0).with_modified_time(2),
            StoredItem::new("chest", 1, 6.0).with_modified_time(1),
        ]))
        .unwrap();
    let runtime = runtime_with(Arc::clone(&store), false).await;
    let mut notices = runtime.subscribe_notices();

    let report = runtime.derive(&hero_id()).await.unwrap();
    assert!(report.warned);
    report.batch.wait().await.unwrap();
    assert_eq!(
        notices.recv().await.unwrap(),
        Notice::OverCapacity {
            record: hero_id()
        }
    );
    assert_eq!(stored_item(&store, "anvil").dropped, Some(true));
    assert_eq!(stored_item(&store, "chest").dropped, Some(false));

    let again = runtime.derive(&hero_id()).await.unwrap();
    assert!(!again.warned);
    assert!(matches!(notices.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn unload_resets_record_state() {
    let store = Arc::new(InMemoryDocumentStore::new());
    store
        .insert(hero(vec![
            StoredItem::new("anvil", 1, 6.0).with_modified_time(2),
            StoredItem::new("chest", 1, 6.0).with_modified_time(1),
        ]))
        .unwrap();
    let runtime = runtime_with(Arc::clone(&store), false).await;

    let report = runtime.derive(&hero_id()).await.unwrap();
    assert!(report.warned);
    report.batch.wait().await.unwrap();

    assert!(runtime.unload(&hero_id()));
    assert!(!runtime.unload(&hero_id()));
}

#[tokio::test]
async fn rest_writes_base_fields() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let mut record = hero(Vec::new());
    if let sheet_core::Sheet::Character(sheet) = &mut record.sheet {
        sheet.wounds = Pool::new(7, 10);
        sheet.spells.value = 2;
    }
    store.insert(record).unwrap();
    let runtime = runtime_with(Arc::clone(&store), false).await;

    let patch = runtime.rest(&hero_id(), RestKind::SafeHaven).await.unwrap();
    assert_eq!(patch.hit_points, Some(8));
    assert_eq!(patch.wounds, Some(8));

    let stored = store.get(&hero_id()).unwrap().unwrap();
    let sheet_core::Sheet::Character(sheet) = stored.sheet else {
        panic!("expected a character");
    };
    assert_eq!(sheet.hit_points.value, 8);
    assert_eq!(sheet.wounds.value, 8);
    assert_eq!(sheet.spells.value, 0);
}

#[tokio::test]
async fn change_feed_reconverges_after_rest() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let mut record = hero(vec![StoredItem::new("stones", 10, 1.0)]);
    if let sheet_core::Sheet::Character(sheet) = &mut record.sheet {
        sheet.wounds = Pool::new(9, 10);
    }
    store.insert(record).unwrap();
    let runtime = runtime_with(Arc::clone(&store), true).await;

    runtime.derive(&hero_id()).await.unwrap().batch.wait().await.unwrap();
    assert_eq!(stored_item(&store, "stones").held, Some(9.0));

    runtime.rest(&hero_id(), RestKind::SafeHaven).await.unwrap();

    let settled = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if stored_item(&store, "stones").held == Some(10.0) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(settled.is_ok(), "watcher should pick the stone back up");

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn missing_record_is_an_error() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let runtime = runtime_with(store, false).await;

    let err = runtime.derive(&RecordId::new("ghost")).await.unwrap_err();
    assert!(matches!(err, RuntimeError::RecordNotFound(_)));
}

#[tokio::test]
async fn builder_requires_store_and_config() {
    let err = SheetRuntime::builder()
        .sheet_config(Arc::new(SheetConfig::default()))
        .build()
        .await
        .err()
        .unwrap();
    assert!(matches!(err, RuntimeError::MissingStore));

    let err = SheetRuntime::builder()
        .store(Arc::new(InMemoryDocumentStore::new()))
        .build()
        .await
        .err()
        .unwrap();
    assert!(matches!(err, RuntimeError::MissingConfig));
}
