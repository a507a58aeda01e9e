use stocktake_lib::{CountStatus, CountStore, MemoryStore, Product, StoreError, Warehouse};
use uuid::Uuid;

fn warehouse() -> Warehouse {
    Warehouse {
        id: 1,
        name: "Central".to_string(),
    }
}

async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.add_warehouse(warehouse()).await;
    store
        .add_product(
            Product::new("P-100", "Granulated Sugar 1kg")
                .barcode("8690000000017")
                .unit("pack", 10.0),
        )
        .await;
    store
        .add_product(Product::new("P-200", "Sunflower Oil 5L").barcode("8690000000024"))
        .await;
    store
}

#[tokio::test]
async fn session_lifecycle() {
    let store = seeded_store().await;

    let session = store.create_session("March count", warehouse()).await.unwrap();
    assert_eq!(session.status, CountStatus::Open);
    assert!(session.ended_at.is_none());

    let sessions = store.sessions().await.unwrap();
    assert_eq!(sessions.len(), 1);

    let closed = store.close_session(session.id).await.unwrap();
    assert_eq!(closed.status, CountStatus::Closed);
    assert!(closed.ended_at.is_some());

    store.delete_session(session.id).await.unwrap();
    assert!(store.sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn record_count_resolves_code_and_barcode() {
    let store = seeded_store().await;
    let session = store.create_session("c", warehouse()).await.unwrap();

    let by_code = store
        .record_count(session.id, "p-100", "piece", 4.0, "ada")
        .await
        .unwrap();
    assert_eq!(by_code.product_name, "Granulated Sugar 1kg");

    let by_barcode = store
        .record_count(session.id, "8690000000024", "piece", 2.0, "ada")
        .await
        .unwrap();
    assert_eq!(by_barcode.product_code, "P-200");

    let items = store.counted_items(session.id).await.unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn record_count_validates_unit_and_session_state() {
    let store = seeded_store().await;
    let session = store.create_session("c", warehouse()).await.unwrap();

    let err = store
        .record_count(session.id, "P-100", "pallet", 1.0, "ada")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownUnit { .. }));

    let err = store
        .record_count(session.id, "no-such", "piece", 1.0, "ada")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ProductNotFound(_)));

    store.close_session(session.id).await.unwrap();
    let err = store
        .record_count(session.id, "P-100", "piece", 1.0, "ada")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::SessionNotOpen(_)));
}

#[tokio::test]
async fn update_and_delete_items() {
    let store = seeded_store().await;
    let session = store.create_session("c", warehouse()).await.unwrap();
    let item = store
        .record_count(session.id, "P-100", "pack", 1.0, "ada")
        .await
        .unwrap();

    let updated = store.update_quantity(item.id, 3.0).await.unwrap();
    assert_eq!(updated.quantity, 3.0);

    store.delete_item(item.id).await.unwrap();
    assert!(matches!(
        store.delete_item(item.id).await.unwrap_err(),
        StoreError::ItemNotFound(_)
    ));
    assert!(store.counted_items(session.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_session_drops_its_items() {
    let store = seeded_store().await;
    let session = store.create_session("c", warehouse()).await.unwrap();
    let item = store
        .record_count(session.id, "P-100", "piece", 1.0, "ada")
        .await
        .unwrap();

    store.delete_session(session.id).await.unwrap();
    assert!(matches!(
        store.update_quantity(item.id, 2.0).await.unwrap_err(),
        StoreError::ItemNotFound(_)
    ));
}

#[tokio::test]
async fn find_products_searches_code_barcode_and_name() {
    let store = seeded_store().await;

    assert_eq!(store.find_products("oil").await.unwrap().len(), 1);
    assert_eq!(store.find_products("P-100").await.unwrap().len(), 1);
    assert_eq!(store.find_products("8690000000017").await.unwrap().len(), 1);
    assert!(store.find_products("").await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_ids_error() {
    let store = seeded_store().await;
    let missing = Uuid::new_v4();
    assert!(matches!(
        store.counted_items(missing).await.unwrap_err(),
        StoreError::SessionNotFound(_)
    ));
    assert!(matches!(
        store.close_session(missing).await.unwrap_err(),
        StoreError::SessionNotFound(_)
    ));
}
