// oleum-client/tests/screens.rs
// Screen behaviour against the in-memory backend

use oleum_client::InMemoryBackend;
use oleum_client::backend::BackendCall;
use oleum_client::screens::new_order::SUCCESS_MESSAGE;
use oleum_client::screens::{NetworkScreen, NewOrderScreen, Notice, TripsScreen};
use serde_json::json;
use shared::models::{NetworkFilter, OrderKind, StatusTone};

fn directory() -> InMemoryBackend {
    InMemoryBackend::new()
        .with_rows(
            "presses",
            vec![
                json!({"id": "p1", "name": "Al-Zaytouna", "location": "Jenin", "capacity": 2000}),
                json!({"id": "p2", "name": "Burqin Press", "location": "Burqin"}),
            ],
        )
        .with_rows(
            "facilities",
            vec![
                json!({"id": "f1", "name": "Nablus Bottlers", "location": "Nablus", "type": "Bottler"}),
                json!({"id": "f2", "name": "Coastal Buyers", "location": "Haifa", "type": "Buyer"}),
                json!({"id": "f3", "name": "Cold Store", "location": "Tulkarm", "type": "Storage"}),
            ],
        )
}

#[tokio::test]
async fn test_olive_batch_submission() {
    let backend = directory();
    let mut screen = NewOrderScreen::new(7);
    screen.refresh(&backend).await;
    assert_eq!(screen.destinations().len(), 2);
    assert_eq!(screen.destinations()[0].label, "Al-Zaytouna (Jenin)");

    screen.weight = "500".into();
    screen.select_destination(Some("p1"));
    screen.submit(&backend).await;

    let inserts: Vec<BackendCall> = backend
        .calls()
        .into_iter()
        .filter(BackendCall::is_insert)
        .collect();
    assert_eq!(inserts.len(), 1);
    match &inserts[0] {
        BackendCall::Insert { table, row } => {
            assert_eq!(table, "olive_batches");
            assert_eq!(row["weight_kg"], json!(500.0));
            assert_eq!(row["press_id"], json!("p1"));
            assert_eq!(row["user_id"], json!(7));
        }
        other => panic!("unexpected call {:?}", other),
    }

    assert_eq!(screen.weight, "");
    assert_eq!(screen.selected(), None);
    assert_eq!(
        screen.notice(),
        Some(&Notice::Success(SUCCESS_MESSAGE.to_string()))
    );
}

#[tokio::test]
async fn test_oil_batch_submission() {
    let backend = directory();
    let mut screen = NewOrderScreen::new(7);
    screen.refresh(&backend).await;
    assert_eq!(screen.set_kind(OrderKind::Oil), Some(OrderKind::Oil));
    screen.refresh(&backend).await;
    assert_eq!(screen.destinations()[2].label, "Cold Store (Tulkarm) - Storage");

    screen.volume = "120".into();
    screen.select_destination(Some("f3"));
    screen.submit(&backend).await;

    let rows = backend.rows("oil_batches");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["facility_id"], json!("f3"));
    assert_eq!(rows[0]["volume_liters"], json!(120.0));
    assert!(backend.rows("olive_batches").is_empty());
}

#[tokio::test]
async fn test_submit_without_destination_never_inserts() {
    let backend = directory();
    let mut screen = NewOrderScreen::new(7);
    screen.refresh(&backend).await;
    screen.weight = "500".into();
    screen.submit(&backend).await;

    assert_eq!(backend.insert_count(), 0);
    assert_eq!(
        screen.notice().map(Notice::text),
        Some("Please select a destination".to_string())
    );
}

#[tokio::test]
async fn test_insert_failure_keeps_form() {
    let backend = directory().with_failure("olive_batches", "new row violates row-level security");
    let mut screen = NewOrderScreen::new(7);
    screen.refresh(&backend).await;
    screen.weight = "500".into();
    screen.select_destination(Some("p2"));
    screen.submit(&backend).await;

    assert_eq!(screen.weight, "500");
    assert_eq!(screen.selected(), Some("p2"));
    let notice = screen.notice().unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.text(), "Error: new row violates row-level security");
    assert!(screen.can_submit());
}

#[tokio::test]
async fn test_destination_fetch_failure() {
    let backend = directory().with_failure("presses", "offline");
    let mut screen = NewOrderScreen::new(7);
    screen.refresh(&backend).await;
    assert!(screen.destinations().is_empty());
    assert!(!screen.is_fetching());
}

#[tokio::test]
async fn test_network_merge_and_filter() {
    let backend = directory();
    let mut screen = NetworkScreen::new();
    screen.refresh(&backend).await;
    assert_eq!(backend.select_count(), 2);

    let names: Vec<&str> = screen.entries().iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec!["Al-Zaytouna", "Burqin Press", "Nablus Bottlers", "Coastal Buyers", "Cold Store"]
    );

    screen.set_filter(NetworkFilter::Press);
    assert_eq!(screen.visible().len(), 2);
    screen.set_filter(NetworkFilter::Facility);
    assert_eq!(screen.visible().len(), 3);
    screen.set_filter(NetworkFilter::All);
    assert_eq!(screen.visible().len(), 5);

    // filtering never reads again
    assert_eq!(backend.select_count(), 2);
}

#[tokio::test]
async fn test_network_partial_failure() {
    let backend = directory().with_failure("facilities", "relation does not exist");
    let mut screen = NetworkScreen::new();
    screen.refresh(&backend).await;
    assert_eq!(screen.entries().len(), 2);
    assert!(screen.entries().iter().all(|e| e.is_press()));
}

#[tokio::test]
async fn test_trips_keep_backend_order() {
    let backend = InMemoryBackend::new().with_rows(
        "trips",
        vec![
            json!({"id": "t1", "origin": "Jenin", "destination": "Nablus", "status": "Delivered", "date": "2024-09-01"}),
            json!({"id": "t2", "origin": "Nablus", "destination": "Haifa", "status": "Pending", "date": "2024-10-20"}),
            json!({"id": "t3", "origin": "Tubas", "destination": "Jenin", "status": "Held at checkpoint", "date": "2024-10-05", "driver_name": "Sami"}),
        ],
    );
    let mut screen = TripsScreen::new();
    screen.refresh(&backend).await;
    assert!(!screen.is_loading());

    let ids: Vec<&str> = screen.trips().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t2", "t3", "t1"]);

    let tones: Vec<StatusTone> = screen.trips().iter().map(|t| t.status.tone()).collect();
    assert_eq!(tones, vec![StatusTone::Yellow, StatusTone::Yellow, StatusTone::Green]);
    assert_eq!(screen.trips()[1].driver_name.as_deref(), Some("Sami"));
}

#[tokio::test]
async fn test_trips_failure_is_empty() {
    let backend = InMemoryBackend::new().with_failure("trips", "boom");
    let mut screen = TripsScreen::new();
    screen.refresh(&backend).await;
    assert!(screen.trips().is_empty());
    assert!(!screen.is_loading());
}

#[tokio::test]
async fn test_unrecognised_facility_type_still_listed() {
    let backend = directory().with_rows(
        "facilities",
        vec![json!({
            "id": "f4",
            "name": "Jaffa Refinery",
            "location": "Jaffa",
            "type": "Refinery"
        })],
    );

    let mut network = NetworkScreen::new();
    network.refresh(&backend).await;
    assert_eq!(network.entries().len(), 6);
    assert_eq!(network.entries()[5].badge(), "Refinery");

    let mut order = NewOrderScreen::new(7);
    order.set_kind(OrderKind::Oil);
    order.refresh(&backend).await;
    let labels: Vec<String> = order.destinations().into_iter().map(|d| d.label).collect();
    assert_eq!(labels.len(), 4);
    assert_eq!(labels[3], "Jaffa Refinery (Jaffa) - Refinery");
}
