//! Sample data for `--demo`

use oleum_client::InMemoryBackend;
use oleum_client::password::hash_password;
use serde_json::json;
use shared::models::tables;

pub const DEMO_USER: &str = "demo";
pub const DEMO_PASSWORD: &str = "olive";

/// In-memory store with a handful of presses, facilities and trips plus
/// one account (`demo` / `olive`)
pub fn seeded_backend() -> anyhow::Result<InMemoryBackend> {
    let password = hash_password(DEMO_PASSWORD)?;
    let backend = InMemoryBackend::new()
        .with_rows(
            tables::USERS,
            vec![json!({
                "id": 1,
                "name": DEMO_USER,
                "password": password,
                "created_at": "2024-09-01T07:30:00+00:00",
            })],
        )
        .with_rows(
            tables::PRESSES,
            vec![
                json!({"id": "p-1", "name": "Al-Zaytouna Press", "location": "Jenin", "capacity": 2500}),
                json!({"id": "p-2", "name": "Burqin Cooperative", "location": "Burqin", "capacity": 1200}),
                json!({"id": "p-3", "name": "Wadi Press", "location": "Salfit"}),
            ],
        )
        .with_rows(
            tables::FACILITIES,
            vec![
                json!({"id": "f-1", "name": "Nablus Bottling Co.", "location": "Nablus", "type": "Bottler"}),
                json!({"id": "f-2", "name": "Coastal Traders", "location": "Haifa", "type": "Buyer"}),
                json!({"id": "f-3", "name": "Tulkarm Cold Store", "location": "Tulkarm", "type": "Storage"}),
            ],
        )
        .with_rows(
            tables::TRIPS,
            vec![
                json!({"id": "t-1", "origin": "Jenin", "destination": "Nablus", "status": "Delivered", "date": "2024-10-02", "driver_name": "Sami Haddad"}),
                json!({"id": "t-2", "origin": "Burqin", "destination": "Haifa", "status": "In Transit", "date": "2024-10-18T09:15:00+00:00", "driver_name": "Omar Khalil"}),
                json!({"id": "t-3", "origin": "Salfit", "destination": "Tulkarm", "status": "Pending", "date": "2024-10-20"}),
                json!({"id": "t-4", "origin": "Tubas", "destination": "Jenin", "status": "Held at checkpoint", "date": "2024-10-11"}),
            ],
        )
        .with_rows(tables::OLIVE_BATCHES, vec![])
        .with_rows(tables::OIL_BATCHES, vec![]);
    Ok(backend)
}
