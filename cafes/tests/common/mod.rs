#![allow(dead_code)]

use std::path::Path;

use cafe_core::AppConfig;
use cafe_test::TestApp;
use cafes::models::CafeDraft;
use cafes::store::CafeStore;
use cafes::{AppState, Settings};

/// Settings of the `test` profile: the workspace `application.yaml`
/// overlaid with `application-test.yaml` (in-memory database).
pub fn test_settings() -> Settings {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
    let config = AppConfig::load_from_dir(&root, "test").expect("test profile loads");
    Settings::from_config(&config).expect("test settings are valid")
}

/// Application over a fresh in-memory database, plus a handle to its store.
pub async fn test_app() -> (TestApp, CafeStore) {
    let state = AppState::build(&test_settings())
        .await
        .expect("application state");
    let store = state.store.clone();
    (TestApp::new(cafes::app(state)), store)
}

pub fn draft(name: &str) -> CafeDraft {
    CafeDraft {
        name: name.to_string(),
        map_url: "https://maps.example.com/cafe".into(),
        img_url: "https://img.example.com/cafe.jpg".into(),
        location: "Shoreditch".into(),
        seats: "20-30".into(),
        has_toilet: true,
        has_wifi: true,
        has_sockets: false,
        can_take_calls: false,
        coffee_price: Some("£2.50".into()),
    }
}

/// A complete, valid form submission for a cafe called `name`.
pub fn form_fields(name: &str) -> Vec<(&'static str, &str)> {
    vec![
        ("name", name),
        ("map_url", "https://maps.example.com/cafe"),
        ("img_url", "https://img.example.com/cafe.jpg"),
        ("location", "Shoreditch"),
        ("has_toilet", "y"),
        ("has_wifi", "y"),
        ("seats", "20-30"),
        ("coffee_price", "£2.50"),
    ]
}
