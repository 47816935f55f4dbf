//! Cafe catalog web application.
//!
//! Server-rendered pages over a SQLite-backed catalog of cafes. [`app`]
//! assembles the router from an [`AppState`]; `main.rs` only loads
//! configuration and serves it.

pub mod controllers;
pub mod forms;
pub mod models;
pub mod settings;
pub mod state;
pub mod store;
pub mod views;

use axum::{middleware, Router};

pub use settings::Settings;
pub use state::AppState;

/// The complete application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(controllers::cafe_controller::routes())
        .merge(controllers::page_controller::routes())
        .fallback(controllers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            views::render_error_pages,
        ))
        .layer(cafe_core::default_trace())
        .with_state(state)
}
