use axum::extract::State;
use axum::response::{Html, Response};
use axum::routing::get;
use axum::Router;
use cafe_core::health::health_response;
use cafe_core::HttpError;
use minijinja::context;

use crate::state::AppState;
use crate::store::CafeStore;
use crate::views::Views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/health", get(health))
}

async fn about(State(views): State<Views>) -> Result<Html<String>, HttpError> {
    views.render("about.html", context! {})
}

async fn contact(State(views): State<Views>) -> Result<Html<String>, HttpError> {
    views.render("contact.html", context! {})
}

/// JSON liveness report; 503 when the database does not answer.
async fn health(State(store): State<CafeStore>) -> Response {
    health_response(&store).await
}
