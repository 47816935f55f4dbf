pub mod cafe_controller;
pub mod page_controller;

use cafe_core::HttpError;

/// Router fallback for paths no controller claims.
pub async fn not_found() -> HttpError {
    HttpError::NotFound("Page not found".into())
}
