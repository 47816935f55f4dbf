//! HTML rendering.
//!
//! Templates are minijinja files under `templates/`, compiled into the
//! binary with `include_str!` so the server has no runtime file dependency.
//! Names ending in `.html` are auto-escaped.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use cafe_core::{ErrorDetail, HttpError};
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("cafe.html", include_str!("../templates/cafe.html")),
    ("make-cafe.html", include_str!("../templates/make-cafe.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("contact.html", include_str!("../templates/contact.html")),
    ("error.html", include_str!("../templates/error.html")),
];

/// Shared, pre-compiled template environment.
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new(site_name: &str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_global("site_name", site_name.to_string());
        Ok(Self { env: Arc::new(env) })
    }

    /// Render `name` with `ctx`.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, HttpError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| HttpError::Internal(format!("template {name}: {e}")))?;
        template
            .render(ctx)
            .map(Html)
            .map_err(|e| HttpError::Internal(format!("rendering {name}: {e}")))
    }

    pub fn render_error(&self, detail: &ErrorDetail) -> Result<Html<String>, HttpError> {
        self.render(
            "error.html",
            minijinja::context! {
                status => detail.status.as_u16(),
                title => detail.title(),
                message => &detail.message,
            },
        )
    }
}

/// Turn responses carrying an [`ErrorDetail`] into full `error.html` pages.
///
/// Covers handler errors and the router fallback alike. If the page cannot
/// be rendered the plain-text response goes out unchanged.
pub async fn render_error_pages(
    State(views): State<Views>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(detail) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };
    match views.render_error(&detail) {
        Ok(page) => (detail.status, page).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, status = %detail.status, "error page failed to render");
            response
        }
    }
}
