//! Catalog pages: list, show, create, edit and delete cafes.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use cafe_core::{FieldErrors, HttpError};
use cafe_data::DataError;
use minijinja::context;

use crate::forms::{CafeForm, FIELD_LABELS};
use crate::state::AppState;
use crate::store::CafeStore;
use crate::views::Views;

/// Text inputs, in the order the form shows them. Checkboxes follow.
const TEXT_FIELDS: &[&str] = &["name", "map_url", "img_url", "location", "seats", "coffee_price"];
const CHECK_FIELDS: &[&str] = &["has_sockets", "has_toilet", "has_wifi", "can_take_calls"];

const NEW_ACTION: &str = "/new-cafe";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/show_cafe/{id}", get(show))
        .route("/new-cafe", get(new_form).post(create))
        .route("/edit-cafe/{id}", get(edit_form).post(update))
        .route("/delete/{id}", get(delete).post(delete))
}

/// Path ids are integers; anything else names no cafe.
fn parse_id(raw: &str) -> Result<i64, HttpError> {
    raw.parse()
        .map_err(|_| HttpError::NotFound(format!("No cafe with id {raw}")))
}

fn show_location(id: i64) -> String {
    format!("/show_cafe/{id}")
}

fn render_form(
    views: &Views,
    form: &CafeForm,
    errors: &FieldErrors,
    action: &str,
    is_edit: bool,
) -> Result<Html<String>, HttpError> {
    let labels: BTreeMap<&str, &str> = FIELD_LABELS.iter().copied().collect();
    views.render(
        "make-cafe.html",
        context! {
            form => form,
            errors => errors.by_field(),
            labels => labels,
            text_fields => TEXT_FIELDS,
            check_fields => CHECK_FIELDS,
            action => action,
            is_edit => is_edit,
        },
    )
}

async fn list(
    State(store): State<CafeStore>,
    State(views): State<Views>,
) -> Result<Html<String>, HttpError> {
    let cafes = store.list_all().await?;
    views.render("index.html", context! { all_coffees => cafes })
}

async fn show(
    State(store): State<CafeStore>,
    State(views): State<Views>,
    Path(raw): Path<String>,
) -> Result<Html<String>, HttpError> {
    let cafe = store.get(parse_id(&raw)?).await?;
    views.render("cafe.html", context! { cafe => cafe })
}

async fn new_form(State(views): State<Views>) -> Result<Html<String>, HttpError> {
    render_form(&views, &CafeForm::default(), &FieldErrors::new(), NEW_ACTION, false)
}

async fn create(
    State(store): State<CafeStore>,
    State(views): State<Views>,
    Form(form): Form<CafeForm>,
) -> Result<Response, HttpError> {
    let draft = match form.bind() {
        Ok(draft) => draft,
        Err(errors) => {
            tracing::debug!(errors = errors.len(), "new cafe rejected");
            return Ok(render_form(&views, &form, &errors, NEW_ACTION, false)?.into_response());
        }
    };

    match store.create(&draft).await {
        Ok(cafe) => Ok(Redirect::to(&show_location(cafe.id)).into_response()),
        Err(DataError::UniqueViolation { field }) if field == "name" => {
            Ok(render_form(&views, &form, &CafeForm::name_taken(), NEW_ACTION, false)?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn edit_form(
    State(store): State<CafeStore>,
    State(views): State<Views>,
    Path(raw): Path<String>,
) -> Result<Html<String>, HttpError> {
    let id = parse_id(&raw)?;
    let cafe = store.get(id).await?;
    render_form(
        &views,
        &CafeForm::from(&cafe),
        &FieldErrors::new(),
        &format!("/edit-cafe/{id}"),
        true,
    )
}

async fn update(
    State(store): State<CafeStore>,
    State(views): State<Views>,
    Path(raw): Path<String>,
    Form(form): Form<CafeForm>,
) -> Result<Response, HttpError> {
    let id = parse_id(&raw)?;
    // Unknown id is a 404 even when the submission is invalid.
    store.get(id).await?;
    let action = format!("/edit-cafe/{id}");

    let draft = match form.bind() {
        Ok(draft) => draft,
        Err(errors) => {
            tracing::debug!(cafe_id = id, errors = errors.len(), "cafe edit rejected");
            return Ok(render_form(&views, &form, &errors, &action, true)?.into_response());
        }
    };

    match store.update(id, &draft).await {
        Ok(_) => Ok(Redirect::to(&show_location(id)).into_response()),
        Err(DataError::UniqueViolation { field }) if field == "name" => {
            Ok(render_form(&views, &form, &CafeForm::name_taken(), &action, true)?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn delete(
    State(store): State<CafeStore>,
    Path(raw): Path<String>,
) -> Result<Redirect, HttpError> {
    store.delete(parse_id(&raw)?).await?;
    Ok(Redirect::to("/"))
}
