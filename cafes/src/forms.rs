//! Form binder: submitted cafe fields in, a validated [`CafeDraft`] or
//! per-field errors out.
//!
//! The same [`CafeForm`] backs the "new" and "edit" pages. It deserializes
//! from an `application/x-www-form-urlencoded` body, renders back into the
//! template when validation fails, and can be pre-filled from a stored
//! [`Cafe`].

use cafe_core::FieldErrors;
use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Cafe, CafeDraft};

/// Raw cafe form state.
///
/// Text fields default to empty and checkboxes to unchecked when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CafeForm {
    #[garde(custom(required), length(chars, max = 250))]
    pub name: String,
    #[garde(custom(required), length(chars, max = 500))]
    pub map_url: String,
    #[garde(custom(required_url), length(chars, max = 500))]
    pub img_url: String,
    #[garde(custom(required), length(chars, max = 250))]
    pub location: String,
    #[garde(skip)]
    #[serde(deserialize_with = "checkbox")]
    pub has_sockets: bool,
    #[garde(skip)]
    #[serde(deserialize_with = "checkbox")]
    pub has_toilet: bool,
    #[garde(skip)]
    #[serde(deserialize_with = "checkbox")]
    pub has_wifi: bool,
    #[garde(skip)]
    #[serde(deserialize_with = "checkbox")]
    pub can_take_calls: bool,
    #[garde(custom(required), length(chars, max = 250))]
    pub seats: String,
    #[garde(custom(required), length(chars, max = 250))]
    pub coffee_price: String,
}

/// Label shown next to each input, in display order.
pub const FIELD_LABELS: &[(&str, &str)] = &[
    ("name", "Cafe Name"),
    ("map_url", "Google address"),
    ("img_url", "Image URL"),
    ("location", "Cafe Location"),
    ("has_sockets", "Has Sockets?"),
    ("has_toilet", "Has Toilet?"),
    ("has_wifi", "Has Wifi?"),
    ("can_take_calls", "Can Take Calls?"),
    ("seats", "Approximated seats"),
    ("coffee_price", "Approximated price in £"),
];

pub const NAME_TAKEN: &str = "A cafe with this name already exists.";

impl CafeForm {
    /// Validate and convert into a payload for the store.
    ///
    /// Text fields are trimmed first, so `" Monmouth "` binds as `"Monmouth"`.
    /// Never touches the store; on failure every offending field is reported.
    pub fn bind(&self) -> Result<CafeDraft, FieldErrors> {
        let form = self.trimmed();
        form.validate()
            .map_err(|report| FieldErrors::from_report(&report))?;
        Ok(CafeDraft {
            name: form.name,
            map_url: form.map_url,
            img_url: form.img_url,
            location: form.location,
            seats: form.seats,
            has_toilet: form.has_toilet,
            has_wifi: form.has_wifi,
            has_sockets: form.has_sockets,
            can_take_calls: form.can_take_calls,
            coffee_price: Some(form.coffee_price),
        })
    }

    fn trimmed(&self) -> CafeForm {
        let trim = |s: &str| s.trim().to_string();
        CafeForm {
            name: trim(&self.name),
            map_url: trim(&self.map_url),
            img_url: trim(&self.img_url),
            location: trim(&self.location),
            seats: trim(&self.seats),
            coffee_price: trim(&self.coffee_price),
            ..self.clone()
        }
    }

    /// Error list for a store-level name collision.
    pub fn name_taken() -> FieldErrors {
        FieldErrors::single("name", NAME_TAKEN, "unique")
    }
}

impl From<&Cafe> for CafeForm {
    fn from(cafe: &Cafe) -> Self {
        Self {
            name: cafe.name.clone(),
            map_url: cafe.map_url.clone(),
            img_url: cafe.img_url.clone(),
            location: cafe.location.clone(),
            has_sockets: cafe.has_sockets,
            has_toilet: cafe.has_toilet,
            has_wifi: cafe.has_wifi,
            can_take_calls: cafe.can_take_calls,
            seats: cafe.seats.clone(),
            coffee_price: cafe.coffee_price.clone().unwrap_or_default(),
        }
    }
}

/// Non-blank: whitespace-only input counts as missing.
fn required(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("This field is required."));
    }
    Ok(())
}

/// Non-blank and an absolute URL with a host. Blank input reports only
/// the missing value.
fn required_url(value: &str, ctx: &()) -> garde::Result {
    required(value, ctx)?;
    match url::Url::parse(value) {
        Ok(parsed) if parsed.has_host() => Ok(()),
        _ => Err(garde::Error::new("Invalid URL.")),
    }
}

/// A checkbox is checked when present with any value except `""` or `"false"`.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(raw.as_deref(), Some(v) if !v.is_empty() && v != "false"))
}
