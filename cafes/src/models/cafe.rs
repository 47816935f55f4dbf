use cafe_data::Entity;
use serde::{Deserialize, Serialize};

/// A catalogued cafe, as stored in the `cafe` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    /// Nullable column; rows written through the form always carry a price.
    pub coffee_price: Option<String>,
}

impl Entity for Cafe {
    type Id = i64;

    fn table_name() -> &'static str {
        "cafe"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "map_url",
            "img_url",
            "location",
            "seats",
            "has_toilet",
            "has_wifi",
            "has_sockets",
            "can_take_calls",
            "coffee_price",
        ]
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// Every mutable column of a cafe, validated and ready to persist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CafeDraft {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl Cafe {
    pub fn to_draft(&self) -> CafeDraft {
        CafeDraft {
            name: self.name.clone(),
            map_url: self.map_url.clone(),
            img_url: self.img_url.clone(),
            location: self.location.clone(),
            seats: self.seats.clone(),
            has_toilet: self.has_toilet,
            has_wifi: self.has_wifi,
            has_sockets: self.has_sockets,
            can_take_calls: self.can_take_calls,
            coffee_price: self.coffee_price.clone(),
        }
    }

    /// Whether every mutable column equals `draft`.
    pub fn matches(&self, draft: &CafeDraft) -> bool {
        self.to_draft() == *draft
    }
}
