use std::collections::BTreeMap;
use std::sync::Arc;

use cafe_data::{DataError, Repository};
use tokio::sync::RwLock;

use crate::models::{Cafe, CafeDraft};

#[derive(Default)]
struct Rows {
    last_id: i64,
    by_id: BTreeMap<i64, Cafe>,
}

impl Rows {
    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.by_id
            .values()
            .any(|c| c.name == name && Some(c.id) != except)
    }
}

/// In-process cafe repository with the same contract as the SQLite one:
/// unique names and ids that are never reused.
#[derive(Clone, Default)]
pub struct InMemoryCafeRepository {
    rows: Arc<RwLock<Rows>>,
}

impl InMemoryCafeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_conflict() -> DataError {
    DataError::UniqueViolation {
        field: "name".to_string(),
    }
}

fn build(id: i64, draft: &CafeDraft) -> Cafe {
    Cafe {
        id,
        name: draft.name.clone(),
        map_url: draft.map_url.clone(),
        img_url: draft.img_url.clone(),
        location: draft.location.clone(),
        seats: draft.seats.clone(),
        has_toilet: draft.has_toilet,
        has_wifi: draft.has_wifi,
        has_sockets: draft.has_sockets,
        can_take_calls: draft.can_take_calls,
        coffee_price: draft.coffee_price.clone(),
    }
}

impl Repository<Cafe, i64> for InMemoryCafeRepository {
    type Draft = CafeDraft;

    async fn find_by_id(&self, id: &i64) -> Result<Option<Cafe>, DataError> {
        Ok(self.rows.read().await.by_id.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Cafe>, DataError> {
        Ok(self.rows.read().await.by_id.values().cloned().collect())
    }

    async fn insert(&self, draft: &CafeDraft) -> Result<Cafe, DataError> {
        let mut rows = self.rows.write().await;
        if rows.name_taken(&draft.name, None) {
            return Err(name_conflict());
        }
        rows.last_id += 1;
        let cafe = build(rows.last_id, draft);
        rows.by_id.insert(cafe.id, cafe.clone());
        Ok(cafe)
    }

    async fn update(&self, id: &i64, draft: &CafeDraft) -> Result<Option<Cafe>, DataError> {
        let mut rows = self.rows.write().await;
        if !rows.by_id.contains_key(id) {
            return Ok(None);
        }
        if rows.name_taken(&draft.name, Some(*id)) {
            return Err(name_conflict());
        }
        let cafe = build(*id, draft);
        rows.by_id.insert(*id, cafe.clone());
        Ok(Some(cafe))
    }

    async fn delete(&self, id: &i64) -> Result<bool, DataError> {
        Ok(self.rows.write().await.by_id.remove(id).is_some())
    }

    async fn count(&self) -> Result<u64, DataError> {
        Ok(self.rows.read().await.by_id.len() as u64)
    }
}
