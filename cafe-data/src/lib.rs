//! # cafe-data
//!
//! Data-access layer of the cafe catalog.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`Entity`] | Table metadata for a persisted type |
//! | [`Repository`] | Async CRUD contract over an entity |
//! | [`DataError`] | Error taxonomy of the data layer |
//! | [`SqlxErrorExt`] | `sqlx::Error` → `DataError` bridging (`.into_data_error()`) |
//! | [`connect_sqlite`] | SQLite pool construction (file or in-memory) |

pub mod entity;
pub mod error;
pub mod repository;
pub mod sqlite;

pub use entity::Entity;
pub use error::DataError;
pub use repository::Repository;
pub use sqlite::{connect_sqlite, is_in_memory, SqlxErrorExt, SqlxResult};
