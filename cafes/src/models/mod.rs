pub mod cafe;

pub use cafe::{Cafe, CafeDraft};
