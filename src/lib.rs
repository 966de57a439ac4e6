mod batch;
mod canonical;
mod catalog;
mod dedup;
mod error;
mod ini;
mod order;
mod query;
mod types;

pub use catalog::{Catalog, DEFAULT_BATCH_SIZE};
pub use error::{Error, Result};
pub use types::{Record, Section, SectionId, TriState};
