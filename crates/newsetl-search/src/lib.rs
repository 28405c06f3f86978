//! Client for the article search API and the day-scoped paginated harvest
//! built on top of it.

pub mod client;
pub mod error;
pub mod harvest;
pub mod types;

pub use client::{ArticleSearchClient, PageOutcome};
pub use error::SearchError;
pub use harvest::{DayHarvest, HarvestOptions};
pub use types::{SearchMeta, SearchPage};
