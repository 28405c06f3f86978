//! Archive, clean, and aggregate stages of the article pipeline.
//!
//! The fetch path hands a [`newsetl_search::DayHarvest`] to [`archive`],
//! which writes the day's raw object. The transform path reacts to that
//! object's creation: [`transform`] validates and cleans each line, writes
//! the cleaned object, and optionally folds the article count into the
//! dashboard's [`series::ChartSeries`].

pub mod archive;
pub mod article;
pub mod clean;
pub mod error;
pub mod series;
pub mod transform;
pub mod validate;

/// Line terminator used by both raw and cleaned objects.
pub const LINE_TERMINATOR: &str = "\r\n";

pub use archive::{archive_harvest, ArchiveReceipt};
pub use article::{CleanedArticleRecord, Keyword, MissingField, RawArticleRecord};
pub use clean::{clean_article, to_json_line};
pub use error::PipelineError;
pub use series::{update_chart_series, upsert_entry, ChartSeries, SeriesChange};
pub use transform::{transform_notification, ChartTarget, TransformSettings};
pub use validate::{validate_article, InvalidArticle};
