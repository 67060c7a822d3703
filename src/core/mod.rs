pub mod budget;
pub mod enrich;
pub mod etl;
pub mod loader;
pub mod omdb;
pub mod pipeline;
pub mod report;
pub mod year;

pub use crate::domain::model::{EnrichColumns, OmdbResponse, Row, Value};
pub use crate::domain::ports::{ConfigProvider, MovieLookup, Pipeline, Storage};
pub use crate::utils::error::Result;
