pub mod etl;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod walker;

pub use crate::domain::model::{ExtractResult, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SourceFetcher, Storage};
pub use crate::utils::error::Result;
