pub mod etl;
pub mod pipeline;
pub mod plan_catalog;
pub mod rate_area;
pub mod resolver;

pub use crate::domain::model::{Dataset, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
