pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use core::{
    etl::EtlEngine, pipeline::SlcspPipeline, plan_catalog::PlanCatalog,
    rate_area::RateAreaIndex, resolver::SlcspResolver,
};
pub use domain::model::{Resolution, SlcspResult};
pub use utils::error::{Result, SlcspError};
