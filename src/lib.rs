pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    etl::{EtlEngine, RunSummary},
    line_rules::{LineOutcome, LineTransform},
    pipeline::FilterListPipeline,
};
pub use domain::model::{HeaderBlock, TransformStats, Variant};
pub use utils::error::{FilterError, Result};
