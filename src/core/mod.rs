pub mod etl;
pub mod header;
pub mod line_rules;
pub mod pipeline;

pub use crate::domain::model::{InputLine, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
