pub mod analyzer;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{AnalysisResult, FileEntry};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
