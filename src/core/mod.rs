pub mod engine;
pub mod formatter;
pub mod renderer;
pub mod scoring;

pub use crate::domain::model::{RenderedDocument, ScoringIndex, TestDocument};
pub use crate::domain::ports::{ConfigProvider, ExportFacility, Pipeline, Storage};
pub use crate::utils::error::Result;
