pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod utils;

pub use app::pipelines::HtmlPipeline;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::engine::{LoadOutcome, LoadStatus, ViewerEngine};
pub use core::formatter::QuestionFormatter;
pub use core::renderer::TestRenderer;
pub use core::scoring::ScoringIndexBuilder;
pub use presentation::PresentationSurface;
pub use utils::error::{Result, ViewerError};
