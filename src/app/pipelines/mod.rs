pub mod html_pipeline;

pub use html_pipeline::HtmlPipeline;
