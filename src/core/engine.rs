use crate::core::renderer::TestRenderer;
use crate::core::{ExportFacility, Pipeline, RenderedDocument};
use crate::presentation::PresentationSurface;
use crate::utils::error::{Result, ViewerError};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum LoadStatus {
    NoFileChosen,
    Rendered { modules: usize, questions: usize },
    /// Parse or render failure, already shown on the surface.
    Failed(ViewerError),
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub page_path: String,
    pub status: LoadStatus,
    pub surface: PresentationSurface,
    pub export_path: Option<PathBuf>,
}

/// Runs one load attempt: decode, render, publish the surface, then export.
pub struct ViewerEngine<P: Pipeline> {
    pipeline: P,
    exporter: Option<Box<dyn ExportFacility>>,
}

impl<P: Pipeline> ViewerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            exporter: None,
        }
    }

    pub fn with_exporter(mut self, exporter: Box<dyn ExportFacility>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub async fn run(&self) -> Result<LoadOutcome> {
        let mut surface = PresentationSurface::new();
        let selected = self.pipeline.selected_file();
        surface.select_file(selected.map(display_name));

        let status = match selected {
            None => {
                tracing::info!("No file chosen");
                LoadStatus::NoFileChosen
            }
            Some(path) => {
                tracing::info!("📂 Loading test file: {}", path);
                match self.render().await {
                    Ok(document) => {
                        surface.show_rendered(TestRenderer::to_html(&document));
                        LoadStatus::Rendered {
                            modules: document.modules.len(),
                            questions: document.question_count(),
                        }
                    }
                    Err(e) if e.is_user_visible() => {
                        tracing::error!("❌ {} (file: {})", e, path);
                        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                        surface.show_error(&e);
                        LoadStatus::Failed(e)
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        let page_path = self.pipeline.load(&surface).await?;

        let export_path = match &self.exporter {
            Some(exporter) if surface.is_export_visible() => {
                Some(exporter.export(Path::new(&page_path)).await?)
            }
            Some(_) => {
                tracing::warn!("Nothing rendered, skipping export");
                None
            }
            None => None,
        };

        Ok(LoadOutcome {
            page_path,
            status,
            surface,
            export_path,
        })
    }

    async fn render(&self) -> Result<RenderedDocument> {
        let data = self.pipeline.extract().await?;
        let document = self.pipeline.transform(data).await?;
        tracing::info!(
            "Rendered {} modules, {} questions",
            document.modules.len(),
            document.question_count()
        );
        Ok(document)
    }
}

fn display_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_directories() {
        assert_eq!(display_name("/data/tests/practice-3.json"), "practice-3.json");
        assert_eq!(display_name("practice-3.json"), "practice-3.json");
    }
}
