use crate::core::renderer::TestRenderer;
use crate::core::{ConfigProvider, Pipeline, RenderedDocument, Storage};
use crate::presentation::PresentationSurface;
use crate::utils::error::{Result, ViewerError};

/// File on disk → rendered answer-key page on disk.
pub struct HtmlPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> HtmlPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// An unreadable stylesheet only costs the extra styles; the page is
    /// still written.
    async fn extra_style(&self) -> Option<String> {
        let path = self.config.stylesheet_path()?;
        tracing::debug!("Loading extra stylesheet from: {}", path);
        match self.storage.read_file(path).await {
            Ok(css) => Some(String::from_utf8_lossy(&css).into_owned()),
            Err(e) => {
                tracing::warn!("⚠️ Ignoring stylesheet {}: {}", path, e);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for HtmlPipeline<S, C> {
    fn selected_file(&self) -> Option<&str> {
        self.config.input_path()
    }

    async fn extract(&self) -> Result<serde_json::Value> {
        let path = self.config.input_path().ok_or_else(|| ViewerError::ConfigError {
            message: "no input file selected".to_string(),
        })?;

        tracing::debug!("Reading test file: {}", path);
        let raw = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes", raw.len());

        TestRenderer::decode(&raw)
    }

    async fn transform(&self, data: serde_json::Value) -> Result<RenderedDocument> {
        TestRenderer::render_test(data)
    }

    async fn load(&self, surface: &PresentationSurface) -> Result<String> {
        let extra_style = self.extra_style().await;
        let page = surface.to_page(self.config.page_title(), extra_style.as_deref());

        tracing::debug!("Writing page ({} bytes) to storage", page.len());
        let written = self
            .storage
            .write_file(self.config.output_file(), page.as_bytes())
            .await?;

        tracing::debug!("Page saved to: {}", written);
        Ok(written)
    }
}
