#[cfg(feature = "pdf")]
pub use self::pdf::ChromiumPdfExporter;

pub fn pdf_export_available() -> bool {
    cfg!(feature = "pdf")
}

#[cfg(feature = "pdf")]
mod pdf {
    use crate::domain::ports::ExportFacility;
    use crate::utils::error::{Result, ViewerError};
    use async_trait::async_trait;
    use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
    use chromiumoxide::{Browser, BrowserConfig};
    use futures::StreamExt;
    use std::path::{Path, PathBuf};

    /// Prints the written page through a headless Chromium, like the browser's
    /// own "Save as PDF".
    pub struct ChromiumPdfExporter {
        output: PathBuf,
    }

    impl ChromiumPdfExporter {
        pub fn new(output: impl Into<PathBuf>) -> Self {
            Self {
                output: output.into(),
            }
        }
    }

    #[async_trait]
    impl ExportFacility for ChromiumPdfExporter {
        async fn export(&self, page_path: &Path) -> Result<PathBuf> {
            let page_path = tokio::fs::canonicalize(page_path).await?;
            let url = format!("file://{}", page_path.display());
            tracing::info!("🖨️ Launching headless browser for PDF export");
            tracing::debug!("Export source: {}", url);

            let config = BrowserConfig::builder()
                .new_headless_mode()
                .args(vec!["--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"])
                .build()
                .map_err(ViewerError::export)?;

            let (mut browser, mut handler) = Browser::launch(config)
                .await
                .map_err(|e| ViewerError::export(format!("failed to launch browser: {}", e)))?;

            let events = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let printed = async {
                let page = browser
                    .new_page(url.as_str())
                    .await
                    .map_err(|e| ViewerError::export(format!("failed to open page: {}", e)))?;
                let params = PrintToPdfParams {
                    print_background: Some(true),
                    ..Default::default()
                };
                page.save_pdf(params, &self.output)
                    .await
                    .map_err(|e| ViewerError::export(format!("failed to print page: {}", e)))?;
                Ok::<_, ViewerError>(())
            }
            .await;

            if let Err(e) = browser.close().await {
                tracing::warn!("Browser did not close cleanly: {}", e);
            }
            events.abort();

            printed?;
            tracing::info!("📄 PDF saved to: {}", self.output.display());
            Ok(self.output.clone())
        }
    }
}
