use crate::domain::model::RenderedDocument;
use crate::presentation::surface::PresentationSurface;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// `None` means no file was chosen.
    fn input_path(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn page_title(&self) -> &str;
    fn stylesheet_path(&self) -> Option<&str>;
    fn pdf_path(&self) -> Option<&str>;
}

/// One load attempt: decode the selected file, render it, publish the surface.
#[async_trait]
pub trait Pipeline: Send + Sync {
    fn selected_file(&self) -> Option<&str>;
    async fn extract(&self) -> Result<serde_json::Value>;
    async fn transform(&self, data: serde_json::Value) -> Result<RenderedDocument>;
    async fn load(&self, surface: &PresentationSurface) -> Result<String>;
}

/// The platform's print/export facility, driven against an already written page.
#[async_trait]
pub trait ExportFacility: Send + Sync {
    async fn export(&self, page_path: &Path) -> Result<PathBuf>;
}
