use crate::utils::error::ViewerError;

pub const NO_FILE_CHOSEN: &str = "No file chosen";
pub const PLACEHOLDER_MESSAGE: &str = "Select a JSON test file to view it with answers marked.";

const PAGE_STYLE: &str = r#"
body { font-family: Georgia, "Times New Roman", serif; margin: 2rem auto; max-width: 50rem; color: #222; }
.toolbar { display: flex; gap: 1rem; align-items: center; margin-bottom: 1.5rem; }
.module { margin-bottom: 2.5rem; }
.module-title { border-bottom: 2px solid #333; padding-bottom: 0.25rem; }
.instructions { font-style: italic; margin-bottom: 1rem; }
.question { border: 1px solid #ccc; border-radius: 4px; padding: 1rem; margin-bottom: 1rem; page-break-inside: avoid; }
.question-header { font-weight: bold; margin-bottom: 0.5rem; }
.stimulus { background: #f7f7f7; padding: 0.5rem; margin-bottom: 0.5rem; }
.answer-options li.correct { background: #d4edda; font-weight: bold; }
.answer-options li.correct::after { content: " \2714"; color: #155724; }
.correct-text { color: #155724; font-weight: bold; }
.correct-text.unavailable { color: #856404; font-style: italic; }
.placeholder { text-align: center; color: #666; padding: 3rem 0; }
.placeholder .error { color: red; }
@media print { .toolbar { display: none; } body { margin: 0; max-width: none; } }
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceContent {
    Placeholder,
    Rendered(String),
    Error(String),
}

/// The single output container plus its two controls: the file-name label and
/// the export button. Content is always replaced whole, never merged.
#[derive(Debug, Clone)]
pub struct PresentationSurface {
    file_name: String,
    content: SurfaceContent,
    export_visible: bool,
}

impl Default for PresentationSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSurface {
    pub fn new() -> Self {
        Self {
            file_name: NO_FILE_CHOSEN.to_string(),
            content: SurfaceContent::Placeholder,
            export_visible: false,
        }
    }

    /// Selecting nothing resets the label and hides the export control.
    pub fn select_file(&mut self, file_name: Option<&str>) {
        match file_name {
            Some(name) => self.file_name = name.to_string(),
            None => {
                self.file_name = NO_FILE_CHOSEN.to_string();
                self.export_visible = false;
            }
        }
    }

    pub fn show_rendered(&mut self, html: String) {
        self.content = SurfaceContent::Rendered(html);
        self.export_visible = true;
    }

    pub fn show_error(&mut self, error: &ViewerError) {
        self.content = SurfaceContent::Error(error.user_friendly_message());
        self.export_visible = false;
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &SurfaceContent {
        &self.content
    }

    pub fn rendered_html(&self) -> Option<&str> {
        match &self.content {
            SurfaceContent::Rendered(html) => Some(html),
            _ => None,
        }
    }

    pub fn is_export_visible(&self) -> bool {
        self.export_visible
    }

    pub fn container_html(&self) -> String {
        match &self.content {
            SurfaceContent::Rendered(html) => html.clone(),
            SurfaceContent::Placeholder => format!(
                r#"<div class="placeholder"><p>{}</p></div>"#,
                PLACEHOLDER_MESSAGE
            ),
            SurfaceContent::Error(message) => format!(
                r#"<div class="placeholder"><p class="error">{}</p></div>"#,
                escape_text(message)
            ),
        }
    }

    /// Complete standalone page: toolbar, container, embedded print styles.
    pub fn to_page(&self, title: &str, extra_style: Option<&str>) -> String {
        let export_button = if self.export_visible {
            r#"<button id="exportButton" type="button" onclick="window.print()">Print / Save as PDF</button>"#
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="generator" content="answer-key-viewer {version}">
<meta name="generated-at" content="{generated_at}">
<title>{title}</title>
<style>{style}{extra_style}</style>
</head>
<body>
<div class="toolbar"><span id="fileName">{file_name}</span>{export_button}</div>
<div id="testContainer">{content}</div>
</body>
</html>
"#,
            version = env!("CARGO_PKG_VERSION"),
            generated_at = chrono::Local::now().to_rfc3339(),
            title = escape_text(title),
            style = PAGE_STYLE,
            extra_style = extra_style.unwrap_or_default(),
            file_name = escape_text(&self.file_name),
            export_button = export_button,
            content = self.container_html(),
        )
    }
}

/// Only for text the tool composes itself; test content is never escaped.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_surface_shows_placeholder() {
        let surface = PresentationSurface::new();
        assert_eq!(surface.file_name(), NO_FILE_CHOSEN);
        assert_eq!(surface.content(), &SurfaceContent::Placeholder);
        assert!(!surface.is_export_visible());
        assert!(!surface.to_page("Test", None).contains("exportButton"));
    }

    #[test]
    fn test_render_then_error_replaces_content() {
        let mut surface = PresentationSurface::new();
        surface.select_file(Some("practice-1.json"));
        surface.show_rendered("<div class=\"module\"></div>".to_string());
        assert!(surface.is_export_visible());
        assert!(surface.to_page("Test", None).contains("exportButton"));

        surface.show_error(&ViewerError::render("missing chunks"));
        assert!(!surface.is_export_visible());
        assert!(surface.rendered_html().is_none());
        assert!(!surface.container_html().contains("module"));
        assert!(surface.container_html().contains("Could not render test content"));
    }

    #[test]
    fn test_deselecting_hides_export() {
        let mut surface = PresentationSurface::new();
        surface.select_file(Some("a.json"));
        surface.show_rendered(String::new());

        surface.select_file(None);

        assert_eq!(surface.file_name(), NO_FILE_CHOSEN);
        assert!(!surface.is_export_visible());
    }

    #[test]
    fn test_page_escapes_file_name_and_appends_style() {
        let mut surface = PresentationSurface::new();
        surface.select_file(Some("<b>odd</b>.json"));

        let page = surface.to_page("Key & Answers", Some(".stem { color: blue; }"));

        assert!(page.contains("&lt;b&gt;odd&lt;/b&gt;.json"));
        assert!(page.contains("<title>Key &amp; Answers</title>"));
        assert!(page.contains(".stem { color: blue; }"));
        assert!(page.contains(r#"<div id="testContainer">"#));
    }
}
