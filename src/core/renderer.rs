use crate::core::formatter::QuestionFormatter;
use crate::core::scoring::ScoringIndexBuilder;
use crate::domain::model::{RenderedDocument, RenderedModule, Section, TestBody, TestDocument};
use crate::utils::error::{Result, ViewerError};

/// Section types that make up the printable test; every other type is skipped.
pub const RENDERED_SECTION_TYPES: [&str; 2] = ["routing", "destination"];

pub struct TestRenderer;

impl TestRenderer {
    /// Raw file contents → structured tree. Failure here is a `ParseError`.
    pub fn decode(raw: &[u8]) -> Result<serde_json::Value> {
        serde_json::from_slice(raw).map_err(ViewerError::ParseError)
    }

    /// Structured tree → rendered document. The tree already decoded, so any
    /// shape violation from here on is a `RenderError`.
    pub fn render_test(data: serde_json::Value) -> Result<RenderedDocument> {
        let document: TestDocument = serde_json::from_value(data)
            .map_err(|e| ViewerError::render(format!("unexpected document shape: {}", e)))?;
        Self::render_document(&document)
    }

    pub fn render_document(document: &TestDocument) -> Result<RenderedDocument> {
        let scoring = ScoringIndexBuilder::build(document.scoring.as_ref());
        let mut rendered = RenderedDocument::default();

        for (position, raw_section) in document.test.sections.iter().enumerate() {
            let kind = TestBody::section_type(raw_section);
            if !Self::is_rendered(kind) {
                tracing::debug!(
                    "Skipping section {} of type {:?}",
                    position,
                    kind.unwrap_or("<none>")
                );
                continue;
            }

            let section: Section = serde_json::from_value(raw_section.clone()).map_err(|e| {
                ViewerError::render(format!("section {} has an unexpected shape: {}", position, e))
            })?;
            let label = section.title.as_deref().unwrap_or("<untitled>");
            let chunks = section.chunks.as_ref().ok_or_else(|| {
                ViewerError::render(format!("section {} ('{}') has no chunks", position, label))
            })?;

            let mut module = RenderedModule {
                title: section.title.clone().unwrap_or_default(),
                instructions: section.instructions.clone().unwrap_or_default(),
                questions: Vec::new(),
            };

            for (chunk_position, chunk) in chunks.iter().enumerate() {
                let items = chunk.items.as_ref().ok_or_else(|| {
                    ViewerError::render(format!(
                        "chunk {} of section {} ('{}') has no items",
                        chunk_position, position, label
                    ))
                })?;

                for item in items {
                    let key = scoring.get(item.id());
                    module.questions.push(QuestionFormatter::format(item, key)?);
                }
            }

            rendered.modules.push(module);
        }

        tracing::debug!(
            "Rendered {} modules with {} questions",
            rendered.modules.len(),
            rendered.question_count()
        );
        Ok(rendered)
    }

    pub fn to_html(document: &RenderedDocument) -> String {
        let mut html = String::new();
        for module in &document.modules {
            html.push_str(r#"<div class="module">"#);
            html.push_str(&format!(r#"<h2 class="module-title">{}</h2>"#, module.title));
            html.push_str(&format!(
                r#"<div class="instructions">{}</div>"#,
                module.instructions
            ));
            for question in &module.questions {
                html.push_str(&QuestionFormatter::to_html(question));
            }
            html.push_str("</div>");
        }
        html
    }

    fn is_rendered(kind: Option<&str>) -> bool {
        kind.is_some_and(|kind| RENDERED_SECTION_TYPES.contains(&kind))
    }
}
