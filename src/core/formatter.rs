use crate::domain::model::{
    AnswerBlock, Item, QuestionType, RenderedOption, RenderedQuestionBlock,
};
use crate::utils::error::{Result, ViewerError};

pub const SPR_KEY_SEPARATOR: &str = "||";
pub const ANSWER_UNAVAILABLE: &str = "Answer key not available";

/// Turns one item plus its resolved answer key into an annotated question block.
///
/// Text fields are trusted test content and are passed through as markup.
pub struct QuestionFormatter;

impl QuestionFormatter {
    pub fn format(item: &Item, answer_key: Option<&str>) -> Result<RenderedQuestionBlock> {
        let answer_key = answer_key.filter(|key| !key.is_empty());
        let answer = match item.question_type() {
            QuestionType::MultipleChoice => {
                let options = item.answer_options.as_ref().ok_or_else(|| {
                    ViewerError::render(format!(
                        "mcq item '{}' has no answerOptions",
                        item.id()
                    ))
                })?;

                AnswerBlock::Options(
                    options
                        .iter()
                        .map(|option| {
                            let id = option.id.clone().unwrap_or_default();
                            RenderedOption {
                                correct: option.id.is_some() && answer_key == Some(id.as_str()),
                                content: option.content.clone().unwrap_or_default(),
                                id,
                            }
                        })
                        .collect(),
                )
            }
            QuestionType::ShortResponse => {
                AnswerBlock::ShortResponse(answer_key.map(Self::accepted_answers))
            }
            QuestionType::Other(_) => AnswerBlock::None,
        };

        Ok(RenderedQuestionBlock {
            id: item.id().to_string(),
            display_number: item.display_number(),
            stimulus: item.stimulus.clone().filter(|s| !s.is_empty()),
            stem: item.stem.clone().filter(|s| !s.is_empty()),
            answer,
        })
    }

    /// `"cat||dog"` → `"cat or dog"`.
    pub fn accepted_answers(key: &str) -> String {
        key.split(SPR_KEY_SEPARATOR).collect::<Vec<_>>().join(" or ")
    }

    pub fn to_html(block: &RenderedQuestionBlock) -> String {
        let mut html = format!(r#"<div class="question" id="{}">"#, block.id);
        html.push_str(&format!(
            r#"<div class="question-header">Question {}</div>"#,
            block.display_number
        ));

        if let Some(stimulus) = &block.stimulus {
            html.push_str(&format!(r#"<div class="stimulus">{}</div>"#, stimulus));
        }
        if let Some(stem) = &block.stem {
            html.push_str(&format!(r#"<div class="stem">{}</div>"#, stem));
        }

        match &block.answer {
            AnswerBlock::Options(options) => {
                html.push_str(r#"<div class="answer-options"><ul>"#);
                for option in options {
                    html.push_str(&format!(
                        r#"<li class="{}">{}</li>"#,
                        if option.correct { "correct" } else { "" },
                        option.content
                    ));
                }
                html.push_str("</ul></div>");
            }
            AnswerBlock::ShortResponse(answers) => {
                html.push_str(r#"<div class="spr-answer"><strong>Correct Answer:</strong> "#);
                match answers {
                    Some(text) => {
                        html.push_str(&format!(r#"<span class="correct-text">{}</span>"#, text))
                    }
                    None => html.push_str(&format!(
                        r#"<span class="correct-text unavailable">{}</span>"#,
                        ANSWER_UNAVAILABLE
                    )),
                }
                html.push_str("</div>");
            }
            AnswerBlock::None => {}
        }

        html.push_str("</div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> Item {
        serde_json::from_value(value).unwrap()
    }

    fn mcq() -> Item {
        item(json!({
            "id": "q1",
            "displayNumber": 1,
            "type": "mcq",
            "stem": "<p>Pick one</p>",
            "answerOptions": [{"id": "A", "content": "x"}, {"id": "B", "content": "y"}]
        }))
    }

    #[test]
    fn test_mcq_marks_only_matching_option() {
        let block = QuestionFormatter::format(&mcq(), Some("B")).unwrap();

        let AnswerBlock::Options(options) = &block.answer else {
            panic!("expected options");
        };
        assert!(!options[0].correct);
        assert!(options[1].correct);
        assert_eq!(block.correct_option_count(), 1);
    }

    #[test]
    fn test_mcq_without_key_marks_nothing() {
        let block = QuestionFormatter::format(&mcq(), None).unwrap();
        assert_eq!(block.correct_option_count(), 0);

        let html = QuestionFormatter::to_html(&block);
        assert!(!html.contains(r#"class="correct""#));
    }

    #[test]
    fn test_mcq_without_options_is_a_render_error() {
        let broken = item(json!({"id": "q5", "type": "mcq"}));
        let err = QuestionFormatter::format(&broken, Some("A")).unwrap_err();
        assert!(matches!(err, ViewerError::RenderError { .. }));
        assert!(err.to_string().contains("q5"));
    }

    #[test]
    fn test_spr_joins_alternatives() {
        let spr = item(json!({"id": "q2", "displayNumber": "2", "type": "spr"}));
        let block = QuestionFormatter::format(&spr, Some("cat||dog")).unwrap();

        assert_eq!(block.answer, AnswerBlock::ShortResponse(Some("cat or dog".to_string())));
        assert!(QuestionFormatter::to_html(&block)
            .contains(r#"<span class="correct-text">cat or dog</span>"#));
    }

    #[test]
    fn test_spr_without_key_shows_placeholder() {
        let spr = item(json!({"id": "q3", "displayNumber": 3, "type": "spr"}));
        let block = QuestionFormatter::format(&spr, None).unwrap();

        assert_eq!(block.answer, AnswerBlock::ShortResponse(None));
        assert!(QuestionFormatter::to_html(&block).contains(ANSWER_UNAVAILABLE));
    }

    #[test]
    fn test_empty_key_counts_as_unavailable() {
        let spr = item(json!({"id": "q6", "displayNumber": 6, "type": "spr"}));
        let block = QuestionFormatter::format(&spr, Some("")).unwrap();

        assert_eq!(block.answer, AnswerBlock::ShortResponse(None));
        let html = QuestionFormatter::to_html(&block);
        assert!(html.contains(ANSWER_UNAVAILABLE));
        assert!(!html.contains(r#"<span class="correct-text"></span>"#));

        let blank_option = item(json!({
            "id": "q7", "type": "mcq",
            "answerOptions": [{"id": "", "content": "blank"}]
        }));
        assert_eq!(
            QuestionFormatter::format(&blank_option, Some("")).unwrap().correct_option_count(),
            0
        );
    }

    #[test]
    fn test_markup_is_passed_through() {
        let rich = item(json!({
            "id": "q4",
            "displayNumber": 4,
            "type": "essay",
            "stimulus": "<table><tr><td>1 &lt; 2</td></tr></table>",
            "stem": "<em>Explain</em>"
        }));
        let html = QuestionFormatter::to_html(&QuestionFormatter::format(&rich, None).unwrap());

        assert_eq!(
            html,
            concat!(
                r#"<div class="question" id="q4"><div class="question-header">Question 4</div>"#,
                r#"<div class="stimulus"><table><tr><td>1 &lt; 2</td></tr></table></div>"#,
                r#"<div class="stem"><em>Explain</em></div></div>"#
            )
        );
    }
}
