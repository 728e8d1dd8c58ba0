pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_OUTPUT_FILE: &str = "answer-key.html";
pub const DEFAULT_PAGE_TITLE: &str = "Test Answer Key";

#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", command(name = "answer-key-viewer"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Render a JSON test file as a printable page with the correct answers marked")
)]
pub struct CliConfig {
    /// JSON test-definition file; omit to produce the "no file chosen" page
    #[cfg_attr(feature = "cli", arg(value_name = "INPUT"))]
    pub input: Option<String>,

    /// Directory the rendered page is written to [default: ./output]
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_path: Option<String>,

    /// File name of the rendered page [default: answer-key.html]
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_file: Option<String>,

    /// Page title
    #[cfg_attr(feature = "cli", arg(long))]
    pub title: Option<String>,

    /// Extra CSS file appended to the built-in print styles
    #[cfg_attr(feature = "cli", arg(long))]
    pub stylesheet: Option<String>,

    /// Also print the rendered page to this PDF file (needs the `pdf` feature)
    #[cfg_attr(feature = "cli", arg(long))]
    pub pdf: Option<String>,

    /// TOML configuration file; command line flags override its values
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_file(&self) -> &str {
        self.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn page_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_PAGE_TITLE)
    }

    fn stylesheet_path(&self) -> Option<&str> {
        self.stylesheet.as_deref()
    }

    fn pdf_path(&self) -> Option<&str> {
        self.pdf.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_file_name("output_file", config.output_file())?;

    if let Some(input) = config.input_path() {
        validation::validate_path("input", input)?;
        validation::validate_file_extension("input", input, &["json"])?;
    }
    if let Some(stylesheet) = config.stylesheet_path() {
        validation::validate_path("stylesheet", stylesheet)?;
    }
    if let Some(pdf) = config.pdf_path() {
        validation::validate_path("pdf", pdf)?;
        validation::validate_pdf_export_available("pdf")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_flags_are_missing() {
        let config = CliConfig::default();
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.output_file(), DEFAULT_OUTPUT_FILE);
        assert_eq!(config.page_title(), DEFAULT_PAGE_TITLE);
        assert!(config.input_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_json_input_is_rejected() {
        let config = CliConfig {
            input: Some("answers.csv".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_command_line() {
        use clap::Parser;

        let config = CliConfig::parse_from([
            "answer-key-viewer",
            "practice.json",
            "--output-path",
            "/tmp/out",
            "--title",
            "Practice Test 1",
            "-v",
        ]);

        assert_eq!(config.input_path(), Some("practice.json"));
        assert_eq!(config.output_path(), "/tmp/out");
        assert_eq!(config.page_title(), "Practice Test 1");
        assert!(config.verbose);
    }
}
