use crate::config::{CliConfig, DEFAULT_OUTPUT_FILE, DEFAULT_OUTPUT_PATH, DEFAULT_PAGE_TITLE};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ViewerError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    pub title: Option<String>,
    pub stylesheet: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub pdf: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ViewerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ViewerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; undefined variables are left as is.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// Command line flags take precedence over file values.
    pub fn apply_cli_overrides(&mut self, cli: &CliConfig) {
        if cli.input.is_some() {
            self.input.path = cli.input.clone();
        }
        if cli.output_path.is_some() {
            self.output.path = cli.output_path.clone();
        }
        if cli.output_file.is_some() {
            self.output.file_name = cli.output_file.clone();
        }
        if cli.title.is_some() {
            self.page.title = cli.title.clone();
        }
        if cli.stylesheet.is_some() {
            self.page.stylesheet = cli.stylesheet.clone();
        }
        if cli.pdf.is_some() {
            self.export.pdf = cli.pdf.clone();
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.path.as_deref()
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_file(&self) -> &str {
        self.output.file_name.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn page_title(&self) -> &str {
        self.page.title.as_deref().unwrap_or(DEFAULT_PAGE_TITLE)
    }

    fn stylesheet_path(&self) -> Option<&str> {
        self.page.stylesheet.as_deref()
    }

    fn pdf_path(&self) -> Option<&str> {
        self.export.pdf.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::config::validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[input]
path = "tests/practice-1.json"

[output]
path = "./rendered"
file_name = "practice-1.html"

[page]
title = "Practice Test 1"
stylesheet = "print.css"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input_path(), Some("tests/practice-1.json"));
        assert_eq!(config.output_path(), "./rendered");
        assert_eq!(config.output_file(), "practice-1.html");
        assert_eq!(config.page_title(), "Practice Test 1");
        assert_eq!(config.stylesheet_path(), Some("print.css"));
        assert!(config.pdf_path().is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.output_file(), DEFAULT_OUTPUT_FILE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ANSWER_KEY_VIEWER_TEST_DIR", "/srv/tests");

        let config = TomlConfig::from_toml_str(
            r#"
[input]
path = "${ANSWER_KEY_VIEWER_TEST_DIR}/practice.json"
"#,
        )
        .unwrap();
        assert_eq!(config.input_path(), Some("/srv/tests/practice.json"));

        std::env::remove_var("ANSWER_KEY_VIEWER_TEST_DIR");
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = TomlConfig::from_toml_str(
            r#"
[output]
path = "./from-file"

[page]
title = "From file"
"#,
        )
        .unwrap();

        let cli = CliConfig {
            title: Some("From flags".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&cli);

        assert_eq!(config.page_title(), "From flags");
        assert_eq!(config.output_path(), "./from-file");
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[output\npath = 1").unwrap_err();
        assert!(matches!(err, ViewerError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\nfile_name = \"key.html\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_file(), "key.html");
    }
}
