use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Could not parse file: {0}")]
    ParseError(#[source] serde_json::Error),

    #[error("Error rendering content: {message}")]
    RenderError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Export failed: {message}")]
    ExportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

impl ViewerError {
    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::ExportError {
            message: message.into(),
        }
    }

    /// Parse and render failures are recovered at the top level and shown on
    /// the presentation surface; everything else aborts the load attempt.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::ParseError(_) | Self::RenderError { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ParseError(_) | Self::RenderError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::ExportError { .. } => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ParseError(_) => {
                "Error: Could not parse JSON file. Please ensure it's a valid test file.".to_string()
            }
            Self::RenderError { .. } => {
                "Error: Could not render test content. The file does not match the expected test format."
                    .to_string()
            }
            Self::IoError(e) => format!("Error: Could not access file ({})", e),
            Self::ConfigError { message } => format!("Error: Invalid configuration ({})", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Error: Invalid value for {} ({})", field, reason)
            }
            Self::ExportError { message } => format!("Error: Export failed ({})", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ParseError(_) => "Check that the file is a well-formed JSON test export",
            Self::RenderError { .. } => {
                "Check that every routed section has chunks, every chunk has items and every mcq item has answerOptions"
            }
            Self::IoError(_) => "Check that the input file exists and the output directory is writable",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            Self::ExportError { .. } => {
                "Make sure a Chromium based browser is installed, or print the HTML page manually"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Configuration => 1,
            ErrorCategory::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
