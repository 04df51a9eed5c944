// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use thiserror::Error;
#[derive(Error, Debug)]
pub enum VizRecError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] SerialisationError),
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read recommender configuration file '{path}': {source}")]
    ConfigFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Conflicting configuration options: {details}")]
    ConflictingOptions { details: String },
    #[error("Missing required configuration: {field}")]
    MissingRequiredConfig { field: String },
    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },
}
#[derive(Error, Debug)]
pub enum SerialisationError {
    #[error("JSON serialisation failed: {source}")]
    JsonSerialisationError {
        #[from]
        source: serde_json::Error,
    },
    #[error("YAML serialisation failed: {source}")]
    YamlSerialisationError {
        #[from]
        source: serde_yaml::Error,
    },
    #[error("Unknown chart type identifier: '{identifier}'")]
    UnknownChartType { identifier: String },
}
pub type Result<T> = std::result::Result<T, VizRecError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
impl From<serde_json::Error> for VizRecError {
    fn from(err: serde_json::Error) -> Self {
        VizRecError::Serialisation(SerialisationError::JsonSerialisationError { source: err })
    }
}
impl From<serde_yaml::Error> for VizRecError {
    fn from(err: serde_yaml::Error) -> Self {
        VizRecError::Serialisation(SerialisationError::YamlSerialisationError { source: err })
    }
}
impl VizRecError {
    pub fn category(&self) -> &'static str {
        match self {
            VizRecError::Config(_) => "Configuration",
            VizRecError::Io(_) => "I/O",
            VizRecError::Serialisation(_) => "Serialisation",
        }
    }
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            VizRecError::Serialisation(SerialisationError::JsonSerialisationError { .. }) => vec![
                "Check that every measure carries an 'alias' field".to_string(),
                "Verify 'dimensions' is a list of strings".to_string(),
                "Verify 'dimensionStats' maps dimension names to non-negative integers"
                    .to_string(),
            ],
            VizRecError::Config(ConfigError::ConflictingOptions { .. }) => vec![
                "A dimension cannot be both temporal and geographic".to_string(),
                "The point dimension must not also be listed as a region".to_string(),
            ],
            VizRecError::Config(ConfigError::ConfigFileError { .. }) => vec![
                "Check the configuration file path".to_string(),
                "Omit the configuration file to use the built-in defaults".to_string(),
            ],
            _ => vec!["Check the error message for specific guidance".to_string()],
        }
    }
    pub fn user_message(&self) -> String {
        match self {
            VizRecError::Serialisation(SerialisationError::JsonSerialisationError { .. }) => {
                "The recommendation request could not be read. Please check the query definition."
                    .to_string()
            }
            VizRecError::Config(ConfigError::ConfigFileError { .. }) => {
                "Unable to load recommender configuration. Please check the configuration file."
                    .to_string()
            }
            _ => self.to_string(),
        }
    }
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VizRecError::Serialisation(SerialisationError::UnknownChartType { .. }) => {
                ErrorSeverity::Warning
            }
            VizRecError::Config(ConfigError::ConflictingOptions { .. })
            | VizRecError::Config(ConfigError::MissingRequiredConfig { .. }) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::Error,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}
impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Warning => "WARNING",
            ErrorSeverity::Error => "ERROR",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }
    pub fn color_code(&self) -> &'static str {
        match self {
            ErrorSeverity::Warning => "\x1b[33m",
            ErrorSeverity::Error => "\x1b[31m",
            ErrorSeverity::Critical => "\x1b[35m",
        }
    }
}
pub struct ErrorReporter {
    pub show_suggestions: bool,
    pub colored_output: bool,
}
impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            show_suggestions: true,
            colored_output: true,
        }
    }
    pub fn plain() -> Self {
        Self {
            show_suggestions: true,
            colored_output: false,
        }
    }
    pub fn report(&self, error: &VizRecError) -> String {
        let severity = error.severity();
        let mut output = String::new();
        if self.colored_output {
            output.push_str(severity.color_code());
        }
        output.push_str(&format!(
            "[{}] {}: {}\n",
            severity.as_str(),
            error.category(),
            error
        ));
        if self.colored_output {
            output.push_str("\x1b[0m");
        }
        if self.show_suggestions {
            let suggestions = error.suggestions();
            if !suggestions.is_empty() {
                output.push_str("\nSuggestions:\n");
                for suggestion in suggestions {
                    output.push_str(&format!("  • {suggestion}\n"));
                }
            }
        }
        output
    }
}
impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_report_has_no_escape_codes() {
        let err: VizRecError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        let report = ErrorReporter::plain().report(&err);
        assert!(report.starts_with("[ERROR] Serialisation:"));
        assert!(!report.contains('\x1b'));
        assert!(report.contains("alias"));
    }

    #[test]
    fn conflicting_config_is_critical() {
        let err = VizRecError::Config(ConfigError::ConflictingOptions {
            details: "borough".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), "Configuration");
    }

    #[test]
    fn user_message_hides_parser_detail() {
        let err: VizRecError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert_eq!(
            err.user_message(),
            "The recommendation request could not be read. Please check the query definition."
        );
        let err = VizRecError::Config(ConfigError::ValidationFailed {
            reason: "cardinality_threshold must be greater than 0".to_string(),
        });
        assert!(err.user_message().contains("cardinality_threshold"));
    }
}
