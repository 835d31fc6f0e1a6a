use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use crate::filename_template::{FilenameTemplate, TemplateGrammar};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Output folder; "*" means alongside the input file
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Output filename template (see the filename_template module grammar)
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,

    /// Which template grammar output_file_name uses
    #[serde(default)]
    pub template_grammar: TemplateGrammar,

    /// Output text encoding; only UTF-8 is supported
    #[serde(default = "default_encoding")]
    pub output_file_encoding: String,

    /// Input text encoding; only UTF-8 is supported
    #[serde(default = "default_encoding")]
    pub input_file_encoding: String,

    /// Skip the end-time line after each lyric line
    #[serde(default)]
    pub ignore_end_time: bool,

    /// Overwrite an existing output file instead of suffixing with '_'
    #[serde(default = "default_true")]
    pub overwrite: bool,

    /// Require inputs to carry the .vtt extension
    #[serde(default = "default_true")]
    pub check_extension: bool,

    /// Expand directories to their contained files (recursively)
    #[serde(default)]
    pub recursive: bool,

    /// Print the list of ignored files at the end of the run
    #[serde(default = "default_true")]
    pub report_ignored: bool,

    /// Wait for an interactive acknowledgment when the run had errors
    #[serde(default = "default_true")]
    pub pause_on_error: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

// @const: Enforced input file extension (without the dot)
pub const INPUT_EXTENSION: &str = "vtt";

fn default_output_folder() -> String {
    "*".to_string()
}

fn default_output_file_name() -> String {
    // Keep everything up to the first dot of the input name. The regex
    // crate has no look-around, so templates cannot strip a known suffix
    // the way a lookahead would.
    "{[^.]+}.lrc".to_string()
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // A malformed template is a configuration error, caught here
        // rather than per file
        self.compiled_template()?;

        if !encoding_supported(&self.input_file_encoding) {
            return Err(anyhow!(
                "Unsupported input_file_encoding '{}': only UTF-8 is supported",
                self.input_file_encoding
            ));
        }

        if !encoding_supported(&self.output_file_encoding) {
            return Err(anyhow!(
                "Unsupported output_file_encoding '{}': only UTF-8 is supported",
                self.output_file_encoding
            ));
        }

        Ok(())
    }

    /// Compile the output filename template once for the whole run
    pub fn compiled_template(&self) -> Result<FilenameTemplate> {
        FilenameTemplate::compile(&self.output_file_name, self.template_grammar)
            .map_err(|e| anyhow!("Invalid output_file_name configuration: {}", e))
    }
}

fn encoding_supported(encoding: &str) -> bool {
    encoding.eq_ignore_ascii_case("utf-8") || encoding.eq_ignore_ascii_case("utf8")
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output_folder: default_output_folder(),
            output_file_name: default_output_file_name(),
            template_grammar: TemplateGrammar::default(),
            output_file_encoding: default_encoding(),
            input_file_encoding: default_encoding(),
            ignore_end_time: false,
            overwrite: true,
            check_extension: true,
            recursive: false,
            report_ignored: true,
            pause_on_error: true,
            log_level: LogLevel::default(),
        }
    }
}
