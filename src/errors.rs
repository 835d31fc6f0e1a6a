/*!
 * Error types for the vtt2lrc application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised while compiling or resolving the output filename template
#[derive(Error, Debug)]
pub enum TemplateError {
    /// A regex span was opened but never closed
    #[error("template syntax error in '{template}': regex span opened but never closed")]
    UnterminatedPattern {
        /// The offending template string
        template: String,
    },

    /// An escape sequence that the grammar does not define
    #[error("template syntax error in '{template}': '/{escape}' is not a valid escape action")]
    InvalidEscape {
        /// The character following the escape introducer
        escape: char,
        /// The offending template string
        template: String,
    },

    /// The embedded regex failed to compile
    #[error("invalid regex in template: {0}")]
    BadPattern(#[from] regex::Error),

    /// The resolved filename contains a character the host filesystem forbids
    #[error("resolved output filename '{name}' contains illegal character '{character}'")]
    IllegalFilename {
        /// The resolved filename
        name: String,
        /// The first forbidden character found
        character: char,
    },
}

/// Errors that can occur while parsing VTT content
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timestamp field delimiter was not found where expected
    #[error("malformed timestamp '{text}': missing '{delimiter}' delimiter")]
    MissingDelimiter {
        /// The delimiter that was expected
        delimiter: char,
        /// The timestamp text being parsed
        text: String,
    },

    /// A timestamp field did not parse as an integer
    #[error("malformed timestamp '{text}': {field} field is not a number")]
    InvalidField {
        /// Which field failed (hour, minute, second, millisecond)
        field: &'static str,
        /// The timestamp text being parsed
        text: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the filename template engine
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
