/*!
 * # vtt2lrc - WebVTT to LRC subtitle converter
 *
 * A Rust library and CLI for converting WebVTT subtitle files into LRC
 * lyric files.
 *
 * ## Features
 *
 * - Line-oriented WebVTT parsing (signature check, timing lines,
 *   multi-line cue text merging)
 * - LRC rendering with minute:second.centisecond timestamps
 * - Output filename templating: literal text interleaved with embedded
 *   regexes evaluated against the input filename
 * - Duplicate-name suffixing, extension enforcement, recursive directory
 *   scanning, and an ignored-file report
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: WebVTT parsing and LRC rendering
 * - `filename_template`: Output filename templating mini-language
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod filename_template;
pub mod subtitle_processor;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunReport, SkipReason, SkippedFile};
pub use filename_template::{FilenameTemplate, TemplateGrammar};
pub use subtitle_processor::{parse_vtt, render_lrc, VttCue, VttTimestamp};
pub use errors::{AppError, SubtitleError, TemplateError};
