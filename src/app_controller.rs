use anyhow::{Context, Result};
use log::{error, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::{Config, INPUT_EXTENSION};
use crate::file_utils::FileManager;
use crate::filename_template::FilenameTemplate;
use crate::subtitle_processor::{parse_vtt, render_lrc};

// @module: Application controller for subtitle conversion

// @const: Safety cap on input file size, enforced before any read
pub const MAX_INPUT_SIZE: u64 = 4 * 1024 * 1024;

/// Why a file was not converted
#[derive(Debug)]
pub enum SkipReason {
    /// The path does not exist
    NotFound,
    /// The path is a directory and recursion is disabled
    IsDirectory,
    /// The file exceeds the input size cap
    TooLarge(u64),
    /// The file does not carry the enforced extension
    WrongExtension,
    /// Reading, converting, or writing the file failed
    ConversionFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "does not exist"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::TooLarge(size) => {
                write!(f, "is too large ({} bytes > {} bytes)", size, MAX_INPUT_SIZE)
            }
            Self::WrongExtension => write!(
                f,
                "is not a .{} file (rename it if it actually is one)",
                INPUT_EXTENSION
            ),
            Self::ConversionFailed(message) => write!(f, "failed to convert: {}", message),
        }
    }
}

// @struct: One ignored-file record for end-of-run reporting
#[derive(Debug)]
pub struct SkippedFile {
    // @field: Input path as given
    pub path: PathBuf,

    // @field: Why it was skipped
    pub reason: SkipReason,
}

/// Outcome of one run over a set of input paths
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files that passed path expansion and were attempted
    pub attempted: usize,

    /// Files successfully converted
    pub converted: usize,

    /// Append-only skip records, in encounter order
    pub skipped: Vec<SkippedFile>,
}

impl RunReport {
    /// Whether anything went wrong during the run
    pub fn has_errors(&self) -> bool {
        !self.skipped.is_empty()
    }

    fn skip(&mut self, path: &Path, reason: SkipReason) {
        error!("{:?} {}, ignored.", path, reason);
        self.skipped.push(SkippedFile {
            path: path.to_path_buf(),
            reason,
        });
    }
}

/// Main application controller for VTT to LRC conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Template compiled once at configuration-load time
    template: FilenameTemplate,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let template = config.compiled_template()?;
        Ok(Self { config, template })
    }

    /// Run the conversion over the given input paths.
    ///
    /// Each path is expanded, gated, and converted in order; every per-file
    /// failure is caught here, recorded, and the run continues with the
    /// remaining files. Nothing is retried.
    pub fn run(&self, inputs: &[PathBuf]) -> RunReport {
        let mut report = RunReport::default();
        let files = self.expand_inputs(inputs, &mut report);
        report.attempted = files.len();

        // One bar for the whole run; pointless noise for a single file
        let progress = if files.len() > 1 {
            let bar = ProgressBar::new(files.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            Some(bar)
        } else {
            None
        };

        for file in &files {
            if let Some(bar) = &progress {
                bar.set_message(
                    file.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                );
            }

            if let Some(reason) = self.gate(file) {
                report.skip(file, reason);
            } else {
                match self.convert_file(file) {
                    Ok(output) => {
                        report.converted += 1;
                        info!("Converted {:?} -> {:?}", file, output);
                    }
                    Err(e) => report.skip(file, SkipReason::ConversionFailed(format!("{:#}", e))),
                }
            }

            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress {
            bar.finish_and_clear();
        }

        report
    }

    /// Convert one gated input file, returning the written output path
    pub fn convert_file(&self, input: &Path) -> Result<PathBuf> {
        let content = FileManager::read_to_string(input)?;
        let cues = parse_vtt(&content)
            .with_context(|| format!("Failed to parse VTT content of {:?}", input))?;
        let lrc_text = render_lrc(&cues, self.config.ignore_end_time);

        let output_path = self.output_path(input)?;
        FileManager::write_to_file(&output_path, &lrc_text)?;

        Ok(output_path)
    }

    /// Resolve the destination path for one input file
    pub fn output_path(&self, input: &Path) -> Result<PathBuf> {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let candidate = self.template.resolve(&file_name)?;
        let folder = self.output_folder(input);

        let resolved = if self.config.overwrite {
            candidate
        } else {
            FileManager::non_duplicate_file_name(&folder, &candidate)
        };

        Ok(folder.join(resolved))
    }

    // @returns: Destination folder; "*" keeps the input's own folder
    fn output_folder(&self, input: &Path) -> PathBuf {
        if self.config.output_folder == "*" {
            input.parent().unwrap_or_else(|| Path::new(".")).to_path_buf()
        } else {
            PathBuf::from(&self.config.output_folder)
        }
    }

    // @expands: Input paths to candidate files, recording unexpandable ones
    fn expand_inputs(&self, inputs: &[PathBuf], report: &mut RunReport) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for input in inputs {
            if !input.exists() {
                report.skip(input, SkipReason::NotFound);
            } else if input.is_dir() {
                if self.config.recursive {
                    match FileManager::collect_files(input) {
                        Ok(contained) => files.extend(contained),
                        Err(e) => {
                            report.skip(input, SkipReason::ConversionFailed(format!("{:#}", e)));
                        }
                    }
                } else {
                    report.skip(input, SkipReason::IsDirectory);
                }
            } else {
                files.push(input.clone());
            }
        }

        files
    }

    // @gates: Per-file skip checks, in original check order
    fn gate(&self, path: &Path) -> Option<SkipReason> {
        if !path.exists() {
            return Some(SkipReason::NotFound);
        }
        if path.is_dir() {
            return Some(SkipReason::IsDirectory);
        }

        // Size cap checked on metadata, before any read
        match path.metadata() {
            Ok(metadata) if metadata.len() > MAX_INPUT_SIZE => {
                return Some(SkipReason::TooLarge(metadata.len()));
            }
            Ok(_) => {}
            Err(e) => return Some(SkipReason::ConversionFailed(e.to_string())),
        }

        if self.config.check_extension {
            let matches = path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(INPUT_EXTENSION));
            if !matches {
                return Some(SkipReason::WrongExtension);
            }
        }

        None
    }

    /// Summarize the run and emit the ignored-file report when enabled
    pub fn report_run(&self, report: &RunReport) {
        info!(
            "Run complete: {} attempted, {} converted, {} skipped",
            report.attempted,
            report.converted,
            report.skipped.len()
        );

        if self.config.report_ignored && !report.skipped.is_empty() {
            warn!("Ignored files:");
            for skipped in &report.skipped {
                warn!("  {:?}: {}", skipped.path, skipped.reason);
            }
        }
    }

    /// Whether the configuration asks for an interactive pause on errors
    pub fn pause_on_error(&self) -> bool {
        self.config.pause_on_error
    }
}
