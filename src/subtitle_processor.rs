use std::fmt;
use crate::errors::SubtitleError;

// @module: WebVTT parsing and LRC rendering

// @const: Required first content line of a VTT file
pub const VTT_SIGNATURE: &str = "WEBVTT";

// @const: Token separating start and end timestamps on a timing line
const TIMING_SEPARATOR: &str = "-->";

// @const: Fixed metadata block preceding all LRC cue lines
pub const LRC_HEADER: &str = "[by:vtt2lrc]\n[re:VTT to LRC]\n[ve:1.00]\n\n";

/// A VTT timestamp split into its four textual fields.
///
/// Parsed strictly from the `H:MM:SS.mmm` layout (variable hour width).
/// No range validation happens beyond what integer parsing guarantees:
/// minute and second are not re-clamped to below 60, and a millisecond
/// field wider than three digits keeps its full value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VttTimestamp {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl VttTimestamp {
    /// Creates a timestamp from its four fields - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        VttTimestamp {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// Parse a timestamp from VTT timing-line text.
    ///
    /// The text is trimmed, then the three delimiters (`:`, `:`, `.`) are
    /// located left-to-right and the four fields between them parsed as
    /// integers.
    pub fn parse(text: &str) -> Result<Self, SubtitleError> {
        let trimmed = text.trim();

        let (hour_text, rest) = split_field(trimmed, ':', text)?;
        let (minute_text, rest) = split_field(rest, ':', text)?;
        let (second_text, millis_text) = split_field(rest, '.', text)?;

        Ok(VttTimestamp {
            hour: parse_field(hour_text, "hour", text)?,
            minute: parse_field(minute_text, "minute", text)?,
            second: parse_field(second_text, "second", text)?,
            millisecond: parse_field(millis_text, "millisecond", text)?,
        })
    }

    /// Render as an LRC timestamp (`MM:SS.cc`).
    ///
    /// Minutes fold the hour in (`minute + hour * 60`) and render with a
    /// minimum width of two digits; values past 99 widen the field rather
    /// than truncate. Centiseconds are milliseconds divided by ten,
    /// truncating.
    pub fn to_lrc(&self) -> String {
        format!(
            "{:02}:{:02}.{:02}",
            self.minute + self.hour * 60,
            self.second,
            self.millisecond / 10
        )
    }
}

impl fmt::Display for VttTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}

// @splits: Text at the first `delimiter`, erroring when it is absent
fn split_field<'t>(
    text: &'t str,
    delimiter: char,
    original: &str,
) -> Result<(&'t str, &'t str), SubtitleError> {
    match text.find(delimiter) {
        Some(index) => Ok((&text[..index], &text[index + delimiter.len_utf8()..])),
        None => Err(SubtitleError::MissingDelimiter {
            delimiter,
            text: original.trim().to_string(),
        }),
    }
}

fn parse_field(text: &str, field: &'static str, original: &str) -> Result<u32, SubtitleError> {
    text.parse().map_err(|_| SubtitleError::InvalidField {
        field,
        text: original.trim().to_string(),
    })
}

// @struct: One timed subtitle entry
#[derive(Debug, Clone)]
pub struct VttCue {
    // @field: Cue start time
    pub start: VttTimestamp,

    // @field: Cue end time
    pub end: VttTimestamp,

    // @field: Accumulated cue text, physical lines joined with single
    // spaces; the trailing space is retained through rendering
    pub text: String,
}

impl VttCue {
    fn open(start_text: &str, end_text: &str) -> Result<Self, SubtitleError> {
        Ok(VttCue {
            start: VttTimestamp::parse(start_text)?,
            end: VttTimestamp::parse(end_text)?,
            text: String::new(),
        })
    }
}

/// Parse full VTT text into an ordered cue sequence.
///
/// Returns an empty sequence when the first non-blank line is not exactly
/// `WEBVTT` - that is "not this format", not an error, so directory scans
/// tolerate non-matching files silently. Malformed timestamps on a timing
/// line are real errors the caller surfaces per file.
pub fn parse_vtt(content: &str) -> Result<Vec<VttCue>, SubtitleError> {
    // Header check: the first non-blank line must be the signature token
    let signature_ok = content
        .split('\n')
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| line == VTT_SIGNATURE);
    if !signature_ok {
        return Ok(Vec::new());
    }

    let mut cues = Vec::new();
    let mut current: Option<VttCue> = None;

    for line in content.split('\n') {
        if line.trim().is_empty() {
            // Blank line seals the open cue, if any
            if let Some(sealed) = current.take() {
                cues.push(sealed);
            }
        } else if let Some(cue) = current.as_mut() {
            cue.text.push_str(line.trim());
            cue.text.push(' ');
        } else if let Some(index) = line.find(TIMING_SEPARATOR) {
            let start_text = &line[..index];
            let end_text = &line[index + TIMING_SEPARATOR.len()..];
            current = Some(VttCue::open(start_text, end_text)?);
        }
        // Any other line while no cue is open is ignored (cue identifiers,
        // NOTE blocks, the signature line itself)
    }

    // Input that does not end with a trailing blank line leaves a cue open
    if let Some(cue) = current {
        cues.push(cue);
    }

    Ok(cues)
}

/// Render cues as complete LRC text, metadata header included.
///
/// Each cue emits `[MM:SS.cc]<text>`; unless `ignore_end_time` is set, a
/// bare `[MM:SS.cc]` end-time line follows so players blank the display
/// between lyrics.
pub fn render_lrc(cues: &[VttCue], ignore_end_time: bool) -> String {
    let mut output = String::from(LRC_HEADER);

    for cue in cues {
        output.push_str(&format!("[{}]{}\n", cue.start.to_lrc(), cue.text));
        if !ignore_end_time {
            output.push_str(&format!("[{}]\n", cue.end.to_lrc()));
        }
    }

    output
}
