/*!
 * Tests for WebVTT parsing and LRC rendering
 */

use vtt2lrc::errors::SubtitleError;
use vtt2lrc::subtitle_processor::{parse_vtt, render_lrc, VttTimestamp, LRC_HEADER};

/// Test that content not starting with the signature yields no cues
#[test]
fn test_parse_vtt_withWrongSignature_shouldReturnEmptySequence() {
    let content = "NOTVTT\n\n00:00:00.000 --> 00:01:00.000\nHello\n\n";
    let cues = parse_vtt(content).unwrap();
    assert!(cues.is_empty());
}

/// Test that a signature with surrounding content is not accepted
#[test]
fn test_parse_vtt_withDecoratedSignature_shouldReturnEmptySequence() {
    let cues = parse_vtt("WEBVTT extra\n\n00:00:00.000 --> 00:01:00.000\nHi\n\n").unwrap();
    assert!(cues.is_empty());
}

/// Test that leading blank lines before the signature are tolerated
#[test]
fn test_parse_vtt_withLeadingBlankLines_shouldAcceptSignature() {
    let content = "\n\n  \nWEBVTT\n\n00:00:00.000 --> 00:01:00.000\nHello\n\n";
    let cues = parse_vtt(content).unwrap();
    assert_eq!(cues.len(), 1);
}

/// Test the canonical well-formed single-cue input
#[test]
fn test_parse_vtt_withSingleCue_shouldExtractTimesAndText() {
    let content = "WEBVTT\n\n00:00:00.000 --> 00:01:00.000\nHello\n\n";
    let cues = parse_vtt(content).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start, VttTimestamp::new(0, 0, 0, 0));
    assert_eq!(cues[0].end, VttTimestamp::new(0, 1, 0, 0));
    assert_eq!(cues[0].text, "Hello ");
}

/// Test that multi-line cue text is joined with single spaces
#[test]
fn test_parse_vtt_withMultiLineCue_shouldJoinLinesWithSpaces() {
    let content = "WEBVTT\n\n00:00:00.000 --> 00:01:00.000\nHello\n  World  \n\n";
    let cues = parse_vtt(content).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Hello World ");
}

/// Test that a cue still open at end of input is sealed
#[test]
fn test_parse_vtt_withNoTrailingBlankLine_shouldSealLastCue() {
    let content = "WEBVTT\n\n00:00:00.000 --> 00:01:00.000\nHello";
    let cues = parse_vtt(content).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Hello ");
}

/// Test that cues come out in source order
#[test]
fn test_parse_vtt_withMultipleCues_shouldPreserveSourceOrder() {
    let content = "WEBVTT\n\n\
0:00:01.000 --> 0:00:02.000\nfirst\n\n\
0:00:03.000 --> 0:00:04.000\nsecond\n\n";
    let cues = parse_vtt(content).unwrap();

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].text, "first ");
    assert_eq!(cues[1].text, "second ");
}

/// Test that cue identifiers and NOTE lines outside cues are ignored
#[test]
fn test_parse_vtt_withIdentifierLines_shouldIgnoreThem() {
    let content = "WEBVTT\n\nNOTE a comment\n\nintro-cue\n00:00:00.000 --> 00:01:00.000\nHello\n\n";
    let cues = parse_vtt(content).unwrap();

    // The identifier line precedes the timing line while no cue is open,
    // so it is dropped rather than treated as text
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Hello ");
}

/// Test that arbitrary whitespace around the separator is trimmed away
#[test]
fn test_parse_vtt_withWhitespaceAroundSeparator_shouldParseTimestamps() {
    let content = "WEBVTT\n\n00:00:01.500   -->\t00:00:02.750\nHi\n\n";
    let cues = parse_vtt(content).unwrap();

    assert_eq!(cues[0].start, VttTimestamp::new(0, 0, 1, 500));
    assert_eq!(cues[0].end, VttTimestamp::new(0, 0, 2, 750));
}

/// Test that a malformed timestamp surfaces as a parse error
#[test]
fn test_parse_vtt_withMalformedTimestamp_shouldFail() {
    let content = "WEBVTT\n\n00:00:00 --> 00:01:00.000\nHello\n\n";
    let result = parse_vtt(content);
    assert!(matches!(result, Err(SubtitleError::MissingDelimiter { delimiter: '.', .. })));
}

/// Test that a non-numeric timestamp field surfaces as a parse error
#[test]
fn test_parse_vtt_withNonNumericField_shouldFail() {
    let content = "WEBVTT\n\nxx:00:00.000 --> 00:01:00.000\nHello\n\n";
    let result = parse_vtt(content);
    assert!(matches!(result, Err(SubtitleError::InvalidField { field: "hour", .. })));
}

/// Test hour fields of variable width
#[test]
fn test_parse_timestamp_withVariableHourWidth_shouldParse() {
    assert_eq!(
        VttTimestamp::parse("1:02:03.456").unwrap(),
        VttTimestamp::new(1, 2, 3, 456)
    );
    assert_eq!(
        VttTimestamp::parse("123:02:03.456").unwrap(),
        VttTimestamp::new(123, 2, 3, 456)
    );
}

/// Test that out-of-range minutes and seconds are not re-clamped
#[test]
fn test_parse_timestamp_withOutOfRangeFields_shouldNotClamp() {
    let ts = VttTimestamp::parse("0:75:99.000").unwrap();
    assert_eq!(ts.minute, 75);
    assert_eq!(ts.second, 99);
}

/// Test the canonical LRC rendering of a timestamp
#[test]
fn test_to_lrc_withSimpleTimestamp_shouldRenderMinuteSecondCentisecond() {
    assert_eq!(VttTimestamp::new(0, 1, 2, 340).to_lrc(), "01:02.34");
}

/// Test that centiseconds truncate rather than round
#[test]
fn test_to_lrc_withMillisecond339_shouldTruncateTo33() {
    assert_eq!(VttTimestamp::new(0, 1, 2, 339).to_lrc(), "01:02.33");
}

/// Test that hours fold into the minutes field
#[test]
fn test_to_lrc_withNonZeroHour_shouldFoldIntoMinutes() {
    assert_eq!(VttTimestamp::new(1, 5, 0, 0).to_lrc(), "65:00.00");
}

/// Test that a minutes field past 99 widens instead of truncating
#[test]
fn test_to_lrc_withMinutesOverflow_shouldWidenField() {
    assert_eq!(VttTimestamp::new(2, 5, 0, 0).to_lrc(), "125:00.00");
}

/// Test that rendering starts with the fixed metadata header block
#[test]
fn test_render_lrc_withNoCues_shouldEmitHeaderOnly() {
    let output = render_lrc(&[], false);
    assert_eq!(output, LRC_HEADER);
    assert!(output.starts_with("[by:"));
    assert!(output.ends_with("\n\n"));
}

/// Test rendering with end-time lines enabled
#[test]
fn test_render_lrc_withEndTimeEnabled_shouldEmitEndLine() {
    let cues = parse_vtt("WEBVTT\n\n00:00:00.000 --> 00:01:00.000\nHello\n\n").unwrap();
    let output = render_lrc(&cues, false);

    let body = output.strip_prefix(LRC_HEADER).unwrap();
    assert_eq!(body, "[00:00.00]Hello \n[01:00.00]\n");
}

/// Test rendering with end-time lines suppressed
#[test]
fn test_render_lrc_withIgnoreEndTime_shouldOmitEndLine() {
    let cues = parse_vtt("WEBVTT\n\n00:00:00.000 --> 00:01:00.000\nHello\n\n").unwrap();
    let output = render_lrc(&cues, true);

    let body = output.strip_prefix(LRC_HEADER).unwrap();
    assert_eq!(body, "[00:00.00]Hello \n");
}

/// Test the Display layout of a parsed timestamp
#[test]
fn test_display_withParsedTimestamp_shouldUseVttLayout() {
    let ts = VttTimestamp::new(1, 2, 3, 45);
    assert_eq!(ts.to_string(), "1:02:03.045");
}
