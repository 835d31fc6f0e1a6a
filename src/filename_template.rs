use std::fmt;
use std::str::FromStr;
use anyhow::{anyhow, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::errors::TemplateError;

// @module: Output filename templating mini-language

/// Which delimiter grammar the template string uses.
///
/// The braced grammar is canonical: `{regex}` spans with `\` and `/`
/// escaping literal `{` and `}` outside spans. The slash-r grammar is the
/// legacy form (`/rREGEX/r` spans, `//` escaping a literal slash) kept for
/// compatibility with old configuration files.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateGrammar {
    #[default]
    Braced,
    SlashR,
}

impl fmt::Display for TemplateGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Braced => write!(f, "braced"),
            Self::SlashR => write!(f, "slashr"),
        }
    }
}

impl FromStr for TemplateGrammar {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "braced" => Ok(Self::Braced),
            "slashr" => Ok(Self::SlashR),
            _ => Err(anyhow!("Invalid template grammar: {}", s)),
        }
    }
}

// @enum: One compiled template segment
#[derive(Debug, Clone)]
enum Segment {
    // @variant: Text copied verbatim into the output name
    Literal(String),
    // @variant: Regex evaluated against the input filename
    Pattern(Regex),
}

/// A compiled output-filename template.
///
/// Templates interleave literal text with embedded regex spans. Each span
/// is matched against the original input filename (including its original
/// extension) with match-at-start semantics, and the matched substring is
/// spliced into the output at that position. Compilation happens once at
/// configuration-load time; resolution is a cheap per-file operation.
#[derive(Debug, Clone)]
pub struct FilenameTemplate {
    // @field: Compiled segments in template order
    segments: Vec<Segment>,
    // @field: Original template text, kept for diagnostics
    source: String,
}

impl FilenameTemplate {
    /// Compile a template string under the given grammar
    pub fn compile(template: &str, grammar: TemplateGrammar) -> Result<Self, TemplateError> {
        let segments = match grammar {
            TemplateGrammar::Braced => Self::compile_braced(template)?,
            TemplateGrammar::SlashR => Self::compile_slashr(template)?,
        };

        Ok(FilenameTemplate {
            segments,
            source: template.to_string(),
        })
    }

    /// The original template text this program was compiled from - used by
    /// tests and external consumers
    #[allow(dead_code)]
    pub fn source(&self) -> &str {
        &self.source
    }

    // @parses: Canonical grammar - `{regex}` spans, `\` -> literal `{`, `/` -> literal `}`
    fn compile_braced(template: &str) -> Result<Vec<Segment>, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut pattern = String::new();
        let mut in_pattern = false;

        for c in template.chars() {
            if in_pattern {
                if c == '}' {
                    segments.push(Segment::Pattern(Regex::new(&pattern)?));
                    pattern.clear();
                    in_pattern = false;
                } else {
                    pattern.push(c);
                }
            } else {
                match c {
                    '{' => {
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(std::mem::take(&mut literal)));
                        }
                        in_pattern = true;
                    }
                    // The only two escapes: they let literal braces appear in output names
                    '\\' => literal.push('{'),
                    '/' => literal.push('}'),
                    _ => literal.push(c),
                }
            }
        }

        if in_pattern {
            return Err(TemplateError::UnterminatedPattern {
                template: template.to_string(),
            });
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(segments)
    }

    // @parses: Legacy grammar - `/r` toggles regex mode, `//` is a literal slash
    fn compile_slashr(template: &str) -> Result<Vec<Segment>, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut pattern = String::new();
        let mut escaping = false;
        let mut scanning = false;

        for c in template.chars() {
            if escaping {
                escaping = false;
                match c {
                    '/' => {
                        if scanning {
                            pattern.push('/');
                        } else {
                            literal.push('/');
                        }
                    }
                    'r' => {
                        scanning = !scanning;
                        if scanning {
                            if !literal.is_empty() {
                                segments.push(Segment::Literal(std::mem::take(&mut literal)));
                            }
                        } else {
                            segments.push(Segment::Pattern(Regex::new(&pattern)?));
                            pattern.clear();
                        }
                    }
                    other => {
                        return Err(TemplateError::InvalidEscape {
                            escape: other,
                            template: template.to_string(),
                        });
                    }
                }
            } else if c == '/' {
                escaping = true;
            } else if scanning {
                pattern.push(c);
            } else {
                literal.push(c);
            }
        }

        // A dangling '/' at end of template is silently dropped, an
        // unterminated regex span is not.
        if scanning {
            return Err(TemplateError::UnterminatedPattern {
                template: template.to_string(),
            });
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(segments)
    }

    /// Resolve the template against an input filename.
    ///
    /// Pattern segments match case-sensitively at index 0 of the filename
    /// only; a non-matching pattern splices the empty string. The resolved
    /// name is checked against the host platform's forbidden-character set
    /// before being returned, so an illegal name can never be written
    /// silently.
    pub fn resolve(&self, file_name: &str) -> Result<String, TemplateError> {
        let mut resolved = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => resolved.push_str(text),
                Segment::Pattern(regex) => resolved.push_str(match_at_start(regex, file_name)),
            }
        }

        if let Some(character) = illegal_character(&resolved) {
            return Err(TemplateError::IllegalFilename {
                name: resolved,
                character,
            });
        }

        Ok(resolved)
    }
}

// @returns: The matched substring when the regex matches at index 0, "" otherwise
fn match_at_start<'t>(regex: &Regex, text: &'t str) -> &'t str {
    match regex.find(text) {
        Some(m) if m.start() == 0 => m.as_str(),
        _ => "",
    }
}

/// First character in `name` that the host filesystem forbids, if any
pub fn illegal_character(name: &str) -> Option<char> {
    name.chars().find(|c| forbidden_characters().contains(c))
}

// Windows forbids the full set; macOS only the path separator of classic
// HFS; other Unix only '/'.
fn forbidden_characters() -> &'static [char] {
    if cfg!(windows) {
        &['\\', '/', ':', '*', '?', '"', '<', '>', '|']
    } else if cfg!(target_os = "macos") {
        &[':']
    } else {
        &['/']
    }
}
