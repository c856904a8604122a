//! Decoder for the PCM text format.
//!
//! ```text
//! # Point Cloud File
//! # Version 1.1.0
//!
//! ref <id> <type> <value>
//!
//! point <id> <x> <y> <z>
//! ```
//!
//! Tokens are separated by a single space and no quoting is honored. Lines
//! starting with anything other than `ref` or `point` are skipped, which is
//! how the `#` header lines are ignored.

use pcm_core::{PointCloudMap, ReferenceId, Vector3f};

use crate::error::{IssueKind, LineIssue, ParseError};
use crate::number::parse_or_zero;
use crate::tokenizer::{normalize_lines, split_on};

const REF_KEYWORD: &str = "ref";
const POINT_KEYWORD: &str = "point";
const REF_TOKENS: usize = 4;
const POINT_TOKENS: usize = 5;

/// How the decoder reacts to lines it had to drop or adjust.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Keep whatever could be read. Issues are still reported.
    #[default]
    Lenient,
    /// Fail if any line produced an issue.
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub mode: DecodeMode,
}

impl ParseOptions {
    pub fn lenient() -> Self {
        Self {
            mode: DecodeMode::Lenient,
        }
    }

    pub fn strict() -> Self {
        Self {
            mode: DecodeMode::Strict,
        }
    }

    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub map: PointCloudMap,
    /// Value of the `# Version` header line, if the input had one.
    pub version: Option<String>,
    pub issues: Vec<LineIssue>,
}

/// Decodes `text` into a new map.
pub fn decode_str(text: &str, options: &ParseOptions) -> Result<Decoded, ParseError> {
    decode_named("<string>", text, options)
}

pub(crate) fn decode_named(
    origin: &str,
    text: &str,
    options: &ParseOptions,
) -> Result<Decoded, ParseError> {
    let mut decoded = Decoded::default();
    decoded.version = decode_lines(text, &mut decoded.map, &mut decoded.issues);

    for issue in &decoded.issues {
        log::debug!("{origin}: {issue}");
    }

    if options.mode == DecodeMode::Strict && !decoded.issues.is_empty() {
        return Err(ParseError::Rejected {
            origin: origin.to_string(),
            issues: decoded.issues,
        });
    }

    Ok(decoded)
}

/// Decodes `text` and appends its contents to `map`.
///
/// Never fails: malformed lines are skipped and returned as issues. References
/// whose id is already in `map` are rejected.
pub fn decode_into(text: &str, map: &mut PointCloudMap) -> Vec<LineIssue> {
    let mut issues = Vec::new();
    decode_lines(text, map, &mut issues);
    issues
}

fn decode_lines(
    text: &str,
    map: &mut PointCloudMap,
    issues: &mut Vec<LineIssue>,
) -> Option<String> {
    let mut version = None;

    for (index, line) in normalize_lines(text).iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let tokens = split_on(line, " ");
        let Some(keyword) = tokens.first().copied() else {
            continue;
        };

        let mut report = |kind| {
            issues.push(LineIssue {
                line: index + 1,
                kind,
            })
        };

        match keyword {
            REF_KEYWORD => {
                if tokens.len() < REF_TOKENS {
                    report(too_few(keyword, REF_TOKENS, tokens.len()));
                    continue;
                }
                if tokens.len() > REF_TOKENS {
                    report(IssueKind::ExtraTokens {
                        keyword: keyword.to_string(),
                        ignored: tokens.len() - REF_TOKENS,
                    });
                }

                let id = ReferenceId::from(tokens[1]);
                if !map.add_reference(id.clone(), tokens[2], tokens[3]) {
                    report(IssueKind::DuplicateReference { id });
                }
            }
            POINT_KEYWORD => {
                if tokens.len() < POINT_TOKENS {
                    report(too_few(keyword, POINT_TOKENS, tokens.len()));
                    continue;
                }
                if tokens.len() > POINT_TOKENS {
                    report(IssueKind::ExtraTokens {
                        keyword: keyword.to_string(),
                        ignored: tokens.len() - POINT_TOKENS,
                    });
                }

                let mut coords = [0.0f32; 3];
                for (i, axis) in ['x', 'y', 'z'].into_iter().enumerate() {
                    let token = tokens[2 + i];
                    let (value, exact) = parse_or_zero(token);
                    if !exact {
                        report(IssueKind::InvalidCoordinate {
                            axis,
                            token: token.to_string(),
                            value,
                        });
                    }
                    coords[i] = value;
                }

                map.add_point(tokens[1], Vector3f::from(coords));
            }
            _ if keyword.starts_with('#') => {
                if version.is_none() && tokens.len() >= 3 && tokens[1] == "Version" {
                    version = Some(tokens[2].to_string());
                }
            }
            _ => report(IssueKind::UnknownRecord {
                keyword: keyword.to_string(),
            }),
        }
    }

    version
}

fn too_few(keyword: &str, expected: usize, found: usize) -> IssueKind {
    IssueKind::TooFewTokens {
        keyword: keyword.to_string(),
        expected,
        found,
    }
}
