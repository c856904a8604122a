use std::path::PathBuf;

use pcm_core::ReferenceId;

/// Something the decoder dropped or adjusted on a single line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IssueKind {
    #[error("reference '{id}' is already defined, line ignored")]
    DuplicateReference { id: ReferenceId },

    #[error("'{keyword}' needs {expected} tokens, found {found}, line ignored")]
    TooFewTokens {
        keyword: String,
        expected: usize,
        found: usize,
    },

    #[error("'{keyword}' has {ignored} extra token(s), which were ignored")]
    ExtraTokens { keyword: String, ignored: usize },

    #[error("invalid {axis} coordinate '{token}', read as {value}")]
    InvalidCoordinate {
        axis: char,
        token: String,
        value: f32,
    },

    #[error("unknown record '{keyword}', line ignored")]
    UnknownRecord { keyword: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct LineIssue {
    /// 1-based line number in the decoded text.
    pub line: usize,
    pub kind: IssueKind,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin}: rejected with {} issue(s)", issues.len())]
    Rejected {
        origin: String,
        issues: Vec<LineIssue>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_messages() {
        let issue = LineIssue {
            line: 3,
            kind: IssueKind::TooFewTokens {
                keyword: "ref".to_string(),
                expected: 4,
                found: 2,
            },
        };
        assert_eq!(
            issue.to_string(),
            "line 3: 'ref' needs 4 tokens, found 2, line ignored"
        );

        let issue = LineIssue {
            line: 1,
            kind: IssueKind::DuplicateReference { id: "a".into() },
        };
        assert_eq!(
            issue.to_string(),
            "line 1: reference 'a' is already defined, line ignored"
        );
    }

    #[test]
    fn rejected_message_counts_issues() {
        let err = ParseError::Rejected {
            origin: "map.pcm".to_string(),
            issues: vec![
                LineIssue {
                    line: 1,
                    kind: IssueKind::UnknownRecord {
                        keyword: "pt".to_string(),
                    },
                };
                2
            ],
        };
        assert_eq!(err.to_string(), "map.pcm: rejected with 2 issue(s)");
    }
}
