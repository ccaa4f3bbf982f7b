//! Load-time failures of the marker parser.

use std::fmt;

/// What is wrong with the markup on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupIssue {
    /// An inline end marker with no open section before it on the same line
    UnmatchedSectionEnd,
    /// An inline begin marker that is never closed on its line
    UnclosedSection,
    /// An inline begin marker while a section is already open
    NestedSection,
    /// A properties block still open at the end of input
    UnterminatedProperties,
}

impl fmt::Display for MarkupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedSectionEnd => write!(f, "section end marker without a begin marker"),
            Self::UnclosedSection => write!(f, "section begin marker is never closed"),
            Self::NestedSection => write!(f, "section begin marker inside an open section"),
            Self::UnterminatedProperties => write!(f, "properties block is never closed"),
        }
    }
}

/// Errors that abort a load. No region model is produced when one occurs.
#[derive(Debug)]
pub enum MarkupError {
    /// The properties block does not decode as JSON
    MalformedProperties {
        /// 1-based source line of the block's opening marker
        line: usize,
        source: serde_json::Error,
    },
    /// Markers are not balanced
    MalformedMarkup {
        /// 1-based source line
        line: usize,
        /// 0-based column in the partially cleaned line
        column: usize,
        issue: MarkupIssue,
    },
}

impl MarkupError {
    pub(crate) fn markup(line: usize, column: usize, issue: MarkupIssue) -> Self {
        Self::MalformedMarkup {
            line,
            column,
            issue,
        }
    }

    /// 1-based source line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedProperties { line, .. } | Self::MalformedMarkup { line, .. } => *line,
        }
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedProperties { line, source } => {
                write!(f, "malformed properties block at line {}: {}", line, source)
            }
            Self::MalformedMarkup {
                line,
                column,
                issue,
            } => write!(f, "malformed markup at {}:{}: {}", line, column, issue),
        }
    }
}

impl std::error::Error for MarkupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedProperties { source, .. } => Some(source),
            Self::MalformedMarkup { .. } => None,
        }
    }
}
