use std::fmt;

/// A non-fatal structural problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based input line.
    pub line: usize,
    /// 0-based byte offset into the trimmed line content.
    pub column: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A closing marker with no open frame to close.
    UnmatchedCloser {
        marker: String,
        /// Innermost open marker at the time, if any.
        open: Option<String>,
    },
    /// An opener past the nesting limit, kept as text. Raised once per line.
    NestingTooDeep { marker: String, limit: usize },
    /// The line does not begin with a backslash.
    MissingPrefix,
}

impl Diagnostic {
    pub fn new(line: usize, column: usize, kind: DiagnosticKind) -> Self {
        Self { line, column, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnmatchedCloser { marker, open } => write!(
                f,
                "Mismatched word-level markers '{}' and '{}*' (ln {}, col {})",
                open.as_deref().unwrap_or("(root)"),
                marker,
                self.line,
                self.column
            ),
            DiagnosticKind::NestingTooDeep { marker, limit } => write!(
                f,
                "Marker '{}' nested deeper than {} levels (ln {}, col {})",
                marker, limit, self.line, self.column
            ),
            DiagnosticKind::MissingPrefix => {
                write!(f, "Line does not start with a marker (ln {})", self.line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_closer_message() {
        let diag = Diagnostic::new(
            4,
            12,
            DiagnosticKind::UnmatchedCloser {
                marker: "z".to_string(),
                open: Some("w".to_string()),
            },
        );
        assert_eq!(
            diag.to_string(),
            "Mismatched word-level markers 'w' and 'z*' (ln 4, col 12)"
        );
    }

    #[test]
    fn test_nesting_message() {
        let diag = Diagnostic::new(
            2,
            192,
            DiagnosticKind::NestingTooDeep {
                marker: "add".to_string(),
                limit: 64,
            },
        );
        assert_eq!(
            diag.to_string(),
            "Marker 'add' nested deeper than 64 levels (ln 2, col 192)"
        );
    }
}
