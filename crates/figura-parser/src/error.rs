//! Structured errors for scene loading.

use std::ops::Range;

use thiserror::Error;

/// A scene-load failure tied to one line of the description.
///
/// `span` is the byte range of the offending line within the full source
/// text, suitable for diagnostic rendering with a source snippet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct LoadError {
    /// 1-based line number of the offending line.
    pub line: usize,
    /// Byte span of the offending line in the source text.
    pub span: Range<usize>,
    /// What went wrong.
    pub kind: LoadErrorKind,
}

/// The failure classes of the scene loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadErrorKind {
    /// The first token of a statement is not a known keyword.
    #[error("unknown statement keyword `{keyword}`")]
    UnknownKeyword { keyword: String },

    /// The statement's arguments do not match its grammar (bad number,
    /// malformed tuple, missing field, or trailing tokens).
    #[error("malformed `{keyword}` statement: {expected}")]
    Malformed {
        keyword: &'static str,
        expected: String,
    },

    /// A color token is neither an `(r,g,b)` triple nor a valid CSS color.
    /// The message comes from the color parser and names the token.
    #[error("{message}")]
    InvalidColor { message: String },

    /// An `ADDR<n>` index points past the statements seen so far. Forward
    /// references are not allowed.
    #[error("ADDR{address} does not resolve: only {defined} statements precede it")]
    UnresolvedAddress { address: usize, defined: usize },

    /// An `ADDR<n>` index resolves to a statement that is not a `POINT`.
    #[error("ADDR{address} does not reference a POINT statement")]
    NotAPoint { address: usize },

    /// A statement appeared before any `@` line opened a group.
    #[error("statement outside a `@` block")]
    StatementOutsideGroup,

    /// A `@` block was opened but never closed by `END`.
    #[error("`@` block is never closed by END")]
    UnterminatedGroup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err = LoadError {
            line: 7,
            span: 120..145,
            kind: LoadErrorKind::UnknownKeyword {
                keyword: "CIRCLE".to_string(),
            },
        };
        assert_eq!(err.to_string(), "line 7: unknown statement keyword `CIRCLE`");
    }

    #[test]
    fn test_unresolved_address_display() {
        let kind = LoadErrorKind::UnresolvedAddress {
            address: 5,
            defined: 2,
        };
        assert_eq!(
            kind.to_string(),
            "ADDR5 does not resolve: only 2 statements precede it"
        );
    }
}
