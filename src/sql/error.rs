//! Errors from reading a remote scan query.
//!
//! A bridge parses the query text it is handed before running it. When that
//! text is not a scan it understands, [`SyntaxError`] records where reading
//! stopped so the message can point at the offending token.

use thiserror::Error;

/// Byte range of a token in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-length span at `pos`, used for end of input.
    pub fn at(pos: usize) -> Self {
        Self::new(pos, pos)
    }
}

/// Query text that is not a scan query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {}", .span.start + 1)]
pub struct SyntaxError {
    pub message: String,
    /// Token where reading stopped.
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// A token other than the one the grammar allows here.
    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        Self::new(format!("expected {expected}, found {found}"), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_input_span() {
        let err = SyntaxError::unexpected_token("identifier", "end of input", Span::at(13));
        assert_eq!(err.span, Span::new(13, 13));
        assert_eq!(err.to_string(), "expected identifier, found end of input at position 14");
    }

    #[test]
    fn test_message_points_at_token() {
        let err = SyntaxError::unexpected_token("FROM", "';'", Span::new(9, 10));
        assert_eq!(err.to_string(), "expected FROM, found ';' at position 10");
        assert_eq!(err.span, Span::new(9, 10));
    }
}
