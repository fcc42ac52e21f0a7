//! Parser for the remote scan query.
//!
//! Accepts exactly the shape the plan builder produces:
//! `SELECT * FROM [schema.]table [;]`.

use super::error::{Span, SyntaxError};
use super::lexer::Lexer;
use super::token::{Keyword, Token, TokenKind};

/// A parsed full-relation scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanQuery {
    /// Schema qualifier, if the relation was qualified.
    pub schema: Option<String>,
    /// Relation name.
    pub table: String,
}

/// Recursive descent parser over the scan query tokens.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input string.
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer
            .next()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, Span::at(input.len())));
        Self { lexer, current }
    }

    /// Parses a complete scan query.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`] for anything other than a single `SELECT *` over
    /// one (optionally schema-qualified) relation.
    pub fn parse_scan(mut self) -> Result<ScanQuery, SyntaxError> {
        self.expect_keyword(Keyword::Select)?;
        self.expect(TokenKind::Asterisk, "'*'")?;
        self.expect_keyword(Keyword::From)?;

        let first = self.expect_identifier()?;
        let query = if self.current.kind == TokenKind::Dot {
            self.advance();
            let table = self.expect_identifier()?;
            ScanQuery {
                schema: Some(first),
                table,
            }
        } else {
            ScanQuery {
                schema: None,
                table: first,
            }
        };

        if self.current.kind == TokenKind::Semicolon {
            self.advance();
        }
        if !self.current.is_eof() {
            return Err(self.unexpected("end of input"));
        }
        Ok(query)
    }

    fn advance(&mut self) {
        let end = self.current.span.end;
        self.current = self
            .lexer
            .next()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, Span::at(end)));
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        if let TokenKind::Error(msg) = &self.current.kind {
            return SyntaxError::new(msg.clone(), self.current.span);
        }
        SyntaxError::unexpected_token(
            expected,
            &self.current.kind.display_name(),
            self.current.span,
        )
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), SyntaxError> {
        if self.current.kind != kind {
            return Err(self.unexpected(expected));
        }
        self.advance();
        Ok(())
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Keyword(kw), kw.as_str())
    }

    fn expect_identifier(&mut self) -> Result<String, SyntaxError> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }
}

/// Parses `input` as a scan query.
pub fn parse_scan_query(input: &str) -> Result<ScanQuery, SyntaxError> {
    Parser::new(input).parse_scan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        let q = parse_scan_query("SELECT * FROM public.items").unwrap();
        assert_eq!(q.schema.as_deref(), Some("public"));
        assert_eq!(q.table, "items");
    }

    #[test]
    fn test_parse_unqualified_with_semicolon() {
        let q = parse_scan_query("select * from items;").unwrap();
        assert_eq!(q.schema, None);
        assert_eq!(q.table, "items");
    }

    #[test]
    fn test_parse_quoted_keeps_case_and_quotes() {
        let q = parse_scan_query(r#"SELECT * FROM "My Schema"."a""b""#).unwrap();
        assert_eq!(q.schema.as_deref(), Some("My Schema"));
        assert_eq!(q.table, "a\"b");
    }

    #[test]
    fn test_injection_attempt_is_rejected() {
        let err = parse_scan_query("SELECT * FROM public.items; DROP TABLE items").unwrap_err();
        assert!(err.message.contains("expected end of input"), "{err}");
    }

    #[test]
    fn test_missing_from() {
        let err = parse_scan_query("SELECT * items").unwrap_err();
        assert_eq!(err.message, "expected FROM, found identifier 'items'");
        assert_eq!(err.span, Span::new(9, 14));
    }

    #[test]
    fn test_keyword_as_table_name_requires_quotes() {
        assert!(parse_scan_query("SELECT * FROM public.select").is_err());
        assert!(parse_scan_query("SELECT * FROM public.\"select\"").is_ok());
        assert!(parse_scan_query("SELECT * FROM window").is_err());
        assert!(parse_scan_query("SELECT * FROM \"window\"").is_ok());
    }

    #[test]
    fn test_lexical_error_is_reported() {
        let err = parse_scan_query("SELECT * FROM \"open").unwrap_err();
        assert_eq!(err.message, "unterminated quoted identifier");
    }
}
