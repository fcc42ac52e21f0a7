//! SQL lexer for the remote scan query.
//!
//! The [`Lexer`] converts a SQL string into a stream of [`Token`]s. It only
//! knows the small vocabulary a scan query needs: keywords, identifiers
//! (unquoted and double-quoted), `*`, `.` and `;`, plus comments.

use super::error::Span;
use super::token::{Keyword, Token, TokenKind};

/// SQL lexer that tokenizes input strings.
///
/// Unquoted identifiers are folded to lowercase; double-quoted identifiers keep
/// their spelling with `""` collapsed to `"`. Lexical errors are returned as
/// `TokenKind::Error` tokens.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    /// Whether EOF has been returned.
    eof_returned: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            eof_returned: false,
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    /// Returns the character at `pos + offset` without consuming it.
    fn peek(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    /// Advances the position by `n` characters.
    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            if let Some(ch) = self.peek(0) {
                self.pos += ch.len_utf8();
            }
        }
    }

    /// Skips whitespace and comments.
    ///
    /// Returns `Some(Token)` for an unterminated block comment.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            while self.peek(0).is_some_and(char::is_whitespace) {
                self.advance(1);
            }

            if self.starts_with("--") {
                while let Some(ch) = self.peek(0) {
                    self.advance(1);
                    if ch == '\n' {
                        break;
                    }
                }
                continue;
            }

            if self.starts_with("/*") {
                let start = self.pos;
                self.advance(2);
                let mut depth = 1;
                while depth > 0 && !self.is_eof() {
                    if self.starts_with("/*") {
                        depth += 1;
                        self.advance(2);
                    } else if self.starts_with("*/") {
                        depth -= 1;
                        self.advance(2);
                    } else {
                        self.advance(1);
                    }
                }
                if depth > 0 {
                    return Some(Token::new(
                        TokenKind::Error("unterminated block comment".to_string()),
                        Span::new(start, self.pos),
                    ));
                }
                continue;
            }

            return None;
        }
    }

    fn scan_token(&mut self) -> Token {
        if let Some(error_token) = self.skip_whitespace_and_comments() {
            return error_token;
        }

        let start = self.pos;
        let Some(ch) = self.peek(0) else {
            return Token::new(TokenKind::Eof, Span::at(start));
        };

        if ch == '"' {
            return self.scan_quoted_identifier();
        }

        if is_ident_start(ch) {
            return self.scan_identifier_or_keyword();
        }

        self.advance(1);
        let kind = match ch {
            '*' => TokenKind::Asterisk,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            _ => TokenKind::Error(format!("unexpected character '{ch}'")),
        };
        Token::new(kind, Span::new(start, self.pos))
    }

    fn scan_quoted_identifier(&mut self) -> Token {
        let start = self.pos;
        self.advance(1); // opening quote

        let mut value = String::new();
        loop {
            match self.peek(0) {
                None => {
                    return Token::new(
                        TokenKind::Error("unterminated quoted identifier".to_string()),
                        Span::new(start, self.pos),
                    );
                }
                Some('"') => {
                    self.advance(1);
                    if self.peek(0) == Some('"') {
                        value.push('"');
                        self.advance(1);
                    } else {
                        break;
                    }
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance(1);
                }
            }
        }

        let span = Span::new(start, self.pos);
        if value.is_empty() {
            return Token::new(
                TokenKind::Error("zero-length delimited identifier".to_string()),
                span,
            );
        }
        Token::new(TokenKind::Identifier(value), span)
    }

    fn scan_identifier_or_keyword(&mut self) -> Token {
        let start = self.pos;
        while self.peek(0).is_some_and(is_ident_continue) {
            self.advance(1);
        }

        let ident = &self.input[start..self.pos];
        let span = Span::new(start, self.pos);
        match Keyword::lookup(ident) {
            Some(kw) => Token::new(TokenKind::Keyword(kw), span),
            None => Token::new(TokenKind::Identifier(ident.to_lowercase()), span),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_returned {
            return None;
        }

        let token = self.scan_token();
        if token.is_eof() {
            self.eof_returned = true;
        }
        Some(token)
    }
}

/// Returns true if the character can start an unquoted identifier.
pub(crate) fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Returns true if the character can continue an unquoted identifier.
pub(crate) fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Identifier(s.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lex(""), vec![TokenKind::Eof]);
        assert_eq!(lex("  \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_scan_query() {
        assert_eq!(
            lex("SELECT * FROM public.items"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Asterisk,
                TokenKind::Keyword(Keyword::From),
                ident("public"),
                TokenKind::Dot,
                ident("items"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unquoted_identifiers_fold_to_lowercase() {
        assert_eq!(lex("Public ITEMS"), vec![ident("public"), ident("items"), TokenKind::Eof]);
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(
            lex(r#""My Table" "has""quotes" "select""#),
            vec![
                ident("My Table"),
                ident("has\"quotes"),
                ident("select"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            lex("-- leading\nSELECT /* nested /* twice */ */ *"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Asterisk,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_quoted_identifier() {
        let tokens = lex("\"abc");
        assert!(matches!(&tokens[0], TokenKind::Error(msg) if msg.contains("unterminated")));
    }

    #[test]
    fn test_empty_quoted_identifier() {
        let tokens = lex("\"\"");
        assert!(matches!(&tokens[0], TokenKind::Error(msg) if msg.contains("zero-length")));
    }

    #[test]
    fn test_unexpected_character() {
        let tokens = lex("SELECT 1");
        assert!(matches!(&tokens[1], TokenKind::Error(msg) if msg.contains("'1'")));
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut lexer = Lexer::new("x");
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_some_and(|t| t.is_eof()));
        assert!(lexer.next().is_none());
    }
}
