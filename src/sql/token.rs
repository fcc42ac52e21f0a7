//! SQL token types for the remote scan query.

use super::error::Span;

/// A SQL token with its span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The span of this token in the source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an end-of-file token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// The kind of a SQL token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier, case-folded to lowercase unless it was double-quoted.
    Identifier(String),
    /// Reserved keyword.
    Keyword(Keyword),
    /// *
    Asterisk,
    /// .
    Dot,
    /// ;
    Semicolon,
    /// Lexical error (unterminated quote, stray character).
    Error(String),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns the display name for error messages.
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::Identifier(s) => format!("identifier '{s}'"),
            TokenKind::Keyword(kw) => format!("keyword '{}'", kw.as_str()),
            TokenKind::Asterisk => "'*'".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Error(msg) => msg.clone(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// Reserved SQL keywords.
///
/// Any identifier spelled like one of these must be double-quoted to be used
/// as a schema or table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    All,
    Analyse,
    Analyze,
    And,
    Any,
    Array,
    As,
    Asc,
    Asymmetric,
    Between,
    Both,
    By,
    Case,
    Cast,
    Check,
    Collate,
    Column,
    Constraint,
    Create,
    CurrentCatalog,
    CurrentDate,
    CurrentRole,
    CurrentTime,
    CurrentTimestamp,
    CurrentUser,
    Default,
    Deferrable,
    Desc,
    Distinct,
    Do,
    Else,
    End,
    Except,
    False,
    Fetch,
    For,
    Foreign,
    From,
    Grant,
    Group,
    Having,
    In,
    Initially,
    Intersect,
    Into,
    Is,
    Join,
    Lateral,
    Leading,
    Like,
    Limit,
    Localtime,
    Localtimestamp,
    Not,
    Null,
    Offset,
    On,
    Only,
    Or,
    Order,
    Placing,
    Primary,
    References,
    Returning,
    Select,
    SessionUser,
    Some,
    Symmetric,
    SystemUser,
    Table,
    Then,
    To,
    Trailing,
    True,
    Union,
    Unique,
    User,
    Using,
    Variadic,
    When,
    Where,
    Window,
    With,
}

impl Keyword {
    const ALL: [Keyword; 83] = [
        Keyword::All,
        Keyword::Analyse,
        Keyword::Analyze,
        Keyword::And,
        Keyword::Any,
        Keyword::Array,
        Keyword::As,
        Keyword::Asc,
        Keyword::Asymmetric,
        Keyword::Between,
        Keyword::Both,
        Keyword::By,
        Keyword::Case,
        Keyword::Cast,
        Keyword::Check,
        Keyword::Collate,
        Keyword::Column,
        Keyword::Constraint,
        Keyword::Create,
        Keyword::CurrentCatalog,
        Keyword::CurrentDate,
        Keyword::CurrentRole,
        Keyword::CurrentTime,
        Keyword::CurrentTimestamp,
        Keyword::CurrentUser,
        Keyword::Default,
        Keyword::Deferrable,
        Keyword::Desc,
        Keyword::Distinct,
        Keyword::Do,
        Keyword::Else,
        Keyword::End,
        Keyword::Except,
        Keyword::False,
        Keyword::Fetch,
        Keyword::For,
        Keyword::Foreign,
        Keyword::From,
        Keyword::Grant,
        Keyword::Group,
        Keyword::Having,
        Keyword::In,
        Keyword::Initially,
        Keyword::Intersect,
        Keyword::Into,
        Keyword::Is,
        Keyword::Join,
        Keyword::Lateral,
        Keyword::Leading,
        Keyword::Like,
        Keyword::Limit,
        Keyword::Localtime,
        Keyword::Localtimestamp,
        Keyword::Not,
        Keyword::Null,
        Keyword::Offset,
        Keyword::On,
        Keyword::Only,
        Keyword::Or,
        Keyword::Order,
        Keyword::Placing,
        Keyword::Primary,
        Keyword::References,
        Keyword::Returning,
        Keyword::Select,
        Keyword::SessionUser,
        Keyword::Some,
        Keyword::Symmetric,
        Keyword::SystemUser,
        Keyword::Table,
        Keyword::Then,
        Keyword::To,
        Keyword::Trailing,
        Keyword::True,
        Keyword::Union,
        Keyword::Unique,
        Keyword::User,
        Keyword::Using,
        Keyword::Variadic,
        Keyword::When,
        Keyword::Where,
        Keyword::Window,
        Keyword::With,
    ];

    /// Returns the string representation of this keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::All => "ALL",
            Keyword::Analyse => "ANALYSE",
            Keyword::Analyze => "ANALYZE",
            Keyword::And => "AND",
            Keyword::Any => "ANY",
            Keyword::Array => "ARRAY",
            Keyword::As => "AS",
            Keyword::Asc => "ASC",
            Keyword::Asymmetric => "ASYMMETRIC",
            Keyword::Between => "BETWEEN",
            Keyword::Both => "BOTH",
            Keyword::By => "BY",
            Keyword::Case => "CASE",
            Keyword::Cast => "CAST",
            Keyword::Check => "CHECK",
            Keyword::Collate => "COLLATE",
            Keyword::Column => "COLUMN",
            Keyword::Constraint => "CONSTRAINT",
            Keyword::Create => "CREATE",
            Keyword::CurrentCatalog => "CURRENT_CATALOG",
            Keyword::CurrentDate => "CURRENT_DATE",
            Keyword::CurrentRole => "CURRENT_ROLE",
            Keyword::CurrentTime => "CURRENT_TIME",
            Keyword::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Keyword::CurrentUser => "CURRENT_USER",
            Keyword::Default => "DEFAULT",
            Keyword::Deferrable => "DEFERRABLE",
            Keyword::Desc => "DESC",
            Keyword::Distinct => "DISTINCT",
            Keyword::Do => "DO",
            Keyword::Else => "ELSE",
            Keyword::End => "END",
            Keyword::Except => "EXCEPT",
            Keyword::False => "FALSE",
            Keyword::Fetch => "FETCH",
            Keyword::For => "FOR",
            Keyword::Foreign => "FOREIGN",
            Keyword::From => "FROM",
            Keyword::Grant => "GRANT",
            Keyword::Group => "GROUP",
            Keyword::Having => "HAVING",
            Keyword::In => "IN",
            Keyword::Initially => "INITIALLY",
            Keyword::Intersect => "INTERSECT",
            Keyword::Into => "INTO",
            Keyword::Is => "IS",
            Keyword::Join => "JOIN",
            Keyword::Lateral => "LATERAL",
            Keyword::Leading => "LEADING",
            Keyword::Like => "LIKE",
            Keyword::Limit => "LIMIT",
            Keyword::Localtime => "LOCALTIME",
            Keyword::Localtimestamp => "LOCALTIMESTAMP",
            Keyword::Not => "NOT",
            Keyword::Null => "NULL",
            Keyword::Offset => "OFFSET",
            Keyword::On => "ON",
            Keyword::Only => "ONLY",
            Keyword::Or => "OR",
            Keyword::Order => "ORDER",
            Keyword::Placing => "PLACING",
            Keyword::Primary => "PRIMARY",
            Keyword::References => "REFERENCES",
            Keyword::Returning => "RETURNING",
            Keyword::Select => "SELECT",
            Keyword::SessionUser => "SESSION_USER",
            Keyword::Some => "SOME",
            Keyword::Symmetric => "SYMMETRIC",
            Keyword::SystemUser => "SYSTEM_USER",
            Keyword::Table => "TABLE",
            Keyword::Then => "THEN",
            Keyword::To => "TO",
            Keyword::Trailing => "TRAILING",
            Keyword::True => "TRUE",
            Keyword::Union => "UNION",
            Keyword::Unique => "UNIQUE",
            Keyword::User => "USER",
            Keyword::Using => "USING",
            Keyword::Variadic => "VARIADIC",
            Keyword::When => "WHEN",
            Keyword::Where => "WHERE",
            Keyword::Window => "WINDOW",
            Keyword::With => "WITH",
        }
    }

    /// Looks up a keyword case-insensitively.
    pub fn lookup(word: &str) -> Option<Keyword> {
        Self::ALL
            .into_iter()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_case_insensitive() {
        assert_eq!(Keyword::lookup("select"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("items"), None);
    }

    #[test]
    fn test_keyword_table_is_complete() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::lookup(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(TokenKind::Keyword(Keyword::From).display_name(), "keyword 'FROM'");
        assert_eq!(TokenKind::Eof.display_name(), "end of input");
    }
}
