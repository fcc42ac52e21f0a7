//! Identifier quoting for generated SQL.

use super::token::Keyword;

/// Quotes an identifier for safe inclusion in a SQL string.
///
/// The identifier is left bare only when it would lex back to itself:
/// a lowercase letter or underscore followed by lowercase letters, digits or
/// underscores, and not a reserved keyword. Anything else is wrapped in double
/// quotes with embedded double quotes doubled, so no option value can break
/// out of its identifier position.
///
/// The keyword table holds the words PostgreSQL reserves. Non-reserved words
/// such as `name` or `value` stay bare, which the remote side accepts as
/// identifiers.
pub fn quote_identifier(ident: &str) -> String {
    let safe = ident
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && ident
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && Keyword::lookup(ident).is_none();

    if safe {
        return ident.to_string();
    }

    let mut quoted = String::with_capacity(ident.len() + 2);
    quoted.push('"');
    for ch in ident.chars() {
        if ch == '"' {
            quoted.push('"');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Quotes both parts of a schema-qualified name and joins them with `.`.
pub fn quote_qualified_identifier(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_identifier(schema), quote_identifier(name))
}
