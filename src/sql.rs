//! SQL text handling for the remote scan query.
//!
//! The plan builder produces remote queries with [`quote_identifier`]; the
//! in-memory bridge parses them back with [`parse_scan_query`]. Both sides
//! share one lexer so quoting and parsing agree on what an identifier is.

mod error;
mod lexer;
mod parser;
mod quote;
mod token;

pub use error::{Span, SyntaxError};
pub use lexer::Lexer;
pub use parser::{Parser, ScanQuery, parse_scan_query};
pub use quote::{quote_identifier, quote_qualified_identifier};
pub use token::{Keyword, Token, TokenKind};
