// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tokenizer for the name and parameter section of an unfolded content line.

use std::fmt::Display;

use logos::Logos;

/// Tokens of a content line. Only the part before the value separator is
/// tokenized; the value itself is taken verbatim from the remainder.
#[derive(Debug, PartialEq, Eq, Clone, Copy, logos::Logos)]
pub enum Token<'a> {
    /// Names and unquoted parameter text, anything that is not a delimiter.
    #[regex(r#"[^;:,\r\n\t ="]+"#)]
    Word(&'a str),

    /// Semicolon (;)
    #[token(";")]
    Semi,

    /// Colon (:)
    #[token(":")]
    Colon,

    /// Equal sign (=)
    #[token("=")]
    Eq,

    /// Comma (,)
    #[token(",")]
    Comma,

    /// Space ( )
    #[token(" ")]
    Space,

    /// Tab (\t)
    #[token("\t")]
    Tab,

    /// Quoted parameter value, quotes included.
    #[regex(r#""[^"\r\n]*""#)]
    Quoted(&'a str),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Word(s) => write!(f, "Word({s})"),
            Token::Semi => write!(f, "Semi"),
            Token::Colon => write!(f, "Colon"),
            Token::Eq => write!(f, "Eq"),
            Token::Comma => write!(f, "Comma"),
            Token::Space => write!(f, "Space"),
            Token::Tab => write!(f, "Tab"),
            Token::Quoted(s) => write!(f, "Quoted({s})"),
        }
    }
}

/// Creates a lexer over a single unfolded content line.
pub fn lex<'a>(src: &'a str) -> logos::Lexer<'a, Token<'a>> {
    Token::lexer(src)
}
