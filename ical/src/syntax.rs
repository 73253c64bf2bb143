// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax layer: line unfolding, content lines and the component tree.
//!
//! The syntax layer is shared by iCalendar and vCard, both use the same
//! content line grammar:
//!
//! ```txt
//! contentline = name *(";" param ) ":" value CRLF
//! param       = param-name "=" param-value *("," param-value)
//! ```

use logos::Lexer;

use crate::error::ParseError;
use crate::keyword::{KW_BEGIN, KW_END, KW_TYPE};
use crate::lexer::{Token, lex};

/// A property parameter such as `PARTSTAT=ACCEPTED`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Upper-cased parameter name.
    pub name: String,
    /// Parameter values with surrounding quotes removed.
    pub values: Vec<String>,
}

/// One unfolded content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Upper-cased property name, without any vCard group prefix.
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Raw value; unescaping is left to the typed accessors.
    pub value: String,
}

impl ContentLine {
    /// Returns the first value of the named parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .and_then(|p| p.values.first())
            .map(String::as_str)
    }
}

/// A `BEGIN`/`END` block with its properties and nested components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    /// Upper-cased component name, e.g. `VEVENT`.
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<ContentLine>,
    /// Nested components.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates an empty component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ContentLine> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns all properties with the given name.
    pub fn properties_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a ContentLine> + 'a {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns nested components with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Component> + 'a {
        self.children
            .iter()
            .filter(move |c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Unfolds physical lines into logical lines, numbered from 1.
///
/// A line beginning with a space or a horizontal tab continues the previous
/// one. Both CRLF and bare LF line endings are accepted; empty lines are
/// dropped.
#[must_use]
pub fn unfold(src: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();
    for raw in src.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(rest) = raw.strip_prefix([' ', '\t'])
            && let Some((_, last)) = lines.last_mut()
        {
            last.push_str(rest);
            continue;
        }

        if !raw.trim().is_empty() {
            lines.push((lines.len() + 1, raw.to_string()));
        }
    }
    lines
}

/// Parses one unfolded content line.
///
/// # Errors
///
/// Returns an error if the name or parameter section is malformed or the
/// value separator is missing.
pub fn parse_line(line: &str, line_no: usize) -> Result<ContentLine, ParseError> {
    let mut lexer = lex(line);
    let name = match lexer.next() {
        // vCard allows a group prefix, e.g. `item1.EMAIL`
        Some(Ok(Token::Word(w))) => w.rsplit('.').next().unwrap_or(w).to_ascii_uppercase(),
        _ => return Err(ParseError::MissingName { line: line_no }),
    };

    let mut params = Vec::new();
    let mut delimiter = next_token(&mut lexer, line_no)?;
    loop {
        match delimiter {
            Token::Colon => break,
            Token::Semi => {
                let (param, next) = parse_parameter(&mut lexer, line_no)?;
                params.push(param);
                delimiter = next;
            }
            token => {
                return Err(ParseError::UnexpectedToken {
                    line: line_no,
                    token: token.to_string(),
                });
            }
        }
    }

    Ok(ContentLine {
        name,
        params,
        value: lexer.remainder().to_string(),
    })
}

/// Parses a whole document into its top-level components.
///
/// # Errors
///
/// Returns an error on the first malformed line or unbalanced
/// `BEGIN`/`END` pair.
pub fn parse(src: &str) -> Result<Vec<Component>, ParseError> {
    let mut roots = Vec::new();
    let mut stack: Vec<Component> = Vec::new();

    for (line_no, line) in unfold(src) {
        let content = parse_line(&line, line_no)?;
        if content.name == KW_BEGIN {
            stack.push(Component::new(content.value.trim().to_ascii_uppercase()));
        } else if content.name == KW_END {
            let name = content.value.trim().to_ascii_uppercase();
            let component = stack.pop().ok_or_else(|| ParseError::UnexpectedEnd {
                line: line_no,
                name: name.clone(),
            })?;
            if component.name != name {
                return Err(ParseError::MismatchedEnd {
                    line: line_no,
                    expected: component.name,
                    found: name,
                });
            }
            match stack.last_mut() {
                Some(parent) => parent.children.push(component),
                None => roots.push(component),
            }
        } else {
            match stack.last_mut() {
                Some(component) => component.properties.push(content),
                None => return Err(ParseError::PropertyOutsideComponent { line: line_no }),
            }
        }
    }

    match stack.pop() {
        Some(open) => Err(ParseError::UnclosedComponent { name: open.name }),
        None => Ok(roots),
    }
}

fn next_token<'a>(lexer: &mut Lexer<'a, Token<'a>>, line: usize) -> Result<Token<'a>, ParseError> {
    match lexer.next() {
        Some(Ok(token)) => Ok(token),
        Some(Err(())) => Err(ParseError::InvalidToken { line }),
        None => Err(ParseError::MissingValue { line }),
    }
}

/// Parses `name=value,value` and returns the delimiter that ended it.
fn parse_parameter<'a>(
    lexer: &mut Lexer<'a, Token<'a>>,
    line: usize,
) -> Result<(Parameter, Token<'a>), ParseError> {
    let name = match next_token(lexer, line)? {
        Token::Word(w) => w.to_ascii_uppercase(),
        token => {
            return Err(ParseError::UnexpectedToken {
                line,
                token: token.to_string(),
            });
        }
    };

    match next_token(lexer, line)? {
        Token::Eq => {}
        // vCard 2.1 bare type parameter, e.g. `EMAIL;INTERNET:...`
        delimiter @ (Token::Semi | Token::Colon) => {
            let param = Parameter {
                name: KW_TYPE.to_string(),
                values: vec![name],
            };
            return Ok((param, delimiter));
        }
        token => {
            return Err(ParseError::UnexpectedToken {
                line,
                token: token.to_string(),
            });
        }
    }

    let mut values = Vec::new();
    let mut current = String::new();
    loop {
        match next_token(lexer, line)? {
            Token::Word(w) => current.push_str(w),
            Token::Quoted(q) => current.push_str(q.trim_matches('"')),
            Token::Space => current.push(' '),
            Token::Tab => current.push('\t'),
            Token::Eq => current.push('='),
            Token::Comma => values.push(std::mem::take(&mut current)),
            delimiter @ (Token::Semi | Token::Colon) => {
                values.push(current);
                return Ok((Parameter { name, values }, delimiter));
            }
        }
    }
}
