//! Recursive descent palette parser.
//!
//! Parses palette text into a [`PaletteDoc`]. Uses the logos-based tokenizer
//! from [`crate::style::tokenizer`].
//!
//! ```text
//! base {
//!   fill: light_brown;
//!   fill.enabled: #009998;
//!   caret: $outline;
//! }
//! danger extends base { fill: rgb(248, 0, 0); }
//! ```

use crate::style::color::Color;
use crate::style::model::{Entry, EntryValue, PaletteDoc, StyleDecl};
use crate::style::token::{ColorToken, TokenError};
use crate::style::tokenizer::{tokenize, LexError, Token};

/// Errors from palette parsing.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid color at position {position}: {text}")]
    InvalidColor { position: usize, text: String },
    #[error("invalid character at byte {position}: `{text}`")]
    InvalidCharacter { position: usize, text: String },
    #[error(transparent)]
    InvalidToken(#[from] TokenError),
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::InvalidCharacter { position: err.offset, text: err.text }
    }
}

#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
}

/// Strip block comments (`/* ... */`), replacing each with a single space.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            // Unterminated comment consumes the rest of the input.
            None => "",
        };
    }
    result.push_str(rest);
    result
}

fn tokenize_positioned(input: &str) -> Result<Vec<PToken>, ParseError> {
    Ok(tokenize(input)?
        .into_iter()
        .enumerate()
        .map(|(pos, (token, text))| PToken { token, text, pos })
        .collect())
}

/// Parse palette text into a [`PaletteDoc`].
pub fn parse_palette(input: &str) -> Result<PaletteDoc, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_positioned(&cleaned)?;

    let mut parser = Parser { tokens, cursor: 0 };

    let mut styles = Vec::new();
    while !parser.is_eof() {
        styles.push(parser.parse_style()?);
    }

    Ok(PaletteDoc { styles })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|t| &t.token == token)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == expected => Ok(tok),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {what}, found `{}`", tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {what}"))),
        }
    }

    /// `name [extends parent] { entries }`
    fn parse_style(&mut self) -> Result<StyleDecl, ParseError> {
        let name = self.expect(Token::Ident, "style name")?;
        let mut decl = StyleDecl::new(name.text);

        if self.peek().is_some_and(|t| t.token == Token::Ident && t.text == "extends") {
            self.advance();
            let parent = self.expect(Token::Ident, "parent style name")?;
            decl.parent = Some(parent.text);
        }

        self.expect(Token::BraceOpen, "`{`")?;
        loop {
            if self.peek_is(&Token::BraceClose) {
                self.advance();
                break;
            }
            if self.is_eof() {
                return Err(ParseError::UnexpectedEof(format!(
                    "unclosed style block `{}`",
                    decl.name
                )));
            }
            decl.entries.push(self.parse_entry()?);
        }
        Ok(decl)
    }

    /// `token.path: value;` (the final `;` before `}` is optional)
    fn parse_entry(&mut self) -> Result<Entry, ParseError> {
        let token = self.parse_token_path()?;
        self.expect(Token::Colon, "`:`")?;
        let value = self.parse_value()?;

        if self.peek_is(&Token::Semicolon) {
            self.advance();
        } else if !self.peek_is(&Token::BraceClose) {
            return match self.peek() {
                Some(t) => Err(ParseError::UnexpectedToken {
                    position: t.pos,
                    message: format!("expected `;` or `}}`, found `{}`", t.text),
                }),
                None => Err(ParseError::UnexpectedEof("expected `;`".into())),
            };
        }

        Ok(Entry { token, value })
    }

    fn parse_token_path(&mut self) -> Result<ColorToken, ParseError> {
        let mut path = self.expect(Token::Ident, "color token")?.text;
        while self.peek_is(&Token::Dot) {
            self.advance();
            let part = self.expect(Token::Ident, "modifier")?;
            path.push('.');
            path.push_str(&part.text);
        }
        Ok(path.parse()?)
    }

    fn parse_value(&mut self) -> Result<EntryValue, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected a color value".into()))?;

        match tok.token {
            Token::HexColor => Color::from_hex(&tok.text)
                .map(EntryValue::Color)
                .ok_or(ParseError::InvalidColor { position: tok.pos, text: tok.text }),
            Token::Alias => {
                let target: ColorToken = tok.text.trim_start_matches('$').parse()?;
                Ok(EntryValue::Alias(target))
            }
            Token::Ident if tok.text == "rgb" && self.peek_is(&Token::ParenOpen) => {
                self.parse_rgb_args(tok.pos).map(EntryValue::Color)
            }
            Token::Ident => Color::named(&tok.text)
                .map(EntryValue::Color)
                .ok_or(ParseError::InvalidColor { position: tok.pos, text: tok.text }),
            _ => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected a color value, found `{}`", tok.text),
            }),
        }
    }

    /// `( r , g , b )` after the `rgb` identifier.
    fn parse_rgb_args(&mut self, position: usize) -> Result<Color, ParseError> {
        self.expect(Token::ParenOpen, "`(`")?;
        let mut channels = [0u8; 3];
        for (i, slot) in channels.iter_mut().enumerate() {
            if i > 0 {
                self.expect(Token::Comma, "`,`")?;
            }
            let num = self.expect(Token::Number, "channel value")?;
            *slot = num
                .text
                .parse::<u8>()
                .map_err(|_| ParseError::InvalidColor { position, text: num.text.clone() })?;
        }
        self.expect(Token::ParenClose, "`)`")?;
        Ok(Color::rgb(channels[0], channels[1], channels[2]))
    }
}
