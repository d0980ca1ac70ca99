//! logos-based palette tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `#fff` as HexColor beats `#` as Hash)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `#592506` matches [`Token::HexColor`], not `Hash` + `Number`
//! - `$fill.enabled` matches [`Token::Alias`] as a single token

use logos::Logos;

/// Palette token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Hex color: `#fff`, `#ff00aa`.
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Alias to another token in the same style: `$outline`, `$fill.enabled`.
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_.-]*")]
    Alias,

    /// Unsigned integer, used by `rgb(...)`.
    #[regex(r"[0-9]+")]
    Number,

    /// Identifier: style names, token roles, modifiers, color names, keywords.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,
}

/// Text at `offset` that no token matches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid character at byte {offset}: `{text}`")]
pub struct LexError {
    pub offset: usize,
    pub text: String,
}

/// Tokenize palette text into `(Token, text)` pairs.
///
/// Stops at the first character sequence that fails to lex.
pub fn tokenize(input: &str) -> Result<Vec<(Token, String)>, LexError> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok((token, input[span].to_string())),
            Err(()) => Err(LexError { offset: span.start, text: input[span].to_string() }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens("{ } ( ) : ; , . #"),
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::ParenOpen,
                Token::ParenClose,
                Token::Colon,
                Token::Semicolon,
                Token::Comma,
                Token::Dot,
                Token::Hash,
            ]
        );
    }

    #[test]
    fn test_hex_color_wins_over_hash() {
        let toks = tokenize("#592506").unwrap();
        assert_eq!(toks, vec![(Token::HexColor, "#592506".to_string())]);
    }

    #[test]
    fn test_dotted_alias_single_token() {
        let toks = tokenize("$fill.enabled;").unwrap();
        assert_eq!(
            toks,
            vec![
                (Token::Alias, "$fill.enabled".to_string()),
                (Token::Semicolon, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            tokens("outline.hovered: white;"),
            vec![
                Token::Ident,
                Token::Dot,
                Token::Ident,
                Token::Colon,
                Token::Ident,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_rgb_function() {
        assert_eq!(
            tokens("rgb(248, 0, 0)"),
            vec![
                Token::Ident,
                Token::ParenOpen,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_whitespace_skipped() {
        assert_eq!(tokens("  \n\t base  "), vec![Token::Ident]);
    }

    #[test]
    fn test_invalid_character_is_an_error() {
        let err = tokenize("fill: red; @@").unwrap_err();
        assert_eq!(err.offset, 11);
        assert!(err.text.starts_with('@'));
    }
}
