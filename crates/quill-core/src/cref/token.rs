//! Tokens of a cref body

use logos::Logos;

/// The kind of token found in a cref body
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Method generic marker or method parameter backreference
    #[token("``")]
    DoubleTick,
    /// Type arity marker or type parameter backreference
    #[token("`")]
    Tick,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    /// By-reference parameter suffix
    #[token("@")]
    At,
    /// Conversion operator return suffix
    #[token("~")]
    Tilde,
    #[token("*")]
    Star,
    /// Array bound separator
    #[token(":")]
    Colon,
    #[regex(r"[0-9]+")]
    Number,
    /// Identifier segment; `#` stands in for `.` inside member names
    #[regex(r"[^ \t\r\n.,(){}\[\]`@~*:0-9][^ \t\r\n.,(){}\[\]`@~*:]*")]
    Ident,
}

impl TokenKind {
    /// Human readable description used in parse errors
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::DoubleTick => "'``'",
            TokenKind::Tick => "'`'",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::At => "'@'",
            TokenKind::Tilde => "'~'",
            TokenKind::Star => "'*'",
            TokenKind::Colon => "':'",
            TokenKind::Number => "number",
            TokenKind::Ident => "identifier",
        }
    }
}

/// A token with its source slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

/// Split a cref body into tokens
///
/// Returns the offset of the first character that starts no token on failure.
pub fn tokenize(body: &str) -> Result<Vec<Token<'_>>, usize> {
    let mut lexer = TokenKind::lexer(body);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice(),
                offset: span.start,
            }),
            Err(()) => return Err(span.start),
        }
    }
    Ok(tokens)
}
