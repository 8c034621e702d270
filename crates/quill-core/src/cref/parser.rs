//! Recursive descent parser for cref text

use super::query::{NameSegment, SymbolQuery, TypeSpec};
use super::token::{tokenize, Token, TokenKind};
use super::CRefKind;
use crate::error::{Error, Result};

/// Parse full cref text (`X:body`) into a structural query
pub fn parse_query(text: &str) -> Result<SymbolQuery> {
    if text.is_empty() {
        return Err(Error::ArgumentRequired("identifier"));
    }

    let mut chars = text.chars();
    let (Some(prefix), Some(':')) = (chars.next(), chars.next()) else {
        return Err(Error::malformed(text, "missing kind prefix"));
    };
    if prefix == '!' {
        return Err(Error::UnsupportedSymbolKind(prefix.to_string()));
    }
    let kind = CRefKind::from_prefix(prefix)
        .ok_or_else(|| Error::malformed(text, format!("unknown kind prefix '{prefix}'")))?;

    let body_start = prefix.len_utf8() + 1;
    let body = &text[body_start..];
    check_balance(text, body)?;

    let tokens = tokenize(body).map_err(|offset| {
        Error::malformed(
            text,
            format!("unexpected character at offset {}", offset + body_start),
        )
    })?;

    Parser {
        text,
        tokens,
        pos: 0,
    }
    .query(kind)
}

/// Reject mismatched brackets before looking at anything else
fn check_balance(text: &str, body: &str) -> Result<()> {
    let mut stack = Vec::new();
    for c in body.chars() {
        match c {
            '(' | '{' | '[' => stack.push(c),
            ')' | '}' | ']' => {
                let open = match c {
                    ')' => '(',
                    '}' => '{',
                    _ => '[',
                };
                if stack.pop() != Some(open) {
                    return Err(Error::malformed(text, format!("unbalanced '{c}'")));
                }
            }
            _ => {}
        }
    }
    match stack.pop() {
        Some(open) => Err(Error::malformed(text, format!("unbalanced '{open}'"))),
        None => Ok(()),
    }
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn query(mut self, kind: CRefKind) -> Result<SymbolQuery> {
        let is_member = !matches!(kind, CRefKind::Namespace | CRefKind::Type);

        let mut method_arity = 0;
        let path = if self.at_end() {
            if kind != CRefKind::Namespace {
                return Err(self.error("empty identifier body"));
            }
            Vec::new()
        } else {
            self.path(if kind == CRefKind::Method {
                Some(&mut method_arity)
            } else {
                None
            })?
        };
        if is_member && path.len() < 2 {
            return Err(self.error("member identifier needs a declaring type"));
        }

        let mut parameters = None;
        if self.eat(TokenKind::LParen) {
            if !matches!(kind, CRefKind::Method | CRefKind::Property) {
                return Err(self.error("parameter list is only valid on methods and properties"));
            }
            parameters = Some(self.type_list(TokenKind::RParen)?);
        }

        let mut return_type = None;
        if self.eat(TokenKind::Tilde) {
            if kind != CRefKind::Method {
                return Err(self.error("return suffix is only valid on methods"));
            }
            return_type = Some(self.type_spec()?);
        }

        if let Some(token) = self.peek() {
            return Err(self.error(format!("unexpected {}", token.kind.describe())));
        }

        Ok(SymbolQuery {
            kind,
            path,
            method_arity,
            parameters,
            return_type,
        })
    }

    /// Dotted path of segments; a `` ``N `` marker is only accepted on the final segment
    fn path(&mut self, mut method_arity: Option<&mut usize>) -> Result<Vec<NameSegment>> {
        let mut segments = Vec::new();
        loop {
            let name = self.expect(TokenKind::Ident)?;
            let mut segment = NameSegment::new(name.text.replace('#', "."));

            if self.eat(TokenKind::Tick) {
                segment.arity = self.number()?;
            }
            if self.check(TokenKind::DoubleTick) {
                match method_arity.as_deref_mut() {
                    Some(slot) => {
                        self.advance();
                        *slot = self.number()?;
                    }
                    None => return Err(self.error("unexpected method arity marker")),
                }
            }
            if self.eat(TokenKind::LBrace) {
                segment.arguments = self.type_list(TokenKind::RBrace)?;
                if segment.arguments.is_empty() {
                    return Err(self.error("empty generic argument list"));
                }
            }
            segments.push(segment);

            if !self.eat(TokenKind::Dot) {
                break;
            }
            if method_arity.as_deref().is_some_and(|arity| *arity > 0) {
                return Err(self.error("method arity marker on a non-final segment"));
            }
        }
        Ok(segments)
    }

    /// Comma separated type specs up to and including `close`
    fn type_list(&mut self, close: TokenKind) -> Result<Vec<TypeSpec>> {
        let mut specs = Vec::new();
        if self.eat(close) {
            return Ok(specs);
        }
        loop {
            specs.push(self.type_spec()?);
            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(close)?;
            return Ok(specs);
        }
    }

    fn type_spec(&mut self) -> Result<TypeSpec> {
        let mut spec = match self.peek().map(|t| t.kind) {
            Some(TokenKind::Tick) => {
                self.advance();
                TypeSpec::TypeParameter(self.number()?)
            }
            Some(TokenKind::DoubleTick) => {
                self.advance();
                TypeSpec::MethodParameter(self.number()?)
            }
            Some(TokenKind::Ident) => TypeSpec::Named(self.path(None)?),
            Some(other) => {
                return Err(self.error(format!("expected a type, found {}", other.describe())))
            }
            None => return Err(self.error("expected a type, found end of input")),
        };

        loop {
            if self.eat(TokenKind::LBracket) {
                let rank = self.array_rank()?;
                spec = TypeSpec::Array {
                    element: Box::new(spec),
                    rank,
                };
            } else if self.eat(TokenKind::Star) {
                spec = TypeSpec::Pointer(Box::new(spec));
            } else if self.eat(TokenKind::At) {
                spec = TypeSpec::ByRef(Box::new(spec));
            } else {
                return Ok(spec);
            }
        }
    }

    /// Array bounds after `[`: `]` or `0:,0:]`; rank is the number of dimensions
    fn array_rank(&mut self) -> Result<u32> {
        let mut rank = 1;
        loop {
            match self.peek().map(|t| t.kind) {
                Some(TokenKind::RBracket) => {
                    self.advance();
                    return Ok(rank);
                }
                Some(TokenKind::Comma) => {
                    self.advance();
                    rank += 1;
                }
                Some(TokenKind::Number | TokenKind::Colon) => self.advance(),
                _ => return Err(self.error("invalid array bounds")),
            }
        }
    }

    fn number(&mut self) -> Result<usize> {
        let token = self.expect(TokenKind::Number)?;
        token
            .text
            .parse()
            .map_err(|_| self.error(format!("number '{}' out of range", token.text)))
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(token)
            }
            Some(token) => Err(self.error(format!(
                "expected {}, found {}",
                kind.describe(),
                token.kind.describe()
            ))),
            None => Err(self.error(format!("expected {}, found end of input", kind.describe()))),
        }
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::malformed(self.text, reason)
    }
}
