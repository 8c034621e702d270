//! Code reference (cref) identifiers
//!
//! A cref is the compiler's canonical text identifier for a symbol, such as
//! `M:TestLibrary1.Class1.DoubleStatic(System.Double)`. This module turns
//! graph symbols into crefs ([`generate`]) and crefs back into structural
//! queries ([`CRef::query`]) that a [`crate::model::SymbolGraph`] can resolve.

mod generator;
mod parser;
mod query;
mod token;

pub use generator::{generate, member_suffix, substituted_member_suffix, type_ref_cref, type_ref_text};
pub use parser::parse_query;
pub use query::{NameSegment, SymbolQuery, TypeSpec};

pub(crate) use query::array_suffix;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The kind prefix of a cref
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CRefKind {
    Namespace,
    Type,
    Method,
    Field,
    Property,
    Event,
}

impl CRefKind {
    /// Map a one-letter prefix to a kind
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'N' => Some(CRefKind::Namespace),
            'T' => Some(CRefKind::Type),
            'M' => Some(CRefKind::Method),
            'F' => Some(CRefKind::Field),
            'P' => Some(CRefKind::Property),
            'E' => Some(CRefKind::Event),
            _ => None,
        }
    }

    pub fn prefix(self) -> char {
        match self {
            CRefKind::Namespace => 'N',
            CRefKind::Type => 'T',
            CRefKind::Method => 'M',
            CRefKind::Field => 'F',
            CRefKind::Property => 'P',
            CRefKind::Event => 'E',
        }
    }
}

/// An immutable, validated cref
///
/// Two crefs are equal exactly when their text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CRef {
    text: String,
    kind: CRefKind,
}

impl CRef {
    /// Validate cref text
    pub fn parse(text: &str) -> Result<Self> {
        let query = parse_query(text)?;
        Ok(Self {
            text: text.to_string(),
            kind: query.kind,
        })
    }

    /// Build from generator output, which is well-formed by construction
    pub(crate) fn from_parts(kind: CRefKind, body: &str) -> Self {
        Self {
            text: format!("{}:{}", kind.prefix(), body),
            kind,
        }
    }

    pub fn kind(&self) -> CRefKind {
        self.kind
    }

    /// Everything after the `X:` prefix
    pub fn body(&self) -> &str {
        &self.text[2..]
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parse into a structural query
    pub fn query(&self) -> Result<SymbolQuery> {
        parse_query(&self.text)
    }

    /// A file-system safe page name, e.g. `T:Lib.Type` becomes `Lib.Type-T`
    pub fn slug(&self) -> String {
        format!("{}-{}", self.body(), self.kind.prefix())
            .chars()
            .map(|c| match c {
                '#' | ':' => '-',
                '@' | '`' => '!',
                other => other,
            })
            .collect()
    }
}

impl fmt::Display for CRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for CRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CRef::parse(s)
    }
}

impl TryFrom<String> for CRef {
    type Error = Error;

    fn try_from(text: String) -> Result<Self> {
        let kind = parse_query(&text)?.kind;
        Ok(Self { text, kind })
    }
}

impl From<CRef> for String {
    fn from(cref: CRef) -> Self {
        cref.text
    }
}

impl AsRef<str> for CRef {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exposes_kind_and_body() {
        let cref = CRef::parse("M:TestLibrary1.Class1.BlankStatic").unwrap();
        assert_eq!(cref.kind(), CRefKind::Method);
        assert_eq!(cref.body(), "TestLibrary1.Class1.BlankStatic");
        assert_eq!(cref.to_string(), "M:TestLibrary1.Class1.BlankStatic");
    }

    #[test]
    fn test_equality_is_textual() {
        let a: CRef = "T:TestLibrary1.Class1".parse().unwrap();
        let b = CRef::from_parts(CRefKind::Type, "TestLibrary1.Class1");
        assert_eq!(a, b);
        assert_ne!(a, CRef::parse("T:TestLibrary1.Class2").unwrap());
    }

    #[test]
    fn test_slug() {
        let cases = [
            ("T:TestLibrary1.Class1", "TestLibrary1.Class1-T"),
            ("M:TestLibrary1.Class1.#ctor", "TestLibrary1.Class1.-ctor-M"),
            (
                "M:TestLibrary1.Class1.TrySomeOutRefStuff(System.Int32@,System.Int32@)",
                "TestLibrary1.Class1.TrySomeOutRefStuff(System.Int32!,System.Int32!)-M",
            ),
            ("T:TestLibrary1.Generic1`2", "TestLibrary1.Generic1!2-T"),
            ("N:", "-N"),
        ];
        for (text, slug) in cases {
            assert_eq!(CRef::parse(text).unwrap().slug(), slug);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let cref = CRef::parse("F:TestLibrary1.Class1.SomeField").unwrap();
        let json = serde_json::to_string(&cref).unwrap();
        assert_eq!(json, "\"F:TestLibrary1.Class1.SomeField\"");
        let back: CRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cref);
        assert!(serde_json::from_str::<CRef>("\"bogus\"").is_err());
    }

    #[test]
    fn test_prefix_round_trip() {
        for kind in [
            CRefKind::Namespace,
            CRefKind::Type,
            CRefKind::Method,
            CRefKind::Field,
            CRefKind::Property,
            CRefKind::Event,
        ] {
            assert_eq!(CRefKind::from_prefix(kind.prefix()), Some(kind));
        }
        assert_eq!(CRefKind::from_prefix('!'), None);
    }
}
