//! Quill Core - symbol identifiers and documentation models for .NET libraries
//!
//! This crate provides:
//! - Cref: generating and parsing documentation-comment identifiers
//! - Model: the symbol graph of a compiled library
//! - Display: human-readable member names
//! - XmlDoc: doc comment overlay with `<inheritdoc/>` support
//! - CodeDoc: member repositories and cross-repository search
//! - Config: `quill.toml` project configuration

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types shared across the crate
pub mod error;

/// Cref identifiers - generation, parsing and slugs
pub mod cref;

/// Symbol graph of a library
pub mod model;

/// Display name formatting
pub mod display;

/// XML doc comments and inheritance
pub mod xmldoc;

/// Member models, repositories and search
pub mod codedoc;

/// Project configuration
pub mod config;

/// Test utilities - sample graphs and doc files
pub mod testutil;

/// Convenience re-export of errors
pub use error::{Error, Result};

/// Convenience re-export of cref types
pub use cref::{generate, parse_query, CRef, CRefKind, SymbolQuery};

/// Convenience re-export of the symbol graph
pub use model::{GraphBuilder, SymbolGraph, SymbolId, TypeRef};

/// Convenience re-export of the display formatter
pub use display::DisplayNameFormatter;

/// Convenience re-export of the doc overlay
pub use xmldoc::{InheritDocMode, XmlDocOverlay};

/// Convenience re-export of repositories
pub use codedoc::{DetailLevel, GraphRepository, Member, MemberRepository, SearchContext};

/// Convenience re-export of configuration
pub use config::QuillConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn generated_crefs_resolve_back() {
        let graph = testutil::test_library();
        for symbol in graph.symbols() {
            let cref = generate(&graph, symbol).unwrap();
            assert_eq!(graph.find(&cref), Some(symbol), "{cref}");
        }
    }
}
