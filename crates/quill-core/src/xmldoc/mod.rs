//! XML documentation overlay
//!
//! Doc comments arrive as the compiler's XML doc file, a flat list of
//! `<member name="cref">` entries. They are loaded into [`DocElement`] trees
//! and attached to symbols by cref through an [`XmlDocOverlay`], which also
//! handles `<inheritdoc/>` redirection.

mod loader;
mod node;
mod overlay;

pub use loader::{load_xml_doc_file, load_xml_docs, DocLoadError, DocSource};
pub use node::{DocElement, DocElementKind, DocNode};
pub use overlay::{AttachedDoc, ExceptionDoc, InheritDocMode, XmlDocOverlay};
