//! Attaching doc content to symbols, with `inheritdoc` redirection

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::loader::DocSource;
use super::node::{DocElement, DocElementKind};
use crate::cref::{
    generate, member_suffix, substituted_member_suffix, type_ref_cref, type_ref_text, CRef, CRefKind,
};
use crate::error::{Error, Result};
use crate::model::{SymbolGraph, SymbolId, TypeId, TypeRef};

/// When a symbol inherits documentation from its base or interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InheritDocMode {
    /// Only content containing `<inheritdoc/>` redirects
    #[default]
    Explicit,
    /// Undocumented symbols inherit as well
    ExplicitOrMissing,
}

/// Doc content keyed by cref text
#[derive(Debug, Clone, Default)]
pub struct XmlDocOverlay {
    entries: HashMap<String, DocElement>,
    mode: InheritDocMode,
}

/// Where inherited content may come from
enum Candidate {
    Local(SymbolId),
    External(CRef),
}

impl XmlDocOverlay {
    pub fn new(mode: InheritDocMode) -> Self {
        Self {
            entries: HashMap::new(),
            mode,
        }
    }

    /// Build an overlay from loaded doc files
    pub fn from_source(source: DocSource, mode: InheritDocMode) -> Self {
        let mut overlay = Self::new(mode);
        overlay.extend(source);
        overlay
    }

    pub fn mode(&self) -> InheritDocMode {
        self.mode
    }

    /// Attach content to a symbol; a later attach for the same cref replaces it
    pub fn attach(&mut self, cref: &CRef, content: DocElement) {
        self.entries.insert(cref.as_str().to_string(), content);
    }

    /// Attach content under raw identifier text, as found in doc files
    pub fn attach_raw(&mut self, identifier: &str, content: DocElement) -> Result<()> {
        if identifier.is_empty() {
            return Err(Error::ArgumentRequired("identifier"));
        }
        self.entries.insert(identifier.to_string(), content);
        Ok(())
    }

    /// Merge loaded doc entries; later entries win
    pub fn extend(&mut self, source: DocSource) {
        self.entries.extend(source);
    }

    /// Content attached under exactly this identifier text
    pub fn get(&self, identifier: &str) -> Option<&DocElement> {
        self.entries.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Documentation for a symbol, following `inheritdoc` redirects
    ///
    /// Redirects try an explicit `cref` source first, then the base type's
    /// same-signature member, then each directly implemented interface in
    /// declared order. When nothing is found the symbol's own content is
    /// returned if it has any.
    pub fn resolve<'a>(&'a self, graph: &SymbolGraph, symbol: SymbolId) -> Result<Option<AttachedDoc<'a>>> {
        let cref = generate(graph, symbol)?;
        let own = self.entries.get(cref.as_str());

        let requested = match own {
            Some(content) => content.inheritdoc().is_some(),
            None => self.mode == InheritDocMode::ExplicitOrMissing && inherits_implicitly(graph, symbol),
        };
        if !requested {
            return Ok(own.map(|content| AttachedDoc::new(cref.clone(), cref, content)));
        }

        let mut visited = HashSet::from([symbol]);
        let explicit = own.and_then(explicit_source);
        let inherited = explicit
            .and_then(|source| self.from_candidate(graph, Candidate::External(source), &mut visited))
            .or_else(|| self.inherit(graph, symbol, &mut visited));

        match inherited {
            Some((source, content)) => {
                debug!(target = %cref, source = %source, "inherited documentation");
                Ok(Some(AttachedDoc::new(cref, source, content)))
            }
            None => {
                debug!(target = %cref, "no inherited documentation found");
                Ok(own
                    .filter(|content| content.has_own_content())
                    .map(|content| AttachedDoc::new(cref.clone(), cref, content)))
            }
        }
    }

    fn inherit<'a>(
        &'a self,
        graph: &SymbolGraph,
        symbol: SymbolId,
        visited: &mut HashSet<SymbolId>,
    ) -> Option<(CRef, &'a DocElement)> {
        candidates(graph, symbol)
            .into_iter()
            .find_map(|candidate| self.from_candidate(graph, candidate, visited))
    }

    fn from_candidate<'a>(
        &'a self,
        graph: &SymbolGraph,
        candidate: Candidate,
        visited: &mut HashSet<SymbolId>,
    ) -> Option<(CRef, &'a DocElement)> {
        let (cref, local) = match candidate {
            Candidate::Local(id) => (generate(graph, id).ok()?, Some(id)),
            Candidate::External(cref) => {
                let local = graph.find(&cref);
                (cref, local)
            }
        };
        if let Some(id) = local {
            if !visited.insert(id) {
                debug!(cref = %cref, "inheritdoc cycle");
                return None;
            }
        }

        match self.entries.get(cref.as_str()) {
            Some(content) if content.inheritdoc().is_none() => {
                content.has_own_content().then_some((cref, content))
            }
            Some(content) => explicit_source(content)
                .and_then(|source| self.from_candidate(graph, Candidate::External(source), visited))
                .or_else(|| local.and_then(|id| self.inherit(graph, id, visited)))
                .or_else(|| content.has_own_content().then_some((cref, content))),
            None if self.mode == InheritDocMode::ExplicitOrMissing => local
                .filter(|&id| inherits_implicitly(graph, id))
                .and_then(|id| self.inherit(graph, id, visited)),
            None => None,
        }
    }
}

/// The `cref` named by an `<inheritdoc cref="..."/>` element
fn explicit_source(content: &DocElement) -> Option<CRef> {
    let text = content.inheritdoc()?.attribute("cref")?;
    CRef::parse(text).ok()
}

/// Whether an undocumented symbol takes documentation without `<inheritdoc/>`
///
/// Only instance methods, properties and events that override a base member
/// or implement a member of a directly declared interface qualify.
fn inherits_implicitly(graph: &SymbolGraph, symbol: SymbolId) -> bool {
    let (is_static, is_virtual, is_override) = match symbol {
        SymbolId::Method(id) => match graph.method(id) {
            Some(m) if !m.is_constructor() => (m.is_static, m.is_virtual || m.is_abstract, m.is_override),
            _ => return false,
        },
        SymbolId::Property(id) => match graph.property(id) {
            Some(p) => (p.is_static, p.is_virtual || p.is_abstract, p.is_override),
            None => return false,
        },
        SymbolId::Event(id) => match graph.event(id) {
            Some(e) => (e.is_static, e.is_virtual || e.is_abstract, e.is_override),
            None => return false,
        },
        SymbolId::Namespace(_) | SymbolId::Type(_) | SymbolId::Field(_) => return false,
    };
    if is_static {
        return false;
    }
    if is_override {
        return true;
    }
    let (Some(ty), Some(suffix)) = (graph.declaring_type(symbol), member_suffix(graph, symbol)) else {
        return false;
    };
    graph.type_def(ty).is_some_and(|def| {
        def.interfaces.iter().any(|interface| {
            match member_on(graph, interface, symbol, &suffix) {
                Some(Candidate::Local(_)) => true,
                // External interface members cannot be checked; implementations are virtual in metadata
                Some(Candidate::External(_)) => is_virtual,
                None => false,
            }
        })
    })
}

/// Inheritance sources for a symbol, in priority order
fn candidates(graph: &SymbolGraph, symbol: SymbolId) -> Vec<Candidate> {
    match symbol {
        SymbolId::Namespace(_) => Vec::new(),
        SymbolId::Type(id) => {
            let Some(def) = graph.type_def(id) else {
                return Vec::new();
            };
            def.base_type
                .iter()
                .chain(&def.interfaces)
                .filter_map(|ty| match ty.definition() {
                    TypeRef::Defined(local) => Some(Candidate::Local(SymbolId::Type(*local))),
                    other => type_ref_cref(graph, other).map(Candidate::External),
                })
                .collect()
        }
        member => {
            let (Some(ty), Some(suffix)) = (graph.declaring_type(member), member_suffix(graph, member))
            else {
                return Vec::new();
            };
            let mut found = Vec::new();
            if let Some(candidate) = base_member(graph, ty, member, &suffix) {
                found.push(candidate);
            }
            if let Some(def) = graph.type_def(ty) {
                for interface in &def.interfaces {
                    if let Some(candidate) = member_on(graph, interface, member, &suffix) {
                        found.push(candidate);
                    }
                }
            }
            found
        }
    }
}

/// Nearest base type declaring a member with the same signature
fn base_member(graph: &SymbolGraph, ty: TypeId, member: SymbolId, suffix: &str) -> Option<Candidate> {
    let mut seen = HashSet::from([ty]);
    let mut current = graph.type_def(ty)?.base_type.clone();
    while let Some(base) = current {
        match base.definition() {
            TypeRef::Defined(id) => {
                if !seen.insert(*id) {
                    return None;
                }
                if let Some(candidate) = member_on(graph, &base, member, suffix) {
                    return Some(candidate);
                }
                // The next base is written in this base's generic parameters
                current = graph
                    .type_def(*id)?
                    .base_type
                    .as_ref()
                    .map(|next| next.substitute(base.arguments()));
            }
            _ => return member_on(graph, &base, member, suffix),
        }
    }
    None
}

/// The member of `owner` matching `suffix`; external owners produce a cref to look up directly
///
/// Local members are compared with `owner`'s generic arguments substituted,
/// so `Run(`0)` on `Base<int>` matches `Run(System.Int32)`.
fn member_on(graph: &SymbolGraph, owner: &TypeRef, member: SymbolId, suffix: &str) -> Option<Candidate> {
    match owner.definition() {
        TypeRef::Defined(id) => {
            let def = graph.type_def(*id)?;
            let arguments = owner.arguments();
            let same = |candidate: SymbolId| {
                substituted_member_suffix(graph, candidate, arguments).as_deref() == Some(suffix)
            };
            let found = match member {
                SymbolId::Method(_) => def.methods.iter().map(|&m| SymbolId::Method(m)).find(|&s| same(s)),
                SymbolId::Property(_) => def
                    .properties
                    .iter()
                    .map(|&p| SymbolId::Property(p))
                    .find(|&s| same(s)),
                SymbolId::Field(_) => def.fields.iter().map(|&f| SymbolId::Field(f)).find(|&s| same(s)),
                SymbolId::Event(_) => def.events.iter().map(|&e| SymbolId::Event(e)).find(|&s| same(s)),
                SymbolId::Namespace(_) | SymbolId::Type(_) => None,
            };
            found.map(Candidate::Local)
        }
        external @ TypeRef::External { .. } => {
            let kind = match member {
                SymbolId::Method(_) => CRefKind::Method,
                SymbolId::Property(_) => CRefKind::Property,
                SymbolId::Field(_) => CRefKind::Field,
                SymbolId::Event(_) => CRefKind::Event,
                SymbolId::Namespace(_) | SymbolId::Type(_) => return None,
            };
            let text = format!("{}.{}", type_ref_text(graph, external), suffix);
            Some(Candidate::External(CRef::from_parts(kind, &text)))
        }
        _ => None,
    }
}

/// Doc content resolved for a symbol
#[derive(Debug, Clone)]
pub struct AttachedDoc<'a> {
    cref: CRef,
    source: CRef,
    content: &'a DocElement,
}

/// An `<exception>` entry with its parsed exception type
#[derive(Debug, Clone)]
pub struct ExceptionDoc<'a> {
    /// Parsed exception type; `None` when the cref attribute is missing or malformed
    pub cref: Option<CRef>,
    /// The raw `cref` attribute text
    pub raw: &'a str,
    pub element: &'a DocElement,
}

impl<'a> AttachedDoc<'a> {
    fn new(cref: CRef, source: CRef, content: &'a DocElement) -> Self {
        Self { cref, source, content }
    }

    /// The symbol this documentation was resolved for
    pub fn cref(&self) -> &CRef {
        &self.cref
    }

    /// The symbol the content was attached to
    pub fn source(&self) -> &CRef {
        &self.source
    }

    pub fn is_inherited(&self) -> bool {
        self.cref != self.source
    }

    /// The whole `<member>` element
    pub fn content(&self) -> &'a DocElement {
        self.content
    }

    pub fn summary(&self) -> Option<&'a DocElement> {
        self.content.find(DocElementKind::Summary)
    }

    pub fn remarks(&self) -> Option<&'a DocElement> {
        self.content.find(DocElementKind::Remarks)
    }

    pub fn returns(&self) -> Option<&'a DocElement> {
        self.content.find(DocElementKind::Returns)
    }

    pub fn value(&self) -> Option<&'a DocElement> {
        self.content.find(DocElementKind::Value)
    }

    pub fn examples(&self) -> Vec<&'a DocElement> {
        self.content.find_all(DocElementKind::Example).collect()
    }

    pub fn see_also(&self) -> Vec<&'a DocElement> {
        self.content.find_all(DocElementKind::SeeAlso).collect()
    }

    /// The `<param>` entry for a parameter name
    pub fn param(&self, name: &str) -> Result<Option<&'a DocElement>> {
        self.named(DocElementKind::Param, name)
    }

    /// The `<typeparam>` entry for a generic parameter name
    pub fn typeparam(&self, name: &str) -> Result<Option<&'a DocElement>> {
        self.named(DocElementKind::TypeParam, name)
    }

    pub fn exceptions(&self) -> Vec<ExceptionDoc<'a>> {
        self.content
            .find_all(DocElementKind::Exception)
            .map(|element| {
                let raw = element.attribute("cref").unwrap_or_default();
                ExceptionDoc {
                    cref: CRef::parse(raw).ok(),
                    raw,
                    element,
                }
            })
            .collect()
    }

    fn named(&self, kind: DocElementKind, name: &str) -> Result<Option<&'a DocElement>> {
        if name.is_empty() {
            return Err(Error::ArgumentRequired("name"));
        }
        Ok(self
            .content
            .find_all(kind)
            .find(|element| element.attribute("name") == Some(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphBuilder, MethodDef, TypeKind};

    fn member(summary: &str) -> DocElement {
        DocElement::new("member").with_child(DocElement::new("summary").with_text(summary))
    }

    fn inherit_only() -> DocElement {
        DocElement::new("member").with_child(DocElement::new("inheritdoc"))
    }

    fn base_and_derived() -> (SymbolGraph, SymbolId, SymbolId) {
        let mut builder = GraphBuilder::new("Lib");
        let base = builder.add_type("Lib", "Base", TypeKind::Class);
        let base_run = builder.add_method(base, MethodDef::new("Run").with_virtual());
        let derived = builder.add_type("Lib", "Derived", TypeKind::Class);
        builder.type_mut(derived).base_type = Some(TypeRef::Defined(base));
        let derived_run = builder.add_method(derived, MethodDef::new("Run").with_override());
        (builder.build(), SymbolId::Method(base_run), SymbolId::Method(derived_run))
    }

    #[test]
    fn test_attach_last_write_wins() {
        let mut overlay = XmlDocOverlay::default();
        let cref = CRef::parse("T:Lib.Base").unwrap();
        overlay.attach(&cref, member("first"));
        overlay.attach(&cref, member("second"));
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.get("T:Lib.Base").unwrap().plain_text(), "second");
    }

    #[test]
    fn test_attach_raw_requires_identifier() {
        let mut overlay = XmlDocOverlay::default();
        assert_eq!(
            overlay.attach_raw("", member("x")),
            Err(Error::ArgumentRequired("identifier"))
        );
    }

    #[test]
    fn test_explicit_inheritdoc_uses_base() {
        let (graph, base_run, derived_run) = base_and_derived();
        let mut overlay = XmlDocOverlay::default();
        overlay.attach(&generate(&graph, base_run).unwrap(), member("Runs it."));
        overlay.attach(&generate(&graph, derived_run).unwrap(), inherit_only());

        let doc = overlay.resolve(&graph, derived_run).unwrap().unwrap();
        assert!(doc.is_inherited());
        assert_eq!(doc.source().as_str(), "M:Lib.Base.Run");
        assert_eq!(doc.summary().unwrap().plain_text(), "Runs it.");
    }

    #[test]
    fn test_missing_docs_inherit_only_when_enabled() {
        let (graph, base_run, derived_run) = base_and_derived();
        let mut overlay = XmlDocOverlay::new(InheritDocMode::Explicit);
        overlay.attach(&generate(&graph, base_run).unwrap(), member("Runs it."));
        assert!(overlay.resolve(&graph, derived_run).unwrap().is_none());

        let mut overlay = XmlDocOverlay::new(InheritDocMode::ExplicitOrMissing);
        overlay.attach(&generate(&graph, base_run).unwrap(), member("Runs it."));
        let doc = overlay.resolve(&graph, derived_run).unwrap().unwrap();
        assert_eq!(doc.source().as_str(), "M:Lib.Base.Run");
    }

    #[test]
    fn test_missing_docs_skip_constructors_statics_and_types() {
        let mut builder = GraphBuilder::new("Lib");
        let base = builder.add_type("Lib", "Base", TypeKind::Class);
        let base_ctor = builder.add_method(base, MethodDef::new(".ctor"));
        let base_helper = builder.add_method(base, MethodDef::new("Helper").with_static());
        let base_show = builder.add_method(base, MethodDef::new("Show"));
        let derived = builder.add_type("Lib", "Derived", TypeKind::Class);
        builder.type_mut(derived).base_type = Some(TypeRef::Defined(base));
        let derived_ctor = builder.add_method(derived, MethodDef::new(".ctor"));
        let derived_helper = builder.add_method(derived, MethodDef::new("Helper").with_static());
        let derived_show = builder.add_method(derived, MethodDef::new("Show"));
        let graph = builder.build();

        let mut overlay = XmlDocOverlay::new(InheritDocMode::ExplicitOrMissing);
        overlay.attach(&generate(&graph, SymbolId::Type(base)).unwrap(), member("The Base class."));
        overlay.attach(&generate(&graph, SymbolId::Method(base_ctor)).unwrap(), member("Creates a Base."));
        overlay.attach(&generate(&graph, SymbolId::Method(base_helper)).unwrap(), member("Base static helper."));
        overlay.attach(&generate(&graph, SymbolId::Method(base_show)).unwrap(), member("Shows it."));

        for symbol in [
            SymbolId::Type(derived),
            SymbolId::Method(derived_ctor),
            SymbolId::Method(derived_helper),
            SymbolId::Method(derived_show),
        ] {
            assert!(overlay.resolve(&graph, symbol).unwrap().is_none(), "{symbol:?}");
        }
    }

    #[test]
    fn test_override_of_constructed_generic_base() {
        let mut builder = GraphBuilder::new("Lib");
        let base = builder.add_type("Lib", "Base`1", TypeKind::Class);
        builder.add_generic_parameters(base, &["T"]);
        let base_run = builder.add_method(
            base,
            MethodDef::new("Run")
                .with_virtual()
                .with_parameter("value", TypeRef::type_parameter(0, "T")),
        );
        let derived = builder.add_type("Lib", "Derived", TypeKind::Class);
        builder.type_mut(derived).base_type =
            Some(TypeRef::Defined(base).instance(vec![TypeRef::system("Int32")]));
        let derived_run = builder.add_method(
            derived,
            MethodDef::new("Run")
                .with_override()
                .with_parameter("value", TypeRef::system("Int32")),
        );
        let graph = builder.build();

        let mut overlay = XmlDocOverlay::new(InheritDocMode::ExplicitOrMissing);
        overlay.attach(&generate(&graph, SymbolId::Method(base_run)).unwrap(), member("Runs a value."));
        let doc = overlay.resolve(&graph, SymbolId::Method(derived_run)).unwrap().unwrap();
        assert_eq!(doc.source().as_str(), "M:Lib.Base`1.Run(`0)");
        assert_eq!(doc.summary().unwrap().plain_text(), "Runs a value.");
    }

    #[test]
    fn test_param_requires_name() {
        let (graph, base_run, _) = base_and_derived();
        let mut overlay = XmlDocOverlay::default();
        overlay.attach(&generate(&graph, base_run).unwrap(), member("Runs it."));
        let doc = overlay.resolve(&graph, base_run).unwrap().unwrap();
        assert_eq!(doc.param(""), Err(Error::ArgumentRequired("name")));
        assert_eq!(doc.param("missing"), Ok(None));
        assert!(doc.exceptions().is_empty());
        assert!(doc.returns().is_none());
    }
}
