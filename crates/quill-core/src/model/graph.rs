//! The symbol graph arena and its lookup indices

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{
    EventDef, EventId, FieldDef, FieldId, MethodDef, MethodId, NamespaceDef, NamespaceId,
    PropertyDef, PropertyId, SymbolId, TypeDef, TypeId,
};

/// Errors that can occur when loading a serialized symbol graph
#[derive(Error, Debug)]
pub enum GraphLoadError {
    #[error("failed to read symbol graph '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse symbol graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("symbol graph references missing {kind} #{index}")]
    DanglingReference { kind: &'static str, index: usize },
}

/// One segment of a type's declaring chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSegment<'g> {
    pub id: TypeId,
    pub name: &'g str,
    /// Generic parameters introduced at this nesting level
    pub own_arity: usize,
}

/// Read-only metadata for a single library
///
/// Symbols live in flat arenas; ids are indices into them. Lookup indices are
/// derived data and rebuilt whenever a graph is built or deserialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolGraph {
    /// Library (assembly) name
    pub name: String,
    pub(crate) namespaces: Vec<NamespaceDef>,
    pub(crate) types: Vec<TypeDef>,
    #[serde(default)]
    pub(crate) methods: Vec<MethodDef>,
    #[serde(default)]
    pub(crate) fields: Vec<FieldDef>,
    #[serde(default)]
    pub(crate) properties: Vec<PropertyDef>,
    #[serde(default)]
    pub(crate) events: Vec<EventDef>,

    #[serde(skip)]
    pub(crate) namespace_index: HashMap<String, NamespaceId>,
    /// Top-level types keyed by (namespace, name, arity)
    #[serde(skip)]
    pub(crate) type_index: HashMap<(String, String, usize), TypeId>,
}

impl SymbolGraph {
    /// Parse a graph from its JSON interchange form
    pub fn from_json(json: &str) -> Result<Self, GraphLoadError> {
        let mut graph: SymbolGraph = serde_json::from_str(json)?;
        graph.check_references()?;
        graph.rebuild_indices();
        debug!(
            library = %graph.name,
            types = graph.types.len(),
            methods = graph.methods.len(),
            "loaded symbol graph"
        );
        Ok(graph)
    }

    /// Read a graph from a JSON file
    pub fn load(path: &Path) -> Result<Self, GraphLoadError> {
        let json = fs::read_to_string(path).map_err(|source| GraphLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize the graph to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, GraphLoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub(crate) fn rebuild_indices(&mut self) {
        self.namespace_index.clear();
        self.type_index.clear();
        for (index, ns) in self.namespaces.iter().enumerate() {
            self.namespace_index
                .insert(ns.name.clone(), NamespaceId(index as u32));
        }
        for index in 0..self.types.len() {
            let id = TypeId(index as u32);
            let def = &self.types[index];
            if def.declaring_type.is_none() {
                let key = (def.namespace.clone(), def.name.clone(), self.own_arity(id));
                self.type_index.insert(key, id);
            }
        }
    }

    fn check_references(&self) -> Result<(), GraphLoadError> {
        fn check(index: usize, len: usize, kind: &'static str) -> Result<(), GraphLoadError> {
            if index < len {
                Ok(())
            } else {
                Err(GraphLoadError::DanglingReference { kind, index })
            }
        }

        for ns in &self.namespaces {
            for ty in &ns.types {
                check(ty.index(), self.types.len(), "type")?;
            }
        }
        for def in &self.types {
            if let Some(parent) = def.declaring_type {
                check(parent.index(), self.types.len(), "type")?;
            }
            for nested in &def.nested_types {
                check(nested.index(), self.types.len(), "type")?;
            }
            for id in &def.methods {
                check(id.index(), self.methods.len(), "method")?;
            }
            for id in &def.fields {
                check(id.index(), self.fields.len(), "field")?;
            }
            for id in &def.properties {
                check(id.index(), self.properties.len(), "property")?;
            }
            for id in &def.events {
                check(id.index(), self.events.len(), "event")?;
            }
        }
        let declaring = self
            .methods
            .iter()
            .map(|m| m.declaring_type)
            .chain(self.fields.iter().map(|f| f.declaring_type))
            .chain(self.properties.iter().map(|p| p.declaring_type))
            .chain(self.events.iter().map(|e| e.declaring_type));
        for ty in declaring {
            check(ty.index(), self.types.len(), "type")?;
        }
        Ok(())
    }

    pub fn namespace(&self, id: NamespaceId) -> Option<&NamespaceDef> {
        self.namespaces.get(id.index())
    }

    pub fn type_def(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.index())
    }

    pub fn method(&self, id: MethodId) -> Option<&MethodDef> {
        self.methods.get(id.index())
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldDef> {
        self.fields.get(id.index())
    }

    pub fn property(&self, id: PropertyId) -> Option<&PropertyDef> {
        self.properties.get(id.index())
    }

    pub fn event(&self, id: EventId) -> Option<&EventDef> {
        self.events.get(id.index())
    }

    /// Check whether a symbol id refers to something in this graph
    pub fn contains(&self, symbol: SymbolId) -> bool {
        match symbol {
            SymbolId::Namespace(id) => self.namespace(id).is_some(),
            SymbolId::Type(id) => self.type_def(id).is_some(),
            SymbolId::Method(id) => self.method(id).is_some(),
            SymbolId::Field(id) => self.field(id).is_some(),
            SymbolId::Property(id) => self.property(id).is_some(),
            SymbolId::Event(id) => self.event(id).is_some(),
        }
    }

    /// Find a namespace by its dotted name; the empty name is the global namespace
    pub fn namespace_by_name(&self, name: &str) -> Option<NamespaceId> {
        self.namespace_index.get(name).copied()
    }

    /// Find a top-level type by namespace, simple name and own arity
    pub fn top_level_type(&self, namespace: &str, name: &str, arity: usize) -> Option<TypeId> {
        self.type_index
            .get(&(namespace.to_string(), name.to_string(), arity))
            .copied()
    }

    /// Find a nested type by simple name and own arity
    pub fn nested_type(&self, parent: TypeId, name: &str, arity: usize) -> Option<TypeId> {
        self.type_def(parent)?
            .nested_types
            .iter()
            .copied()
            .find(|&id| {
                self.type_def(id).is_some_and(|def| def.name == name) && self.own_arity(id) == arity
            })
    }

    /// All namespaces in declaration order
    pub fn namespaces(&self) -> impl Iterator<Item = (NamespaceId, &NamespaceDef)> {
        self.namespaces
            .iter()
            .enumerate()
            .map(|(index, ns)| (NamespaceId(index as u32), ns))
    }

    /// All types, top-level and nested
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, def)| (TypeId(index as u32), def))
    }

    /// Every symbol in the graph: namespaces first, then each type followed by its members
    pub fn symbols(&self) -> Vec<SymbolId> {
        let mut symbols: Vec<SymbolId> = self
            .namespaces()
            .map(|(id, _)| SymbolId::Namespace(id))
            .collect();
        for (id, def) in self.types() {
            symbols.push(SymbolId::Type(id));
            symbols.extend(def.methods.iter().map(|&m| SymbolId::Method(m)));
            symbols.extend(def.fields.iter().map(|&f| SymbolId::Field(f)));
            symbols.extend(def.properties.iter().map(|&p| SymbolId::Property(p)));
            symbols.extend(def.events.iter().map(|&e| SymbolId::Event(e)));
        }
        symbols
    }

    /// The declaring chain of a type, outermost first, ending with the type itself
    pub fn ancestor_chain(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(ty) = current {
            // A malformed graph could declare a type inside itself
            if chain.contains(&ty) {
                break;
            }
            chain.push(ty);
            current = self.type_def(ty).and_then(|def| def.declaring_type);
        }
        chain.reverse();
        chain
    }

    /// Generic parameters this type introduces, excluding re-declared parent parameters
    pub fn own_generic_parameters(&self, id: TypeId) -> Vec<&str> {
        let Some(def) = self.type_def(id) else {
            return Vec::new();
        };
        let inherited: &[String] = def
            .declaring_type
            .and_then(|parent| self.type_def(parent))
            .map_or(&[], |parent| parent.generic_parameters.as_slice());
        def.generic_parameters
            .iter()
            .filter(|name| !inherited.contains(name))
            .map(String::as_str)
            .collect()
    }

    pub fn own_arity(&self, id: TypeId) -> usize {
        self.own_generic_parameters(id).len()
    }

    /// Declaring chain with each segment's own arity
    pub fn type_segments(&self, id: TypeId) -> Vec<TypeSegment<'_>> {
        self.ancestor_chain(id)
            .into_iter()
            .filter_map(|ty| {
                self.type_def(ty).map(|def| TypeSegment {
                    id: ty,
                    name: def.name.as_str(),
                    own_arity: self.own_arity(ty),
                })
            })
            .collect()
    }

    /// Namespace of a type, taken from its outermost declaring type
    pub fn type_namespace(&self, id: TypeId) -> &str {
        self.ancestor_chain(id)
            .first()
            .and_then(|&outer| self.type_def(outer))
            .map_or("", |def| def.namespace.as_str())
    }

    /// The type that declares a member or nested type
    pub fn declaring_type(&self, symbol: SymbolId) -> Option<TypeId> {
        match symbol {
            SymbolId::Namespace(_) => None,
            SymbolId::Type(id) => self.type_def(id)?.declaring_type,
            SymbolId::Method(id) => self.method(id).map(|m| m.declaring_type),
            SymbolId::Field(id) => self.field(id).map(|f| f.declaring_type),
            SymbolId::Property(id) => self.property(id).map(|p| p.declaring_type),
            SymbolId::Event(id) => self.event(id).map(|e| e.declaring_type),
        }
    }

    /// Simple metadata name of any symbol
    pub fn symbol_name(&self, symbol: SymbolId) -> Option<&str> {
        match symbol {
            SymbolId::Namespace(id) => self.namespace(id).map(|ns| ns.name.as_str()),
            SymbolId::Type(id) => self.type_def(id).map(|def| def.name.as_str()),
            SymbolId::Method(id) => self.method(id).map(|m| m.name.as_str()),
            SymbolId::Field(id) => self.field(id).map(|f| f.name.as_str()),
            SymbolId::Property(id) => self.property(id).map(|p| p.name.as_str()),
            SymbolId::Event(id) => self.event(id).map(|e| e.name.as_str()),
        }
    }

    /// Namespace a symbol lives in; namespaces return their own name
    pub fn symbol_namespace(&self, symbol: SymbolId) -> Option<&str> {
        match symbol {
            SymbolId::Namespace(id) => self.namespace(id).map(|ns| ns.name.as_str()),
            SymbolId::Type(id) => self.type_def(id).map(|_| self.type_namespace(id)),
            member => self
                .declaring_type(member)
                .map(|ty| self.type_namespace(ty)),
        }
    }

    /// The `Invoke` method that carries a delegate's signature
    pub fn delegate_invoke(&self, id: TypeId) -> Option<MethodId> {
        let def = self.type_def(id)?;
        if !def.is_delegate() {
            return None;
        }
        def.methods
            .iter()
            .copied()
            .find(|&m| self.method(m).is_some_and(|method| method.name == "Invoke"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphBuilder, MethodDef, TypeKind, TypeRef};

    fn nested_generic_graph() -> (SymbolGraph, TypeId, TypeId) {
        let mut builder = GraphBuilder::new("Nested");
        let outer = builder.add_type("Lib", "Outer", TypeKind::Class);
        builder.add_generic_parameters(outer, &["TA", "TB"]);
        let inner = builder.add_nested_type(outer, "Inner", TypeKind::Class);
        builder.add_generic_parameters(inner, &["TC"]);
        (builder.build(), outer, inner)
    }

    #[test]
    fn test_own_generic_parameters_exclude_parent() {
        let (graph, outer, inner) = nested_generic_graph();
        assert_eq!(graph.own_generic_parameters(outer), vec!["TA", "TB"]);
        assert_eq!(graph.own_generic_parameters(inner), vec!["TC"]);
        assert_eq!(
            graph.type_def(inner).unwrap().generic_parameters,
            vec!["TA", "TB", "TC"]
        );
    }

    #[test]
    fn test_ancestor_chain_outermost_first() {
        let (graph, outer, inner) = nested_generic_graph();
        assert_eq!(graph.ancestor_chain(inner), vec![outer, inner]);
        assert_eq!(graph.ancestor_chain(outer), vec![outer]);
        assert_eq!(graph.type_namespace(inner), "Lib");
    }

    #[test]
    fn test_type_index_uses_own_arity() {
        let (graph, outer, inner) = nested_generic_graph();
        assert_eq!(graph.top_level_type("Lib", "Outer", 2), Some(outer));
        assert_eq!(graph.top_level_type("Lib", "Outer", 0), None);
        assert_eq!(graph.nested_type(outer, "Inner", 1), Some(inner));
        assert_eq!(graph.nested_type(outer, "Inner", 3), None);
    }

    #[test]
    fn test_json_round_trip_rebuilds_indices() {
        let (graph, outer, _) = nested_generic_graph();
        let json = graph.to_json().unwrap();
        let loaded = SymbolGraph::from_json(&json).unwrap();
        assert_eq!(loaded.name, "Nested");
        assert_eq!(loaded.top_level_type("Lib", "Outer", 2), Some(outer));
        assert_eq!(loaded.namespace_by_name("Lib"), graph.namespace_by_name("Lib"));
        assert_eq!(loaded.symbols(), graph.symbols());
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let json = r#"{
            "name": "Broken",
            "namespaces": [{ "name": "Lib", "types": [3] }],
            "types": []
        }"#;
        let err = SymbolGraph::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            GraphLoadError::DanglingReference { kind: "type", index: 3 }
        ));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = SymbolGraph::load(Path::new("/nonexistent/graph.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/graph.json"));
    }

    #[test]
    fn test_delegate_invoke() {
        let mut builder = GraphBuilder::new("Delegates");
        let handler = builder.add_type("Lib", "Handler", TypeKind::Delegate);
        let invoke = builder.add_method(
            handler,
            MethodDef::new("Invoke")
                .with_virtual()
                .with_parameter("value", TypeRef::system("Int32")),
        );
        let plain = builder.add_type("Lib", "Plain", TypeKind::Class);
        let graph = builder.build();

        assert_eq!(graph.delegate_invoke(handler), Some(invoke));
        assert_eq!(graph.delegate_invoke(plain), None);
    }
}
