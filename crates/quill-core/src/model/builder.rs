//! Programmatic construction of symbol graphs

use super::{
    EventDef, EventId, FieldDef, FieldId, MethodDef, MethodId, NamespaceDef, NamespaceId,
    PropertyDef, PropertyId, SymbolGraph, TypeDef, TypeId, TypeKind,
};

/// Incrementally assembles a [`SymbolGraph`]
///
/// Metadata loaders and tests use this to populate the arenas; `build`
/// finalizes the lookup indices.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: SymbolGraph,
}

impl GraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: SymbolGraph {
                name: name.into(),
                ..SymbolGraph::default()
            },
        }
    }

    /// Get or create a namespace by dotted name
    pub fn namespace(&mut self, name: &str) -> NamespaceId {
        if let Some(index) = self.graph.namespaces.iter().position(|ns| ns.name == name) {
            return NamespaceId(index as u32);
        }
        self.graph.namespaces.push(NamespaceDef {
            name: name.to_string(),
            types: Vec::new(),
        });
        NamespaceId((self.graph.namespaces.len() - 1) as u32)
    }

    /// Add a top-level type; a metadata arity suffix on the name is stripped
    pub fn add_type(&mut self, namespace: &str, name: &str, kind: TypeKind) -> TypeId {
        let ns = self.namespace(namespace);
        let id = self.push_type(TypeDef::new(strip_arity(name), namespace, kind));
        self.graph.namespaces[ns.index()].types.push(id);
        id
    }

    /// Add a nested type, which re-declares all of its parent's generic parameters
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not returned by this builder.
    pub fn add_nested_type(&mut self, parent: TypeId, name: &str, kind: TypeKind) -> TypeId {
        let parent_def = &self.graph.types[parent.index()];
        let mut def = TypeDef::new(strip_arity(name), parent_def.namespace.clone(), kind);
        def.declaring_type = Some(parent);
        def.generic_parameters = parent_def.generic_parameters.clone();
        let id = self.push_type(def);
        self.graph.types[parent.index()].nested_types.push(id);
        id
    }

    /// Append generic parameters to a type's full parameter list
    pub fn add_generic_parameters(&mut self, ty: TypeId, names: &[&str]) {
        self.type_mut(ty)
            .generic_parameters
            .extend(names.iter().map(|name| (*name).to_string()));
    }

    /// Mutable access for setting base types, flags and attributes
    ///
    /// # Panics
    ///
    /// Panics if `ty` was not returned by this builder. The `add_*` member
    /// methods share this precondition.
    pub fn type_mut(&mut self, ty: TypeId) -> &mut TypeDef {
        &mut self.graph.types[ty.index()]
    }

    pub fn add_method(&mut self, ty: TypeId, mut method: MethodDef) -> MethodId {
        method.declaring_type = ty;
        self.graph.methods.push(method);
        let id = MethodId((self.graph.methods.len() - 1) as u32);
        self.type_mut(ty).methods.push(id);
        id
    }

    pub fn add_field(&mut self, ty: TypeId, mut field: FieldDef) -> FieldId {
        field.declaring_type = ty;
        self.graph.fields.push(field);
        let id = FieldId((self.graph.fields.len() - 1) as u32);
        self.type_mut(ty).fields.push(id);
        id
    }

    pub fn add_property(&mut self, ty: TypeId, mut property: PropertyDef) -> PropertyId {
        property.declaring_type = ty;
        self.graph.properties.push(property);
        let id = PropertyId((self.graph.properties.len() - 1) as u32);
        self.type_mut(ty).properties.push(id);
        id
    }

    pub fn add_event(&mut self, ty: TypeId, mut event: EventDef) -> EventId {
        event.declaring_type = ty;
        self.graph.events.push(event);
        let id = EventId((self.graph.events.len() - 1) as u32);
        self.type_mut(ty).events.push(id);
        id
    }

    /// Finish building and index the graph
    pub fn build(mut self) -> SymbolGraph {
        self.graph.rebuild_indices();
        self.graph
    }

    fn push_type(&mut self, def: TypeDef) -> TypeId {
        self.graph.types.push(def);
        TypeId((self.graph.types.len() - 1) as u32)
    }
}

/// `Generic1`2` is stored as `Generic1`; arity is derived from the parameter list
fn strip_arity(name: &str) -> &str {
    match name.split_once('`') {
        Some((base, _)) => base,
        None => name,
    }
}
