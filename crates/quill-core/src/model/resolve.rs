//! Structural resolution of cref queries against a graph

use tracing::debug;

use super::{ParameterDef, SymbolGraph, SymbolId, TypeId, TypeRef};
use crate::cref::{type_ref_text, CRef, CRefKind, NameSegment, SymbolQuery, TypeSpec};

impl SymbolGraph {
    /// Locate the symbol a query denotes
    ///
    /// A method or property query without a parameter list prefers the
    /// parameterless overload and otherwise falls back to the first overload
    /// with a matching name and arity.
    pub fn resolve(&self, query: &SymbolQuery) -> Option<SymbolId> {
        match query.kind {
            CRefKind::Namespace => self
                .namespace_by_name(&query.namespace_name())
                .map(SymbolId::Namespace),
            CRefKind::Type => self.resolve_type_path(&query.path).map(SymbolId::Type),
            CRefKind::Method | CRefKind::Field | CRefKind::Property | CRefKind::Event => {
                self.resolve_member(query)
            }
        }
    }

    /// Parse and resolve a cref in one step
    pub fn find(&self, cref: &CRef) -> Option<SymbolId> {
        let query = cref.query().ok()?;
        let found = self.resolve(&query);
        debug!(cref = %cref, found = found.is_some(), library = %self.name, "resolve cref");
        found
    }

    /// Resolve a dotted type path, trying the longest namespace first
    pub fn resolve_type_path(&self, segments: &[NameSegment]) -> Option<TypeId> {
        for split in (0..segments.len()).rev() {
            let (namespace, types) = segments.split_at(split);
            if !namespace.iter().all(NameSegment::is_plain) {
                continue;
            }
            let namespace = namespace
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(".");
            let Some((outer, nested)) = types.split_first() else {
                continue;
            };
            let Some(mut current) = self.top_level_type(&namespace, &outer.name, outer.arity)
            else {
                continue;
            };
            let mut matched = true;
            for segment in nested {
                match self.nested_type(current, &segment.name, segment.arity) {
                    Some(next) => current = next,
                    None => {
                        matched = false;
                        break;
                    }
                }
            }
            if matched {
                return Some(current);
            }
        }
        None
    }

    fn resolve_member(&self, query: &SymbolQuery) -> Option<SymbolId> {
        let ty = self.resolve_type_path(query.type_path())?;
        let member = query.member()?;
        let def = self.type_def(ty)?;
        let wanted: Vec<String> = query.parameter_specs().iter().map(ToString::to_string).collect();

        match query.kind {
            CRefKind::Method => {
                let candidates: Vec<_> = def
                    .methods
                    .iter()
                    .copied()
                    .filter(|&id| {
                        self.method(id).is_some_and(|m| {
                            m.name == member.name && m.generic_parameters.len() == query.method_arity
                        })
                    })
                    .collect();
                let exact = candidates.iter().copied().find(|&id| {
                    self.method(id).is_some_and(|m| {
                        self.parameters_match(&m.parameters, &wanted)
                            && self.return_matches(m.return_type.as_ref(), query.return_type.as_ref())
                    })
                });
                exact
                    .or_else(|| loose_match(query, &candidates))
                    .map(SymbolId::Method)
            }
            CRefKind::Property => {
                let candidates: Vec<_> = def
                    .properties
                    .iter()
                    .copied()
                    .filter(|&id| self.property(id).is_some_and(|p| p.name == member.name))
                    .collect();
                let exact = candidates.iter().copied().find(|&id| {
                    self.property(id)
                        .is_some_and(|p| self.parameters_match(&p.parameters, &wanted))
                });
                exact
                    .or_else(|| loose_match(query, &candidates))
                    .map(SymbolId::Property)
            }
            CRefKind::Field => def
                .fields
                .iter()
                .copied()
                .find(|&id| self.field(id).is_some_and(|f| f.name == member.name))
                .map(SymbolId::Field),
            CRefKind::Event => def
                .events
                .iter()
                .copied()
                .find(|&id| self.event(id).is_some_and(|e| e.name == member.name))
                .map(SymbolId::Event),
            CRefKind::Namespace | CRefKind::Type => None,
        }
    }

    fn parameters_match(&self, parameters: &[ParameterDef], wanted: &[String]) -> bool {
        parameters.len() == wanted.len()
            && parameters
                .iter()
                .zip(wanted)
                .all(|(p, w)| type_ref_text(self, &p.ty) == *w)
    }

    fn return_matches(&self, actual: Option<&TypeRef>, wanted: Option<&TypeSpec>) -> bool {
        match wanted {
            None => true,
            Some(spec) => actual.is_some_and(|ty| type_ref_text(self, ty) == spec.to_string()),
        }
    }
}

/// Hand-written crefs often omit the parameter list of an overloaded member
fn loose_match<T: Copy>(query: &SymbolQuery, candidates: &[T]) -> Option<T> {
    if query.parameters.is_some() || query.return_type.is_some() {
        return None;
    }
    candidates.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cref::parse_query;
    use crate::model::{FieldDef, GraphBuilder, MethodDef, TypeKind};

    fn overloads() -> (SymbolGraph, Vec<SymbolId>) {
        let mut builder = GraphBuilder::new("Lib");
        let ty = builder.add_type("Lib.Core", "Widget", TypeKind::Class);
        let by_int = builder.add_method(
            ty,
            MethodDef::new("Run").with_parameter("count", TypeRef::system("Int32")),
        );
        let by_string = builder.add_method(
            ty,
            MethodDef::new("Run").with_parameter("name", TypeRef::system("String")),
        );
        let field = builder.add_field(ty, FieldDef::new("Size", TypeRef::system("Int32")));
        (
            builder.build(),
            vec![
                SymbolId::Method(by_int),
                SymbolId::Method(by_string),
                SymbolId::Field(field),
            ],
        )
    }

    fn resolve(graph: &SymbolGraph, text: &str) -> Option<SymbolId> {
        graph.resolve(&parse_query(text).unwrap())
    }

    #[test]
    fn test_overloads_resolve_by_parameters() {
        let (graph, ids) = overloads();
        assert_eq!(resolve(&graph, "M:Lib.Core.Widget.Run(System.Int32)"), Some(ids[0]));
        assert_eq!(resolve(&graph, "M:Lib.Core.Widget.Run(System.String)"), Some(ids[1]));
        assert_eq!(resolve(&graph, "M:Lib.Core.Widget.Run(System.Double)"), None);
    }

    #[test]
    fn test_missing_parameter_list_is_loose() {
        let (graph, ids) = overloads();
        assert_eq!(resolve(&graph, "M:Lib.Core.Widget.Run"), Some(ids[0]));
        assert_eq!(resolve(&graph, "M:Lib.Core.Widget.Run()"), None);
    }

    #[test]
    fn test_dotted_namespace_split() {
        let (graph, ids) = overloads();
        assert_eq!(resolve(&graph, "F:Lib.Core.Widget.Size"), Some(ids[2]));
        assert!(resolve(&graph, "N:Lib.Core").is_some());
        assert!(resolve(&graph, "N:Lib").is_none());
        assert!(resolve(&graph, "T:Lib.Widget").is_none());
    }

    #[test]
    fn test_wrong_kind_does_not_match() {
        let (graph, _) = overloads();
        assert!(resolve(&graph, "P:Lib.Core.Widget.Size").is_none());
        assert!(resolve(&graph, "E:Lib.Core.Widget.Run").is_none());
    }
}
