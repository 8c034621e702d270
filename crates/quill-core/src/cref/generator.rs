//! Cref generation from graph symbols

use super::{array_suffix, CRef, CRefKind};
use crate::error::{Error, Result};
use crate::model::{ParameterDef, SymbolGraph, SymbolId, TypeId, TypeRef};

/// Generate the canonical cref for a symbol
///
/// Fails with [`Error::ArgumentRequired`] when the id is not part of `graph`.
pub fn generate(graph: &SymbolGraph, symbol: SymbolId) -> Result<CRef> {
    let missing = || Error::ArgumentRequired("symbol");
    let cref = match symbol {
        SymbolId::Namespace(id) => {
            let ns = graph.namespace(id).ok_or_else(missing)?;
            CRef::from_parts(CRefKind::Namespace, &ns.name)
        }
        SymbolId::Type(id) => {
            graph.type_def(id).ok_or_else(missing)?;
            CRef::from_parts(CRefKind::Type, &type_body(graph, id))
        }
        member => {
            let ty = graph.declaring_type(member).ok_or_else(missing)?;
            let suffix = member_suffix(graph, member).ok_or_else(missing)?;
            let kind = match member {
                SymbolId::Method(_) => CRefKind::Method,
                SymbolId::Field(_) => CRefKind::Field,
                SymbolId::Property(_) => CRefKind::Property,
                _ => CRefKind::Event,
            };
            CRef::from_parts(kind, &format!("{}.{}", type_body(graph, ty), suffix))
        }
    };
    Ok(cref)
}

/// The part of a member cref that follows its declaring type
///
/// Members of different types with the same suffix share a signature; the
/// doc overlay relies on this to find overridden and implemented members.
pub fn member_suffix(graph: &SymbolGraph, symbol: SymbolId) -> Option<String> {
    substituted_member_suffix(graph, symbol, &[])
}

/// [`member_suffix`] with the declaring type's generic parameters replaced
/// by `arguments`, as seen through a constructed base type or interface
pub fn substituted_member_suffix(
    graph: &SymbolGraph,
    symbol: SymbolId,
    arguments: &[TypeRef],
) -> Option<String> {
    match symbol {
        SymbolId::Namespace(_) | SymbolId::Type(_) => None,
        SymbolId::Method(id) => {
            let method = graph.method(id)?;
            let mut text = encode_member_name(&method.name);
            if !method.generic_parameters.is_empty() {
                text.push_str(&format!("``{}", method.generic_parameters.len()));
            }
            text.push_str(&parameter_list(graph, &method.parameters, arguments));
            if method.is_conversion_operator() {
                if let Some(ret) = &method.return_type {
                    text.push('~');
                    text.push_str(&type_ref_text(graph, &ret.substitute(arguments)));
                }
            }
            Some(text)
        }
        SymbolId::Property(id) => {
            let property = graph.property(id)?;
            let mut text = encode_member_name(&property.name);
            text.push_str(&parameter_list(graph, &property.parameters, arguments));
            Some(text)
        }
        SymbolId::Field(id) => graph.field(id).map(|f| encode_member_name(&f.name)),
        SymbolId::Event(id) => graph.event(id).map(|e| encode_member_name(&e.name)),
    }
}

/// Cref text for a type reference as it appears inside a signature
pub fn type_ref_text(graph: &SymbolGraph, ty: &TypeRef) -> String {
    let mut out = String::new();
    write_type_ref(graph, ty, &mut out);
    out
}

/// The `T:` cref of the type definition behind a reference
///
/// Generic parameters have no definition of their own and yield `None`.
pub fn type_ref_cref(graph: &SymbolGraph, ty: &TypeRef) -> Option<CRef> {
    match ty.element().definition() {
        TypeRef::Defined(id) => {
            graph.type_def(*id)?;
            Some(CRef::from_parts(CRefKind::Type, &type_body(graph, *id)))
        }
        external @ TypeRef::External { .. } => {
            Some(CRef::from_parts(CRefKind::Type, &type_ref_text(graph, external)))
        }
        _ => None,
    }
}

/// Namespace plus the declaring chain, each segment with its own arity
fn type_body(graph: &SymbolGraph, id: TypeId) -> String {
    let mut out = String::new();
    push_namespace(&mut out, graph.type_namespace(id));
    for (i, segment) in graph.type_segments(id).iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(segment.name);
        if segment.own_arity > 0 {
            out.push_str(&format!("`{}", segment.own_arity));
        }
    }
    out
}

fn push_namespace(out: &mut String, namespace: &str) {
    if !namespace.is_empty() {
        out.push_str(namespace);
        out.push('.');
    }
}

fn encode_member_name(name: &str) -> String {
    name.replace('.', "#")
}

fn parameter_list(graph: &SymbolGraph, parameters: &[ParameterDef], arguments: &[TypeRef]) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let texts: Vec<String> = parameters
        .iter()
        .map(|p| type_ref_text(graph, &p.ty.substitute(arguments)))
        .collect();
    format!("({})", texts.join(","))
}

fn write_type_ref(graph: &SymbolGraph, ty: &TypeRef, out: &mut String) {
    match ty {
        TypeRef::Defined(id) => out.push_str(&type_body(graph, *id)),
        TypeRef::External {
            namespace,
            name,
            arity,
        } => {
            push_namespace(out, namespace);
            out.push_str(name);
            if *arity > 0 {
                out.push_str(&format!("`{arity}"));
            }
        }
        TypeRef::Instance {
            definition,
            arguments,
        } => write_instance(graph, definition.definition(), arguments, out),
        TypeRef::TypeParameter { position, .. } => out.push_str(&format!("`{position}")),
        TypeRef::MethodParameter { position, .. } => out.push_str(&format!("``{position}")),
        TypeRef::Array { element, rank } => {
            write_type_ref(graph, element, out);
            out.push_str(&array_suffix(*rank));
        }
        TypeRef::Pointer(element) => {
            write_type_ref(graph, element, out);
            out.push('*');
        }
        TypeRef::ByRef(element) => {
            write_type_ref(graph, element, out);
            out.push('@');
        }
    }
}

/// Generic arguments are split across the declaring chain by each segment's own arity
fn write_instance(graph: &SymbolGraph, definition: &TypeRef, arguments: &[TypeRef], out: &mut String) {
    match definition {
        TypeRef::Defined(id) => {
            push_namespace(out, graph.type_namespace(*id));
            let segments = graph.type_segments(*id);
            let mut remaining = arguments;
            for (i, segment) in segments.iter().enumerate() {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(segment.name);
                let take = if i + 1 == segments.len() {
                    remaining.len()
                } else {
                    segment.own_arity.min(remaining.len())
                };
                let (own, rest) = remaining.split_at(take);
                remaining = rest;
                write_argument_list(graph, own, out);
            }
        }
        TypeRef::External {
            namespace, name, ..
        } => {
            push_namespace(out, namespace);
            out.push_str(name);
            write_argument_list(graph, arguments, out);
        }
        other => write_type_ref(graph, other, out),
    }
}

fn write_argument_list(graph: &SymbolGraph, arguments: &[TypeRef], out: &mut String) {
    if arguments.is_empty() {
        return;
    }
    out.push('{');
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_type_ref(graph, argument, out);
    }
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphBuilder, MethodDef, MethodId, TypeKind};

    fn graph_with_method(method: MethodDef) -> (SymbolGraph, MethodId) {
        let mut builder = GraphBuilder::new("Lib");
        let ty = builder.add_type("Lib", "Grid", TypeKind::Class);
        let id = builder.add_method(ty, method);
        (builder.build(), id)
    }

    #[test]
    fn test_higher_rank_array_and_pointer() {
        let (graph, id) = graph_with_method(
            MethodDef::new("Fill")
                .with_parameter("cells", TypeRef::system("Int32").array_of_rank(2))
                .with_parameter("raw", TypeRef::system("Byte").pointer()),
        );
        let cref = generate(&graph, SymbolId::Method(id)).unwrap();
        assert_eq!(cref.as_str(), "M:Lib.Grid.Fill(System.Int32[0:,0:],System.Byte*)");
    }

    #[test]
    fn test_explicit_interface_member_encodes_dots() {
        let (graph, id) = graph_with_method(MethodDef::new("System.IDisposable.Dispose"));
        let cref = generate(&graph, SymbolId::Method(id)).unwrap();
        assert_eq!(cref.as_str(), "M:Lib.Grid.System#IDisposable#Dispose");
    }

    #[test]
    fn test_non_conversion_operator_has_no_return_suffix() {
        let (graph, id) = graph_with_method(
            MethodDef::new("op_Equality")
                .with_static()
                .with_parameter("a", TypeRef::system("Int32"))
                .with_parameter("b", TypeRef::system("Int32"))
                .returns(TypeRef::system("Boolean")),
        );
        let cref = generate(&graph, SymbolId::Method(id)).unwrap();
        assert_eq!(cref.as_str(), "M:Lib.Grid.op_Equality(System.Int32,System.Int32)");
    }

    #[test]
    fn test_missing_symbol_requires_argument() {
        let (graph, _) = graph_with_method(MethodDef::new("Run"));
        let err = generate(&graph, SymbolId::Method(MethodId(99))).unwrap_err();
        assert_eq!(err, Error::ArgumentRequired("symbol"));
    }

    #[test]
    fn test_type_ref_cref_unwraps_instances() {
        let graph = GraphBuilder::new("Empty").build();
        let list = TypeRef::external_generic("System.Collections.Generic", "List", 1)
            .instance(vec![TypeRef::system("Int32")])
            .array();
        assert_eq!(
            type_ref_cref(&graph, &list).unwrap().as_str(),
            "T:System.Collections.Generic.List`1"
        );
        assert_eq!(type_ref_cref(&graph, &TypeRef::type_parameter(0, "T")), None);
    }
}
