//! Human-readable symbol names
//!
//! Display names follow the same declaring-chain walk as crefs but render
//! generic arity as `<T, U>` lists, operators as `operator +` and indexers
//! with square brackets. They are for people and cannot be parsed back; use a
//! [`crate::cref::CRef`] when a reversible identifier is needed.

mod operators;

pub use operators::{operator_display_name, operator_symbol, OPERATOR_SYMBOLS};

use crate::error::{Error, Result};
use crate::model::{MethodDef, ParameterDef, PropertyDef, SymbolGraph, SymbolId, TypeId, TypeRef};

/// Display name of the global namespace
pub const GLOBAL_NAMESPACE_NAME: &str = "global";

/// Configurable display name generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNameFormatter {
    /// Prefix type names with their namespace
    pub include_namespace: bool,
    /// Render generic parameter and argument lists on types
    pub show_generic_parameters: bool,
    /// Prefix members and nested types with their declaring types
    pub show_declaring_type: bool,
    pub list_separator: String,
    /// Formatter for parameter types; `None` reuses this formatter
    pub parameter_formatter: Option<Box<DisplayNameFormatter>>,
}

impl Default for DisplayNameFormatter {
    fn default() -> Self {
        Self {
            include_namespace: false,
            show_generic_parameters: true,
            show_declaring_type: false,
            list_separator: ", ".to_string(),
            parameter_formatter: None,
        }
    }
}

impl DisplayNameFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully qualified names: namespace and declaring types included
    pub fn qualified() -> Self {
        Self {
            include_namespace: true,
            show_declaring_type: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, include: bool) -> Self {
        self.include_namespace = include;
        self
    }

    #[must_use]
    pub fn with_generic_parameters(mut self, show: bool) -> Self {
        self.show_generic_parameters = show;
        self
    }

    #[must_use]
    pub fn with_declaring_type(mut self, show: bool) -> Self {
        self.show_declaring_type = show;
        self
    }

    #[must_use]
    pub fn with_list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_parameter_formatter(mut self, formatter: DisplayNameFormatter) -> Self {
        self.parameter_formatter = Some(Box::new(formatter));
        self
    }

    fn parameter_formatter(&self) -> &DisplayNameFormatter {
        self.parameter_formatter.as_deref().unwrap_or(self)
    }

    /// Display name of any symbol in `graph`
    ///
    /// The result is never empty. Fails with [`Error::ArgumentRequired`] when
    /// the symbol is not part of the graph.
    pub fn display_name(&self, graph: &SymbolGraph, symbol: SymbolId) -> Result<String> {
        let missing = || Error::ArgumentRequired("symbol");
        match symbol {
            SymbolId::Namespace(id) => {
                let ns = graph.namespace(id).ok_or_else(missing)?;
                Ok(if ns.name.is_empty() {
                    GLOBAL_NAMESPACE_NAME.to_string()
                } else {
                    ns.name.clone()
                })
            }
            SymbolId::Type(id) => {
                graph.type_def(id).ok_or_else(missing)?;
                Ok(self.type_def_name(graph, id))
            }
            SymbolId::Method(id) => {
                let method = graph.method(id).ok_or_else(missing)?;
                Ok(self.method_name(graph, method))
            }
            SymbolId::Property(id) => {
                let property = graph.property(id).ok_or_else(missing)?;
                Ok(self.property_name(graph, property))
            }
            SymbolId::Field(id) => {
                let field = graph.field(id).ok_or_else(missing)?;
                Ok(self.prefixed(graph, field.declaring_type, field.name.clone()))
            }
            SymbolId::Event(id) => {
                let event = graph.event(id).ok_or_else(missing)?;
                Ok(self.prefixed(graph, event.declaring_type, event.name.clone()))
            }
        }
    }

    /// Display name of a type reference from a signature
    pub fn type_ref_name(&self, graph: &SymbolGraph, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Defined(id) => self.type_def_name(graph, *id),
            TypeRef::External {
                namespace, name, ..
            } => self.with_namespace_prefix(namespace, self.external_segments(name).to_string()),
            TypeRef::Instance {
                definition,
                arguments,
            } => self.instance_name(graph, definition.definition(), arguments),
            TypeRef::TypeParameter { name, .. } | TypeRef::MethodParameter { name, .. } => {
                name.clone()
            }
            TypeRef::Array { element, rank } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                format!("{}[{commas}]", self.type_ref_name(graph, element))
            }
            TypeRef::Pointer(element) => format!("{}*", self.type_ref_name(graph, element)),
            TypeRef::ByRef(element) => format!("{}&", self.type_ref_name(graph, element)),
        }
    }

    fn type_def_name(&self, graph: &SymbolGraph, id: TypeId) -> String {
        let segments = graph.type_segments(id);
        let shown = if self.show_declaring_type {
            &segments[..]
        } else {
            &segments[segments.len().saturating_sub(1)..]
        };
        let parts: Vec<String> = shown
            .iter()
            .map(|segment| {
                let own = graph.own_generic_parameters(segment.id);
                if self.show_generic_parameters && !own.is_empty() {
                    format!("{}<{}>", segment.name, own.join(self.list_separator.as_str()))
                } else {
                    segment.name.to_string()
                }
            })
            .collect();
        self.with_namespace_prefix(graph.type_namespace(id), parts.join("."))
    }

    fn instance_name(&self, graph: &SymbolGraph, definition: &TypeRef, arguments: &[TypeRef]) -> String {
        match definition {
            TypeRef::Defined(id) => {
                let segments = graph.type_segments(*id);
                let mut remaining = arguments;
                let mut parts = Vec::with_capacity(segments.len());
                for (i, segment) in segments.iter().enumerate() {
                    let take = if i + 1 == segments.len() {
                        remaining.len()
                    } else {
                        segment.own_arity.min(remaining.len())
                    };
                    let (own, rest) = remaining.split_at(take);
                    remaining = rest;
                    parts.push(self.with_arguments(graph, segment.name, own));
                }
                if !self.show_declaring_type {
                    parts.drain(..parts.len().saturating_sub(1));
                }
                self.with_namespace_prefix(graph.type_namespace(*id), parts.join("."))
            }
            TypeRef::External {
                namespace, name, ..
            } => {
                let name = self.with_arguments(graph, self.external_segments(name), arguments);
                self.with_namespace_prefix(namespace, name)
            }
            other => self.type_ref_name(graph, other),
        }
    }

    fn with_arguments(&self, graph: &SymbolGraph, name: &str, arguments: &[TypeRef]) -> String {
        if !self.show_generic_parameters || arguments.is_empty() {
            return name.to_string();
        }
        let arguments: Vec<String> = arguments
            .iter()
            .map(|arg| self.type_ref_name(graph, arg))
            .collect();
        format!("{name}<{}>", arguments.join(self.list_separator.as_str()))
    }

    /// External nested types carry a dotted path; keep only the last part unless declaring types are shown
    fn external_segments<'n>(&self, name: &'n str) -> &'n str {
        if self.show_declaring_type {
            name
        } else {
            name.rsplit('.').next().unwrap_or(name)
        }
    }

    fn with_namespace_prefix(&self, namespace: &str, name: String) -> String {
        if self.include_namespace && !namespace.is_empty() {
            format!("{namespace}.{name}")
        } else {
            name
        }
    }

    fn method_name(&self, graph: &SymbolGraph, method: &MethodDef) -> String {
        let name = if method.is_constructor() {
            graph
                .type_def(method.declaring_type)
                .map_or_else(|| method.name.clone(), |def| def.name.clone())
        } else if method.is_operator_overload() {
            operator_display_name(&method.name)
        } else if method.generic_parameters.is_empty() {
            method.name.clone()
        } else {
            format!(
                "{}<{}>",
                method.name,
                method.generic_parameters.join(self.list_separator.as_str())
            )
        };
        let name = format!("{name}({})", self.parameter_list(graph, &method.parameters));
        self.prefixed(graph, method.declaring_type, name)
    }

    fn property_name(&self, graph: &SymbolGraph, property: &PropertyDef) -> String {
        let name = if !property.is_indexer() {
            property.name.clone()
        } else {
            let parameters = self.parameter_list(graph, &property.parameters);
            if property.is_item_indexer() {
                format!("{}[{parameters}]", property.name)
            } else {
                format!("{}({parameters})", property.name)
            }
        };
        self.prefixed(graph, property.declaring_type, name)
    }

    fn parameter_list(&self, graph: &SymbolGraph, parameters: &[ParameterDef]) -> String {
        let formatter = self.parameter_formatter();
        parameters
            .iter()
            .map(|p| formatter.type_ref_name(graph, &p.ty))
            .collect::<Vec<_>>()
            .join(self.list_separator.as_str())
    }

    fn prefixed(&self, graph: &SymbolGraph, declaring_type: TypeId, name: String) -> String {
        if self.show_declaring_type {
            format!("{}.{name}", self.type_def_name(graph, declaring_type))
        } else {
            name
        }
    }
}
