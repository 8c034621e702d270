//! Building member models from a graph repository

use super::model::{
    DelegateDetails, DelegateModel, DetailLevel, EventDetails, EventModel, ExceptionModel,
    FieldDetails, FieldModel, GenericParameterModel, Member, MemberCore, MemberDocs,
    MethodDetails, MethodModel, NamespaceDetails, NamespaceModel, ParameterModel,
    PropertyDetails, PropertyModel, ReturnModel, TypeDetails, TypeModel, TypeReference,
};
use super::repository::{GraphRepository, MemberRepository};
use super::search::SearchContext;
use crate::cref::{generate, type_ref_cref, CRef};
use crate::model::{
    EventId, FieldId, MethodDef, MethodId, NamespaceId, ParameterDef, PropertyId, SymbolGraph, SymbolId,
    TypeId, TypeRef,
};
use crate::xmldoc::{AttachedDoc, DocElement, DocNode};

pub(crate) struct ModelBuilder<'a, 'c> {
    repo: &'a GraphRepository,
    context: &'a SearchContext<'c>,
    detail: DetailLevel,
}

impl<'a, 'c> ModelBuilder<'a, 'c> {
    pub(crate) fn new(
        repo: &'a GraphRepository,
        context: &'a SearchContext<'c>,
        detail: DetailLevel,
    ) -> Self {
        Self {
            repo,
            context,
            detail,
        }
    }

    fn graph(&self) -> &'a SymbolGraph {
        self.repo.graph()
    }

    pub(crate) fn build(&self, symbol: SymbolId) -> Option<Member> {
        let full = self.detail == DetailLevel::Full;
        let doc = if full { self.attached(symbol) } else { None };
        let doc = doc.as_ref();
        let core = self.core(symbol, doc)?;

        let member = match symbol {
            SymbolId::Namespace(id) => Member::Namespace(NamespaceModel {
                core,
                details: full.then(|| self.namespace_details(id)).flatten(),
            }),
            SymbolId::Type(id) if self.graph().type_def(id)?.is_delegate() => {
                Member::Delegate(DelegateModel {
                    core,
                    details: full.then(|| self.delegate_details(id, doc)).flatten(),
                })
            }
            SymbolId::Type(id) => Member::Type(TypeModel {
                core,
                details: full.then(|| self.type_details(id, doc)).flatten(),
            }),
            SymbolId::Method(id) => Member::Method(MethodModel {
                core,
                details: full.then(|| self.method_details(id, doc)).flatten(),
            }),
            SymbolId::Field(id) => Member::Field(FieldModel {
                core,
                details: full.then(|| self.field_details(id, doc)).flatten(),
            }),
            SymbolId::Property(id) => Member::Property(PropertyModel {
                core,
                details: full.then(|| self.property_details(id, doc)).flatten(),
            }),
            SymbolId::Event(id) => Member::Event(EventModel {
                core,
                details: full.then(|| self.event_details(id, doc)).flatten(),
            }),
        };
        Some(member)
    }

    fn attached(&self, symbol: SymbolId) -> Option<AttachedDoc<'a>> {
        self.repo.overlay()?.resolve(self.graph(), symbol).ok().flatten()
    }

    fn core(&self, symbol: SymbolId, doc: Option<&AttachedDoc<'_>>) -> Option<MemberCore> {
        let graph = self.graph();
        Some(MemberCore {
            cref: generate(graph, symbol).ok()?,
            display_name: self.repo.formatter().display_name(graph, symbol).ok()?,
            full_name: self
                .repo
                .qualified_formatter()
                .display_name(graph, symbol)
                .ok()?,
            subtitle: subtitle(graph, symbol),
            namespace: graph.symbol_namespace(symbol).unwrap_or_default().to_string(),
            repository: self.repo.name().to_string(),
            docs: doc.map(member_docs),
        })
    }

    fn cores(&self, symbols: impl IntoIterator<Item = SymbolId>) -> Vec<MemberCore> {
        symbols
            .into_iter()
            .filter_map(|symbol| self.core(symbol, None))
            .collect()
    }

    /// Minimum model of a definition, from this graph first and then the search context
    fn resolve_core(&self, cref: &CRef) -> Option<MemberCore> {
        if let Some(symbol) = self.graph().find(cref) {
            return self.core(symbol, None);
        }
        self.context
            .with_detail(DetailLevel::Minimum)
            .search(cref)
            .map(|member| member.core().clone())
    }

    fn reference(&self, ty: &TypeRef) -> TypeReference {
        let graph = self.graph();
        let cref = type_ref_cref(graph, ty);
        let target = cref.as_ref().and_then(|c| self.resolve_core(c));
        TypeReference {
            display_name: self.repo.formatter().type_ref_name(graph, ty),
            cref,
            target: target.map(Box::new),
        }
    }

    fn cref_reference(&self, cref: &CRef) -> TypeReference {
        let target = self.resolve_core(cref);
        let display_name = target
            .as_ref()
            .map_or_else(|| fallback_name(cref), |t| t.display_name.clone());
        TypeReference {
            cref: Some(cref.clone()),
            display_name,
            target: target.map(Box::new),
        }
    }

    fn generic_parameters<'n>(
        &self,
        names: impl IntoIterator<Item = &'n str>,
        doc: Option<&AttachedDoc<'_>>,
    ) -> Vec<GenericParameterModel> {
        names
            .into_iter()
            .map(|name| GenericParameterModel {
                name: name.to_string(),
                summary: section(doc.and_then(|d| d.typeparam(name).ok().flatten())),
            })
            .collect()
    }

    fn parameters(&self, parameters: &[ParameterDef], doc: Option<&AttachedDoc<'_>>) -> Vec<ParameterModel> {
        parameters
            .iter()
            .map(|p| ParameterModel {
                name: p.name.clone(),
                parameter_type: self.reference(&p.ty),
                is_by_ref: p.is_by_ref(),
                is_out: p.is_out,
                summary: section(doc.and_then(|d| d.param(&p.name).ok().flatten())),
            })
            .collect()
    }

    fn return_value(&self, ty: Option<&TypeRef>, doc: Option<&AttachedDoc<'_>>) -> Option<ReturnModel> {
        ty.map(|ty| ReturnModel {
            return_type: self.reference(ty),
            summary: section(doc.and_then(|d| d.returns())),
        })
    }

    fn exceptions(&self, doc: Option<&AttachedDoc<'_>>) -> Vec<ExceptionModel> {
        let Some(doc) = doc else {
            return Vec::new();
        };
        doc.exceptions()
            .into_iter()
            .map(|exception| ExceptionModel {
                exception_type: exception.cref.as_ref().map(|c| self.cref_reference(c)),
                raw: exception.raw.to_string(),
                conditions: exception.element.children.clone(),
            })
            .collect()
    }

    fn declaring(&self, ty: TypeId) -> TypeReference {
        self.reference(&TypeRef::Defined(ty))
    }

    fn namespace_details(&self, id: NamespaceId) -> Option<NamespaceDetails> {
        let ns = self.graph().namespace(id)?;
        Some(NamespaceDetails {
            types: self.cores(ns.types.iter().map(|&t| SymbolId::Type(t))),
        })
    }

    fn type_details(&self, id: TypeId, doc: Option<&AttachedDoc<'_>>) -> Option<TypeDetails> {
        let graph = self.graph();
        let def = graph.type_def(id)?;

        let methods_where = |keep: fn(&MethodDef) -> bool| {
            self.cores(
                def.methods
                    .iter()
                    .copied()
                    .filter(|&m| graph.method(m).is_some_and(keep))
                    .map(SymbolId::Method),
            )
        };

        Some(TypeDetails {
            kind: def.kind,
            visibility: def.visibility,
            is_static: def.is_static(),
            is_abstract: def.is_abstract,
            is_sealed: def.is_sealed,
            is_flags: def.has_flags_attribute(),
            declaring_type: def.declaring_type.map(|parent| self.declaring(parent)),
            base_type: def.base_type.as_ref().map(|base| self.reference(base)),
            interfaces: def.interfaces.iter().map(|i| self.reference(i)).collect(),
            generic_parameters: self.generic_parameters(graph.own_generic_parameters(id), doc),
            nested_types: self.cores(def.nested_types.iter().map(|&t| SymbolId::Type(t))),
            constructors: methods_where(|m| m.is_constructor()),
            methods: methods_where(|m| !m.is_constructor() && !m.is_operator_overload()),
            operators: methods_where(|m| m.is_operator_overload()),
            properties: self.cores(def.properties.iter().map(|&p| SymbolId::Property(p))),
            fields: self.cores(def.fields.iter().map(|&f| SymbolId::Field(f))),
            events: self.cores(def.events.iter().map(|&e| SymbolId::Event(e))),
        })
    }

    fn delegate_details(&self, id: TypeId, doc: Option<&AttachedDoc<'_>>) -> Option<DelegateDetails> {
        let graph = self.graph();
        let def = graph.type_def(id)?;
        let invoke = graph.delegate_invoke(id).and_then(|m| graph.method(m));
        Some(DelegateDetails {
            visibility: def.visibility,
            declaring_type: def.declaring_type.map(|parent| self.declaring(parent)),
            generic_parameters: self.generic_parameters(graph.own_generic_parameters(id), doc),
            parameters: invoke.map_or_else(Vec::new, |m| self.parameters(&m.parameters, doc)),
            return_value: invoke.and_then(|m| self.return_value(m.return_type.as_ref(), doc)),
        })
    }

    fn method_details(&self, id: MethodId, doc: Option<&AttachedDoc<'_>>) -> Option<MethodDetails> {
        let method = self.graph().method(id)?;
        Some(MethodDetails {
            declaring_type: self.declaring(method.declaring_type),
            visibility: method.visibility,
            is_static: method.is_static,
            is_abstract: method.is_abstract,
            is_virtual: method.is_virtual,
            is_override: method.is_override,
            is_pure: method.has_pure_attribute(),
            is_extension: method.is_extension_method(),
            is_operator: method.is_operator_overload(),
            is_constructor: method.is_constructor(),
            is_finalizer: method.is_finalizer(),
            generic_parameters: self
                .generic_parameters(method.generic_parameters.iter().map(String::as_str), doc),
            parameters: self.parameters(&method.parameters, doc),
            return_value: self.return_value(method.return_type.as_ref(), doc),
            exceptions: self.exceptions(doc),
        })
    }

    fn field_details(&self, id: FieldId, doc: Option<&AttachedDoc<'_>>) -> Option<FieldDetails> {
        let field = self.graph().field(id)?;
        Some(FieldDetails {
            declaring_type: self.declaring(field.declaring_type),
            visibility: field.visibility,
            value_type: self.reference(&field.ty),
            value_description: section(doc.and_then(|d| d.value())),
            is_static: field.is_static,
            is_literal: field.is_literal,
            is_init_only: field.is_init_only,
        })
    }

    fn property_details(&self, id: PropertyId, doc: Option<&AttachedDoc<'_>>) -> Option<PropertyDetails> {
        let property = self.graph().property(id)?;
        Some(PropertyDetails {
            declaring_type: self.declaring(property.declaring_type),
            visibility: property.visibility,
            value_type: self.reference(&property.ty),
            value_description: section(doc.and_then(|d| d.value())),
            parameters: self.parameters(&property.parameters, doc),
            has_getter: property.has_getter,
            has_setter: property.has_setter,
            is_static: property.is_static,
            is_abstract: property.is_abstract,
            is_virtual: property.is_virtual,
            is_override: property.is_override,
            is_pure: property.has_pure_attribute(),
            exceptions: self.exceptions(doc),
        })
    }

    fn event_details(&self, id: EventId, doc: Option<&AttachedDoc<'_>>) -> Option<EventDetails> {
        let event = self.graph().event(id)?;
        Some(EventDetails {
            declaring_type: self.declaring(event.declaring_type),
            visibility: event.visibility,
            delegate_type: self.reference(&event.ty),
            is_static: event.is_static,
            is_abstract: event.is_abstract,
            is_virtual: event.is_virtual,
            is_override: event.is_override,
            exceptions: self.exceptions(doc),
        })
    }
}

fn section(element: Option<&DocElement>) -> Vec<DocNode> {
    element.map(|e| e.children.clone()).unwrap_or_default()
}

fn member_docs(doc: &AttachedDoc<'_>) -> MemberDocs {
    MemberDocs {
        source: doc.source().clone(),
        inherited: doc.is_inherited(),
        summary: section(doc.summary()),
        remarks: section(doc.remarks()),
        examples: doc.examples().into_iter().map(|e| e.children.clone()).collect(),
        see_also: doc.see_also().into_iter().cloned().collect(),
    }
}

fn subtitle(graph: &SymbolGraph, symbol: SymbolId) -> &'static str {
    match symbol {
        SymbolId::Namespace(_) => "Namespace",
        SymbolId::Type(id) => graph.type_def(id).map_or("Type", |def| def.kind.display_name()),
        SymbolId::Method(id) => match graph.method(id) {
            Some(m) if m.is_constructor() => "Constructor",
            Some(m) if m.is_operator_overload() => "Operator",
            _ => "Method",
        },
        SymbolId::Field(id) => match graph.field(id) {
            Some(f) if f.is_literal => "Constant",
            _ => "Field",
        },
        SymbolId::Property(id) => match graph.property(id) {
            Some(p) if p.is_indexer() => "Indexer",
            _ => "Property",
        },
        SymbolId::Event(_) => "Event",
    }
}

/// Short name for a cref nobody could resolve, e.g. `T:System.IO.IOException` gives `IOException`
fn fallback_name(cref: &CRef) -> String {
    let last = cref.body().rsplit('.').next().unwrap_or_default();
    last.split('`').next().unwrap_or(last).to_string()
}
