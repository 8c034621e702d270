//! Member models handed to renderers

use serde::{Deserialize, Serialize};

use crate::cref::CRef;
use crate::model::{TypeKind, Visibility};
use crate::xmldoc::{DocElement, DocNode};

/// How much of a member to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Identity and display names only
    Minimum,
    /// Everything, including docs, parameters and related types
    #[default]
    Full,
}

/// Fields shared by every member model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberCore {
    pub cref: CRef,
    pub display_name: String,
    /// Display name with namespace and declaring types
    pub full_name: String,
    /// Kind label such as `Class`, `Constructor` or `Indexer`
    pub subtitle: &'static str,
    pub namespace: String,
    /// Name of the repository that produced this model
    pub repository: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<MemberDocs>,
}

/// General doc sections of a member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberDocs {
    /// Symbol the content was attached to; differs from the member when inherited
    pub source: CRef,
    pub inherited: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<DocNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remarks: Vec<DocNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Vec<DocNode>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub see_also: Vec<DocElement>,
}

/// A reference to a type from a signature or base list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeReference {
    /// Cref of the type definition; `None` for generic parameters
    pub cref: Option<CRef>,
    pub display_name: String,
    /// The referenced definition when some repository knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<MemberCore>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericParameterModel {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterModel {
    pub name: String,
    pub parameter_type: TypeReference,
    pub is_by_ref: bool,
    pub is_out: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnModel {
    pub return_type: TypeReference,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptionModel {
    /// Resolved exception type; `None` when the cref is missing or malformed
    pub exception_type: Option<TypeReference>,
    /// Raw `cref` attribute text
    pub raw: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceModel {
    #[serde(flatten)]
    pub core: MemberCore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<NamespaceDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceDetails {
    pub types: Vec<MemberCore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeModel {
    #[serde(flatten)]
    pub core: MemberCore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<TypeDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDetails {
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_flags: bool,
    pub declaring_type: Option<TypeReference>,
    pub base_type: Option<TypeReference>,
    pub interfaces: Vec<TypeReference>,
    pub generic_parameters: Vec<GenericParameterModel>,
    pub nested_types: Vec<MemberCore>,
    pub constructors: Vec<MemberCore>,
    pub methods: Vec<MemberCore>,
    pub operators: Vec<MemberCore>,
    pub properties: Vec<MemberCore>,
    pub fields: Vec<MemberCore>,
    pub events: Vec<MemberCore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelegateModel {
    #[serde(flatten)]
    pub core: MemberCore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DelegateDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelegateDetails {
    pub visibility: Visibility,
    pub declaring_type: Option<TypeReference>,
    pub generic_parameters: Vec<GenericParameterModel>,
    pub parameters: Vec<ParameterModel>,
    pub return_value: Option<ReturnModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodModel {
    #[serde(flatten)]
    pub core: MemberCore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<MethodDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDetails {
    pub declaring_type: TypeReference,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_pure: bool,
    pub is_extension: bool,
    pub is_operator: bool,
    pub is_constructor: bool,
    pub is_finalizer: bool,
    pub generic_parameters: Vec<GenericParameterModel>,
    pub parameters: Vec<ParameterModel>,
    pub return_value: Option<ReturnModel>,
    pub exceptions: Vec<ExceptionModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldModel {
    #[serde(flatten)]
    pub core: MemberCore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDetails {
    pub declaring_type: TypeReference,
    pub visibility: Visibility,
    pub value_type: TypeReference,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value_description: Vec<DocNode>,
    pub is_static: bool,
    pub is_literal: bool,
    pub is_init_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyModel {
    #[serde(flatten)]
    pub core: MemberCore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<PropertyDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDetails {
    pub declaring_type: TypeReference,
    pub visibility: Visibility,
    pub value_type: TypeReference,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value_description: Vec<DocNode>,
    pub parameters: Vec<ParameterModel>,
    pub has_getter: bool,
    pub has_setter: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_pure: bool,
    pub exceptions: Vec<ExceptionModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventModel {
    #[serde(flatten)]
    pub core: MemberCore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetails {
    pub declaring_type: TypeReference,
    pub visibility: Visibility,
    pub delegate_type: TypeReference,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub exceptions: Vec<ExceptionModel>,
}

/// A resolved member at some detail level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Member {
    Namespace(NamespaceModel),
    Type(TypeModel),
    Delegate(DelegateModel),
    Method(MethodModel),
    Field(FieldModel),
    Property(PropertyModel),
    Event(EventModel),
}

impl Member {
    pub fn core(&self) -> &MemberCore {
        match self {
            Member::Namespace(m) => &m.core,
            Member::Type(m) => &m.core,
            Member::Delegate(m) => &m.core,
            Member::Method(m) => &m.core,
            Member::Field(m) => &m.core,
            Member::Property(m) => &m.core,
            Member::Event(m) => &m.core,
        }
    }

    pub fn cref(&self) -> &CRef {
        &self.core().cref
    }

    pub fn display_name(&self) -> &str {
        &self.core().display_name
    }

    pub fn docs(&self) -> Option<&MemberDocs> {
        self.core().docs.as_ref()
    }

    /// The detail level this model was built at
    pub fn detail(&self) -> DetailLevel {
        let full = match self {
            Member::Namespace(m) => m.details.is_some(),
            Member::Type(m) => m.details.is_some(),
            Member::Delegate(m) => m.details.is_some(),
            Member::Method(m) => m.details.is_some(),
            Member::Field(m) => m.details.is_some(),
            Member::Property(m) => m.details.is_some(),
            Member::Event(m) => m.details.is_some(),
        };
        if full {
            DetailLevel::Full
        } else {
            DetailLevel::Minimum
        }
    }
}
