//! Symbol model: a read-only view over a loaded metadata graph
//!
//! A [`SymbolGraph`] stores every namespace, type and member of one library in
//! flat arenas addressed by small copyable ids. Whatever loader produced the
//! metadata, the rest of the engine only ever sees this shape:
//! - [`SymbolId`] is the closed set of symbol kinds
//! - declaring namespaces and types are back-references by id, never owned
//! - member signatures refer to other types through [`TypeRef`]

mod builder;
mod graph;
mod resolve;
mod typeref;

pub use builder::GraphBuilder;
pub use graph::{GraphLoadError, SymbolGraph, TypeSegment};
pub use typeref::TypeRef;

use serde::{Deserialize, Serialize};

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Position of this symbol in its arena
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Index of a namespace in a [`SymbolGraph`]
    NamespaceId
);
arena_id!(
    /// Index of a type definition in a [`SymbolGraph`]
    TypeId
);
arena_id!(
    /// Index of a method definition in a [`SymbolGraph`]
    MethodId
);
arena_id!(
    /// Index of a field definition in a [`SymbolGraph`]
    FieldId
);
arena_id!(
    /// Index of a property definition in a [`SymbolGraph`]
    PropertyId
);
arena_id!(
    /// Index of an event definition in a [`SymbolGraph`]
    EventId
);

/// Any symbol in a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SymbolId {
    Namespace(NamespaceId),
    Type(TypeId),
    Method(MethodId),
    Field(FieldId),
    Property(PropertyId),
    Event(EventId),
}

/// Kind of a type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

impl TypeKind {
    /// Get the display name for the type kind
    pub fn display_name(&self) -> &'static str {
        match self {
            TypeKind::Class => "Class",
            TypeKind::Interface => "Interface",
            TypeKind::Struct => "Structure",
            TypeKind::Enum => "Enumeration",
            TypeKind::Delegate => "Delegate",
        }
    }
}

/// Declared accessibility of a type or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    ProtectedInternal,
    Internal,
    Private,
}

impl Visibility {
    /// Whether code outside the declaring assembly can see the symbol
    pub fn is_exposed(self) -> bool {
        matches!(
            self,
            Visibility::Public | Visibility::Protected | Visibility::ProtectedInternal
        )
    }
}

/// Attribute type name marking extension methods
pub const EXTENSION_ATTRIBUTE: &str = "System.Runtime.CompilerServices.ExtensionAttribute";

/// Attribute type name marking flags enumerations
pub const FLAGS_ATTRIBUTE: &str = "System.FlagsAttribute";

/// Short attribute name marking side-effect free members
pub const PURE_ATTRIBUTE: &str = "PureAttribute";

/// Metadata names the compiler gives to user-defined operators
pub const OPERATOR_NAMES: &[&str] = &[
    "op_Implicit",
    "op_Explicit",
    "op_Addition",
    "op_Subtraction",
    "op_Multiply",
    "op_Division",
    "op_Modulus",
    "op_ExclusiveOr",
    "op_BitwiseAnd",
    "op_BitwiseOr",
    "op_LogicalAnd",
    "op_LogicalOr",
    "op_Assign",
    "op_LeftShift",
    "op_RightShift",
    "op_SignedRightShift",
    "op_UnsignedRightShift",
    "op_Equality",
    "op_GreaterThan",
    "op_LessThan",
    "op_Inequality",
    "op_GreaterThanOrEqual",
    "op_LessThanOrEqual",
    "op_MultiplicationAssignment",
    "op_SubtractionAssignment",
    "op_ExclusiveOrAssignment",
    "op_LeftShiftAssignment",
    "op_ModulusAssignment",
    "op_AdditionAssignment",
    "op_BitwiseAndAssignment",
    "op_BitwiseOrAssignment",
    "op_Comma",
    "op_DivisionAssignment",
    "op_Decrement",
    "op_Increment",
    "op_UnaryNegation",
    "op_UnaryPlus",
    "op_OnesComplement",
    "op_True",
    "op_False",
];

/// Conversion operators are distinguished by return type as well as parameters
pub const CONVERSION_OPERATOR_NAMES: &[&str] = &["op_Implicit", "op_Explicit"];

/// A namespace and the top-level types it contains
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamespaceDef {
    /// Dotted namespace name; empty for the global namespace
    pub name: String,
    /// Top-level types declared in this namespace
    #[serde(default)]
    pub types: Vec<TypeId>,
}

/// A type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDef {
    /// Simple name without any arity suffix
    pub name: String,
    /// Namespace of the outermost declaring type
    pub namespace: String,
    pub kind: TypeKind,
    /// Enclosing type for nested types
    #[serde(default)]
    pub declaring_type: Option<TypeId>,
    /// All generic parameter names, including those re-declared from enclosing types
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    #[serde(default)]
    pub base_type: Option<TypeRef>,
    /// Directly implemented interfaces, in declared order
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
    /// Full names of applied custom attributes
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub nested_types: Vec<TypeId>,
    #[serde(default)]
    pub methods: Vec<MethodId>,
    #[serde(default)]
    pub fields: Vec<FieldId>,
    #[serde(default)]
    pub properties: Vec<PropertyId>,
    #[serde(default)]
    pub events: Vec<EventId>,
}

impl TypeDef {
    /// Create an empty type definition
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind,
            declaring_type: None,
            generic_parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            visibility: Visibility::Public,
            is_abstract: false,
            is_sealed: false,
            attributes: Vec::new(),
            nested_types: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Static classes are emitted as abstract and sealed
    pub fn is_static(&self) -> bool {
        self.is_abstract && self.is_sealed
    }

    pub fn is_delegate(&self) -> bool {
        self.kind == TypeKind::Delegate
    }

    pub fn has_flags_attribute(&self) -> bool {
        has_attribute_full_name(&self.attributes, FLAGS_ATTRIBUTE)
    }
}

/// A method or constructor parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDef {
    pub name: String,
    /// Parameter type; by-reference parameters use [`TypeRef::ByRef`]
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_out: bool,
}

impl ParameterDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_out: false,
        }
    }

    /// An `out` parameter, always passed by reference
    pub fn out(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: ty.by_ref(),
            is_out: true,
        }
    }

    pub fn is_by_ref(&self) -> bool {
        matches!(self.ty, TypeRef::ByRef(_))
    }
}

/// A method, constructor, operator or accessor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDef {
    /// Metadata name: `.ctor`, `.cctor`, `op_Addition`, or a plain name
    pub name: String,
    pub declaring_type: TypeId,
    /// Generic parameters introduced by the method itself
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
    /// `None` for void methods and constructors
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl MethodDef {
    /// Create a public instance method; the builder assigns the declaring type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_type: TypeId(0),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            is_override: false,
            attributes: Vec::new(),
        }
    }

    /// Create an instance constructor
    pub fn constructor() -> Self {
        Self::new(".ctor")
    }

    /// Create a static constructor
    pub fn static_constructor() -> Self {
        Self::new(".cctor").with_static().with_visibility(Visibility::Private)
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(ParameterDef::new(name, ty));
        self
    }

    #[must_use]
    pub fn with_out_parameter(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(ParameterDef::out(name, ty));
        self
    }

    #[must_use]
    pub fn with_generic_parameter(mut self, name: impl Into<String>) -> Self {
        self.generic_parameters.push(name.into());
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn with_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    #[must_use]
    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self.is_virtual = true;
        self
    }

    #[must_use]
    pub fn with_override(mut self) -> Self {
        self.is_virtual = true;
        self.is_override = true;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.name == ".ctor" || self.name == ".cctor"
    }

    pub fn is_static_constructor(&self) -> bool {
        self.name == ".cctor"
    }

    /// Operators are static methods carrying one of the reserved operator names
    pub fn is_operator_overload(&self) -> bool {
        self.is_static && OPERATOR_NAMES.contains(&self.name.as_str())
    }

    pub fn is_conversion_operator(&self) -> bool {
        self.is_static && CONVERSION_OPERATOR_NAMES.contains(&self.name.as_str())
    }

    pub fn is_finalizer(&self) -> bool {
        !self.is_static && self.parameters.is_empty() && self.name == "Finalize"
    }

    pub fn is_extension_method(&self) -> bool {
        !self.parameters.is_empty() && has_attribute_full_name(&self.attributes, EXTENSION_ATTRIBUTE)
    }

    pub fn has_pure_attribute(&self) -> bool {
        has_attribute_short_name(&self.attributes, PURE_ATTRIBUTE)
    }
}

/// A field or constant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub declaring_type: TypeId,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    /// Compile-time constant
    #[serde(default)]
    pub is_literal: bool,
    /// Read-only after construction
    #[serde(default)]
    pub is_init_only: bool,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            declaring_type: TypeId(0),
            ty,
            visibility: Visibility::Public,
            is_static: false,
            is_literal: false,
            is_init_only: false,
            attributes: Vec::new(),
        }
    }

    /// A `const` field; constants are implicitly static
    #[must_use]
    pub fn with_literal(mut self) -> Self {
        self.is_literal = true;
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn with_init_only(mut self) -> Self {
        self.is_init_only = true;
        self
    }
}

/// A property or indexer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub declaring_type: TypeId,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Index parameters; empty for ordinary properties
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
    #[serde(default)]
    pub has_getter: bool,
    #[serde(default)]
    pub has_setter: bool,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl PropertyDef {
    /// Create a public read-write property
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            declaring_type: TypeId(0),
            ty,
            parameters: Vec::new(),
            has_getter: true,
            has_setter: true,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            is_override: false,
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(ParameterDef::new(name, ty));
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.has_setter = false;
        self
    }

    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn with_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    #[must_use]
    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self.is_virtual = true;
        self
    }

    #[must_use]
    pub fn with_override(mut self) -> Self {
        self.is_virtual = true;
        self.is_override = true;
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn is_indexer(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// The default indexer, displayed with square brackets
    pub fn is_item_indexer(&self) -> bool {
        self.name == "Item" && self.is_indexer()
    }

    pub fn has_pure_attribute(&self) -> bool {
        has_attribute_short_name(&self.attributes, PURE_ATTRIBUTE)
    }
}

/// An event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDef {
    pub name: String,
    pub declaring_type: TypeId,
    /// The delegate type of the event
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl EventDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            declaring_type: TypeId(0),
            ty,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            is_override: false,
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn with_override(mut self) -> Self {
        self.is_virtual = true;
        self.is_override = true;
        self
    }
}

fn has_attribute_full_name(attributes: &[String], full_name: &str) -> bool {
    attributes.iter().any(|a| a == full_name)
}

fn has_attribute_short_name(attributes: &[String], short_name: &str) -> bool {
    attributes
        .iter()
        .any(|a| a.rsplit('.').next().is_some_and(|short| short == short_name))
}
