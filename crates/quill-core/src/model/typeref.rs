//! References to types from member signatures

use serde::{Deserialize, Serialize};

use super::TypeId;

/// A type as it appears in a signature, base list or generic argument
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// A type defined in the same graph
    Defined(TypeId),
    /// A type defined in some other library
    External {
        namespace: String,
        /// Simple name; nested external types use a dotted path
        name: String,
        /// Generic parameter count of the innermost segment
        #[serde(default)]
        arity: usize,
    },
    /// A constructed generic type such as `List<int>`
    Instance {
        definition: Box<TypeRef>,
        arguments: Vec<TypeRef>,
    },
    /// A generic parameter of the declaring type, by position in its full list
    TypeParameter { position: usize, name: String },
    /// A generic parameter of the declaring method
    MethodParameter { position: usize, name: String },
    Array { element: Box<TypeRef>, rank: u32 },
    Pointer(Box<TypeRef>),
    ByRef(Box<TypeRef>),
}

impl TypeRef {
    /// A non-generic type from another library
    pub fn external(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef::External {
            namespace: namespace.into(),
            name: name.into(),
            arity: 0,
        }
    }

    /// A generic type definition from another library
    pub fn external_generic(
        namespace: impl Into<String>,
        name: impl Into<String>,
        arity: usize,
    ) -> Self {
        TypeRef::External {
            namespace: namespace.into(),
            name: name.into(),
            arity,
        }
    }

    /// Shorthand for a type in the `System` namespace
    pub fn system(name: &str) -> Self {
        Self::external("System", name)
    }

    pub fn type_parameter(position: usize, name: impl Into<String>) -> Self {
        TypeRef::TypeParameter {
            position,
            name: name.into(),
        }
    }

    pub fn method_parameter(position: usize, name: impl Into<String>) -> Self {
        TypeRef::MethodParameter {
            position,
            name: name.into(),
        }
    }

    /// Instantiate this generic definition with the given arguments
    #[must_use]
    pub fn instance(self, arguments: Vec<TypeRef>) -> Self {
        TypeRef::Instance {
            definition: Box::new(self),
            arguments,
        }
    }

    /// Single-dimension array of this type
    #[must_use]
    pub fn array(self) -> Self {
        self.array_of_rank(1)
    }

    #[must_use]
    pub fn array_of_rank(self, rank: u32) -> Self {
        TypeRef::Array {
            element: Box::new(self),
            rank: rank.max(1),
        }
    }

    #[must_use]
    pub fn pointer(self) -> Self {
        TypeRef::Pointer(Box::new(self))
    }

    #[must_use]
    pub fn by_ref(self) -> Self {
        TypeRef::ByRef(Box::new(self))
    }

    /// The generic definition behind an instance, or the type itself
    pub fn definition(&self) -> &TypeRef {
        match self {
            TypeRef::Instance { definition, .. } => definition.definition(),
            other => other,
        }
    }

    /// Generic arguments of a constructed type; empty for anything else
    pub fn arguments(&self) -> &[TypeRef] {
        match self {
            TypeRef::Instance { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// Replace declaring-type parameters with `arguments` by position
    ///
    /// Parameters past the end of `arguments` and method parameters are kept.
    #[must_use]
    pub fn substitute(&self, arguments: &[TypeRef]) -> TypeRef {
        match self {
            TypeRef::TypeParameter { position, .. } => arguments
                .get(*position)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeRef::Instance { definition, arguments: inner } => TypeRef::Instance {
                definition: definition.clone(),
                arguments: inner.iter().map(|arg| arg.substitute(arguments)).collect(),
            },
            TypeRef::Array { element, rank } => TypeRef::Array {
                element: Box::new(element.substitute(arguments)),
                rank: *rank,
            },
            TypeRef::Pointer(element) => TypeRef::Pointer(Box::new(element.substitute(arguments))),
            TypeRef::ByRef(element) => TypeRef::ByRef(Box::new(element.substitute(arguments))),
            other => other.clone(),
        }
    }

    /// Strip array, pointer and by-ref wrappers
    pub fn element(&self) -> &TypeRef {
        match self {
            TypeRef::Array { element, .. } | TypeRef::Pointer(element) | TypeRef::ByRef(element) => {
                element.element()
            }
            other => other,
        }
    }

    pub fn is_generic_parameter(&self) -> bool {
        matches!(
            self,
            TypeRef::TypeParameter { .. } | TypeRef::MethodParameter { .. }
        )
    }
}
