//! Structured form of a parsed cref

use std::fmt;

use serde::Serialize;

use super::CRefKind;

/// One dotted segment of a name path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameSegment {
    /// Segment name with `#` decoded back to `.`
    pub name: String,
    /// Generic arity from a `` `N `` marker
    pub arity: usize,
    /// Generic arguments from a `{...}` list
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeSpec>,
}

impl NameSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arity: 0,
            arguments: Vec::new(),
        }
    }

    /// A segment that could be part of a namespace
    pub fn is_plain(&self) -> bool {
        self.arity == 0 && self.arguments.is_empty()
    }
}

impl fmt::Display for NameSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.replace('.', "#"))?;
        if self.arity > 0 {
            write!(f, "`{}", self.arity)?;
        }
        if !self.arguments.is_empty() {
            f.write_str("{")?;
            write_list(f, &self.arguments)?;
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// A type as written inside a parameter list, argument list or return suffix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSpec {
    /// A dotted type name, possibly with arity markers and generic arguments
    Named(Vec<NameSegment>),
    /// `` `i ``: generic parameter i of the declaring type
    TypeParameter(usize),
    /// `` ``i ``: generic parameter i of the declaring method
    MethodParameter(usize),
    Array { element: Box<TypeSpec>, rank: u32 },
    Pointer(Box<TypeSpec>),
    ByRef(Box<TypeSpec>),
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Named(segments) => write_path(f, segments),
            TypeSpec::TypeParameter(position) => write!(f, "`{position}"),
            TypeSpec::MethodParameter(position) => write!(f, "``{position}"),
            TypeSpec::Array { element, rank } => {
                write!(f, "{element}{}", array_suffix(*rank))
            }
            TypeSpec::Pointer(element) => write!(f, "{element}*"),
            TypeSpec::ByRef(element) => write!(f, "{element}@"),
        }
    }
}

/// `[]` for single-dimension arrays, `[0:,0:]` for higher ranks
pub(crate) fn array_suffix(rank: u32) -> String {
    if rank <= 1 {
        return "[]".to_string();
    }
    let bounds = vec!["0:"; rank as usize];
    format!("[{}]", bounds.join(","))
}

fn write_path(f: &mut fmt::Formatter<'_>, segments: &[NameSegment]) -> fmt::Result {
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            f.write_str(".")?;
        }
        write!(f, "{segment}")?;
    }
    Ok(())
}

fn write_list(f: &mut fmt::Formatter<'_>, specs: &[TypeSpec]) -> fmt::Result {
    for (i, spec) in specs.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{spec}")?;
    }
    Ok(())
}

/// The structural query recovered from a cref
///
/// Parsing never touches a symbol graph; [`crate::model::SymbolGraph::resolve`]
/// consumes the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolQuery {
    pub kind: CRefKind,
    /// Dotted path; for members the last segment is the member name
    pub path: Vec<NameSegment>,
    /// Method generic arity from a `` ``N `` marker on the member name
    pub method_arity: usize,
    /// Parameter list; `None` when the cref carries no parentheses
    pub parameters: Option<Vec<TypeSpec>>,
    /// Return type after `~`, used by conversion operators
    pub return_type: Option<TypeSpec>,
}

impl SymbolQuery {
    /// The path segments naming the declaring type of a member
    pub fn type_path(&self) -> &[NameSegment] {
        match self.kind {
            CRefKind::Namespace | CRefKind::Type => &self.path,
            _ => self.path.split_last().map_or(&[], |(_, rest)| rest),
        }
    }

    /// The member segment for member kinds
    pub fn member(&self) -> Option<&NameSegment> {
        match self.kind {
            CRefKind::Namespace | CRefKind::Type => None,
            _ => self.path.last(),
        }
    }

    /// Dotted namespace name for namespace queries
    pub fn namespace_name(&self) -> String {
        self.path
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Parameter specs, treating a missing list as empty
    pub fn parameter_specs(&self) -> &[TypeSpec] {
        self.parameters.as_deref().unwrap_or(&[])
    }
}

impl fmt::Display for SymbolQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.kind.prefix())?;
        write_path(f, &self.path)?;
        if self.method_arity > 0 {
            write!(f, "``{}", self.method_arity)?;
        }
        if let Some(parameters) = &self.parameters {
            f.write_str("(")?;
            write_list(f, parameters)?;
            f.write_str(")")?;
        }
        if let Some(ret) = &self.return_type {
            write!(f, "~{ret}")?;
        }
        Ok(())
    }
}
