//! Member models and the repositories that produce them
//!
//! A [`MemberRepository`] answers cref lookups with [`Member`] models at a
//! requested [`DetailLevel`]. References that leave a repository, such as a
//! base type defined in a framework library, are resolved through a
//! [`SearchContext`] over the other repositories.

mod builder;
mod model;
mod repository;
mod search;

pub use model::{
    DelegateDetails, DelegateModel, DetailLevel, EventDetails, EventModel, ExceptionModel,
    FieldDetails, FieldModel, GenericParameterModel, Member, MemberCore, MemberDocs,
    MethodDetails, MethodModel, NamespaceDetails, NamespaceModel, ParameterModel,
    PropertyDetails, PropertyModel, ReturnModel, TypeDetails, TypeModel, TypeReference,
};
pub use repository::{GraphRepository, MemberRepository, RepositoryId};
pub use search::SearchContext;
