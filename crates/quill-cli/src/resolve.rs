//! Implementation of the `quill resolve` command.

use anyhow::{Context, Result};

use quill_core::codedoc::{DetailLevel, Member};
use quill_core::cref::CRef;

use crate::project::Project;

/// Options for resolving a cref.
#[derive(Debug)]
pub struct ResolveOptions {
    pub cref: String,
    pub minimum: bool,
}

/// Resolve a cref and print the member model as JSON.
pub fn resolve(project: &Project, options: &ResolveOptions) -> Result<()> {
    let member = resolve_member(project, options)?;
    println!("{}", serde_json::to_string_pretty(&member)?);
    Ok(())
}

/// Resolve a cref to its member model.
pub fn resolve_member(project: &Project, options: &ResolveOptions) -> Result<Member> {
    let cref = CRef::parse(&options.cref)
        .with_context(|| format!("Failed to parse `{}`", options.cref))?;
    let detail = if options.minimum {
        DetailLevel::Minimum
    } else {
        DetailLevel::Full
    };
    project
        .context(detail)
        .search(&cref)
        .ok_or_else(|| anyhow::anyhow!("`{cref}` was not found in any repository"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::codedoc::GraphRepository;
    use quill_core::testutil::{system_library, test_library};

    fn project() -> Project {
        Project::from_repositories(vec![
            GraphRepository::new(test_library()),
            GraphRepository::new(system_library()),
        ])
    }

    #[test]
    fn resolves_across_repositories() {
        let project = project();
        let options = ResolveOptions {
            cref: "T:System.Object".to_string(),
            minimum: true,
        };
        let member = resolve_member(&project, &options).unwrap();
        assert_eq!(member.core().repository, "mscorlib");
        assert_eq!(member.detail(), DetailLevel::Minimum);
    }

    #[test]
    fn unknown_cref_is_an_error() {
        let project = project();
        let options = ResolveOptions {
            cref: "T:Nowhere.Thing".to_string(),
            minimum: false,
        };
        let err = resolve_member(&project, &options).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn malformed_cref_is_an_error() {
        let project = project();
        let options = ResolveOptions {
            cref: "T:Broken{".to_string(),
            minimum: false,
        };
        assert!(resolve_member(&project, &options).is_err());
    }
}
