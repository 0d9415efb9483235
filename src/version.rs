//! # Version Resolution
//!
//! This module produces the immutable [`GitVersion`] record - the unit of
//! "what changed" for a project. A record aggregates version-control facts
//! scoped to a path set (the project directory plus its declared
//! dependencies) together with the cached operator identity:
//!
//! 1. **Branch**: the current branch name.
//! 2. **Commits**: the count of commits touching any path in the set, used
//!    as a monotonic build counter. A project's counter advances only on
//!    changes relevant to it, not on every repository commit.
//! 3. **Hash**: the abbreviated identifier of the most recent commit
//!    touching the set, so two projects sharing a monorepo get different
//!    identifiers when touched by different commits.
//! 4. **Dirty**: whether any path in the set has uncommitted modifications.
//! 5. **User**: the sanitized operator username from the identity cache.
//!
//! Determinism is the core correctness property: two resolutions over
//! identical VCS state and identity value are byte-identical, which is what
//! makes the derived image tags safe to use as registry cache keys.

use std::path::PathBuf;

use crate::error::Result;
use crate::identity::IdentityCache;
use crate::template;
use crate::vcs::{dedup_paths, VcsAdapter};

/// Default template for formatting a version into a tag string.
pub const DEFAULT_TEMPLATE: &str =
    "{{if .Dirty}}dirty-{{.User}}-{{end}}{{.Commits}}.{{.Hash}}";

/// Version information about one or more project path sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitVersion {
    /// Current branch name (or detached-head indicator).
    pub branch: String,
    /// Count of commits touching the resolved path set.
    pub commits: String,
    /// Abbreviated identifier of the newest commit touching the set.
    pub hash: String,
    /// True when any resolved path has uncommitted modifications.
    pub dirty: bool,
    /// Sanitized operator username, shared process-wide.
    pub user: String,
}

impl GitVersion {
    /// Resolve the version record for a set of paths.
    ///
    /// Duplicate input paths are tolerated: the set is deduplicated before
    /// and after adapter-side resolution, so nothing is double-counted.
    /// Any adapter failure is fatal and propagated unchanged; VCS state is
    /// not transient, so there are no retries.
    pub fn resolve(
        vcs: &dyn VcsAdapter,
        identity: &IdentityCache,
        paths: &[PathBuf],
    ) -> Result<Self> {
        let paths = dedup_paths(paths);
        let paths = vcs.resolve_paths(&paths)?;

        let branch = vcs.current_branch()?;
        let commits = vcs.commit_depth(&paths)?;
        let revision = vcs.head_revision(&paths)?;
        let hash = vcs.abbreviate(&revision)?;
        let dirty = vcs.is_dirty(&paths)?;
        let user = identity.identity()?;

        Ok(GitVersion {
            branch,
            commits,
            hash,
            dirty,
            user,
        })
    }

    /// Render this version through a template string.
    pub fn format(&self, template: &str) -> Result<String> {
        template::render(self, template)
    }

    /// Render this version through the built-in default template.
    ///
    /// Still fallible: formatting problems surface as errors rather than
    /// terminating the process.
    pub fn default_format(&self) -> Result<String> {
        self.format(DEFAULT_TEMPLATE)
    }
}
