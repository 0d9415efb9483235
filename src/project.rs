//! # Project Loading and Identity Assembly
//!
//! [`Project::load`] turns a project directory into a buildable identity:
//!
//! 1. Locate the `tagver.yml` descriptor; absence is not an error.
//! 2. Parse it. Read or parse failures are logged and the project proceeds
//!    with an empty configuration - a deliberately lenient path, unlike the
//!    fatal VCS and template failures below.
//! 3. Default the name to the directory's base name.
//! 4. Merge inherited defaults, field by field.
//! 5. Gate on buildability: without a recognized build recipe the project
//!    is returned as-is, fully usable but not buildable, and no VCS work is
//!    performed.
//! 6. Compute the version-relevant path set: the project directory, the
//!    context directory when distinct, and each declared dependency.
//! 7. Resolve the version over that path set.
//! 8. Render the tag, applying the template override and version prefix.
//! 9. Assemble repository, image, and fully-qualified image names.
//!
//! Steps 7-9 are fatal and abort the load; a failure there aborts only the
//! failing project, not sibling projects resolved in the same run.

use std::path::{Path, PathBuf};

use crate::config::{ProjectConfig, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use crate::identity::IdentityCache;
use crate::vcs::VcsAdapter;
use crate::version::GitVersion;

/// Recognized build recipe file names; presence gates buildability.
/// Contents are never parsed by this crate.
pub const BUILD_RECIPES: &[&str] = &["Dockerfile", "Containerfile"];

/// Shared collaborators for resolving projects within one invocation.
///
/// One context - and therefore one identity cache - is shared by every
/// project resolved in a run, so all tags agree on the operator identity
/// after a single lookup.
pub struct ResolveContext<'a> {
    pub vcs: &'a dyn VcsAdapter,
    pub identity: &'a IdentityCache,
}

/// Runtime data about an active project.
///
/// Created once per project directory per invocation and never mutated
/// after `load` completes.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project directory.
    pub dir: PathBuf,

    /// Resolved configuration (descriptor merged with defaults).
    pub config: ProjectConfig,
    /// Whether a recognized build recipe exists at the project directory.
    pub can_build: bool,
    /// Resolved version record; `None` when the project is not buildable.
    pub version: Option<GitVersion>,
    /// Image repository name (image prefix + project name).
    pub repository: String,
    /// Computed version tag.
    pub tag: String,
    /// `repository:tag`.
    pub image: String,
    /// Registry prefix + image name.
    pub image_with_registry: String,
}

impl Project {
    /// Load a project from a directory, inheriting from `defaults`.
    pub fn load(
        dir: impl Into<PathBuf>,
        defaults: &ProjectConfig,
        ctx: &ResolveContext,
    ) -> Result<Project> {
        let dir = dir.into();

        let mut config = match read_descriptor(&dir) {
            Ok(config) => config,
            Err(error) => {
                // Lenient by design: a broken descriptor degrades to
                // defaults instead of failing the project
                log::warn!("{}", error);
                ProjectConfig::default()
            }
        };

        if config.name.is_none() {
            config.name = dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
        }

        config.merge_defaults(defaults)?;

        let can_build = BUILD_RECIPES
            .iter()
            .any(|recipe| dir.join(recipe).exists());
        if !can_build {
            return Ok(Project {
                dir,
                config,
                can_build: false,
                version: None,
                repository: String::new(),
                tag: String::new(),
                image: String::new(),
                image_with_registry: String::new(),
            });
        }

        let paths = versioned_paths(&dir, &config);
        let version = GitVersion::resolve(ctx.vcs, ctx.identity, &paths)?;

        let mut tag = match config.version_template.as_deref() {
            Some(template) => version.format(template)?,
            None => version.default_format()?,
        };
        if let Some(prefix) = config.version_prefix.as_deref() {
            tag = format!("{}{}", prefix, tag);
        }

        let name = config.name.as_deref().unwrap_or_default();
        let repository = format!("{}{}", config.image_prefix.as_deref().unwrap_or(""), name);
        let image = format!("{}:{}", repository, tag);
        let registry_prefix = config
            .registry
            .as_ref()
            .map(|registry| registry.prefix())
            .unwrap_or_default();
        let image_with_registry = format!("{}{}", registry_prefix, image);

        Ok(Project {
            dir,
            config,
            can_build: true,
            version: Some(version),
            repository,
            tag,
            image,
            image_with_registry,
        })
    }

    /// All directories factored into this project's version computation.
    pub fn versioned_paths(&self) -> Vec<PathBuf> {
        versioned_paths(&self.dir, &self.config)
    }

    /// Absolute path of the build context directory.
    pub fn context_dir(&self) -> PathBuf {
        match self.config.context_dir.as_deref() {
            Some(context) if !context.is_empty() => self.dir.join(context),
            _ => self.dir.clone(),
        }
    }
}

/// Read the project descriptor, treating absence as an empty configuration.
fn read_descriptor(dir: &Path) -> Result<ProjectConfig> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        log::debug!("no descriptor at {}", path.display());
        return Ok(ProjectConfig::default());
    }
    ProjectConfig::from_file(&path).map_err(|error| Error::ConfigParse {
        path: path.display().to_string(),
        message: error.to_string(),
    })
}

/// All directories factored into the version computation: the project
/// directory, the context directory when distinct, and every declared
/// dependency resolved relative to the project directory.
///
/// Order is stable for debuggability; correctness does not depend on it.
fn versioned_paths(dir: &Path, config: &ProjectConfig) -> Vec<PathBuf> {
    let mut paths = vec![dir.to_path_buf()];

    if let Some(context) = config.context_dir.as_deref() {
        if !context.is_empty() {
            let context_dir = dir.join(context);
            if context_dir != dir {
                paths.push(context_dir);
            }
        }
    }

    if let Some(dependencies) = config.depends_on.as_deref() {
        for dependency in dependencies {
            paths.push(dir.join(dependency));
        }
    }

    paths
}
