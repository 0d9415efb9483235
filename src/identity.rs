//! # Operator Identity Cache
//!
//! Version strings for dirty working trees embed the invoking operator's
//! username so that two developers building the same dirty tree get
//! distinguishable tags. The underlying username lookup is performed at
//! most once per cache, and every caller - concurrent or sequential -
//! observes the same outcome.
//!
//! The cache is an explicit, injectable component rather than a process
//! global: production code shares one [`IdentityCache`] per invocation,
//! while tests construct their own with a counting or failing
//! [`UsernameLookup`] double. Errors are sticky - once the lookup fails,
//! every subsequent call returns the same cached error without retrying.
//!
//! The raw username is sanitized to `[A-Za-z0-9]` before caching, since it
//! ends up inside container image tags.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// The host identity collaborator consumed by the cache.
pub trait UsernameLookup: Send + Sync {
    /// Return the raw, unsanitized OS username of the invoking operator.
    fn os_username(&self) -> Result<String>;
}

/// Production lookup backed by the process environment.
///
/// Checks `USER` (Unix convention) then `USERNAME` (Windows convention).
#[derive(Debug, Default)]
pub struct EnvUsername;

impl UsernameLookup for EnvUsername {
    fn os_username(&self) -> Result<String> {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .map_err(|_| Error::Identity {
                message: "no USER or USERNAME in environment".to_string(),
            })
    }
}

/// Compute-once cache of the sanitized operator username.
pub struct IdentityCache {
    lookup: Box<dyn UsernameLookup>,
    // Cached as Result<String, String> so the sticky error stays cloneable
    cached: OnceLock<std::result::Result<String, String>>,
}

impl IdentityCache {
    /// Create a cache backed by the process environment.
    pub fn new() -> Self {
        Self::with_lookup(Box::new(EnvUsername))
    }

    /// Create a cache backed by a caller-supplied lookup.
    pub fn with_lookup(lookup: Box<dyn UsernameLookup>) -> Self {
        IdentityCache {
            lookup,
            cached: OnceLock::new(),
        }
    }

    /// Return the sanitized username, performing the lookup on first call.
    ///
    /// `OnceLock` guarantees exactly one execution of the lookup even under
    /// concurrent first access; all callers observe the same value or the
    /// same error.
    pub fn identity(&self) -> Result<String> {
        let outcome = self.cached.get_or_init(|| {
            self.lookup
                .os_username()
                .and_then(|raw| sanitize(&raw))
                .map_err(|e| e.to_string())
        });

        match outcome {
            Ok(name) => Ok(name.clone()),
            Err(message) => Err(Error::Identity {
                message: message.clone(),
            }),
        }
    }
}

impl Default for IdentityCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip every character outside `[A-Za-z0-9]`.
fn sanitize(raw: &str) -> Result<String> {
    let pattern = Regex::new("[^A-Za-z0-9]+").map_err(|e| Error::Identity {
        message: format!("sanitizer pattern failed to compile: {}", e),
    })?;
    Ok(pattern.replace_all(raw, "").into_owned())
}
