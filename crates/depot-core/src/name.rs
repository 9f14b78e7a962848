//! Artifact reference parsing.
//!
//! A reference has up to three `/`-separated fragments and an optional
//! tag: `domain/group/name:tag`. Shorter forms (`name`, `group/name`)
//! are accepted; a missing tag defaults to `latest`. The bare `name`
//! fragment doubles as a content-id hint for substring addressing.

use serde::{Deserialize, Serialize};

/// The tag assumed when a reference carries none.
pub const DEFAULT_TAG: &str = "latest";

/// Errors from reference parsing.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    /// The reference string was empty.
    #[error("empty artifact reference")]
    Empty,

    /// A `/`-separated fragment was empty.
    #[error("empty fragment in reference '{reference}'")]
    EmptyFragment { reference: String },

    /// A trailing `:` with no tag after it.
    #[error("empty tag in reference '{reference}'")]
    EmptyTag { reference: String },

    /// More than `domain/group/name`.
    #[error("too many fragments in reference '{reference}' (at most domain/group/name)")]
    TooManyFragments { reference: String },
}

/// A parsed artifact reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageName {
    /// Registry domain, e.g. `registry.example.com`.
    pub domain: Option<String>,
    /// Group or organisation segment.
    pub group: Option<String>,
    /// The bare name fragment; also used as a content-id hint.
    pub name: String,
    /// The tag, `latest` if none was given.
    pub tag: String,
}

impl PackageName {
    /// Parse a raw reference string.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(NameError::Empty);
        }

        // a ':' inside a path fragment is a domain port, not a tag
        let (path, tag) = match raw.rsplit_once(':') {
            Some((path, tag)) if !tag.contains('/') => {
                if tag.is_empty() {
                    return Err(NameError::EmptyTag {
                        reference: raw.to_string(),
                    });
                }
                (path, tag.to_string())
            }
            _ => (raw, DEFAULT_TAG.to_string()),
        };

        let fragments: Vec<&str> = path.split('/').collect();
        if fragments.iter().any(|f| f.is_empty()) {
            return Err(NameError::EmptyFragment {
                reference: raw.to_string(),
            });
        }

        let (domain, group, name) = match fragments.as_slice() {
            [name] => (None, None, name.to_string()),
            [group, name] => (None, Some(group.to_string()), name.to_string()),
            [domain, group, name] => (
                Some(domain.to_string()),
                Some(group.to_string()),
                name.to_string(),
            ),
            _ => {
                return Err(NameError::TooManyFragments {
                    reference: raw.to_string(),
                })
            }
        };

        Ok(PackageName {
            domain,
            group,
            name,
            tag,
        })
    }

    /// The canonical fully-qualified repository name (no tag).
    pub fn repository(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(domain) = &self.domain {
            parts.push(domain.as_str());
        }
        if let Some(group) = &self.group {
            parts.push(group.as_str());
        }
        parts.push(self.name.as_str());
        parts.join("/")
    }

    /// Whether two references address the same repository.
    pub fn in_same_repository_as(&self, other: &PackageName) -> bool {
        self.repository() == other.repository()
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.repository(), self.tag)
    }
}
