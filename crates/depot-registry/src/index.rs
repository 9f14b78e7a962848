//! Registry index: repositories, artifacts, and reference resolution.
//!
//! The index is the in-memory mirror of the persisted registry
//! document. Repositories keep insertion order; so do the artifacts
//! within them and the tags within an artifact.
//!
//! Reference resolution is deliberately tri-state: a content-id
//! fragment that matches more than one artifact is reported as
//! ambiguous, never resolved by picking one.

use serde::{Deserialize, Serialize};

use depot_core::PackageName;

/// The whole registry document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    /// Ordered repository records.
    pub repositories: Vec<Repository>,
}

/// A repository: the tag namespace for artifacts sharing one
/// fully-qualified name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Fully-qualified repository name (unique key, no tag).
    pub repository: String,
    /// Ordered artifact records.
    pub artifacts: Vec<Artifact>,
}

/// One versioned build output tracked by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Content identifier, `sha256:<hex>` of the seal. Immutable.
    pub id: String,
    /// Type of application in the artifact.
    #[serde(rename = "type")]
    pub kind: String,
    /// Backing-file base name, locally generated, distinct from the id.
    pub file_ref: String,
    /// Ordered tags; deduplicated by construction.
    pub tags: Vec<String>,
    /// Size label, carried verbatim from the seal.
    pub size: String,
    /// Creation-time label, carried verbatim from the seal.
    pub created: String,
}

/// Outcome of resolving a reference to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoLookup {
    /// Index of the matching repository.
    Found(usize),
    NotFound,
    /// The id fragment matched this many artifacts.
    Ambiguous(usize),
}

/// Outcome of resolving a reference to an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactLookup {
    /// (repository index, artifact index) of the match.
    Found(usize, usize),
    NotFound,
    /// The id fragment matched this many artifacts.
    Ambiguous(usize),
}

impl Artifact {
    /// Characters 7..19 of the content id: the twelve hex digits after
    /// the `sha256:` prefix. Ids too short to slice render whole, so a
    /// hand-edited index never panics a listing.
    pub fn short_id(&self) -> &str {
        self.id.get(7..19).unwrap_or(&self.id)
    }

    /// Whether this artifact carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Append a tag unless already present. Returns whether the tag
    /// was added; keeps the tag list duplicate-free.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove a tag. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() < before
    }

    /// Whether this artifact has no tags left.
    pub fn is_dangling(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Registry {
    /// Resolve a reference to a repository.
    ///
    /// Exact fully-qualified match first; else a substring scan of
    /// every artifact id for the reference's bare name fragment.
    pub fn find_repository(&self, name: &PackageName) -> RepoLookup {
        let fqn = name.repository();
        if let Some(ix) = self.repositories.iter().position(|r| r.repository == fqn) {
            return RepoLookup::Found(ix);
        }

        let mut matched_repo = None;
        let mut count = 0;
        for (rx, repo) in self.repositories.iter().enumerate() {
            for artifact in &repo.artifacts {
                if artifact.id.contains(&name.name) {
                    matched_repo = Some(rx);
                    count += 1;
                }
            }
        }
        match count {
            0 => RepoLookup::NotFound,
            1 => RepoLookup::Found(matched_repo.expect("one match recorded")),
            n => RepoLookup::Ambiguous(n),
        }
    }

    /// Resolve a reference to an artifact.
    ///
    /// A repository matched by name is searched by tag only, with no
    /// substring fallback inside it. Otherwise the reference's bare
    /// name fragment is matched as a substring against every artifact
    /// id in the registry.
    pub fn find_artifact(&self, name: &PackageName) -> ArtifactLookup {
        let fqn = name.repository();
        if let Some(rx) = self.repositories.iter().position(|r| r.repository == fqn) {
            let repo = &self.repositories[rx];
            return match repo.artifacts.iter().position(|a| a.has_tag(&name.tag)) {
                Some(ax) => ArtifactLookup::Found(rx, ax),
                None => ArtifactLookup::NotFound,
            };
        }

        let mut matched = None;
        let mut count = 0;
        for (rx, repo) in self.repositories.iter().enumerate() {
            for (ax, artifact) in repo.artifacts.iter().enumerate() {
                if artifact.id.contains(&name.name) {
                    matched = Some((rx, ax));
                    count += 1;
                }
            }
        }
        match count {
            0 => ArtifactLookup::NotFound,
            1 => {
                let (rx, ax) = matched.expect("one match recorded");
                ArtifactLookup::Found(rx, ax)
            }
            n => ArtifactLookup::Ambiguous(n),
        }
    }

    /// All artifacts of the repository matched by exact fully-qualified
    /// name. Empty when no repository matches.
    pub fn artifacts_by_name(&self, name: &PackageName) -> Vec<&Artifact> {
        let fqn = name.repository();
        self.repositories
            .iter()
            .find(|r| r.repository == fqn)
            .map(|r| r.artifacts.iter().collect())
            .unwrap_or_default()
    }

    /// Whether any repository holds an artifact with the given id.
    pub fn contains_id(&self, id: &str) -> bool {
        self.repositories
            .iter()
            .any(|r| r.artifacts.iter().any(|a| a.id == id))
    }

    /// Index of the repository with the given fully-qualified name,
    /// creating an empty record if absent.
    pub fn ensure_repository(&mut self, fqn: &str) -> usize {
        if let Some(ix) = self.repositories.iter().position(|r| r.repository == fqn) {
            return ix;
        }
        self.repositories.push(Repository {
            repository: fqn.to_string(),
            artifacts: Vec::new(),
        });
        self.repositories.len() - 1
    }

    /// Drop the repository with the given fully-qualified name, if any.
    pub fn remove_repository(&mut self, fqn: &str) {
        self.repositories.retain(|r| r.repository != fqn);
    }
}
