//! The local registry store.
//!
//! Sole authority over artifact metadata: enforces the one-tag-one-
//! artifact invariant, owns the file-purge decision, and persists the
//! whole index document after every mutation.
//!
//! A backing blob/seal file pair may be referenced by artifacts in
//! several repositories (cross-repository tagging duplicates metadata,
//! never files). The pair is deleted only when the last referencing
//! artifact record is gone — except on the explicit id-fragment
//! removal path, which deletes unconditionally.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use depot_core::{artifact_id, PackageName, Seal, BLOB_EXT, INDEX_FILE, SEAL_EXT};

use crate::error::{RegistryError, Result};
use crate::index::{Artifact, ArtifactLookup, Registry, RepoLookup};
use crate::list::{self, ListRow};
use crate::persist::{IndexStore, JsonFileStore};
use crate::transport::{Credentials, RemoteTransport};

/// Outcome of one reference in a batch removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The artifact's tag (or record) was removed; carries the full
    /// content id.
    Removed { reference: String, id: String },
    /// The reference resolved to nothing; the batch continues.
    NotFound { reference: String },
}

/// The local artifact registry: an in-memory index mirrored to a
/// persisted document, plus the backing files in the registry root.
pub struct LocalRegistry {
    root: PathBuf,
    registry: Registry,
    store: Box<dyn IndexStore>,
}

impl LocalRegistry {
    /// Open (or initialize) the registry rooted at the given directory.
    pub fn open(root: PathBuf) -> Result<Self> {
        let store = JsonFileStore::new(root.join(INDEX_FILE));
        Self::with_store(root, Box::new(store))
    }

    /// Open the registry with an explicit index store.
    pub fn with_store(root: PathBuf, store: Box<dyn IndexStore>) -> Result<Self> {
        std::fs::create_dir_all(&root)?;
        let registry = match store.load()? {
            Some(registry) => registry,
            None => {
                // first use: materialize an empty index
                let registry = Registry::default();
                store.save(&registry)?;
                registry
            }
        };
        Ok(LocalRegistry {
            root,
            registry,
            store,
        })
    }

    /// The registry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read access to the index, for listings and tests.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn save(&self) -> Result<()> {
        debug!("updating local registry index");
        self.store.save(&self.registry)
    }

    fn blob_path(&self, file_ref: &str) -> PathBuf {
        self.root.join(format!("{file_ref}.{BLOB_EXT}"))
    }

    fn seal_path(&self, file_ref: &str) -> PathBuf {
        self.root.join(format!("{file_ref}.{SEAL_EXT}"))
    }

    /// Add a packaged artifact and its seal to the registry.
    ///
    /// The source blob must carry the packaging extension; it and the
    /// companion seal document next to it are relocated into the
    /// registry root under a freshly generated base name. If the
    /// target tag is already held by an artifact in the target
    /// repository, it is stolen from it first. Returns the new
    /// artifact's content id.
    pub fn add(&mut self, file: &Path, name: &PackageName, seal: &Seal) -> Result<String> {
        if file.extension().and_then(|e| e.to_str()) != Some(BLOB_EXT) {
            return Err(RegistryError::InvalidPackage {
                path: file.to_path_buf(),
                detail: format!("the registry only accepts .{BLOB_EXT} files"),
            });
        }
        let source_seal = file.with_extension(SEAL_EXT);

        info!(name = %name, "adding artifact to local registry");
        let file_ref = Uuid::new_v4().to_string();
        relocate(file, &self.blob_path(&file_ref))?;
        relocate(&source_seal, &self.seal_path(&file_ref))?;

        let id = self.register(name, seal, file_ref)?;
        self.save()?;
        Ok(id)
    }

    /// Shared tail of `add` and `pull`: steal the tag, create the
    /// repository if absent, append the artifact record. Does not
    /// persist.
    fn register(&mut self, name: &PackageName, seal: &Seal, file_ref: String) -> Result<String> {
        self.strip_tag(name)?;
        let id = artifact_id(seal);
        let rx = self.registry.ensure_repository(&name.repository());
        self.registry.repositories[rx].artifacts.push(Artifact {
            id: id.clone(),
            kind: seal.manifest.kind.clone(),
            file_ref,
            tags: vec![name.tag.clone()],
            size: seal.manifest.size.clone(),
            created: seal.manifest.created.clone(),
        });
        Ok(id)
    }

    /// Remove one tag from the artifact the reference resolves to,
    /// without persisting. Returns whether a tag was removed.
    fn strip_tag(&mut self, name: &PackageName) -> Result<bool> {
        match self.registry.find_artifact(name) {
            ArtifactLookup::Found(rx, ax) => {
                let removed = self.registry.repositories[rx].artifacts[ax].remove_tag(&name.tag);
                if removed {
                    info!(name = %name, "untagging");
                }
                Ok(removed)
            }
            ArtifactLookup::NotFound => Ok(false),
            ArtifactLookup::Ambiguous(count) => Err(RegistryError::Ambiguous {
                fragment: name.name.clone(),
                count,
            }),
        }
    }

    /// Remove one tag from one artifact and persist.
    pub fn untag(&mut self, name: &PackageName) -> Result<()> {
        if !self.strip_tag(name)? {
            return Err(RegistryError::NotFound {
                reference: name.to_string(),
            });
        }
        self.save()
    }

    /// Tag the source artifact with the target reference.
    ///
    /// Same repository: append-if-absent. Different repository: a
    /// taken target tag is a silent no-op (asymmetric with `add`'s
    /// steal, deliberately); otherwise the tag lands on the artifact
    /// already carrying the same content id, or on a fresh metadata
    /// copy of the source.
    pub fn tag(&mut self, source: &PackageName, target: &PackageName) -> Result<()> {
        let (src_rx, src_ax) = match self.registry.find_artifact(source) {
            ArtifactLookup::Found(rx, ax) => (rx, ax),
            ArtifactLookup::NotFound => {
                return Err(RegistryError::NotFound {
                    reference: source.to_string(),
                })
            }
            ArtifactLookup::Ambiguous(count) => {
                return Err(RegistryError::Ambiguous {
                    fragment: source.name.clone(),
                    count,
                })
            }
        };

        if target.in_same_repository_as(source) {
            let artifact = &mut self.registry.repositories[src_rx].artifacts[src_ax];
            if artifact.add_tag(&target.tag) {
                info!(source = %source, target = %target, "tagging");
                self.save()?;
            }
            return Ok(());
        }

        let source_artifact = self.registry.repositories[src_rx].artifacts[src_ax].clone();
        let fqn = target.repository();
        let rx = self.registry.ensure_repository(&fqn);

        if self.registry.repositories[rx]
            .artifacts
            .iter()
            .any(|a| a.has_tag(&target.tag))
        {
            // tag already taken in the target repository: leave it
            info!(target = %target, "already tagged");
            return Ok(());
        }

        if let Some(existing) = self.registry.repositories[rx]
            .artifacts
            .iter_mut()
            .find(|a| a.id == source_artifact.id)
        {
            existing.add_tag(&target.tag);
        } else {
            self.registry.repositories[rx].artifacts.push(Artifact {
                id: source_artifact.id.clone(),
                kind: source_artifact.kind.clone(),
                file_ref: source_artifact.file_ref.clone(),
                tags: vec![target.tag.clone()],
                size: source_artifact.size.clone(),
                created: source_artifact.created.clone(),
            });
        }
        info!(source = %source, target = %target, "tagging");
        self.save()
    }

    /// Remove each referenced artifact independently.
    ///
    /// A reference that resolves to nothing is a per-item outcome, not
    /// an error; ambiguity and I/O abort the batch.
    pub fn remove(&mut self, names: &[PackageName]) -> Result<Vec<RemoveOutcome>> {
        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            let (rx, ax) = match self.registry.find_artifact(name) {
                ArtifactLookup::Found(rx, ax) => (rx, ax),
                ArtifactLookup::NotFound => {
                    outcomes.push(RemoveOutcome::NotFound {
                        reference: name.to_string(),
                    });
                    continue;
                }
                ArtifactLookup::Ambiguous(count) => {
                    return Err(RegistryError::Ambiguous {
                        fragment: name.name.clone(),
                        count,
                    })
                }
            };

            let owning_repo = self.registry.repositories[rx].repository.clone();
            let artifact = self.registry.repositories[rx].artifacts[ax].clone();

            if self.registry.repositories[rx].artifacts[ax].remove_tag(&name.tag) {
                if self.registry.repositories[rx].artifacts[ax].is_dangling() {
                    self.registry.remove_repository(&owning_repo);
                    // delete the files only when no other repository
                    // still references the same content id
                    if !self.registry.contains_id(&artifact.id) {
                        self.remove_files(&artifact.file_ref)?;
                    }
                }
                self.save()?;
                info!(id = %artifact.id, "removed");
                outcomes.push(RemoveOutcome::Removed {
                    reference: name.to_string(),
                    id: artifact.id,
                });
            } else {
                // the tag was not actually present: fall back to
                // removal by id fragment, deleting files outright
                match self.registry.find_repository(name) {
                    RepoLookup::Found(rx) => {
                        self.registry.repositories[rx]
                            .artifacts
                            .retain(|a| !a.id.contains(&name.name));
                        self.remove_files(&artifact.file_ref)?;
                        self.save()?;
                        info!(id = %artifact.id, "removed");
                        outcomes.push(RemoveOutcome::Removed {
                            reference: name.to_string(),
                            id: artifact.id,
                        });
                    }
                    RepoLookup::NotFound => {
                        outcomes.push(RemoveOutcome::NotFound {
                            reference: name.to_string(),
                        });
                    }
                    RepoLookup::Ambiguous(count) => {
                        return Err(RegistryError::Ambiguous {
                            fragment: name.name.clone(),
                            count,
                        })
                    }
                }
            }
        }
        Ok(outcomes)
    }

    /// Clear the tag list of every artifact in the repository the
    /// reference names exactly; persists once. Records stay (dangling).
    pub fn purge_tags(&mut self, name: &PackageName) -> Result<()> {
        let fqn = name.repository();
        for repo in &mut self.registry.repositories {
            if repo.repository == fqn {
                for artifact in &mut repo.artifacts {
                    artifact.tags.clear();
                }
            }
        }
        self.save()
    }

    /// Rows for the tabular listing.
    pub fn list(&self) -> Vec<ListRow> {
        list::rows(&self.registry, Utc::now())
    }

    /// Short ids for the quiet listing, one per artifact.
    pub fn list_quiet(&self) -> Vec<String> {
        list::quiet_ids(&self.registry)
    }

    /// Upload an artifact's blob/seal pair to a remote registry.
    pub fn push(
        &self,
        name: &PackageName,
        transport: &dyn RemoteTransport,
        credentials: Option<&Credentials>,
    ) -> Result<String> {
        let artifact = match self.registry.find_artifact(name) {
            ArtifactLookup::Found(rx, ax) => &self.registry.repositories[rx].artifacts[ax],
            ArtifactLookup::NotFound => {
                return Err(RegistryError::NotFound {
                    reference: name.to_string(),
                })
            }
            ArtifactLookup::Ambiguous(count) => {
                return Err(RegistryError::Ambiguous {
                    fragment: name.name.clone(),
                    count,
                })
            }
        };
        transport.upload(name, &self.root, &artifact.file_ref, credentials)?;
        info!(name = %name, "pushed");
        Ok(artifact.id.clone())
    }

    /// Fetch an artifact from a remote registry and register it
    /// locally, exactly as `add` would. Returns the content id.
    pub fn pull(
        &mut self,
        name: &PackageName,
        transport: &dyn RemoteTransport,
        credentials: Option<&Credentials>,
    ) -> Result<String> {
        let package = transport.download(name, credentials)?;
        let seal: Seal =
            serde_json::from_slice(&package.seal).map_err(|e| RegistryError::InvalidSeal {
                detail: format!("remote seal for {name}: {e}"),
            })?;

        let file_ref = Uuid::new_v4().to_string();
        std::fs::write(self.blob_path(&file_ref), &package.blob)?;
        std::fs::write(self.seal_path(&file_ref), &package.seal)?;

        let id = self.register(name, &seal, file_ref)?;
        self.save()?;
        info!(name = %name, id = %id, "pulled");
        Ok(id)
    }

    /// Delete the backing blob and seal files of an artifact.
    fn remove_files(&self, file_ref: &str) -> Result<()> {
        std::fs::remove_file(self.blob_path(file_ref))?;
        std::fs::remove_file(self.seal_path(file_ref))?;
        Ok(())
    }
}

/// Move a file, falling back to copy-then-remove across filesystems.
fn relocate(from: &Path, to: &Path) -> Result<()> {
    if std::fs::rename(from, to).is_err() {
        std::fs::copy(from, to)?;
        std::fs::remove_file(from)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use depot_core::SealManifest;

    use crate::transport::RemotePackage;

    fn seal(checksum: &str) -> Seal {
        Seal {
            manifest: SealManifest {
                kind: "content/app".to_string(),
                size: "1.2 MB".to_string(),
                created: Utc::now().to_rfc2822(),
                checksum: checksum.to_string(),
                labels: BTreeMap::new(),
            },
        }
    }

    /// Write a blob + seal pair into `dir` and return the blob path.
    fn make_package(dir: &Path, stem: &str, seal: &Seal) -> PathBuf {
        let blob = dir.join(format!("{stem}.zip"));
        std::fs::write(&blob, b"package bytes").unwrap();
        std::fs::write(
            dir.join(format!("{stem}.json")),
            serde_json::to_vec(seal).unwrap(),
        )
        .unwrap();
        blob
    }

    fn open_registry(root: &Path) -> LocalRegistry {
        LocalRegistry::open(root.join("registry")).unwrap()
    }

    fn name(raw: &str) -> PackageName {
        PackageName::parse(raw).unwrap()
    }

    #[test]
    fn add_then_lookup_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let blob = make_package(dir.path(), "build", &s);

        let id = reg.add(&blob, &name("acme/app:v1"), &s).unwrap();
        assert_eq!(id, artifact_id(&s));

        match reg.registry().find_artifact(&name("acme/app:v1")) {
            ArtifactLookup::Found(rx, ax) => {
                let a = &reg.registry().repositories[rx].artifacts[ax];
                assert_eq!(a.id, id);
                assert_eq!(a.tags, vec!["v1"]);
            }
            other => panic!("expected found, got {other:?}"),
        }
        // blob and seal were relocated into the registry root
        assert!(!blob.exists());
    }

    #[test]
    fn add_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let bad = dir.path().join("build.tar");
        std::fs::write(&bad, b"x").unwrap();

        assert!(matches!(
            reg.add(&bad, &name("acme/app:v1"), &s),
            Err(RegistryError::InvalidPackage { .. })
        ));
    }

    #[test]
    fn add_steals_tag_leaving_dangler() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());

        let s1 = seal("c1");
        let b1 = make_package(dir.path(), "b1", &s1);
        let old_id = reg.add(&b1, &name("acme/app:v1"), &s1).unwrap();

        let s2 = seal("c2");
        let b2 = make_package(dir.path(), "b2", &s2);
        let new_id = reg.add(&b2, &name("acme/app:v1"), &s2).unwrap();
        assert_ne!(old_id, new_id);

        let repo = &reg.registry().repositories[0];
        assert_eq!(repo.artifacts.len(), 2);
        let old = repo.artifacts.iter().find(|a| a.id == old_id).unwrap();
        let new = repo.artifacts.iter().find(|a| a.id == new_id).unwrap();
        assert!(old.is_dangling(), "old artifact keeps its record, tagless");
        assert_eq!(new.tags, vec!["v1"]);
    }

    #[test]
    fn tag_never_duplicated_within_repository() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());

        let s1 = seal("c1");
        let b1 = make_package(dir.path(), "b1", &s1);
        reg.add(&b1, &name("acme/app:v1"), &s1).unwrap();
        let s2 = seal("c2");
        let b2 = make_package(dir.path(), "b2", &s2);
        reg.add(&b2, &name("acme/app:v1"), &s2).unwrap();

        for repo in &reg.registry().repositories {
            let mut seen = std::collections::HashSet::new();
            for artifact in &repo.artifacts {
                for tag in &artifact.tags {
                    assert!(seen.insert(tag.clone()), "tag {tag} held twice");
                }
            }
        }
    }

    #[test]
    fn same_repo_tag_appends_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let b = make_package(dir.path(), "b", &s);
        reg.add(&b, &name("acme/app:v1"), &s).unwrap();

        reg.tag(&name("acme/app:v1"), &name("acme/app:stable"))
            .unwrap();
        // repeat is a no-op
        reg.tag(&name("acme/app:v1"), &name("acme/app:stable"))
            .unwrap();

        let a = &reg.registry().repositories[0].artifacts[0];
        assert_eq!(a.tags, vec!["v1", "stable"]);
    }

    #[test]
    fn cross_repo_tags_dedup_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let b = make_package(dir.path(), "b", &s);
        let id = reg.add(&b, &name("acme/app:v1"), &s).unwrap();

        reg.tag(&name("acme/app:v1"), &name("mirror/app:v1")).unwrap();
        reg.tag(&name("acme/app:v1"), &name("mirror/app:v2")).unwrap();

        let mirror = reg
            .registry()
            .repositories
            .iter()
            .find(|r| r.repository == "mirror/app")
            .unwrap();
        assert_eq!(mirror.artifacts.len(), 1, "one record per content id");
        assert_eq!(mirror.artifacts[0].id, id);
        assert_eq!(mirror.artifacts[0].tags, vec!["v1", "v2"]);
    }

    #[test]
    fn cross_repo_tag_taken_is_silent_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());

        let s1 = seal("c1");
        let b1 = make_package(dir.path(), "b1", &s1);
        reg.add(&b1, &name("acme/app:v1"), &s1).unwrap();
        let s2 = seal("c2");
        let b2 = make_package(dir.path(), "b2", &s2);
        let other_id = reg.add(&b2, &name("other/tool:v1"), &s2).unwrap();

        // other/tool:v1 is taken by a different artifact; tagging into
        // it must leave it untouched (no steal, unlike add)
        reg.tag(&name("acme/app:v1"), &name("other/tool:v1")).unwrap();

        let other = reg
            .registry()
            .repositories
            .iter()
            .find(|r| r.repository == "other/tool")
            .unwrap();
        assert_eq!(other.artifacts.len(), 1);
        assert_eq!(other.artifacts[0].id, other_id);
    }

    #[test]
    fn tag_missing_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        assert!(matches!(
            reg.tag(&name("acme/app:v1"), &name("acme/app:v2")),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn files_survive_while_other_repository_references_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let b = make_package(dir.path(), "b", &s);
        reg.add(&b, &name("acme/app:v1"), &s).unwrap();
        reg.tag(&name("acme/app:v1"), &name("mirror/app:v1")).unwrap();

        let file_ref = reg.registry().repositories[0].artifacts[0]
            .file_ref
            .clone();
        let blob = reg.root().join(format!("{file_ref}.zip"));
        let seal_file = reg.root().join(format!("{file_ref}.json"));

        let outcomes = reg.remove(&[name("acme/app:v1")]).unwrap();
        assert!(matches!(outcomes[0], RemoveOutcome::Removed { .. }));
        assert!(blob.exists(), "still referenced from mirror/app");
        assert!(seal_file.exists());

        let outcomes = reg.remove(&[name("mirror/app:v1")]).unwrap();
        assert!(matches!(outcomes[0], RemoveOutcome::Removed { .. }));
        assert!(!blob.exists(), "last reference gone, files deleted");
        assert!(!seal_file.exists());
        assert!(reg.registry().repositories.is_empty());
    }

    #[test]
    fn remove_continues_past_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let b = make_package(dir.path(), "b", &s);
        reg.add(&b, &name("acme/app:v1"), &s).unwrap();

        let outcomes = reg
            .remove(&[name("ghost/none:v9"), name("acme/app:v1")])
            .unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], RemoveOutcome::NotFound { .. }));
        assert!(matches!(outcomes[1], RemoveOutcome::Removed { .. }));
    }

    #[test]
    fn remove_by_id_fragment_deletes_files_unconditionally() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let b = make_package(dir.path(), "b", &s);
        let id = reg.add(&b, &name("acme/app:v1"), &s).unwrap();

        let file_ref = reg.registry().repositories[0].artifacts[0]
            .file_ref
            .clone();
        let blob = reg.root().join(format!("{file_ref}.zip"));
        assert!(blob.exists());

        let fragment = &id[7..19];
        let outcomes = reg.remove(&[name(fragment)]).unwrap();
        assert!(matches!(outcomes[0], RemoveOutcome::Removed { .. }));
        assert!(!blob.exists(), "fragment path deletes unconditionally");
        assert!(reg.registry().repositories[0].artifacts.is_empty());
    }

    #[test]
    fn ambiguous_fragment_aborts_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let b = make_package(dir.path(), "b", &s);
        reg.add(&b, &name("acme/app:v1"), &s).unwrap();
        reg.tag(&name("acme/app:v1"), &name("mirror/app:v1")).unwrap();

        // "sha256" is a substring of both copies' ids
        assert!(matches!(
            reg.remove(&[name("sha256")]),
            Err(RegistryError::Ambiguous { count: 2, .. })
        ));
    }

    #[test]
    fn untag_leaves_dangling_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let b = make_package(dir.path(), "b", &s);
        reg.add(&b, &name("acme/app:v1"), &s).unwrap();

        reg.untag(&name("acme/app:v1")).unwrap();
        let a = &reg.registry().repositories[0].artifacts[0];
        assert!(a.is_dangling());
        // still listed, as a single <none> row
        let rows = reg.list();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tag, "<none>");
    }

    #[test]
    fn purge_tags_clears_whole_repository() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let b = make_package(dir.path(), "b", &s);
        reg.add(&b, &name("acme/app:v1"), &s).unwrap();
        reg.tag(&name("acme/app:v1"), &name("acme/app:stable"))
            .unwrap();

        reg.purge_tags(&name("acme/app")).unwrap();
        assert!(reg.registry().repositories[0].artifacts[0].is_dangling());
    }

    #[test]
    fn index_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let s = seal("c1");
        {
            let mut reg = open_registry(dir.path());
            let b = make_package(dir.path(), "b", &s);
            reg.add(&b, &name("acme/app:v1"), &s).unwrap();
        }
        let reg = open_registry(dir.path());
        assert_eq!(reg.registry().repositories.len(), 1);
        assert_eq!(reg.registry().repositories[0].artifacts[0].id, artifact_id(&s));
    }

    /// In-memory transport double recording uploads and serving one
    /// canned package.
    struct FakeTransport {
        uploads: RefCell<Vec<String>>,
        package: Option<RemotePackage>,
    }

    impl RemoteTransport for FakeTransport {
        fn upload(
            &self,
            name: &PackageName,
            registry_dir: &Path,
            file_ref: &str,
            _credentials: Option<&Credentials>,
        ) -> Result<()> {
            assert!(registry_dir.join(format!("{file_ref}.zip")).exists());
            self.uploads.borrow_mut().push(name.to_string());
            Ok(())
        }

        fn download(
            &self,
            name: &PackageName,
            _credentials: Option<&Credentials>,
        ) -> Result<RemotePackage> {
            self.package.clone().ok_or(RegistryError::NotFound {
                reference: name.to_string(),
            })
        }
    }

    #[test]
    fn push_delegates_to_transport() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());
        let s = seal("c1");
        let b = make_package(dir.path(), "b", &s);
        let id = reg.add(&b, &name("acme/app:v1"), &s).unwrap();

        let transport = FakeTransport {
            uploads: RefCell::new(Vec::new()),
            package: None,
        };
        let pushed = reg.push(&name("acme/app:v1"), &transport, None).unwrap();
        assert_eq!(pushed, id);
        assert_eq!(*transport.uploads.borrow(), vec!["acme/app:v1"]);
    }

    #[test]
    fn push_missing_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open_registry(dir.path());
        let transport = FakeTransport {
            uploads: RefCell::new(Vec::new()),
            package: None,
        };
        assert!(matches!(
            reg.push(&name("ghost/app:v1"), &transport, None),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn pull_registers_like_add() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = open_registry(dir.path());

        let s = seal("remote");
        let transport = FakeTransport {
            uploads: RefCell::new(Vec::new()),
            package: Some(RemotePackage {
                blob: b"remote blob".to_vec(),
                seal: serde_json::to_vec(&s).unwrap(),
            }),
        };

        let id = reg.pull(&name("acme/app:v2"), &transport, None).unwrap();
        assert_eq!(id, artifact_id(&s));

        let a = &reg.registry().repositories[0].artifacts[0];
        assert_eq!(a.tags, vec!["v2"]);
        assert!(reg.root().join(format!("{}.zip", a.file_ref)).exists());
        assert!(reg.root().join(format!("{}.json", a.file_ref)).exists());
    }
}
