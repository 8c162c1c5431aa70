use std::path::Path;

use crate::digest::Digest;
use crate::ignore::IgnoreList;
use crate::repo::Repo;
use crate::state::RepoState;
use crate::store::ObjectStore;

#[derive(Debug)]
pub enum AddOutcome {
    Staged { path: String, digest: Digest },
    Ignored { path: String },
}

/// Stages a file: hashes its content, stores the blob, and records the
/// pending `path -> digest` entry, replacing any prior entry for the path.
///
/// The path must resolve inside the repository root; anything else is an
/// `OutOfScope` error. A path listed in `.dvcignore` is a reported no-op.
pub fn add(repo: &Repo, store: &ObjectStore, path: &Path) -> anyhow::Result<AddOutcome> {
    let rel = repo.relativize(path)?;
    let rel_str = rel.to_string_lossy().to_string();

    let ignore = IgnoreList::load(repo)?;
    if ignore.is_ignored(&rel) {
        return Ok(AddOutcome::Ignored { path: rel_str });
    }

    let mut state = RepoState::load(repo)?;
    let digest = store.store_file(&repo.root().join(&rel))?;
    state.staging.insert(rel_str.clone(), digest);
    state.save(repo)?;

    Ok(AddOutcome::Staged {
        path: rel_str,
        digest,
    })
}
