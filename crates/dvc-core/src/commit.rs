use std::mem;

use time::OffsetDateTime;

use crate::repo::Repo;
use crate::state::{Commit, RepoState};

pub enum CommitOutcome {
    Created { id: String },
    NoChanges,
}

/// Records the staging map as a new commit on the current branch.
///
/// The commit's parent is the head at the moment of creation. Staging is
/// consumed entirely; an empty staging map is a reported no-op.
pub fn commit(
    repo: &Repo,
    message: String,
    timestamp: OffsetDateTime,
) -> anyhow::Result<CommitOutcome> {
    let mut state = RepoState::load(repo)?;
    if state.staging.is_empty() {
        return Ok(CommitOutcome::NoChanges);
    }

    let files = mem::take(&mut state.staging);
    let parent = state.head.clone();
    let record = Commit::new(message, timestamp, files, parent)?;
    let id = record.id.clone();

    let branch = state
        .branches
        .get_mut(&state.current_branch)
        .ok_or_else(|| anyhow::anyhow!("current branch missing from metadata"))?;
    branch.push(record);
    state.head = Some(id.clone());
    state.save(repo)?;

    Ok(CommitOutcome::Created { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::Digest;
    use crate::stage::add;
    use crate::store::ObjectStore;
    use std::fs;

    fn now() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    #[test]
    fn commit_consumes_staging_and_advances_head() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = Repo::init(temp.path()).expect("init");
        let store = ObjectStore::new(repo.clone());
        let file = temp.path().join("a.txt");
        fs::write(&file, b"v1").expect("write");
        add(&repo, &store, &file).expect("add");

        let outcome = commit(&repo, "c1".to_string(), now()).expect("commit");
        let id = match outcome {
            CommitOutcome::Created { id } => id,
            CommitOutcome::NoChanges => panic!("expected a commit"),
        };

        let state = RepoState::load(&repo).expect("load");
        assert!(state.staging.is_empty());
        assert_eq!(state.head.as_deref(), Some(id.as_str()));

        let commits = state.current_commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].id, id);
        assert_eq!(commits[0].parent, None);
        assert_eq!(commits[0].files.get("a.txt"), Some(&Digest::of_bytes(b"v1")));
    }

    #[test]
    fn empty_staging_is_a_noop() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = Repo::init(temp.path()).expect("init");

        let outcome = commit(&repo, "nothing".to_string(), now()).expect("commit");
        assert!(matches!(outcome, CommitOutcome::NoChanges));

        let state = RepoState::load(&repo).expect("load");
        assert!(state.head.is_none());
        assert!(state.current_commits().is_empty());
    }

    #[test]
    fn second_commit_records_parent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = Repo::init(temp.path()).expect("init");
        let store = ObjectStore::new(repo.clone());
        let file = temp.path().join("a.txt");

        fs::write(&file, b"v1").expect("write");
        add(&repo, &store, &file).expect("add");
        let first = match commit(&repo, "c1".to_string(), now()).expect("commit") {
            CommitOutcome::Created { id } => id,
            CommitOutcome::NoChanges => panic!("expected a commit"),
        };

        fs::write(&file, b"v2").expect("rewrite");
        add(&repo, &store, &file).expect("add");
        commit(&repo, "c2".to_string(), now()).expect("commit");

        let state = RepoState::load(&repo).expect("load");
        let commits = state.current_commits();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[1].parent.as_deref(), Some(first.as_str()));
        assert_eq!(state.head.as_deref(), Some(commits[1].id.as_str()));
    }
}
