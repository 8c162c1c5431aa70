use std::fs;
use std::path::Path;

use crate::repo::Repo;

pub enum CloneOutcome {
    Cloned,
    TargetExists,
}

/// Copies the whole `.dvc` tree (objects plus metadata) to `target`.
///
/// The clone holds the versioned history only; no working directory of
/// checked-out files is reconstructed. That asymmetry is intentional and
/// kept as-is.
pub fn clone_repo(repo: &Repo, target: &Path) -> anyhow::Result<CloneOutcome> {
    if target.exists() {
        return Ok(CloneOutcome::TargetExists);
    }
    copy_tree(repo.dvc_dir(), target)?;
    Ok(CloneOutcome::Cloned)
}

fn copy_tree(from: &Path, to: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let source = entry.path();
        let dest = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&source, &dest)?;
        } else {
            fs::copy(&source, &dest)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::commit;
    use crate::repo::{METADATA_FILE, OBJECTS_DIR};
    use crate::stage::add;
    use crate::state::RepoState;
    use crate::store::ObjectStore;
    use time::OffsetDateTime;

    #[test]
    fn clone_copies_objects_and_metadata() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = Repo::init(temp.path()).expect("init");
        let store = ObjectStore::new(repo.clone());
        let file = temp.path().join("a.txt");
        fs::write(&file, b"v1").expect("write");
        add(&repo, &store, &file).expect("add");
        commit(&repo, "c1".to_string(), OffsetDateTime::now_utc()).expect("commit");

        let target_root = tempfile::tempdir().expect("tempdir");
        let target = target_root.path().join("cloned");
        let outcome = clone_repo(&repo, &target).expect("clone");
        assert!(matches!(outcome, CloneOutcome::Cloned));

        assert!(target.join(METADATA_FILE).is_file());
        let slots = fs::read_dir(target.join(OBJECTS_DIR)).expect("objects").count();
        assert_eq!(slots, 1);

        // clone does not materialize a working tree
        assert!(!target.join("a.txt").exists());
    }

    #[test]
    fn clone_into_existing_path_is_a_noop() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = Repo::init(temp.path()).expect("init");

        let target_root = tempfile::tempdir().expect("tempdir");
        let target = target_root.path().join("taken");
        fs::create_dir_all(&target).expect("mkdir");

        let outcome = clone_repo(&repo, &target).expect("clone");
        assert!(matches!(outcome, CloneOutcome::TargetExists));
        assert!(!target.join(METADATA_FILE).exists());
    }

    #[test]
    fn cloned_metadata_parses_as_repo_state() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = Repo::init(temp.path()).expect("init");

        let target_root = tempfile::tempdir().expect("tempdir");
        let target = target_root.path().join("cloned");
        clone_repo(&repo, &target).expect("clone");

        let data = fs::read(target.join(METADATA_FILE)).expect("read");
        let state: RepoState = serde_json::from_slice(&data).expect("parse");
        assert_eq!(state.current_branch, "main");
    }
}
