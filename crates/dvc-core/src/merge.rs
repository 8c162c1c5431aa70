use std::collections::BTreeMap;

use time::OffsetDateTime;

use crate::digest::Digest;
use crate::repo::Repo;
use crate::state::{Commit, RepoState};

/// Discriminated merge result: success, conflicts, and a missing target are
/// three distinct cases, so an empty conflict list can never be mistaken for
/// "nothing happened".
pub enum MergeOutcome {
    Merged { id: String },
    Conflicts(Vec<String>),
    UnknownBranch { name: String },
}

/// Merges `target` into the current branch.
///
/// Both branches' full commit sequences are folded into one path -> digest
/// map each, later commits overriding earlier ones. Comparing flattened
/// histories rather than branch tips is deliberate: a path committed once
/// and never touched again must still resolve to its recorded digest.
///
/// A path present in both flattened maps with differing digests is a
/// conflict. Any conflict aborts the merge with the full path list and no
/// state change. A clean merge unions the maps into a new commit whose
/// parent is the pre-merge head.
pub fn merge(repo: &Repo, target: &str, timestamp: OffsetDateTime) -> anyhow::Result<MergeOutcome> {
    let mut state = RepoState::load(repo)?;
    let Some(target_commits) = state.branches.get(target) else {
        return Ok(MergeOutcome::UnknownBranch {
            name: target.to_string(),
        });
    };

    let current_files = flatten(state.current_commits());
    let target_files = flatten(target_commits);

    let conflicts: Vec<String> = current_files
        .iter()
        .filter(|(path, digest)| {
            target_files
                .get(*path)
                .is_some_and(|other| other != *digest)
        })
        .map(|(path, _)| path.clone())
        .collect();
    if !conflicts.is_empty() {
        return Ok(MergeOutcome::Conflicts(conflicts));
    }

    let mut merged = current_files;
    merged.extend(target_files);

    let message = format!(
        "Merge branch '{target}' into '{}'",
        state.current_branch
    );
    let record = Commit::new(message, timestamp, merged, state.head.clone())?;
    let id = record.id.clone();

    let branch = state
        .branches
        .get_mut(&state.current_branch)
        .ok_or_else(|| anyhow::anyhow!("current branch missing from metadata"))?;
    branch.push(record);
    state.head = Some(id.clone());
    state.save(repo)?;

    Ok(MergeOutcome::Merged { id })
}

/// Folds a commit sequence into a single file map, last write per path wins.
pub fn flatten(commits: &[Commit]) -> BTreeMap<String, Digest> {
    let mut out = BTreeMap::new();
    for commit in commits {
        for (path, digest) in &commit.files {
            out.insert(path.clone(), *digest);
        }
    }
    out
}
