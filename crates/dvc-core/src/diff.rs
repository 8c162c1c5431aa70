use std::collections::BTreeSet;
use std::fmt;

use crate::repo::Repo;
use crate::state::{Commit, RepoState};

/// Set-based difference between two commits' file maps. Paths are kept
/// sorted and duplicate-free.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffReport {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub modified: BTreeSet<String>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added: {}", join_or_none(&self.added))?;
        writeln!(f, "Removed: {}", join_or_none(&self.removed))?;
        write!(f, "Modified: {}", join_or_none(&self.modified))
    }
}

fn join_or_none(paths: &BTreeSet<String>) -> String {
    if paths.is_empty() {
        "None".to_string()
    } else {
        paths.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

pub enum DiffOutcome {
    Report(DiffReport),
    UnknownCommit { id: String },
}

/// Compares two commits looked up within the current branch only. An id
/// absent from that branch is a reported outcome, not an error.
pub fn diff(repo: &Repo, first: &str, second: &str) -> anyhow::Result<DiffOutcome> {
    let state = RepoState::load(repo)?;
    let commits = state.current_commits();

    let Some(a) = find_commit(commits, first) else {
        return Ok(DiffOutcome::UnknownCommit {
            id: first.to_string(),
        });
    };
    let Some(b) = find_commit(commits, second) else {
        return Ok(DiffOutcome::UnknownCommit {
            id: second.to_string(),
        });
    };

    Ok(DiffOutcome::Report(compare(a, b)))
}

fn find_commit<'a>(commits: &'a [Commit], id: &str) -> Option<&'a Commit> {
    commits.iter().find(|commit| commit.id == id)
}

fn compare(a: &Commit, b: &Commit) -> DiffReport {
    let mut report = DiffReport::default();
    for path in b.files.keys() {
        if !a.files.contains_key(path) {
            report.added.insert(path.clone());
        }
    }
    for (path, digest) in &a.files {
        match b.files.get(path) {
            None => {
                report.removed.insert(path.clone());
            }
            Some(other) if other != digest => {
                report.modified.insert(path.clone());
            }
            Some(_) => {}
        }
    }
    report
}
