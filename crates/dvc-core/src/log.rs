use crate::repo::Repo;
use crate::state::{Commit, RepoState};

/// Commit history of the current branch, newest first.
pub fn history(repo: &Repo) -> anyhow::Result<Vec<Commit>> {
    let state = RepoState::load(repo)?;
    let mut commits = state.current_commits().to_vec();
    commits.reverse();
    Ok(commits)
}
