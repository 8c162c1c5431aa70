use crate::repo::Repo;
use crate::state::RepoState;

pub enum BranchOutcome {
    Created { name: String },
    AlreadyExists { name: String },
}

pub enum CheckoutOutcome {
    Switched { name: String, head: Option<String> },
    UnknownBranch { name: String },
}

/// Binds a new name to a full copy of the current branch's commit sequence.
///
/// Snapshot semantics: the copy shares nothing with its origin, so later
/// commits on either branch never appear on the other.
pub fn branch(repo: &Repo, name: &str) -> anyhow::Result<BranchOutcome> {
    let mut state = RepoState::load(repo)?;
    if state.branches.contains_key(name) {
        return Ok(BranchOutcome::AlreadyExists {
            name: name.to_string(),
        });
    }

    let commits = state.current_commits().to_vec();
    state.branches.insert(name.to_string(), commits);
    state.save(repo)?;

    Ok(BranchOutcome::Created {
        name: name.to_string(),
    })
}

/// Moves the current-branch pointer and recomputes head from the target
/// branch's tail commit (or clears it for an empty branch).
pub fn checkout(repo: &Repo, name: &str) -> anyhow::Result<CheckoutOutcome> {
    let mut state = RepoState::load(repo)?;
    if !state.branches.contains_key(name) {
        return Ok(CheckoutOutcome::UnknownBranch {
            name: name.to_string(),
        });
    }

    state.current_branch = name.to_string();
    state.head = state.tail_id(name);
    state.save(repo)?;

    Ok(CheckoutOutcome::Switched {
        name: name.to_string(),
        head: state.head,
    })
}
