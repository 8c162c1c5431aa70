mod branch;
mod clone;
mod commit;
mod diff;
mod digest;
mod ignore;
mod lock;
mod log;
mod merge;
mod repo;
mod stage;
mod state;
mod store;
mod util;

pub use branch::{branch, checkout, BranchOutcome, CheckoutOutcome};
pub use clone::{clone_repo, CloneOutcome};
pub use commit::{commit, CommitOutcome};
pub use diff::{diff, DiffOutcome, DiffReport};
pub use digest::Digest;
pub use ignore::IgnoreList;
pub use lock::RepoLock;
pub use log::history;
pub use merge::{flatten, merge, MergeOutcome};
pub use repo::{
    init_repo, Repo, RepoError, DEFAULT_BRANCH, IGNORE_FILE, METADATA_FILE, OBJECTS_DIR,
    REPO_DIR_NAME,
};
pub use stage::{add, AddOutcome};
pub use state::{Commit, RepoState};
pub use store::ObjectStore;
