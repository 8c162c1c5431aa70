use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::state::RepoState;

pub const REPO_DIR_NAME: &str = ".dvc";
pub const OBJECTS_DIR: &str = "objects";
pub const METADATA_FILE: &str = "metadata.json";
pub const IGNORE_FILE: &str = ".dvcignore";
pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),
    #[error("no repository found at {0}")]
    NotFound(PathBuf),
    #[error("path {0} is outside the repository root")]
    OutOfScope(PathBuf),
}

/// Handle to a repository rooted at a worktree directory, with all versioned
/// state kept under `<root>/.dvc/`.
#[derive(Clone, Debug)]
pub struct Repo {
    root: PathBuf,
    dvc_dir: PathBuf,
}

impl Repo {
    pub fn init(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            fs::create_dir_all(root)?;
        }

        let dvc_dir = root.join(REPO_DIR_NAME);
        if dvc_dir.exists() {
            return Err(RepoError::AlreadyInitialized(dvc_dir).into());
        }

        fs::create_dir_all(dvc_dir.join(OBJECTS_DIR))?;
        let repo = Self {
            root: root.canonicalize()?,
            dvc_dir,
        };
        RepoState::initial().save(&repo)?;
        Ok(repo)
    }

    pub fn open(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref();
        let dvc_dir = root.join(REPO_DIR_NAME);
        if !dvc_dir.exists() {
            return Err(RepoError::NotFound(dvc_dir).into());
        }
        Ok(Self {
            root: root.canonicalize()?,
            dvc_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dvc_dir(&self) -> &Path {
        &self.dvc_dir
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.dvc_dir.join(OBJECTS_DIR)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dvc_dir.join(METADATA_FILE)
    }

    pub fn ignore_path(&self) -> PathBuf {
        self.dvc_dir.join(IGNORE_FILE)
    }

    /// Resolves a path (absolute or relative to the process cwd) to a
    /// repository-relative path. Paths escaping the root are `OutOfScope`.
    pub fn relativize(&self, path: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let absolute = absolute.canonicalize()?;
        match absolute.strip_prefix(&self.root) {
            Ok(rel) => Ok(rel.to_path_buf()),
            Err(_) => Err(RepoError::OutOfScope(path.to_path_buf()).into()),
        }
    }
}

pub fn init_repo(root: impl AsRef<Path>) -> anyhow::Result<()> {
    Repo::init(root).map(|_| ())
}
