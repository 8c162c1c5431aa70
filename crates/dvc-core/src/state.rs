use std::collections::BTreeMap;
use std::fs;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::digest::Digest;
use crate::repo::{Repo, DEFAULT_BRANCH};
use crate::util::atomic_write;

/// One immutable record in a branch's history.
///
/// `id` is derived from the message and creation timestamp, not from content;
/// two commits collide only if both match down to sub-second precision. That
/// is an accepted risk of this model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub files: BTreeMap<String, Digest>,
    pub parent: Option<String>,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: OffsetDateTime,
        files: BTreeMap<String, Digest>,
        parent: Option<String>,
    ) -> anyhow::Result<Self> {
        let id = commit_id(&message, timestamp)?;
        Ok(Self {
            id,
            message,
            timestamp,
            files,
            parent,
        })
    }
}

fn commit_id(message: &str, timestamp: OffsetDateTime) -> anyhow::Result<String> {
    let stamp = timestamp.format(&Rfc3339)?;
    let digest = Digest::of_bytes(format!("{message}{stamp}").as_bytes());
    Ok(digest.to_hex())
}

/// The whole-repository metadata document. Read and rewritten wholesale on
/// every mutating operation; `metadata.json` is its only durable form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepoState {
    pub branches: BTreeMap<String, Vec<Commit>>,
    pub current_branch: String,
    pub head: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub staging: BTreeMap<String, Digest>,
}

impl RepoState {
    pub fn initial() -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(DEFAULT_BRANCH.to_string(), Vec::new());
        Self {
            branches,
            current_branch: DEFAULT_BRANCH.to_string(),
            head: None,
            staging: BTreeMap::new(),
        }
    }

    pub fn load(repo: &Repo) -> anyhow::Result<Self> {
        let path = repo.metadata_path();
        let data = fs::read(&path)
            .with_context(|| format!("metadata document missing at {}", path.display()))?;
        serde_json::from_slice(&data)
            .with_context(|| format!("metadata document malformed at {}", path.display()))
    }

    pub fn save(&self, repo: &Repo) -> anyhow::Result<()> {
        let data = serde_json::to_vec_pretty(self)?;
        atomic_write(&repo.metadata_path(), &data)
    }

    /// Commit sequence of the current branch, oldest first.
    pub fn current_commits(&self) -> &[Commit] {
        self.branches
            .get(&self.current_branch)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Id of the last commit on a branch, if it has any.
    pub fn tail_id(&self, branch: &str) -> Option<String> {
        self.branches
            .get(branch)
            .and_then(|commits| commits.last())
            .map(|commit| commit.id.clone())
    }
}
