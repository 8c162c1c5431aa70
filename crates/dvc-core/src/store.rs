use std::fs;
use std::path::{Path, PathBuf};

use crate::digest::Digest;
use crate::repo::Repo;

/// Content-addressed blob storage under `.dvc/objects/`.
///
/// Every distinct digest gets one slot directory holding a full copy of the
/// bytes, named after the source file. Re-storing identical content lands in
/// the same slot. Reads do not re-verify the digest; a corrupted slot goes
/// undetected.
pub struct ObjectStore {
    repo: Repo,
}

impl ObjectStore {
    pub fn new(repo: Repo) -> Self {
        Self { repo }
    }

    /// Hashes a file's exact bytes and persists them, returning the digest.
    pub fn store_file(&self, source: &Path) -> anyhow::Result<Digest> {
        let bytes = fs::read(source)?;
        let file_name = source
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("path has no file name: {}", source.display()))?;
        self.store_bytes(&bytes, Path::new(file_name))
    }

    pub fn store_bytes(&self, bytes: &[u8], file_name: &Path) -> anyhow::Result<Digest> {
        let digest = Digest::of_bytes(bytes);
        let slot = self.slot_dir(&digest);
        fs::create_dir_all(&slot)?;
        fs::write(slot.join(file_name), bytes)?;
        Ok(digest)
    }

    /// Reads back the blob stored under a digest.
    pub fn read_object(&self, digest: &Digest) -> anyhow::Result<Vec<u8>> {
        let slot = self.slot_dir(digest);
        let entry = fs::read_dir(&slot)?
            .next()
            .ok_or_else(|| anyhow::anyhow!("empty object slot for {digest}"))??;
        Ok(fs::read(entry.path())?)
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.slot_dir(digest).is_dir()
    }

    pub fn slot_dir(&self, digest: &Digest) -> PathBuf {
        self.repo.objects_dir().join(digest.to_hex())
    }
}
