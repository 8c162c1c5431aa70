use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::repo::Repo;

/// The `.dvc/.dvcignore` list: one exact repository-relative path per
/// non-empty line. Literal string membership only, no globbing, no negation.
pub struct IgnoreList {
    paths: BTreeSet<String>,
}

impl IgnoreList {
    pub fn load(repo: &Repo) -> anyhow::Result<Self> {
        let path = repo.ignore_path();
        let mut paths = BTreeSet::new();
        if path.exists() {
            let text = fs::read_to_string(&path)?;
            for line in text.lines() {
                let line = line.trim();
                if !line.is_empty() {
                    paths.insert(line.to_string());
                }
            }
        }
        Ok(Self { paths })
    }

    pub fn is_ignored(&self, rel_path: &Path) -> bool {
        self.paths.contains(&rel_path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_ignores_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = Repo::init(temp.path()).expect("init");

        let ignore = IgnoreList::load(&repo).expect("load");
        assert!(!ignore.is_ignored(&PathBuf::from("anything.txt")));
    }

    #[test]
    fn matches_exact_lines_only() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = Repo::init(temp.path()).expect("init");
        fs::write(repo.ignore_path(), "skip.txt\n\nnested/skip.txt\n").expect("write");

        let ignore = IgnoreList::load(&repo).expect("load");
        assert!(ignore.is_ignored(&PathBuf::from("skip.txt")));
        assert!(ignore.is_ignored(&PathBuf::from("nested/skip.txt")));
        // no glob semantics: a prefix or pattern-alike line is not a match
        assert!(!ignore.is_ignored(&PathBuf::from("skip.txt.bak")));
        assert!(!ignore.is_ignored(&PathBuf::from("other/skip.txt")));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = Repo::init(temp.path()).expect("init");
        fs::write(repo.ignore_path(), "  padded.txt  \n").expect("write");

        let ignore = IgnoreList::load(&repo).expect("load");
        assert!(ignore.is_ignored(&PathBuf::from("padded.txt")));
    }
}
