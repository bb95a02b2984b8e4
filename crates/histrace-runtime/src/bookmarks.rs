use crate::{Error, Result};
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub name: String,
    pub command: String,
}

pub fn validate_bookmark_name(name: &str) -> Result<()> {
    if NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "bookmark name {:?} must start with a letter or underscore and contain only letters, digits and underscores",
            name
        )))
    }
}

/// Plain-text bookmark files, one per name, stored flat.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    dir: PathBuf,
}

impl BookmarkStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, name: &str, command: &str) -> Result<PathBuf> {
        validate_bookmark_name(name)?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, command)?;
        tracing::debug!(name, path = %path.display(), "bookmark saved");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<String> {
        validate_bookmark_name(name)?;
        std::fs::read_to_string(self.dir.join(name)).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound(format!("bookmark {}", name)),
            _ => Error::Io(err),
        })
    }

    /// All readable bookmarks sorted by name. Unreadable files are skipped.
    pub fn list(&self) -> Result<Vec<Bookmark>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut bookmarks = Vec::new();
        for item in WalkDir::new(&self.dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let item = item.map_err(io::Error::from)?;
            if !item.file_type().is_file() {
                continue;
            }
            let Some(name) = item.file_name().to_str() else {
                continue;
            };
            match std::fs::read_to_string(item.path()) {
                Ok(command) => bookmarks.push(Bookmark {
                    name: name.to_string(),
                    command,
                }),
                Err(err) => {
                    tracing::warn!(name, error = %err, "cannot read bookmark, skipping");
                }
            }
        }
        Ok(bookmarks)
    }

    /// Returns `false` when there was nothing to remove.
    pub fn remove(&self, name: &str) -> Result<bool> {
        validate_bookmark_name(name)?;
        match std::fs::remove_file(self.dir.join(name)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(name, "bookmark does not exist");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_name_validation() {
        assert!(validate_bookmark_name("deploy").is_ok());
        assert!(validate_bookmark_name("_x1").is_ok());
        assert!(validate_bookmark_name("1abc").is_err());
        assert!(validate_bookmark_name("../etc").is_err());
        assert!(validate_bookmark_name("a-b").is_err());
        assert!(validate_bookmark_name("").is_err());
    }

    #[test]
    fn test_save_load_list_remove() {
        let dir = TempDir::new().unwrap();
        let store = BookmarkStore::new(dir.path().join("bookmarks"));

        store.save("build", "cargo build --release").unwrap();
        store.save("status", "git status").unwrap();
        assert_eq!(store.load("build").unwrap(), "cargo build --release");

        let names: Vec<String> = store.list().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["build", "status"]);

        assert!(store.remove("build").unwrap());
        assert!(!store.remove("build").unwrap());
        assert!(matches!(store.load("build"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_invalid_name_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let store = BookmarkStore::new(dir.path().join("bookmarks"));
        assert!(matches!(store.save("bad name", "ls"), Err(Error::InvalidInput(_))));
        assert!(!store.dir().exists());
    }

    #[test]
    fn test_list_without_directory() {
        let dir = TempDir::new().unwrap();
        let store = BookmarkStore::new(dir.path().join("missing"));
        assert!(store.list().unwrap().is_empty());
    }
}
