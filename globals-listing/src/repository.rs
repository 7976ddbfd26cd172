//! Global set repository
//!
//! Supplies the global sets a listing is built from. Framework users back
//! it with their own storage by implementing [`GlobalSetRepository`].

use globals_api::GlobalSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tracing::debug;

/// Current version of the repository file format
pub const FILE_FORMAT_VERSION: u32 = 1;

/// Error type for repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Failed to read global sets: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse global sets: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unsupported global sets file version: {0}")]
    UnsupportedVersion(u32),

    #[error("Global set handle is not unique: {0}")]
    DuplicateHandle(String),
}

/// Trait for global set storage
pub trait GlobalSetRepository: Send + Sync {
    /// All global sets in insertion order
    fn list_all(&self) -> Result<Vec<GlobalSet>, RepositoryError>;

    /// Find a global set by handle
    fn find(&self, handle: &str) -> Result<Option<GlobalSet>, RepositoryError> {
        Ok(self
            .list_all()?
            .into_iter()
            .find(|set| set.handle().as_str() == handle))
    }
}

fn ensure_unique(globals: &[GlobalSet]) -> Result<(), RepositoryError> {
    let mut seen = HashSet::new();
    for set in globals {
        if !seen.insert(set.handle().as_str()) {
            return Err(RepositoryError::DuplicateHandle(set.handle().to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// In-Memory Repository
// ============================================================================

/// In-memory repository keeping insertion order
pub struct MemoryGlobalSetRepository {
    globals: RwLock<Vec<GlobalSet>>,
}

impl MemoryGlobalSetRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            globals: RwLock::new(Vec::new()),
        }
    }

    /// Create a repository from existing global sets
    pub fn with_globals(globals: Vec<GlobalSet>) -> Result<Self, RepositoryError> {
        ensure_unique(&globals)?;
        Ok(Self {
            globals: RwLock::new(globals),
        })
    }

    /// Append a global set
    pub fn insert(&self, set: GlobalSet) -> Result<(), RepositoryError> {
        let mut globals = self.globals.write().unwrap_or_else(PoisonError::into_inner);
        if globals.iter().any(|existing| existing.handle() == set.handle()) {
            return Err(RepositoryError::DuplicateHandle(set.handle().to_string()));
        }
        globals.push(set);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.globals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryGlobalSetRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalSetRepository for MemoryGlobalSetRepository {
    fn list_all(&self) -> Result<Vec<GlobalSet>, RepositoryError> {
        Ok(self
            .globals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

impl std::fmt::Debug for MemoryGlobalSetRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGlobalSetRepository")
            .field("count", &self.len())
            .finish()
    }
}

// ============================================================================
// File-based Repository
// ============================================================================

/// Persistent file data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GlobalSetFileData {
    version: u32,
    #[serde(default)]
    globals: Vec<GlobalSet>,
}

/// Repository backed by a JSON file
///
/// ```json
/// {"version": 1, "globals": [{"handle": "footer", "sites": ["en", "fr"]}]}
/// ```
///
/// A missing file is an empty repository.
pub struct FileGlobalSetRepository {
    path: PathBuf,
    globals: RwLock<Vec<GlobalSet>>,
}

impl FileGlobalSetRepository {
    /// Load the repository from `path`
    pub fn new(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let globals = Self::load(&path)?;
        Ok(Self {
            path,
            globals: RwLock::new(globals),
        })
    }

    /// Get the repository file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file
    pub fn reload(&self) -> Result<(), RepositoryError> {
        let globals = Self::load(&self.path)?;
        *self.globals.write().unwrap_or_else(PoisonError::into_inner) = globals;
        Ok(())
    }

    fn load(path: &Path) -> Result<Vec<GlobalSet>, RepositoryError> {
        if !path.exists() {
            debug!(path = %path.display(), "No global sets file, starting empty");
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(path)?);
        let data: GlobalSetFileData = serde_json::from_reader(reader)?;
        if data.version != FILE_FORMAT_VERSION {
            return Err(RepositoryError::UnsupportedVersion(data.version));
        }
        ensure_unique(&data.globals)?;

        debug!(path = %path.display(), count = data.globals.len(), "Loaded global sets");
        Ok(data.globals)
    }
}

impl GlobalSetRepository for FileGlobalSetRepository {
    fn list_all(&self) -> Result<Vec<GlobalSet>, RepositoryError> {
        Ok(self
            .globals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

impl std::fmt::Debug for FileGlobalSetRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileGlobalSetRepository")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_repository_keeps_insertion_order() {
        let repo = MemoryGlobalSetRepository::new();
        repo.insert(GlobalSet::new("test_one", "en")).unwrap();
        repo.insert(GlobalSet::new("test_two", "en")).unwrap();
        repo.insert(GlobalSet::new("a_last", "en")).unwrap();

        let handles: Vec<String> = repo
            .list_all()
            .unwrap()
            .iter()
            .map(|set| set.handle().to_string())
            .collect();
        assert_eq!(handles, vec!["test_one", "test_two", "a_last"]);
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_memory_repository_rejects_duplicates() {
        let repo = MemoryGlobalSetRepository::new();
        repo.insert(GlobalSet::new("seo", "en")).unwrap();

        assert!(matches!(
            repo.insert(GlobalSet::new("seo", "fr")),
            Err(RepositoryError::DuplicateHandle(_))
        ));
        assert!(matches!(
            MemoryGlobalSetRepository::with_globals(vec![
                GlobalSet::new("seo", "en"),
                GlobalSet::new("seo", "en"),
            ]),
            Err(RepositoryError::DuplicateHandle(_))
        ));
    }

    #[test]
    fn test_find() {
        let repo =
            MemoryGlobalSetRepository::with_globals(vec![GlobalSet::new("seo", "en")]).unwrap();
        assert!(repo.find("seo").unwrap().is_some());
        assert!(repo.find("footer").unwrap().is_none());
    }

    #[test]
    fn test_file_repository() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("globals.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "globals": [
                {"handle": "footer", "sites": ["en", "fr"]},
                {"handle": "seo", "origin": "fr", "sites": ["fr"]}
            ]}"#,
        )
        .unwrap();

        let repo = FileGlobalSetRepository::new(&path).unwrap();
        let globals = repo.list_all().unwrap();
        assert_eq!(globals.len(), 2);
        assert!(globals[0].has_localization("fr"));
        assert_eq!(globals[1].origin().as_str(), "fr");
        assert!(!globals[1].has_localization("en"));
    }

    #[test]
    fn test_file_repository_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileGlobalSetRepository::new(dir.path().join("missing.json")).unwrap();
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_file_repository_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("globals.json");

        let repo = FileGlobalSetRepository::new(&path).unwrap();
        assert!(repo.list_all().unwrap().is_empty());

        std::fs::write(&path, r#"{"version": 1, "globals": [{"handle": "seo", "sites": ["en"]}]}"#)
            .unwrap();
        repo.reload().unwrap();
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_file_repository_rejects_invalid_data() {
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("v2.json");
        std::fs::write(&path, r#"{"version": 2, "globals": []}"#).unwrap();
        assert!(matches!(
            FileGlobalSetRepository::new(&path),
            Err(RepositoryError::UnsupportedVersion(2))
        ));

        let path = dir.path().join("empty_sites.json");
        std::fs::write(&path, r#"{"version": 1, "globals": [{"handle": "seo", "sites": []}]}"#)
            .unwrap();
        assert!(matches!(
            FileGlobalSetRepository::new(&path),
            Err(RepositoryError::ParseError(_))
        ));
    }
}
