//! Per-user record storage.
//!
//! One JSON file per user under `<data_dir>/users/`. Every mutating call
//! reads the whole record, changes it in memory and writes the whole
//! record back. Saves go through a per-call temp file and a rename, so a
//! record on disk is always one complete write.
//!
//! # Known race
//!
//! The decay ticker and a user request can both read-modify-write the same
//! record at once. Nothing coordinates them, so the later write wins and
//! the other update is lost. At worst one decay step or one action per
//! interval disappears; this is the accepted consistency model.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use pixelpet_logic::PetRecord;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Longest accepted username.
pub const MAX_USERNAME_LEN: usize = 32;

/// A stored account: credentials plus the one pet it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub username: String,
    pub password_hash: String,
    pub pet: PetRecord,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    NotFound(String),
    #[error("username already exists")]
    AlreadyExists(String),
    #[error("invalid username {0:?}")]
    InvalidUsername(String),
    #[error("storage I/O error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt record {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Usernames double as file names, so keep them to a safe alphabet.
pub fn is_valid_username(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_USERNAME_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Storage for user accounts, keyed by username.
pub trait UserStore: Send + Sync {
    /// Store a new account. Fails if the username is taken.
    fn create(&self, account: &UserAccount) -> Result<(), StoreError>;

    fn load(&self, username: &str) -> Result<UserAccount, StoreError>;

    /// Overwrite an existing account as a whole.
    fn save(&self, account: &UserAccount) -> Result<(), StoreError>;

    /// Every stored username, sorted.
    fn usernames(&self) -> Result<Vec<String>, StoreError>;
}

/// [`UserStore`] backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FileStore {
    users_dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the store rooted at `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let users_dir = data_dir.as_ref().join("users");
        fs::create_dir_all(&users_dir).map_err(|source| StoreError::Io {
            path: users_dir.clone(),
            source,
        })?;
        Ok(Self { users_dir })
    }

    pub fn users_dir(&self) -> &Path {
        &self.users_dir
    }

    fn record_path(&self, username: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_username(username) {
            return Err(StoreError::InvalidUsername(username.to_string()));
        }
        Ok(self.users_dir.join(format!("{username}.json")))
    }

    fn encode(account: &UserAccount, path: &Path) -> Result<String, StoreError> {
        serde_json::to_string_pretty(account)
            .map(|raw| raw + "\n")
            .map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl UserStore for FileStore {
    fn create(&self, account: &UserAccount) -> Result<(), StoreError> {
        let path = self.record_path(&account.username)?;
        let raw = Self::encode(account, &path)?;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(account.username.clone()));
            }
            Err(e) => return Err(io_err(&path)(e)),
        };
        file.write_all(raw.as_bytes()).map_err(io_err(&path))?;
        file.sync_all().map_err(io_err(&path))
    }

    fn load(&self, username: &str) -> Result<UserAccount, StoreError> {
        let path = self.record_path(username)?;
        let raw = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(username.to_string()));
            }
            Err(e) => return Err(io_err(&path)(e)),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Json { path, source })
    }

    fn save(&self, account: &UserAccount) -> Result<(), StoreError> {
        let path = self.record_path(&account.username)?;
        let raw = Self::encode(account, &path)?;
        // Each writer gets its own temp file; the rename is the commit point.
        let mut tmp = NamedTempFile::new_in(&self.users_dir).map_err(io_err(&self.users_dir))?;
        tmp.write_all(raw.as_bytes()).map_err(io_err(tmp.path()))?;
        tmp.persist(&path).map_err(|e| io_err(&path)(e.error))?;
        Ok(())
    }

    fn usernames(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.users_dir).map_err(io_err(&self.users_dir))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_err(&self.users_dir))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_username(stem) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
