// ── Dashboard user storage ──
//
// Explicit repository seam for dashboard users. Every write is flushed
// before it returns; there is no batching and no transaction.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::CoreError;
use crate::model::DashboardUser;

/// Storage for dashboard users, keyed by account id.
pub trait UserRepository {
    fn find_by_account_id(&self, account_id: i64) -> Result<Option<DashboardUser>, CoreError>;

    /// Create and persist a user for `account_id`.
    fn create(&self, account_id: i64) -> Result<DashboardUser, CoreError>;

    /// Persist changes to an existing user.
    fn save(&self, user: &DashboardUser) -> Result<(), CoreError>;
}

type UserMap = BTreeMap<i64, DashboardUser>;

fn lock(users: &Mutex<UserMap>) -> MutexGuard<'_, UserMap> {
    users.lock().unwrap_or_else(PoisonError::into_inner)
}

fn insert_new(users: &mut UserMap, account_id: i64) -> Result<DashboardUser, CoreError> {
    if users.contains_key(&account_id) {
        return Err(CoreError::UserExists { account_id });
    }
    let user = DashboardUser::new(account_id);
    users.insert(account_id, user.clone());
    Ok(user)
}

fn replace_existing(users: &mut UserMap, user: &DashboardUser) -> Result<(), CoreError> {
    let account_id = user.account_id();
    match users.get_mut(&account_id) {
        Some(stored) => {
            *stored = user.clone();
            Ok(())
        }
        None => Err(CoreError::UserNotFound { account_id }),
    }
}

// ── In-memory ────────────────────────────────────────────────────────

/// Process-local repository.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<UserMap>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.users).is_empty()
    }
}

impl UserRepository for MemoryUserRepository {
    fn find_by_account_id(&self, account_id: i64) -> Result<Option<DashboardUser>, CoreError> {
        Ok(lock(&self.users).get(&account_id).cloned())
    }

    fn create(&self, account_id: i64) -> Result<DashboardUser, CoreError> {
        insert_new(&mut lock(&self.users), account_id)
    }

    fn save(&self, user: &DashboardUser) -> Result<(), CoreError> {
        replace_existing(&mut lock(&self.users), user)
    }
}

// ── JSON file ────────────────────────────────────────────────────────

/// Repository backed by a single JSON document.
///
/// The whole document is rewritten on every change (write to a sibling
/// temp file, then rename), so a crash never leaves a half-written file.
#[derive(Debug)]
pub struct FileUserRepository {
    path: PathBuf,
    users: Mutex<UserMap>,
}

impl FileUserRepository {
    /// Open the document at `path`. A missing file is an empty repository.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let users = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => UserMap::new(),
            Ok(content) => {
                let list: Vec<DashboardUser> = serde_json::from_str(&content)?;
                list.into_iter().map(|u| (u.account_id(), u)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => UserMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), users = users.len(), "opened dashboard store");
        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }

    fn flush(&self, users: &UserMap) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let list: Vec<&DashboardUser> = users.values().collect();
        let json = serde_json::to_string_pretty(&list)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl UserRepository for FileUserRepository {
    fn find_by_account_id(&self, account_id: i64) -> Result<Option<DashboardUser>, CoreError> {
        Ok(lock(&self.users).get(&account_id).cloned())
    }

    fn create(&self, account_id: i64) -> Result<DashboardUser, CoreError> {
        let mut users = lock(&self.users);
        let user = insert_new(&mut users, account_id)?;
        if let Err(e) = self.flush(&users) {
            users.remove(&account_id);
            return Err(e);
        }
        Ok(user)
    }

    fn save(&self, user: &DashboardUser) -> Result<(), CoreError> {
        let mut users = lock(&self.users);
        replace_existing(&mut users, user)?;
        self.flush(&users)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_create_then_find() {
        let repo = MemoryUserRepository::new();
        assert!(repo.find_by_account_id(4).unwrap().is_none());

        let created = repo.create(4).unwrap();
        assert_eq!(created.account_id(), 4);
        assert_eq!(repo.find_by_account_id(4).unwrap(), Some(created));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn memory_rejects_duplicate_create() {
        let repo = MemoryUserRepository::new();
        repo.create(4).unwrap();
        assert!(matches!(
            repo.create(4),
            Err(CoreError::UserExists { account_id: 4 })
        ));
    }

    #[test]
    fn memory_save_requires_existing_user() {
        let repo = MemoryUserRepository::new();
        let user = DashboardUser::new(8);
        assert!(matches!(
            repo.save(&user),
            Err(CoreError::UserNotFound { account_id: 8 })
        ));
    }

    #[test]
    fn file_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dashboard.json");

        let repo = FileUserRepository::open(&path).unwrap();
        let mut user = repo.create(11).unwrap();
        user.set_dashboard_widgets("loans,search");
        repo.save(&user).unwrap();

        let reopened = FileUserRepository::open(&path).unwrap();
        let loaded = reopened.find_by_account_id(11).unwrap().unwrap();
        assert_eq!(loaded.dashboard_widgets(), "loans,search");
        assert_eq!(loaded, user);
    }

    #[test]
    fn file_missing_document_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let repo = FileUserRepository::open(&path).unwrap();
        assert!(repo.find_by_account_id(1).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn file_rejects_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FileUserRepository::open(&path),
            Err(CoreError::Storage { .. })
        ));
    }
}
