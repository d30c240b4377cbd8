//! JSON file store
//!
//! Directory structure:
//! ```text
//! {data_dir}/
//! ├── lexicon.json        # Array of lexical entries
//! └── users/
//!     └── {user-id}.json  # One ledger per learner
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::{Result, StoreError, UpdateStatus, VocabularyStore};
use crate::ledger::{UserLedger, WordRecord};
use crate::lexicon::LexicalEntry;

/// File-backed store for one process
pub struct JsonFileStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("relearn"))
            .ok_or(StoreError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize storage directories
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.users_dir())?;
        Ok(())
    }

    fn lexicon_path(&self) -> PathBuf {
        self.base_path.join("lexicon.json")
    }

    fn users_dir(&self) -> PathBuf {
        self.base_path.join("users")
    }

    fn ledger_path(&self, user_id: &str) -> Result<PathBuf> {
        validate_user_id(user_id)?;
        Ok(self.users_dir().join(format!("{}.json", user_id)))
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|_| StoreError::Poisoned)
    }

    // ==================== Lexicon ====================

    pub fn list_lexicon(&self) -> Result<Vec<LexicalEntry>> {
        let path = self.lexicon_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let entries: Vec<LexicalEntry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Overwrite the reference lexicon
    pub fn replace_lexicon(&self, entries: &[LexicalEntry]) -> Result<()> {
        let _guard = self.lock()?;
        fs::create_dir_all(&self.base_path)?;
        write_json(&self.lexicon_path(), entries)?;
        log::info!("Stored lexicon with {} entries", entries.len());
        Ok(())
    }

    // ==================== Ledgers ====================

    fn read_ledger(&self, user_id: &str) -> Result<Option<UserLedger>> {
        let path = self.ledger_path(user_id)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let ledger: UserLedger = serde_json::from_str(&content)?;
        check_ledger(&ledger)?;
        Ok(Some(ledger))
    }

    fn write_ledger(&self, ledger: &UserLedger) -> Result<()> {
        let path = self.ledger_path(&ledger.user_id)?;
        check_ledger(ledger)?;
        fs::create_dir_all(self.users_dir())?;
        write_json(&path, ledger)
    }

    fn read_or_new_ledger(&self, user_id: &str) -> Result<UserLedger> {
        Ok(self
            .read_ledger(user_id)?
            .unwrap_or_else(|| UserLedger::new(user_id)))
    }
}

impl VocabularyStore for JsonFileStore {
    fn get_lexical_entry(&self, word: &str) -> Result<Option<LexicalEntry>> {
        Ok(self.list_lexicon()?.into_iter().find(|e| e.word == word))
    }

    fn get_lexical_entries(&self, words: &[String]) -> Result<HashMap<String, LexicalEntry>> {
        let wanted: HashSet<&str> = words.iter().map(String::as_str).collect();
        let mut entries = HashMap::new();
        for entry in self.list_lexicon()? {
            if wanted.contains(entry.word.as_str()) && !entries.contains_key(&entry.word) {
                entries.insert(entry.word.clone(), entry);
            }
        }
        Ok(entries)
    }

    fn get_words_by_level(&self, level: &str) -> Result<Vec<LexicalEntry>> {
        Ok(self
            .list_lexicon()?
            .into_iter()
            .filter(|e| e.level == level)
            .collect())
    }

    fn get_user_ledger(&self, user_id: &str) -> Result<Option<UserLedger>> {
        self.read_ledger(user_id)
    }

    fn upsert_word_record(&self, user_id: &str, record: &WordRecord) -> Result<()> {
        check_record(user_id, record)?;
        let _guard = self.lock()?;
        let mut ledger = self.read_or_new_ledger(user_id)?;
        ledger.upsert(record.clone());
        self.write_ledger(&ledger)
    }

    fn insert_missing_word_records(&self, user_id: &str, records: &[WordRecord]) -> Result<usize> {
        let _guard = self.lock()?;
        let mut ledger = self.read_or_new_ledger(user_id)?;

        let inserted = records
            .iter()
            .filter(|record| ledger.insert_new((*record).clone()).is_ok())
            .count();

        if inserted > 0 {
            self.write_ledger(&ledger)?;
        }
        Ok(inserted)
    }

    fn set_user_level(&self, user_id: &str, level: &str) -> Result<()> {
        let _guard = self.lock()?;
        let mut ledger = self.read_or_new_ledger(user_id)?;
        ledger.level = Some(level.to_string());
        self.write_ledger(&ledger)
    }

    fn atomic_update_word(
        &self,
        user_id: &str,
        word: &str,
        mutation: &mut dyn FnMut(&mut WordRecord),
    ) -> Result<UpdateStatus> {
        let _guard = self.lock()?;
        let mut ledger = match self.read_ledger(user_id)? {
            Some(ledger) => ledger,
            None => return Ok(UpdateStatus::NotFound),
        };

        match ledger.get_mut(word) {
            Some(record) => mutation(record),
            None => return Ok(UpdateStatus::NotFound),
        }

        self.write_ledger(&ledger)?;
        Ok(UpdateStatus::Updated)
    }
}

/// Write to a sibling temp file, then rename over the target
fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn check_record(user_id: &str, record: &WordRecord) -> Result<()> {
    record.validate().map_err(|e| StoreError::InvalidRecord {
        user_id: user_id.to_string(),
        reason: e.to_string(),
    })
}

fn check_ledger(ledger: &UserLedger) -> Result<()> {
    ledger.validate().map_err(|e| StoreError::InvalidRecord {
        user_id: ledger.user_id.clone(),
        reason: e.to_string(),
    })
}

fn validate_user_id(user_id: &str) -> Result<()> {
    let valid = !user_id.is_empty()
        && !user_id.starts_with('.')
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidUserId(user_id.to_string()))
    }
}
