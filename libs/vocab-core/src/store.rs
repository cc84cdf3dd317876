//! Durable storage of the sentence bank and progress map.
//!
//! Both collections are persisted as whole JSON blobs under two separate
//! keys of a [`KeyValueStore`]. Loading never fails: a missing or corrupt
//! blob falls back to the built-in sample bank or an empty progress map.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{Result, StoreError, ValidationError};
use crate::types::{ProgressMap, Sentence, SentenceBank};

/// Key under which the sentence bank is stored.
pub const BANK_KEY: &str = "dutch_sentences_v1";
/// Key under which the progress map is stored.
pub const PROGRESS_KEY: &str = "dutch_progress_v1";
/// Suggested file name for an exported bank.
pub const EXPORT_FILE_NAME: &str = "sentences.json";

const APP_DIR_NAME: &str = "vocab-trainer";

/// Whole-value string storage, keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError>;
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform's local data directory, or `.` if unknown.
    pub fn in_data_dir() -> Self {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stage the value in a temporary file and rename it over the old one,
    /// so an interrupted write never leaves a truncated blob behind.
    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(value.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

/// The built-in two-sentence sample bank.
pub fn sample_bank() -> SentenceBank {
    vec![
        Sentence {
            sentence: "Ik eet een appel.".to_string(),
            test_words: vec!["appel".to_string()],
            sentence_en: "I eat an apple.".to_string(),
            test_words_en: vec!["apple".to_string()],
            difficulty: "easy".to_string(),
        },
        Sentence {
            sentence: "Zij gaat naar school elke dag.".to_string(),
            test_words: vec!["school".to_string()],
            sentence_en: "She goes to school every day.".to_string(),
            test_words_en: vec!["school".to_string()],
            difficulty: "medium".to_string(),
        },
    ]
}

/// Owns the sentence bank and the backend it is persisted to.
#[derive(Debug)]
pub struct Store<B: KeyValueStore> {
    backend: B,
    bank: SentenceBank,
}

impl<B: KeyValueStore> Store<B> {
    /// Load both collections from `backend`, falling back to defaults.
    pub fn load(backend: B) -> (Self, ProgressMap) {
        let bank = read_blob(&backend, BANK_KEY)
            .and_then(|raw| match parse_bank(&raw) {
                Ok(bank) => Some(bank),
                Err(e) => {
                    warn!(error = %e, "stored bank is corrupt, using sample");
                    None
                }
            })
            .unwrap_or_else(sample_bank);

        let progress = read_blob(&backend, PROGRESS_KEY)
            .and_then(|raw| parse_progress(&raw))
            .unwrap_or_default();

        (Self { backend, bank }, progress)
    }

    pub fn bank(&self) -> &SentenceBank {
        &self.bank
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persist the bank and `progress` under their keys.
    pub fn save(&mut self, progress: &ProgressMap) -> std::result::Result<(), StoreError> {
        let bank = serde_json::to_string(&self.bank)?;
        let progress = serde_json::to_string(progress)?;
        self.backend.set(BANK_KEY, &bank)?;
        self.backend.set(PROGRESS_KEY, &progress)?;
        Ok(())
    }

    /// Replace the bank with sentences parsed from JSON text.
    ///
    /// The bank is left untouched if the text is rejected.
    pub fn replace_bank_from_str(&mut self, text: &str) -> Result<()> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ValidationError::InvalidJson(e.to_string()))?;
        self.replace_bank(value)
    }

    /// Replace the bank with an already-parsed JSON value.
    pub fn replace_bank(&mut self, candidate: Value) -> Result<()> {
        let bank = bank_from_value(candidate)?;
        info!(sentences = bank.len(), "replaced sentence bank");
        self.bank = bank;
        Ok(())
    }

    /// Replace the bank with the built-in sample set.
    pub fn reset_to_sample(&mut self) {
        info!("reset sentence bank to sample data");
        self.bank = sample_bank();
    }

    /// The bank as pretty-printed JSON, ready to be saved as [`EXPORT_FILE_NAME`].
    pub fn export_bank(&self) -> std::result::Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.bank)?)
    }
}

/// Reformat JSON text with two-space indentation.
pub fn pretty_print(text: &str) -> Result<String> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::InvalidJson(e.to_string()))?;
    serde_json::to_string_pretty(&value).map_err(|e| ValidationError::InvalidJson(e.to_string()))
}

fn read_blob<B: KeyValueStore>(backend: &B, key: &str) -> Option<String> {
    match backend.get(key) {
        Ok(Some(raw)) if !raw.is_empty() => Some(raw),
        Ok(_) => None,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored value");
            None
        }
    }
}

fn parse_bank(raw: &str) -> Result<SentenceBank> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ValidationError::InvalidJson(e.to_string()))?;
    bank_from_value(value)
}

fn parse_progress(raw: &str) -> Option<ProgressMap> {
    match serde_json::from_str::<Option<ProgressMap>>(raw) {
        Ok(progress) => progress,
        Err(e) => {
            warn!(error = %e, "stored progress is corrupt, starting empty");
            None
        }
    }
}

fn bank_from_value(value: Value) -> Result<SentenceBank> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::NotASequence {
                found: json_kind(&other),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Sentence>(item).map_err(|e| ValidationError::InvalidEntry {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
