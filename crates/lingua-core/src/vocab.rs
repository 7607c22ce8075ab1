use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use lingua_types::VocabEntry;

use crate::storage::{KeyValueStore, StorageError};

pub const VOCAB_KEY: &str = "lb_vocab";
pub const DEFAULT_CAPACITY: usize = 500;
pub const CSV_HEADER: &str = "mot;définition;traduction;langue;date";

/// Learned words, most recent first, bounded
pub struct VocabStore {
    storage: Box<dyn KeyValueStore>,
    capacity: usize,
    write_lock: Mutex<()>,
}

impl VocabStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_capacity(storage, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(storage: Box<dyn KeyValueStore>, capacity: usize) -> Self {
        Self {
            storage,
            capacity: capacity.max(1),
            write_lock: Mutex::new(()),
        }
    }

    /// Save a looked-up word. Returns true when the (word, lang) pair is new.
    pub fn save(&self, word: &str, definition: &str, translation: &str, lang: &str) -> bool {
        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.save_at(word, definition, translation, lang, &date)
    }

    pub fn save_at(
        &self,
        word: &str,
        definition: &str,
        translation: &str,
        lang: &str,
        date: &str,
    ) -> bool {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut vocab = self.load();
        let key = word.to_lowercase();

        let entry = VocabEntry {
            word: key.clone(),
            definition: definition.to_string(),
            translation: translation.to_string(),
            lang: lang.to_string(),
            date: date.to_string(),
        };

        let existing = vocab.iter().position(|e| e.word == key && e.lang == lang);
        let is_new = existing.is_none();

        match existing {
            Some(idx) => vocab[idx] = entry,
            None => {
                vocab.insert(0, entry);
                vocab.truncate(self.capacity);
            }
        }

        self.persist(&vocab);
        is_new
    }

    /// Entries in store order; empty when storage is missing or unreadable
    pub fn load(&self) -> Vec<VocabEntry> {
        let raw = match self.storage.get(VOCAB_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read vocabulary: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable vocabulary: {}", e);
            Vec::new()
        })
    }

    pub fn count(&self) -> usize {
        self.load().len()
    }

    /// Anki-compatible CSV, empty string for an empty store
    pub fn export_csv(&self) -> String {
        to_csv(&self.load())
    }

    fn persist(&self, vocab: &[VocabEntry]) {
        let result = serde_json::to_string(vocab)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(VOCAB_KEY, &json));

        if let Err(e) = result {
            tracing::debug!("Vocabulary not persisted: {}", e);
        }
    }
}

pub fn to_csv(vocab: &[VocabEntry]) -> String {
    if vocab.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(vocab.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for e in vocab {
        let row = [&e.word, &e.definition, &e.translation, &e.lang, &e.date]
            .iter()
            .map(|v| quote(v))
            .collect::<Vec<_>>()
            .join(";");
        lines.push(row);
    }

    lines.join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
