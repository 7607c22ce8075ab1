use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use lingua_core::vocab::VocabStore;

const BOM: &str = "\u{feff}";

pub fn file_name(date: NaiveDate) -> String {
    format!("linguabridge-vocab-{}.csv", date.format("%Y-%m-%d"))
}

/// Write the vocabulary as a BOM-prefixed CSV into `dir`
pub fn write_export(vocab: &VocabStore, dir: &Path) -> anyhow::Result<PathBuf> {
    let csv = vocab.export_csv();
    if csv.is_empty() {
        anyhow::bail!("Carnet vide");
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(file_name(Utc::now().date_naive()));
    fs::write(&path, format!("{BOM}{csv}"))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Exported {} words to {}", vocab.count(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::storage::MemoryStore;

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(file_name(date), "linguabridge-vocab-2026-03-07.csv");
    }

    #[test]
    fn test_empty_store_is_refused() {
        let vocab = VocabStore::new(Box::new(MemoryStore::new()));
        let err = write_export(&vocab, &std::env::temp_dir()).unwrap_err();
        assert_eq!(err.to_string(), "Carnet vide");
    }

    #[test]
    fn test_export_has_bom() {
        let dir = std::env::temp_dir().join(format!("lingua-export-{}", std::process::id()));
        let vocab = VocabStore::new(Box::new(MemoryStore::new()));
        vocab.save("Bonjour", "Un salut.", "Hello", "en");

        let path = write_export(&vocab, &dir).unwrap();
        let data = fs::read_to_string(&path).unwrap();
        assert!(data.starts_with('\u{feff}'));
        assert!(data.contains("mot;définition;traduction;langue;date"));
        assert!(data.contains("\"bonjour\""));

        let _ = fs::remove_dir_all(dir);
    }
}
