// File: src/persistence.rs
use crate::config::RuleConfig;
use crate::error::Result;
use crate::record::SurahRecord;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes the record as pretty JSON, atomically: a temp file in the target
/// directory is persisted over `path` only once fully written.
pub fn save_to_disk(record: &SurahRecord, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp_file.persist(path)?;
    tracing::info!(path = %path.display(), ayahs = record.ayahs.len(), "saved annotations");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<SurahRecord> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let record: SurahRecord = serde_json::from_reader(reader)?;
    Ok(record)
}

/// Loads and validates a rule config. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<RuleConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        return Ok(RuleConfig::default());
    }

    let file = File::open(path)?;
    let config: RuleConfig = serde_json::from_reader(BufReader::new(file))?;
    config.validate()?;

    tracing::info!(
        path = %path.display(),
        triggers = config.trigger_letters.len(),
        unmarked_cluster = config.quiescence.unmarked_cluster,
        "loaded rule config"
    );
    Ok(config)
}
