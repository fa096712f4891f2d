use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{
    LogEntry, Paragraph, RawAnnotation, RawLogEntry, StyleAnnotation, validate_annotations,
};

/// Local time in ISO 8601 without offset, e.g. `2024-05-01T09:30:00.123456`.
fn now_iso() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Extracted content plus the styles applied to it and the history of
/// edits, as stored between the extract and render steps.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub doc_id: String,
    pub original_filename: String,
    pub created_at: String,
    pub updated_at: String,
    pub content: Vec<Paragraph>,
    pub styles: Vec<StyleAnnotation>,
    pub enrichment_log: Vec<LogEntry>,
    /// Fields written by other tools, kept so a load/save cycle is lossless.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    doc_id: String,
    #[serde(default)]
    original_filename: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    updated_at: String,
    content: Vec<Paragraph>,
    #[serde(default)]
    styles: Vec<RawAnnotation>,
    #[serde(default)]
    enrichment_log: Vec<RawLogEntry>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl DocumentRecord {
    /// A fresh record with a random id and both timestamps set to now.
    pub fn new(original_filename: impl Into<String>, content: Vec<Paragraph>) -> Self {
        let now = now_iso();
        Self {
            doc_id: uuid::Uuid::new_v4().to_string(),
            original_filename: original_filename.into(),
            created_at: now.clone(),
            updated_at: now,
            content,
            styles: Vec::new(),
            enrichment_log: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let raw: RawRecord = serde_json::from_str(json)?;
        let enrichment_log = raw
            .enrichment_log
            .into_iter()
            .map(RawLogEntry::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            doc_id: raw.doc_id,
            original_filename: raw.original_filename,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            content: raw.content,
            styles: validate_annotations(raw.styles)?,
            enrichment_log,
            extra: raw.extra,
        })
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Stamps `updated_at` and writes the record as pretty JSON.
    pub fn save(&mut self, path: &Path) -> Result<(), Error> {
        self.updated_at = now_iso();
        std::fs::write(path, self.to_json()?)?;
        log::debug!("Saved record {} to {}", self.doc_id, path.display());
        Ok(())
    }

    /// Replaces the stored styles and persists the record to `path`.
    pub fn replace_styles(&mut self, styles: Vec<StyleAnnotation>, path: &Path) -> Result<(), Error> {
        self.styles = styles;
        self.save(path)
    }

    /// Appends one log entry, returning the new log length.
    pub fn append_log(&mut self, entry: LogEntry) -> usize {
        self.enrichment_log.push(entry);
        self.enrichment_log.len()
    }
}

/// Parses a JSON array of annotations, rejecting unknown style types.
pub fn parse_annotations(json: &str) -> Result<Vec<StyleAnnotation>, Error> {
    let raw: Vec<RawAnnotation> = serde_json::from_str(json)?;
    validate_annotations(raw)
}

pub fn load_annotations(path: &Path) -> Result<Vec<StyleAnnotation>, Error> {
    parse_annotations(&std::fs::read_to_string(path)?)
}

/// Parses a single log entry object and checks its action.
pub fn parse_log_entry(json: &str) -> Result<LogEntry, Error> {
    let raw: RawLogEntry = serde_json::from_str(json)?;
    raw.validate()
}
