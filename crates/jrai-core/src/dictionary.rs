use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::default_entries;
use crate::error::StoreError;
use crate::preprocess::normalize;
use crate::storage::Storage;
use crate::types::WordEntry;

pub type Entries = BTreeMap<String, WordEntry>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub max_results: usize,
    pub match_type: MatchType,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 50,
            match_type: MatchType::Exact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    #[default]
    Exact,
    Prefix,
    Suffix,
    Contains,
}

impl MatchType {
    /// Both arguments are expected to be normalized already
    fn matches(self, candidate: &str, query: &str) -> bool {
        match self {
            MatchType::Exact => candidate == query,
            MatchType::Prefix => candidate.starts_with(query),
            MatchType::Suffix => candidate.ends_with(query),
            MatchType::Contains => candidate.contains(query),
        }
    }
}

/// Result of a dictionary search.
///
/// `EmptyQuery` and `NoMatch` are rendered differently by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    EmptyQuery,
    NoMatch,
    Found(Vec<WordEntry>),
}

impl SearchOutcome {
    pub fn entries(&self) -> &[WordEntry] {
        match self {
            SearchOutcome::Found(entries) => entries,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Object key or array index of the record in the imported document
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub rejected: Vec<RejectedRecord>,
}

/// Owner of the dictionary; every mutation is persisted before returning
pub struct DictionaryStore {
    entries: Entries,
    defaults: Entries,
    storage: Box<dyn Storage>,
    storage_key: String,
    options: SearchOptions,
}

impl DictionaryStore {
    /// Restore the persisted dictionary, falling back to the defaults on any failure
    pub fn load(
        storage: Box<dyn Storage>,
        storage_key: impl Into<String>,
        options: SearchOptions,
    ) -> Self {
        let storage_key = storage_key.into();
        let defaults = default_entries();

        let entries = match storage.read(&storage_key) {
            Ok(Some(json)) => match serde_json::from_str::<Entries>(&json) {
                Ok(entries) => {
                    tracing::info!("Loaded {} entries from '{}'", entries.len(), storage_key);
                    entries
                }
                Err(e) => {
                    tracing::warn!("Stored dictionary is unreadable ({}), using defaults", e);
                    defaults.clone()
                }
            },
            Ok(None) => {
                tracing::info!("No dictionary stored under '{}', using defaults", storage_key);
                defaults.clone()
            }
            Err(e) => {
                tracing::warn!("Failed to read stored dictionary: {}, using defaults", e);
                defaults.clone()
            }
        };

        Self {
            entries,
            defaults,
            storage,
            storage_key,
            options,
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        self.persist(&self.entries)
    }

    /// Write `entries` under the storage key; memory is not touched
    fn persist(&self, entries: &Entries) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        self.storage.write(&self.storage_key, &json)?;
        tracing::debug!("Saved {} entries under '{}'", entries.len(), self.storage_key);
        Ok(())
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&WordEntry> {
        self.entries.get(&normalize(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn search(&self, query: &str) -> SearchOutcome {
        let query = normalize(query);
        if query.is_empty() {
            return SearchOutcome::EmptyQuery;
        }

        let match_type = self.options.match_type;
        let found: Vec<WordEntry> = self
            .entries
            .values()
            .filter(|entry| {
                match_type.matches(&normalize(&entry.headword_jrai), &query)
                    || match_type.matches(&normalize(&entry.gloss_viet), &query)
            })
            .take(self.options.max_results)
            .cloned()
            .collect();

        if found.is_empty() {
            SearchOutcome::NoMatch
        } else {
            SearchOutcome::Found(found)
        }
    }

    /// Insert or replace the entry keyed by its normalized headword.
    ///
    /// If the write fails the previous entry, if any, is restored.
    pub fn add(&mut self, entry: WordEntry) -> Result<(), StoreError> {
        let entry = validate_entry(entry).map_err(StoreError::InvalidEntry)?;
        let key = entry.key();

        let previous = self.entries.insert(key.clone(), entry);
        if let Err(e) = self.save() {
            match previous {
                Some(old) => self.entries.insert(key, old),
                None => self.entries.remove(&key),
            };
            return Err(e);
        }

        if previous.is_some() {
            tracing::info!("Replaced entry '{}'", key);
        } else {
            tracing::info!("Added entry '{}'", key);
        }
        Ok(())
    }

    /// Replace the whole dictionary with the records of `json`.
    ///
    /// Accepts an object mapping or an array of records. Invalid records are
    /// skipped and reported; a document that does not parse, or has no valid
    /// record at all, or that cannot be persisted, leaves the dictionary untouched.
    pub fn import_from(&mut self, json: &str) -> Result<ImportReport, StoreError> {
        let document: Value = serde_json::from_str(json)?;

        let records: Vec<(String, Value)> = match document {
            Value::Object(map) => map.into_iter().collect(),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value))
                .collect(),
            other => {
                return Err(StoreError::InvalidFormat(format!(
                    "expected an object or array of entries, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let mut imported = Entries::new();
        let mut rejected = Vec::new();

        for (id, value) in records {
            match parse_record(value) {
                Ok(entry) => {
                    imported.insert(entry.key(), entry);
                }
                Err(reason) => {
                    tracing::warn!("Rejected import record '{}': {}", id, reason);
                    rejected.push(RejectedRecord { id, reason });
                }
            }
        }

        if imported.is_empty() {
            return Err(StoreError::InvalidFormat(
                "document contains no valid entries".to_string(),
            ));
        }

        let report = ImportReport {
            imported: imported.len(),
            rejected,
        };
        self.persist(&imported)?;
        self.entries = imported;

        tracing::info!(
            "Imported {} entries ({} rejected)",
            report.imported,
            report.rejected.len()
        );
        Ok(report)
    }

    /// Serialize the entries accepted by `predicate` as a dictionary document
    pub fn export_subset<F>(&self, predicate: F) -> Result<String, StoreError>
    where
        F: Fn(&str, &WordEntry) -> bool,
    {
        let subset: BTreeMap<&String, &WordEntry> = self
            .entries
            .iter()
            .filter(|(key, entry)| predicate(key, entry))
            .collect();

        Ok(serde_json::to_string_pretty(&subset)?)
    }

    pub fn export_all(&self) -> Result<String, StoreError> {
        self.export_subset(|_, _| true)
    }

    /// Entries added or edited locally, i.e. not identical to a default entry
    pub fn export_additions(&self) -> Result<String, StoreError> {
        self.export_subset(|key, entry| !self.is_default(key, entry))
    }

    pub fn is_default(&self, key: &str, entry: &WordEntry) -> bool {
        self.defaults.get(key) == Some(entry)
    }

    /// Restore the default dictionary. Does nothing unless `confirmed`.
    pub fn reset(&mut self, confirmed: bool) -> Result<bool, StoreError> {
        if !confirmed {
            tracing::debug!("Reset not confirmed, keeping {} entries", self.entries.len());
            return Ok(false);
        }

        self.persist(&self.defaults)?;
        self.entries = self.defaults.clone();
        tracing::info!("Dictionary reset to {} default entries", self.entries.len());
        Ok(true)
    }
}

/// `data:` URI for a client-side download of an exported document
pub fn data_uri(json: &str) -> String {
    format!("data:text/json;charset=utf-8,{}", urlencoding::encode(json))
}

fn parse_record(value: Value) -> Result<WordEntry, String> {
    if !value.is_object() {
        return Err(format!("expected an object, got {}", json_type_name(&value)));
    }
    let entry: WordEntry = serde_json::from_value(value).map_err(|e| e.to_string())?;
    validate_entry(entry)
}

fn validate_entry(entry: WordEntry) -> Result<WordEntry, String> {
    if normalize(&entry.headword_jrai).is_empty() {
        return Err("headword is empty".to_string());
    }
    if entry.gloss_viet.trim().is_empty() {
        return Err("gloss is empty".to_string());
    }
    if entry.audio.as_deref().is_some_and(|audio| audio.trim().is_empty()) {
        return Ok(WordEntry { audio: None, ..entry });
    }
    Ok(entry)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
