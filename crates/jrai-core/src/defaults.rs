use std::collections::BTreeMap;

use crate::types::WordEntry;

const EMBEDDED_DICTIONARY: &str = include_str!("../data/default_dictionary.json");

/// Load the compiled-in default dictionary, re-keyed by normalized headword
pub fn default_entries() -> BTreeMap<String, WordEntry> {
    match serde_json::from_str::<BTreeMap<String, WordEntry>>(EMBEDDED_DICTIONARY) {
        Ok(entries) => entries
            .into_values()
            .map(|entry| (entry.key(), entry))
            .collect(),
        Err(e) => {
            tracing::error!("Failed to parse embedded dictionary: {}", e);
            BTreeMap::new()
        }
    }
}
