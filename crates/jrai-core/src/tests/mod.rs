mod quiz_tests;

use std::collections::BTreeMap;

use crate::dictionary::{DictionaryStore, SearchOptions};
use crate::storage::MemoryStorage;
use crate::types::WordEntry;

pub(crate) const KEY: &str = "jrai_dictionary_v3";

pub(crate) fn memory_store() -> DictionaryStore {
    DictionaryStore::load(Box::new(MemoryStorage::new()), KEY, SearchOptions::default())
}

pub(crate) fn entries_of(count: usize) -> BTreeMap<String, WordEntry> {
    (0..count)
        .map(|i| WordEntry::new(format!("Jrai{i}"), format!("nghĩa {i}")))
        .map(|entry| (entry.key(), entry))
        .collect()
}
