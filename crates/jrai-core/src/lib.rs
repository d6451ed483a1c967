pub mod admin;
pub mod defaults;
pub mod dictionary;
pub mod error;
pub mod preprocess;
pub mod quiz;
pub mod storage;
pub mod types;

pub use dictionary::{DictionaryStore, ImportReport, MatchType, SearchOptions, SearchOutcome};
pub use preprocess::normalize;
pub use types::{QuestionSide, QuizItem, QuizStatus, WordEntry};

#[cfg(test)]
mod tests;
