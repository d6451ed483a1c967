use serde::{Deserialize, Serialize};

use crate::preprocess::normalize;

/// One dictionary record: a Jrai headword and its Vietnamese gloss
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    #[serde(rename = "jrai", alias = "headword_jrai")]
    pub headword_jrai: String,
    #[serde(rename = "viet", alias = "gloss_viet")]
    pub gloss_viet: String,
    /// Pre-recorded pronunciation, base64 PCM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

impl WordEntry {
    pub fn new(headword_jrai: impl Into<String>, gloss_viet: impl Into<String>) -> Self {
        Self {
            headword_jrai: headword_jrai.into(),
            gloss_viet: gloss_viet.into(),
            audio: None,
        }
    }

    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    /// Dictionary key of this entry
    pub fn key(&self) -> String {
        normalize(&self.headword_jrai)
    }

    pub fn side(&self, side: QuestionSide) -> &str {
        match side {
            QuestionSide::Jrai => &self.headword_jrai,
            QuestionSide::Viet => &self.gloss_viet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionSide {
    Jrai,
    Viet,
}

impl QuestionSide {
    pub fn opposite(self) -> Self {
        match self {
            QuestionSide::Jrai => QuestionSide::Viet,
            QuestionSide::Viet => QuestionSide::Jrai,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuizStatus {
    #[default]
    None,
    Correct,
    Wrong,
}

/// A flashcard drawn for the learning tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    pub entry: WordEntry,
    pub question_side: QuestionSide,
    pub user_input: String,
    pub status: QuizStatus,
    pub is_testing: bool,
}

impl QuizItem {
    pub fn new(entry: WordEntry) -> Self {
        Self {
            entry,
            question_side: QuestionSide::Jrai,
            user_input: String::new(),
            status: QuizStatus::None,
            is_testing: false,
        }
    }

    /// Text shown to the learner while testing
    pub fn question(&self) -> &str {
        self.entry.side(self.question_side)
    }

    /// Text the learner has to type back
    pub fn expected_answer(&self) -> &str {
        self.entry.side(self.question_side.opposite())
    }

    pub fn is_answer_correct(&self) -> bool {
        normalize(&self.user_input) == normalize(self.expected_answer())
    }
}
