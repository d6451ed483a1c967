use rand::Rng;
use rand::seq::SliceRandom;

use crate::dictionary::Entries;
use crate::types::{QuestionSide, QuizItem, QuizStatus};

pub const DEFAULT_BATCH_SIZE: usize = 6;

/// Uniformly sample `n` distinct entries, or all of them when fewer exist
pub fn draw_batch<R>(entries: &Entries, n: usize, rng: &mut R) -> Vec<QuizItem>
where
    R: Rng + ?Sized,
{
    let mut keys: Vec<&String> = entries.keys().collect();
    keys.shuffle(rng);

    keys.into_iter()
        .take(n)
        .filter_map(|key| entries.get(key))
        .map(|entry| QuizItem::new(entry.clone()))
        .collect()
}

/// Hide one side of every card, chosen independently per card
pub fn start_test<R>(batch: &mut [QuizItem], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for item in batch.iter_mut() {
        item.question_side = if rng.random_bool(0.5) {
            QuestionSide::Jrai
        } else {
            QuestionSide::Viet
        };
        item.user_input.clear();
        item.status = QuizStatus::None;
        item.is_testing = true;
    }
}

pub fn grade(batch: &mut [QuizItem]) {
    for item in batch.iter_mut().filter(|item| item.is_testing) {
        item.status = if item.is_answer_correct() {
            QuizStatus::Correct
        } else {
            QuizStatus::Wrong
        };
    }
}

/// The learning tab's current batch
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    items: Vec<QuizItem>,
}

impl QuizSession {
    /// Start a session on a fresh batch; previous grading state is gone
    pub fn draw<R>(entries: &Entries, n: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            items: draw_batch(entries, n, rng),
        }
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_testing(&self) -> bool {
        self.items.iter().any(|item| item.is_testing)
    }

    pub fn start_test<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        start_test(&mut self.items, rng);
    }

    /// Record the learner's answer; false if `index` is out of range or not testing
    pub fn answer(&mut self, index: usize, input: &str) -> bool {
        match self.items.get_mut(index) {
            Some(item) if item.is_testing => {
                item.user_input = input.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn grade(&mut self) {
        grade(&mut self.items);
    }

    /// (correct, graded) over the testing items
    pub fn score(&self) -> (usize, usize) {
        let graded = self
            .items
            .iter()
            .filter(|item| item.is_testing && item.status != QuizStatus::None);
        let (mut correct, mut total) = (0, 0);
        for item in graded {
            total += 1;
            if item.status == QuizStatus::Correct {
                correct += 1;
            }
        }
        (correct, total)
    }
}
