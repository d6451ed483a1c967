use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::entries_of;
use crate::quiz::{DEFAULT_BATCH_SIZE, QuizSession, draw_batch, grade, start_test};
use crate::types::{QuestionSide, QuizItem, QuizStatus, WordEntry};

fn testing_item(side: QuestionSide, input: &str) -> QuizItem {
    let mut item = QuizItem::new(WordEntry::new("Aba", "con ba ba"));
    item.question_side = side;
    item.is_testing = true;
    item.user_input = input.to_string();
    item
}

#[test]
fn draws_six_distinct_entries_from_twenty() {
    let entries = entries_of(20);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let batch = draw_batch(&entries, DEFAULT_BATCH_SIZE, &mut rng);
        assert_eq!(batch.len(), 6);
        let keys: HashSet<String> = batch.iter().map(|item| item.entry.key()).collect();
        assert_eq!(keys.len(), 6);
    }
}

#[test]
fn draws_everything_from_a_small_dictionary() {
    let entries = entries_of(3);
    let batch = draw_batch(&entries, 6, &mut StdRng::seed_from_u64(1));
    assert_eq!(batch.len(), 3);
    assert!(draw_batch(&entries_of(0), 6, &mut StdRng::seed_from_u64(1)).is_empty());
}

#[test]
fn drawn_items_start_in_display_mode() {
    let batch = draw_batch(&entries_of(10), 6, &mut StdRng::seed_from_u64(3));
    assert!(batch.iter().all(|item| !item.is_testing && item.status == QuizStatus::None));
}

#[test]
fn sampling_reaches_every_entry() {
    let entries = entries_of(20);
    let mut rng = StdRng::seed_from_u64(11);
    let mut seen = HashSet::new();
    for _ in 0..200 {
        for item in draw_batch(&entries, 6, &mut rng) {
            seen.insert(item.entry.key());
        }
    }
    assert_eq!(seen.len(), 20);
}

#[test]
fn start_test_resets_items_and_picks_both_sides() {
    let mut batch = draw_batch(&entries_of(20), 20, &mut StdRng::seed_from_u64(5));
    batch[0].user_input = "stale".to_string();
    batch[0].status = QuizStatus::Wrong;

    start_test(&mut batch, &mut StdRng::seed_from_u64(9));

    assert!(batch.iter().all(|item| item.is_testing));
    assert!(batch.iter().all(|item| item.user_input.is_empty()));
    assert!(batch.iter().all(|item| item.status == QuizStatus::None));
    let sides: HashSet<_> = batch.iter().map(|item| item.question_side).collect();
    assert_eq!(sides.len(), 2);
}

#[test]
fn grading_ignores_case_and_tones() {
    let mut batch = vec![
        testing_item(QuestionSide::Jrai, "Con Ba Ba"),
        testing_item(QuestionSide::Jrai, "con baba"),
        testing_item(QuestionSide::Viet, "  aba "),
        testing_item(QuestionSide::Viet, "con ba ba"),
    ];
    grade(&mut batch);

    let statuses: Vec<QuizStatus> = batch.iter().map(|item| item.status).collect();
    assert_eq!(
        statuses,
        [QuizStatus::Correct, QuizStatus::Wrong, QuizStatus::Correct, QuizStatus::Wrong]
    );
}

#[test]
fn grading_leaves_display_items_alone() {
    let mut item = QuizItem::new(WordEntry::new("Aba", "con ba ba"));
    item.user_input = "con ba ba".to_string();
    let mut batch = vec![item];
    grade(&mut batch);
    assert_eq!(batch[0].status, QuizStatus::None);
}

#[test]
fn session_answers_and_scores() {
    let entries = entries_of(4);
    let mut rng = StdRng::seed_from_u64(21);
    let mut session = QuizSession::draw(&entries, 6, &mut rng);
    assert!(!session.answer(0, "too early"));

    session.start_test(&mut rng);
    assert!(session.is_testing());
    let answer = session.items()[0].expected_answer().to_uppercase();
    assert!(session.answer(0, &answer));
    assert!(session.answer(1, "sai"));
    assert!(!session.answer(10, "out of range"));

    session.grade();
    assert_eq!(session.items()[0].status, QuizStatus::Correct);
    assert_eq!(session.score(), (1, 4));
}

#[test]
fn redrawing_discards_grading_state() {
    let entries = entries_of(4);
    let mut rng = StdRng::seed_from_u64(2);
    let mut session = QuizSession::draw(&entries, 6, &mut rng);
    session.start_test(&mut rng);
    session.grade();
    assert_eq!(session.score().1, 4);

    let session = QuizSession::draw(&entries, 6, &mut rng);
    assert!(!session.is_testing());
    assert_eq!(session.score(), (0, 0));
}
