use jrai_core::quiz::QuizSession;
use jrai_core::{QuestionSide, QuizItem, QuizStatus};
use jrai_types::{AppEvent, CardStatus, QuizCard, Side};
use kanal::AsyncSender;

use crate::state::AppState;

/// Enter the learning tab: a fresh batch replaces the old one
pub async fn handle_draw(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let batch_size = state.config.read().await.quiz.batch_size;

    let cards = {
        let store = state.store.lock().await;
        let session = QuizSession::draw(store.entries(), batch_size, &mut rand::rng());
        let cards = quiz_cards(&session);
        *state.quiz.lock().await = session;
        cards
    };

    if cards.is_empty() {
        app_to_ui_tx
            .send(AppEvent::Notice("The dictionary is empty, add some words first".to_string()))
            .await?;
        return Ok(());
    }

    app_to_ui_tx.send(AppEvent::ShowQuiz(cards)).await?;
    Ok(())
}

pub async fn handle_start_test(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let event = {
        let mut session = state.quiz.lock().await;
        if session.is_empty() {
            AppEvent::Notice("Draw a batch with 'learn' first".to_string())
        } else {
            session.start_test(&mut rand::rng());
            AppEvent::ShowQuiz(quiz_cards(&session))
        }
    };

    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_answer(
    state: &AppState,
    index: usize,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let accepted = state.quiz.lock().await.answer(index, &text);
    if !accepted {
        app_to_ui_tx
            .send(AppEvent::Notice(format!("Card {} is not being tested", index + 1)))
            .await?;
    }
    Ok(())
}

pub async fn handle_check(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (cards, score) = {
        let mut session = state.quiz.lock().await;
        session.grade();
        (quiz_cards(&session), session.score())
    };

    let (correct, total) = score;
    if total == 0 {
        app_to_ui_tx
            .send(AppEvent::Notice("Start a test with 'test' first".to_string()))
            .await?;
        return Ok(());
    }

    app_to_ui_tx.send(AppEvent::ShowQuiz(cards)).await?;
    app_to_ui_tx
        .send(AppEvent::Notice(format!("{correct}/{total} correct")))
        .await?;
    Ok(())
}

pub fn quiz_cards(session: &QuizSession) -> Vec<QuizCard> {
    session
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| quiz_card(index, item))
        .collect()
}

fn quiz_card(index: usize, item: &QuizItem) -> QuizCard {
    QuizCard {
        index,
        jrai: item.entry.headword_jrai.clone(),
        viet: item.entry.gloss_viet.clone(),
        question: item.is_testing.then(|| match item.question_side {
            QuestionSide::Jrai => Side::Jrai,
            QuestionSide::Viet => Side::Viet,
        }),
        user_input: item.user_input.clone(),
        status: match item.status {
            QuizStatus::None => CardStatus::Unanswered,
            QuizStatus::Correct => CardStatus::Correct,
            QuizStatus::Wrong => CardStatus::Wrong,
        },
    }
}
