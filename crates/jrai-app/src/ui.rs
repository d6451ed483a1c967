use jrai_types::{AppEvent, CardStatus, QuizCard, SearchView, Side};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::command::{HELP, Shell, ShellAction};

const PROMPT_HINT: &str = "Jrai dictionary. Type 'help' for commands.";

/// Terminal shell: stdin lines become app events, app events become output
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let lines = stdin_lines();
    let mut shell = Shell::default();

    println!("{PROMPT_HINT}");

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Ok(line) = line else {
                    tracing::info!("[UI] stdin closed");
                    ui_to_app_tx.send(AppEvent::Shutdown).await?;
                    break;
                };
                match shell.handle_line(&line) {
                    ShellAction::Send(event) => ui_to_app_tx.send(event).await?,
                    ShellAction::Print(text) => println!("{text}"),
                    ShellAction::Ignore => {}
                }
            }
            event = app_to_ui_rx.recv() => {
                if let Some(text) = render(&event?) {
                    println!("{text}");
                }
            }
            _ = cancel.cancelled() => break,
        }
    }

    Ok(())
}

/// Stdin is read on a plain thread so shutdown never waits on a pending read
fn stdin_lines() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded_async(16);
    let tx = tx.to_sync();

    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    rx
}

pub fn render(event: &AppEvent) -> Option<String> {
    let text = match event {
        AppEvent::ShowSearch(SearchView::EmptyQuery) => {
            "Type a Jrai word or its Vietnamese meaning to search.".to_string()
        }
        AppEvent::ShowSearch(SearchView::NoMatch(query)) => {
            format!("No word matches '{query}'.")
        }
        AppEvent::ShowSearch(SearchView::Results(results)) => results
            .iter()
            .map(|result| {
                let audio = if result.has_audio { "  [audio]" } else { "" };
                format!("{} = {}{}", result.jrai, result.viet, audio)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        AppEvent::ShowQuiz(cards) => cards.iter().map(render_card).collect::<Vec<_>>().join("\n"),
        AppEvent::ShowExplanation { headword, text } => format!("{headword}:\n{text}"),
        AppEvent::Notice(text) => text.clone(),
        _ => return None,
    };

    Some(text)
}

fn render_card(card: &QuizCard) -> String {
    let number = card.index + 1;
    let Some(question) = card.question else {
        return format!("{number}. {} = {}", card.jrai, card.viet);
    };

    let (shown, hidden) = match question {
        Side::Jrai => (&card.jrai, &card.viet),
        Side::Viet => (&card.viet, &card.jrai),
    };

    match card.status {
        CardStatus::Unanswered if card.user_input.is_empty() => format!("{number}. {shown} = ?"),
        CardStatus::Unanswered => format!("{number}. {shown} = {}", card.user_input),
        CardStatus::Correct => format!("{number}. {shown} = {}  ✓", card.user_input),
        CardStatus::Wrong => format!("{number}. {shown} = {}  ✗ ({hidden})", card.user_input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jrai_types::DisplayResult;

    fn card(question: Option<Side>, input: &str, status: CardStatus) -> QuizCard {
        QuizCard {
            index: 0,
            jrai: "Aba".to_string(),
            viet: "con ba ba".to_string(),
            question,
            user_input: input.to_string(),
            status,
        }
    }

    #[test]
    fn empty_query_and_no_match_differ() {
        let empty = render(&AppEvent::ShowSearch(SearchView::EmptyQuery)).unwrap();
        let none = render(&AppEvent::ShowSearch(SearchView::NoMatch("xyz".into()))).unwrap();
        assert_ne!(empty, none);
        assert!(none.contains("xyz"));
    }

    #[test]
    fn results_mark_stored_audio() {
        let view = SearchView::Results(vec![DisplayResult {
            jrai: "Aba".into(),
            viet: "con ba ba".into(),
            has_audio: true,
        }]);
        assert_eq!(render(&AppEvent::ShowSearch(view)).unwrap(), "Aba = con ba ba  [audio]");
    }

    #[test]
    fn cards_hide_the_answer_side() {
        assert_eq!(render_card(&card(None, "", CardStatus::Unanswered)), "1. Aba = con ba ba");
        assert_eq!(
            render_card(&card(Some(Side::Jrai), "", CardStatus::Unanswered)),
            "1. Aba = ?"
        );
        assert_eq!(
            render_card(&card(Some(Side::Viet), "", CardStatus::Unanswered)),
            "1. con ba ba = ?"
        );
        assert_eq!(
            render_card(&card(Some(Side::Jrai), "con baba", CardStatus::Wrong)),
            "1. Aba = con baba  ✗ (con ba ba)"
        );
    }

    #[test]
    fn shell_requests_are_not_rendered() {
        assert!(render(&AppEvent::DrawQuiz).is_none());
        assert!(HELP.contains("search"));
    }
}
