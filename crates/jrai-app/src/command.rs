use jrai_types::{AppEvent, ExportScope, ExportTarget, Side};

pub const HELP: &str = "\
Commands:
  search <word>                  look up a Jrai word or Vietnamese meaning
  add <jrai> = <viet>            add or replace a word
  learn                          draw a new batch of flashcards
  test                           hide one side of every card
  answer <n> <text>              answer card n
  check                          grade the answers
  speak <jrai|viet> <text>       pronounce a text
  play <word>                    pronounce a dictionary word
  explain <word>                 ask the AI to explain a word
  import <file>                  replace the dictionary with a JSON file
  export <secret> <file|-> [all] export local additions (or everything)
  reset                          restore the default word list
  help                           show this help
  quit                           leave";

#[derive(Debug, Clone)]
pub enum ShellAction {
    Send(AppEvent),
    Print(String),
    Ignore,
}

/// Turns shell input into app events.
///
/// `reset` asks for confirmation; the next line answers it.
#[derive(Default)]
pub struct Shell {
    pending_reset: bool,
}

impl Shell {
    pub fn handle_line(&mut self, line: &str) -> ShellAction {
        let line = line.trim();

        if self.pending_reset {
            self.pending_reset = false;
            let confirmed = line.eq_ignore_ascii_case("yes");
            return ShellAction::Send(AppEvent::ResetDictionary { confirmed });
        }

        if line.is_empty() {
            return ShellAction::Ignore;
        }

        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(command, rest)| (command, rest.trim()))
            .unwrap_or((line, ""));

        match parse_command(command, rest) {
            Ok(Command::Event(event)) => ShellAction::Send(event),
            Ok(Command::Help) => ShellAction::Print(HELP.to_string()),
            Ok(Command::Reset) => {
                self.pending_reset = true;
                ShellAction::Print(
                    "This discards every local change. Type 'yes' to restore the default word list:"
                        .to_string(),
                )
            }
            Err(usage) => ShellAction::Print(usage),
        }
    }
}

enum Command {
    Event(AppEvent),
    Help,
    Reset,
}

fn parse_command(command: &str, rest: &str) -> Result<Command, String> {
    let event = match command.to_lowercase().as_str() {
        "help" | "?" => return Ok(Command::Help),
        "reset" => return Ok(Command::Reset),
        "quit" | "exit" => AppEvent::Shutdown,
        // An empty query is forwarded; the store reports it as such
        "search" | "s" => AppEvent::Search(rest.to_string()),
        "add" => {
            let (jrai, viet) = rest
                .split_once('=')
                .map(|(jrai, viet)| (jrai.trim(), viet.trim()))
                .filter(|(jrai, viet)| !jrai.is_empty() && !viet.is_empty())
                .ok_or("usage: add <jrai> = <viet>")?;
            AppEvent::AddWord {
                jrai: jrai.to_string(),
                viet: viet.to_string(),
            }
        }
        "learn" => AppEvent::DrawQuiz,
        "test" => AppEvent::StartTest,
        "check" => AppEvent::CheckAnswers,
        "answer" | "a" => {
            let (number, text) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            let index = number
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or("usage: answer <n> <text>")?;
            AppEvent::Answer {
                index,
                text: text.trim().to_string(),
            }
        }
        "speak" => {
            let (side, text) = rest
                .split_once(char::is_whitespace)
                .ok_or("usage: speak <jrai|viet> <text>")?;
            let side = match side.to_lowercase().as_str() {
                "jrai" | "j" => Side::Jrai,
                "viet" | "v" => Side::Viet,
                _ => return Err("usage: speak <jrai|viet> <text>".to_string()),
            };
            AppEvent::Speak {
                text: text.trim().to_string(),
                side,
            }
        }
        "play" => AppEvent::PlayEntry {
            headword: required(rest, "usage: play <word>")?,
        },
        "explain" => AppEvent::Explain {
            headword: required(rest, "usage: explain <word>")?,
        },
        "import" => AppEvent::Import {
            path: required(rest, "usage: import <file>")?,
        },
        "export" => parse_export(rest)?,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };

    Ok(Command::Event(event))
}

fn parse_export(rest: &str) -> Result<AppEvent, String> {
    const USAGE: &str = "usage: export <secret> <file|-> [all]";

    let mut parts = rest.split_whitespace();
    let (Some(secret), Some(target)) = (parts.next(), parts.next()) else {
        return Err(USAGE.to_string());
    };
    let scope = match parts.next() {
        None => ExportScope::Additions,
        Some(word) if word.eq_ignore_ascii_case("all") => ExportScope::All,
        Some(_) => return Err(USAGE.to_string()),
    };
    let target = if target == "-" {
        ExportTarget::DataUri
    } else {
        ExportTarget::File(target.to_string())
    };

    Ok(AppEvent::Export {
        secret: secret.to_string(),
        target,
        scope,
    })
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(usage.to_string())
    } else {
        Ok(rest.to_string())
    }
}
