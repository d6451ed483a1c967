#[derive(Debug, Clone)]
pub enum AppEvent {
    // Shell -> app
    Search(String),
    AddWord {
        jrai: String,
        viet: String,
    },
    Import {
        path: String,
    },
    Export {
        secret: String,
        target: ExportTarget,
        scope: ExportScope,
    },
    ResetDictionary {
        confirmed: bool,
    },
    DrawQuiz,
    StartTest,
    Answer {
        index: usize,
        text: String,
    },
    CheckAnswers,
    Speak {
        text: String,
        side: Side,
    },
    PlayEntry {
        headword: String,
    },
    Explain {
        headword: String,
    },
    Shutdown,

    // App -> shell
    ShowSearch(SearchView),
    ShowQuiz(Vec<QuizCard>),
    ShowExplanation {
        headword: String,
        text: String,
    },
    Notice(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Jrai,
    Viet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    File(String),
    /// Print a `data:` URI instead of writing a file
    DataUri,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// Only entries added or edited locally
    Additions,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    EmptyQuery,
    NoMatch(String),
    Results(Vec<DisplayResult>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayResult {
    pub jrai: String,
    pub viet: String,
    pub has_audio: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    Unanswered,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCard {
    pub index: usize,
    pub jrai: String,
    pub viet: String,
    /// Side shown as the question; `None` while both sides are visible
    pub question: Option<Side>,
    pub user_input: String,
    pub status: CardStatus,
}
