//! Line editing on a dedicated thread.
//!
//! rustyline blocks, so it runs on its own OS thread and forwards what
//! happens to the async side over an unbounded channel. Live edits are
//! observed through the helper's hint callback, which rustyline invokes on
//! every refresh of the line.

use std::cell::RefCell;

use rustyline::{
    Context, Editor, Helper, completion::Completer, error::ReadlineError,
    highlight::Highlighter, hint::Hinter, history::DefaultHistory, validate::Validator,
};
use tokio::sync::mpsc;

/// Something that happened in the input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The line content changed (not yet submitted)
    Edited(String),
    /// Enter was pressed on a non-blank line
    Submitted(String),
}

/// Remembers the last seen line so refreshes without changes are ignored
#[derive(Debug, Default)]
pub struct EditTracker {
    last: RefCell<String>,
}

impl EditTracker {
    /// The new line content if it differs from the last one observed.
    pub fn observe(&self, line: &str) -> Option<String> {
        let mut last = self.last.borrow_mut();
        if *last == line {
            return None;
        }
        last.clear();
        last.push_str(line);
        Some(line.to_string())
    }

    /// Forget the last line (after a submit the editor starts empty again).
    pub fn reset(&self) {
        self.last.borrow_mut().clear();
    }
}

/// rustyline helper forwarding live edits
pub struct InputHelper {
    tracker: EditTracker,
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl InputHelper {
    pub fn new(tx: mpsc::UnboundedSender<InputEvent>) -> Self {
        Self {
            tracker: EditTracker::default(),
            tx,
        }
    }

    fn reset(&self) {
        self.tracker.reset();
    }
}

impl Hinter for InputHelper {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if let Some(line) = self.tracker.observe(line) {
            self.tx.send(InputEvent::Edited(line)).ok();
        }
        None
    }
}

impl Completer for InputHelper {
    type Candidate = String;
}

impl Highlighter for InputHelper {}

impl Validator for InputHelper {}

impl Helper for InputHelper {}

/// Start the line editor thread.
///
/// The returned receiver closes when the user exits (Ctrl+C / Ctrl+D) or
/// the editor fails.
pub fn spawn_input_thread(prompt: String) -> mpsc::UnboundedReceiver<InputEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || run_editor(&prompt, tx));
    rx
}

fn run_editor(prompt: &str, tx: mpsc::UnboundedSender<InputEvent>) {
    let mut rl: Editor<InputHelper, DefaultHistory> = match Editor::new() {
        Ok(rl) => rl,
        Err(e) => {
            tracing::error!("Failed to initialize readline: {}", e);
            return;
        }
    };
    rl.set_helper(Some(InputHelper::new(tx.clone())));

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                if let Some(helper) = rl.helper() {
                    helper.reset();
                }
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line).ok();
                if tx.send(InputEvent::Submitted(line.to_string())).is_err() {
                    // receiver gone, the client is shutting down
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                tracing::info!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                tracing::info!("EOF");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {}", err);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_reports_only_changes() {
        // テスト項目: 行の内容が変わった場合のみ編集として報告される
        // given (前提条件):
        let tracker = EditTracker::default();

        // when (操作):
        let first = tracker.observe("h");
        let same = tracker.observe("h");
        let next = tracker.observe("hi");
        let deleted = tracker.observe("h");

        // then (期待する結果):
        assert_eq!(first.as_deref(), Some("h"));
        assert_eq!(same, None);
        assert_eq!(next.as_deref(), Some("hi"));
        assert_eq!(deleted.as_deref(), Some("h"));
    }

    #[test]
    fn test_reset_ignores_the_fresh_empty_line() {
        // テスト項目: 送信後にリセットすると空行の再描画は編集として扱われない
        // given (前提条件):
        let tracker = EditTracker::default();
        tracker.observe("hello");

        // when (操作):
        tracker.reset();
        let empty = tracker.observe("");

        // then (期待する結果):
        assert_eq!(empty, None);
    }
}
