use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use yansi::Paint;

/// Interactive yes/no confirmation asked before destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers every question with yes (`--yes` on the command line).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Pre-recorded answers, consumed in order. Runs out to "no".
///
/// The web panel uses this: the confirmation page has already asked the
/// questions and posts the answers along with the action.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(message.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut a| a.pop_front())
            .unwrap_or(false)
    }
}

/// Passes the first question to `inner` and answers every later one with a
/// fixed value. `vms delete` uses it so `--delete-disks` alone decides the
/// disk question, also under `--yes`.
pub struct FollowUpAnswer<'a> {
    inner: &'a dyn Confirm,
    follow_up: bool,
    asked: AtomicBool,
}

impl<'a> FollowUpAnswer<'a> {
    pub fn new(inner: &'a dyn Confirm, follow_up: bool) -> Self {
        Self { inner, follow_up, asked: AtomicBool::new(false) }
    }
}

impl Confirm for FollowUpAnswer<'_> {
    fn confirm(&self, message: &str) -> bool {
        if self.asked.swap(true, Ordering::AcqRel) {
            return self.follow_up;
        }
        self.inner.confirm(message)
    }
}

/// Prompts on the terminal and reads the answer from stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} {} ", Paint::new(message).yellow(), Paint::new("[y/N]").dim());
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да")
    }
}
