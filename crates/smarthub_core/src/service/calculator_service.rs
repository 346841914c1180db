//! Calculator use-case service.
//!
//! # Responsibility
//! - Hold the input buffer and the last evaluated line.
//! - Keep a bounded, persisted history of evaluations.
//! - Map keyboard keys onto the same actions as the on-screen buttons.
//!
//! # Invariants
//! - History holds at most `MAX_HISTORY` entries, newest first.
//! - A failed evaluation clears the buffer and leaves history unchanged.

use crate::calc::evaluate_display;
use crate::notify::{LogNotifier, Notice, Notifier};
use crate::repo::kv_store::{KeyValueStore, StorageKey};
use crate::repo::list_store::{load_value, save_value};
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

pub const MAX_HISTORY: usize = 20;

/// One calculator action, whether from a button or a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Input(String),
    Evaluate,
    Delete,
    Clear,
}

impl KeyAction {
    /// Maps a keyboard key name to an action; unrelated keys map to `None`.
    ///
    /// `*` and `/` are entered as their display glyphs `×` and `÷`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Evaluate),
            "Backspace" | "Delete" => Some(Self::Delete),
            "Escape" => Some(Self::Clear),
            "*" => Some(Self::Input("×".to_string())),
            "/" => Some(Self::Input("÷".to_string())),
            "+" | "-" | "%" | "(" | ")" | "." => Some(Self::Input(key.to_string())),
            digit if digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit()) => {
                Some(Self::Input(digit.to_string()))
            }
            _ => None,
        }
    }
}

/// Result of an evaluation that produced a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub result: String,
    /// `"<expression> = <result>"`, as stored in history.
    pub line: String,
}

pub struct Calculator<S: KeyValueStore> {
    store: S,
    display: String,
    expression: String,
    history: Vec<String>,
    notifier: Box<dyn Notifier>,
}

impl<S: KeyValueStore> Calculator<S> {
    /// Restores persisted history; malformed history starts empty.
    pub fn open(store: S) -> ServiceResult<Self> {
        let mut history: Vec<String> =
            load_value(&store, StorageKey::CalculatorHistory)?.unwrap_or_default();
        history.truncate(MAX_HISTORY);
        Ok(Self {
            store,
            display: String::new(),
            expression: String::new(),
            history,
            notifier: Box::new(LogNotifier),
        })
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Current input buffer.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Last evaluated line, empty after delete/clear.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn input(&mut self, value: &str) {
        self.display.push_str(value);
    }

    /// Drops the last character of the buffer.
    pub fn delete(&mut self) {
        self.display.pop();
        self.expression.clear();
    }

    pub fn clear(&mut self) {
        self.display.clear();
        self.expression.clear();
    }

    /// Evaluates the buffer.
    ///
    /// Returns `Ok(None)` for an empty buffer. On an invalid expression the
    /// buffer is cleared, a destructive notice is raised and
    /// `ServiceError::Calc` is returned; history is not touched.
    pub fn evaluate(&mut self) -> ServiceResult<Option<Evaluation>> {
        if self.display.is_empty() {
            return Ok(None);
        }

        let result = match evaluate_display(&self.display) {
            Ok(result) => result,
            Err(err) => {
                warn!("event=calc_eval module=calculator status=error error={err}");
                self.notifier
                    .notify(Notice::destructive("Calculation Error", "Invalid expression"));
                self.clear();
                return Err(ServiceError::Calc(err));
            }
        };

        let line = format!("{} = {}", self.display, result);
        let mut history = Vec::with_capacity(MAX_HISTORY);
        history.push(line.clone());
        history.extend(self.history.iter().take(MAX_HISTORY - 1).cloned());
        save_value(&self.store, StorageKey::CalculatorHistory, &history)?;
        self.history = history;

        self.expression = line.clone();
        self.display = result.clone();
        info!(
            "event=calc_eval module=calculator status=ok history={}",
            self.history.len()
        );
        self.notifier
            .notify(Notice::info("Calculation Complete", line.clone()));
        Ok(Some(Evaluation { result, line }))
    }

    /// Applies one action; only `Evaluate` can produce an evaluation.
    pub fn apply(&mut self, action: KeyAction) -> ServiceResult<Option<Evaluation>> {
        match action {
            KeyAction::Input(value) => self.input(&value),
            KeyAction::Delete => self.delete(),
            KeyAction::Clear => self.clear(),
            KeyAction::Evaluate => return self.evaluate(),
        }
        Ok(None)
    }

    /// Handles a keyboard key; unbound keys are ignored.
    pub fn handle_key(&mut self, key: &str) -> ServiceResult<Option<Evaluation>> {
        match KeyAction::from_key(key) {
            Some(action) => self.apply(action),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Calculator, KeyAction};
    use crate::repo::kv_store::MemoryKvStore;

    #[test]
    fn key_bindings_map_to_button_actions() {
        assert_eq!(KeyAction::from_key("7"), Some(KeyAction::Input("7".into())));
        assert_eq!(KeyAction::from_key("*"), Some(KeyAction::Input("×".into())));
        assert_eq!(KeyAction::from_key("/"), Some(KeyAction::Input("÷".into())));
        assert_eq!(KeyAction::from_key("Enter"), Some(KeyAction::Evaluate));
        assert_eq!(KeyAction::from_key("="), Some(KeyAction::Evaluate));
        assert_eq!(KeyAction::from_key("Backspace"), Some(KeyAction::Delete));
        assert_eq!(KeyAction::from_key("Escape"), Some(KeyAction::Clear));
        assert_eq!(KeyAction::from_key("a"), None);
        assert_eq!(KeyAction::from_key("F1"), None);
    }

    #[test]
    fn typing_keys_then_enter_evaluates() {
        let store = MemoryKvStore::new();
        let mut calc = Calculator::open(&store).expect("open should succeed");
        for key in ["1", "0", "/", "4"] {
            assert_eq!(calc.handle_key(key).expect("key should apply"), None);
        }
        assert_eq!(calc.display(), "10÷4");

        let evaluation = calc
            .handle_key("Enter")
            .expect("valid expression")
            .expect("buffer not empty");
        assert_eq!(evaluation.result, "2.5000");
        assert_eq!(evaluation.line, "10÷4 = 2.5000");
        assert_eq!(calc.display(), "2.5000");
    }

    #[test]
    fn delete_trims_buffer_and_clears_expression() {
        let store = MemoryKvStore::new();
        let mut calc = Calculator::open(&store).expect("open should succeed");
        calc.input("12");
        calc.evaluate().expect("valid expression");
        assert_eq!(calc.expression(), "12 = 12");
        calc.delete();
        assert_eq!(calc.display(), "1");
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn empty_buffer_evaluates_to_nothing() {
        let store = MemoryKvStore::new();
        let mut calc = Calculator::open(&store).expect("open should succeed");
        assert_eq!(calc.evaluate().expect("empty buffer is fine"), None);
        assert!(store.is_empty());
    }
}
