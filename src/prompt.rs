//! Operator prompts
//!
//! Workflows talk to the operator only through [`Prompter`], so the same
//! code runs against the terminal (`dialoguer`) or against a scripted queue
//! of answers in tests.

use crate::error::{Result, SyncError};
use dialoguer::{Confirm, Input, Select};
use std::collections::VecDeque;

pub trait Prompter {
    /// Pick one of `items`, returning its index
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize>;

    /// Free-text answer (may be empty)
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Yes/no answer
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Interactive prompts on the terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(|e| SyncError::Prompt(e.to_string()))
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SyncError::Prompt(e.to_string()))?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| SyncError::Prompt(e.to_string()))
    }
}

/// Replays prepared answers in order.
///
/// `select` answers are item indices, `confirm` answers are `y`/`n` (empty
/// takes the default). Running out of answers is a prompt error.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Prompts asked so far, in order
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| SyncError::Prompt(format!("no scripted answer for `{}`", prompt)))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        let answer = self.next(prompt)?;
        match answer.trim().parse::<usize>() {
            Ok(i) if i < items.len() => Ok(i),
            _ => Err(SyncError::Prompt(format!("invalid choice `{}` for `{}`", answer, prompt))),
        }
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        Ok(self.next(prompt)?.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let answer = self.next(prompt)?;
        match answer.trim().to_lowercase().as_str() {
            "" => Ok(default),
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            other => Err(SyncError::Prompt(format!("invalid yes/no `{}`", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new(["1", " Demo ", ""]);
        assert_eq!(prompter.select("mode", &["a", "b"]).unwrap(), 1);
        assert_eq!(prompter.input("title").unwrap(), "Demo");
        assert!(prompter.confirm("soon?", true).unwrap());
        assert_eq!(prompter.asked, vec!["mode", "title", "soon?"]);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_scripted_select_out_of_range() {
        let mut prompter = ScriptedPrompter::new(["5"]);
        assert!(matches!(prompter.select("mode", &["a", "b"]), Err(SyncError::Prompt(_))));
    }

    #[test]
    fn test_scripted_exhausted() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert!(prompter.input("title").is_err());
    }
}
