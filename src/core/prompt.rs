//! Interactive questions and the sources that answer them.
//!
//! Generators only see the [`Prompter`] trait. The terminal implementation
//! reads stdin; [`PresetPrompter`] answers from CLI flags (or a test script)
//! and falls back to another prompter for anything left open.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text, optionally with a default used on empty input.
    Input { default: Option<String> },
    /// Pick any subset of `choices`.
    Checkbox {
        choices: Vec<String>,
        default: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub message: String,
    pub kind: QuestionKind,
    /// Whether the answer is remembered as the default for the next run.
    pub store: bool,
}

impl Question {
    pub fn input(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: QuestionKind::Input { default: None },
            store: false,
        }
    }

    pub fn checkbox<I, S>(name: &str, message: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: QuestionKind::Checkbox {
                choices: choices.into_iter().map(Into::into).collect(),
                default: Vec::new(),
            },
            store: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        if let QuestionKind::Input { default } = &mut self.kind {
            *default = Some(value.into());
        }
        self
    }

    pub fn with_default_choices(mut self, values: Vec<String>) -> Self {
        if let QuestionKind::Checkbox { default, .. } = &mut self.kind {
            *default = values;
        }
        self
    }

    pub fn stored(mut self) -> Self {
        self.store = true;
        self
    }

    /// Use a previous run's answer as the default. Ignored unless the question is stored.
    pub fn with_previous(self, previous: Option<Answer>) -> Self {
        if !self.store {
            return self;
        }
        match previous {
            Some(Answer::Text(value)) => self.with_default(value),
            Some(Answer::Choices(values)) => self.with_default_choices(values),
            None => self,
        }
    }

    /// The answer given when the user accepts the default, if there is one.
    pub fn default_answer(&self) -> Option<Answer> {
        match &self.kind {
            QuestionKind::Input { default } => default.clone().map(Answer::Text),
            QuestionKind::Checkbox { default, .. } => Some(Answer::Choices(default.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
}

impl Answer {
    pub fn into_text(self, field: &str) -> Result<String> {
        match self {
            Answer::Text(s) => Ok(s),
            Answer::Choices(_) => Err(Error::validation_invalid_argument(
                field,
                "Expected a single value",
                None,
                None,
            )),
        }
    }

    pub fn into_choices(self) -> Vec<String> {
        match self {
            Answer::Text(s) if s.trim().is_empty() => Vec::new(),
            Answer::Text(s) => s.split(',').map(|v| v.trim().to_string()).collect(),
            Answer::Choices(c) => c,
        }
    }
}

/// One blocking round-trip per question.
pub trait Prompter {
    fn ask(&mut self, question: &Question) -> Result<Answer>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, question: &Question) -> Result<Answer> {
        (**self).ask(question)
    }
}

/// Prompts on stderr and reads answers from stdin.
pub struct TerminalPrompter<R = io::StdinLock<'static>, W = io::Stderr> {
    input: R,
    output: W,
}

impl TerminalPrompter {
    pub fn stdio() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stderr(),
        }
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::internal_io(format!("Failed to read input: {}", e), Some("prompt".to_string())))?;
        if read == 0 {
            return Err(Error::internal_io(
                "Input closed before the question was answered",
                Some("prompt".to_string()),
            ));
        }
        Ok(line.trim().to_string())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(|e| Error::internal_io(e.to_string(), Some("write prompt".to_string())))
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, question: &Question) -> Result<Answer> {
        match &question.kind {
            QuestionKind::Input { default } => {
                let suffix = default
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default();
                self.write(&format!("? {}{}: ", question.message, suffix))?;
                let line = self.read_line()?;
                match (line.is_empty(), default) {
                    (true, Some(d)) => Ok(Answer::Text(d.clone())),
                    _ => Ok(Answer::Text(line)),
                }
            }
            QuestionKind::Checkbox { choices, default } => {
                let mut menu = format!("? {}\n", question.message);
                for (i, choice) in choices.iter().enumerate() {
                    let mark = if default.contains(choice) { "x" } else { " " };
                    menu.push_str(&format!("  [{}] {}) {}\n", mark, i + 1, choice));
                }
                menu.push_str("  Select by number or name, comma-separated (enter keeps [x]): ");
                self.write(&menu)?;
                let line = self.read_line()?;
                parse_checkbox_input(&question.name, &line, choices, default).map(Answer::Choices)
            }
        }
    }
}

/// Resolve a checkbox answer typed as `1,2`, `karma, unittest` or `none`.
///
/// Empty input keeps the defaults. Result order follows `choices`.
pub fn parse_checkbox_input(
    field: &str,
    input: &str,
    choices: &[String],
    default: &[String],
) -> Result<Vec<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default.to_vec());
    }
    if input.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }

    let mut picked = vec![false; choices.len()];
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let index = match token.parse::<usize>() {
            Ok(n) if (1..=choices.len()).contains(&n) => Some(n - 1),
            Ok(_) => None,
            Err(_) => choices.iter().position(|c| c.eq_ignore_ascii_case(token)),
        };

        let index = index.ok_or_else(|| {
            Error::validation_invalid_argument(
                field,
                format!("Unknown choice '{}'", token),
                Some(token.to_string()),
                Some(choices.to_vec()),
            )
        })?;
        picked[index] = true;
    }

    Ok(choices
        .iter()
        .zip(picked)
        .filter(|(_, p)| *p)
        .map(|(c, _)| c.clone())
        .collect())
}

/// Answers questions from a preset map, then defaults, then a fallback prompter.
pub struct PresetPrompter<'a> {
    answers: HashMap<String, Answer>,
    accept_defaults: bool,
    fallback: Option<Box<dyn Prompter + 'a>>,
}

impl<'a> PresetPrompter<'a> {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            accept_defaults: false,
            fallback: None,
        }
    }

    pub fn answer(mut self, name: &str, answer: Answer) -> Self {
        self.answers.insert(name.to_string(), answer);
        self
    }

    pub fn text(self, name: &str, value: impl Into<String>) -> Self {
        self.answer(name, Answer::Text(value.into()))
    }

    pub fn choices<I, S>(self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answer(name, Answer::Choices(values.into_iter().map(Into::into).collect()))
    }

    /// Answer remaining questions with their defaults where one exists.
    pub fn accept_defaults(mut self, yes: bool) -> Self {
        self.accept_defaults = yes;
        self
    }

    pub fn fallback(mut self, prompter: impl Prompter + 'a) -> Self {
        self.fallback = Some(Box::new(prompter));
        self
    }
}

impl Default for PresetPrompter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for PresetPrompter<'_> {
    fn ask(&mut self, question: &Question) -> Result<Answer> {
        if let Some(answer) = self.answers.remove(&question.name) {
            return Ok(answer);
        }

        if self.accept_defaults {
            if let Some(answer) = question.default_answer() {
                return Ok(answer);
            }
        }

        match self.fallback.as_mut() {
            Some(prompter) => prompter.ask(question),
            None => Err(Error::validation_missing_argument(vec![question.name.clone()])),
        }
    }
}
