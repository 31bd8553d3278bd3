//! One physical line of source and the sanitizer stages that reduce it.
//!
//! A [`SourceLine`] is built from raw text, classified as a host command or Forth source, and then mutated in
//! place by whichever stages the caller needs. Stages that can empty the line return `false` when nothing but
//! whitespace is left, so callers can skip the line.

use forthtalk_core::lang::markers;
use forthtalk_core::literals::{is_literal, normalize_hex_token};

use crate::diagnostics::{GroupKind, Warning};
use crate::registers::{RegisterMode, RegisterTable};
use crate::scan::{self, GroupState, TokenAction};

/// A single line of Forth source or host command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    raw: String,
    text: String,
    is_command: bool,
    warnings: Vec<Warning>,
}

impl SourceLine {
    /// Classify and trim one line.
    ///
    /// A line is a command when it starts with `#`, or with `\ #` (exactly one space). For the second form the
    /// leading `\ ` is dropped so the command text always starts with `#`. Trailing CR/LF is removed.
    pub fn new(line: &str) -> Self {
        let raw = line.trim_end_matches(['\n', '\r']).to_string();

        if raw.trim().is_empty() {
            return Self {
                raw,
                text: String::new(),
                is_command: false,
                warnings: Vec::new(),
            };
        }

        let (is_command, text) = if raw.starts_with(markers::COMMAND_PREFIX) {
            (true, raw.clone())
        } else if raw.starts_with(markers::COMMENTED_COMMAND_PREFIX) {
            (true, raw[2..].to_string())
        } else {
            (false, raw.clone())
        };

        Self {
            raw,
            text,
            is_command,
            warnings: Vec::new(),
        }
    }

    pub fn is_command(&self) -> bool {
        self.is_command
    }

    /// The current (possibly reduced) text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line as read, without its line ending.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Warnings raised by the stages run so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Remove `\` line comments and `( ... )` comments.
    ///
    /// `\` and `(` inside a string are ordinary text, and string contents are kept. A line that ends inside a
    /// comment or string records [`Warning::UnterminatedGrouping`] and keeps what was accumulated.
    pub fn strip_comments(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }

        let mut state = GroupState::Normal;
        let mut kept: Vec<&str> = Vec::new();
        for token in scan::tokens(&self.text) {
            let (next, action) = state.step(token);
            match action {
                TokenAction::Keep => kept.push(token),
                TokenAction::Drop => {}
                TokenAction::EndOfLine => break,
            }
            state = next;
        }

        let unterminated = match state {
            GroupState::Normal => None,
            GroupState::InComment => Some(GroupKind::Comment),
            GroupState::InQuote => Some(GroupKind::Quote),
        };
        if let Some(kind) = unterminated {
            self.warnings.push(Warning::UnterminatedGrouping {
                kind,
                line: self.raw.clone(),
            });
        }

        let joined = kept.join(" ");
        self.replace_text(joined)
    }

    /// Remove numeric literal tokens (`%101`, `#12`, `$1ae`, `FF00`).
    pub fn strip_literals(&mut self) -> bool {
        let joined = scan::tokens(&self.text)
            .filter(|t| !is_literal(t))
            .collect::<Vec<_>>()
            .join(" ");
        self.replace_text(joined)
    }

    /// Remove the tokens between a pair of quote delimiters, keeping both delimiters.
    pub fn strip_quotes(&mut self) -> bool {
        let mut in_quotes = false;
        let mut kept: Vec<&str> = Vec::new();
        for token in scan::tokens(&self.text) {
            if markers::is_quote_delimiter(token) {
                in_quotes = !in_quotes;
                kept.push(token);
            } else if !in_quotes {
                kept.push(token);
            }
        }
        let joined = kept.join(" ");
        self.replace_text(joined)
    }

    /// Replace register names with their literal, or drop them, depending on `mode`.
    pub fn substitute_registers(&mut self, registers: &RegisterTable, mode: RegisterMode) -> bool {
        if self.text.is_empty() {
            return false;
        }
        let joined = scan::tokens(&self.text)
            .filter_map(|t| match (registers.get(t), mode) {
                (Some(value), RegisterMode::Substitute) => Some(value),
                (Some(_), RegisterMode::Strip) => None,
                (None, _) => Some(t),
            })
            .collect::<Vec<_>>()
            .join(" ");
        self.replace_text(joined)
    }

    /// Drop register names; they would only be literals after substitution.
    pub fn strip_registers(&mut self, registers: &RegisterTable) -> bool {
        self.substitute_registers(registers, RegisterMode::Strip)
    }

    /// Lowercase hex literal tokens, leaving everything else (including spacing) untouched.
    pub fn normalize_hex(&mut self) {
        self.text = scan::map_tokens_preserving(&self.text, |t| normalize_hex_token(t).into_owned());
    }

    /// Upload pipeline: comments, then register substitution, then hex case.
    ///
    /// ## Returns
    /// - `false` when nothing is left to send.
    pub fn sanitize_for_upload(&mut self, registers: &RegisterTable) -> bool {
        if self.is_command || !self.strip_comments() {
            return false;
        }
        self.substitute_registers(registers, RegisterMode::Substitute);
        self.normalize_hex();
        !self.is_empty()
    }

    /// Analysis pipeline: comments, registers, literals, then string contents.
    ///
    /// ## Returns
    /// - `false` when no tokens are left to classify.
    pub fn sanitize_for_analysis(&mut self, registers: &RegisterTable) -> bool {
        if self.is_command {
            return false;
        }
        self.strip_comments();
        self.strip_registers(registers);
        self.strip_literals();
        self.strip_quotes()
    }

    fn replace_text(&mut self, text: String) -> bool {
        if text.trim().is_empty() {
            self.text.clear();
            false
        } else {
            self.text = text;
            true
        }
    }
}
