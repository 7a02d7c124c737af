//! Quote-aware splitting of command lines.
//!
//! Every interactive or scripted line goes through [`Tokenizer`] before
//! dispatch. Tokens are separated by whitespace; single or double quotes
//! group whitespace into one token. The iterator running out (`None`) is
//! the only end-of-input signal, so an empty quoted string (`''`) is a
//! real, distinguishable token.

use std::str::CharIndices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Whitespace,
    Token,
    SingleQuote,
    DoubleQuote,
}

pub struct Tokenizer<'a> {
    line: &'a str,
    chars: CharIndices<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            chars: line.char_indices(),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut state = State::Whitespace;
        let mut start = self.line.len();

        for (i, ch) in self.chars.by_ref() {
            match state {
                State::Whitespace => {
                    if ch == '"' {
                        state = State::DoubleQuote;
                        start = i + ch.len_utf8();
                    } else if ch == '\'' {
                        state = State::SingleQuote;
                        start = i + ch.len_utf8();
                    } else if !ch.is_whitespace() {
                        state = State::Token;
                        start = i;
                    }
                }
                State::Token => {
                    if ch.is_whitespace() {
                        return Some(self.line[start..i].to_string());
                    }
                }
                State::SingleQuote => {
                    if ch == '\'' {
                        return Some(self.line[start..i].to_string());
                    }
                }
                State::DoubleQuote => {
                    if ch == '"' {
                        return Some(self.line[start..i].to_string());
                    }
                }
            }
        }

        // End of line: an in-progress token or unterminated quote runs to
        // the end; trailing whitespace emits nothing.
        match state {
            State::Whitespace => None,
            _ => Some(self.line[start..].to_string()),
        }
    }
}

/// Split a whole line into tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    Tokenizer::new(line).collect()
}
