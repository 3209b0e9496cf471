//! Netlist lexer.
//!
//! The netlist is line oriented and whitespace delimited, so the lexer
//! classifies whole words rather than characters.

use sparnet_core::NetId;

use crate::error::{Error, Result};

/// Marker that introduces a net reference.
const NET_MARKER: &str = "N$";

/// Token types for photonic netlists.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Instance name, component type, or any other bare word.
    Name(String),
    /// Net reference (N$0, N$-1, ...).
    Net(NetId),
    /// Key-value parameter (lay_x=1.5, wg_length=10u, ...).
    Param { key: String, value: String },
    /// Dot directive (.subckt, .ends, ...), lowercased and without the dot.
    Command(String),
    /// End of line
    Eol,
    /// End of file
    Eof,
}

/// A token with its source location.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Lexer for photonic netlists.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Tokenize the entire input.
    ///
    /// Comment lines (first word starting with `*`) and blank lines produce
    /// no tokens. A directive line produces a single [`Token::Command`]
    /// followed by [`Token::Eol`]. Lexing stops after the first `.ends`.
    pub fn tokenize(self) -> Result<Vec<SpannedToken>> {
        let mut tokens = Vec::new();
        let mut last_line = 1;

        for (idx, text) in self.input.lines().enumerate() {
            let line = idx + 1;
            last_line = line;
            let mut words = split_words(text).into_iter();

            let Some((start, first)) = words.next() else {
                continue;
            };
            if first.starts_with('*') {
                continue;
            }

            let first_token = match first.strip_prefix('.') {
                Some(directive) => Token::Command(directive.to_ascii_lowercase()),
                None => Token::Name(first.to_string()),
            };
            let is_directive = matches!(first_token, Token::Command(_));
            let is_end = matches!(&first_token, Token::Command(d) if d.starts_with("ends"));
            tokens.push(SpannedToken {
                token: first_token,
                line,
                column: start + 1,
            });

            if !is_directive {
                for (start, word) in words {
                    tokens.push(SpannedToken {
                        token: classify(word, line)?,
                        line,
                        column: start + 1,
                    });
                }
            }

            tokens.push(SpannedToken {
                token: Token::Eol,
                line,
                column: text.len() + 1,
            });

            // Nothing after the end of the circuit is read.
            if is_end {
                break;
            }
        }

        tokens.push(SpannedToken {
            token: Token::Eof,
            line: last_line,
            column: 1,
        });
        Ok(tokens)
    }
}

/// Split a line on whitespace, keeping the byte offset of each word.
fn split_words(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }

    words
}

/// Classify a word that follows the instance name.
fn classify(word: &str, line: usize) -> Result<Token> {
    if word.contains(NET_MARKER) {
        let raw = word.replace(NET_MARKER, "");
        let net = raw.parse::<NetId>().map_err(|_| Error::ParseError {
            line,
            message: format!("invalid net reference '{}'", word),
        })?;
        return Ok(Token::Net(net));
    }

    match word.split_once('=') {
        Some((key, value)) => Ok(Token::Param {
            key: key.to_string(),
            value: value.to_string(),
        }),
        None => Ok(Token::Name(word.to_string())),
    }
}
