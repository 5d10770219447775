use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

use super::token::{SpannedToken, Token};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("byte {offset}: {detail}")]
pub struct TokenizeError {
    pub offset: usize,
    pub detail: String,
}

impl TokenizeError {
    fn new(offset: usize, detail: impl Into<String>) -> Self {
        Self {
            offset,
            detail: detail.into(),
        }
    }
}

/// Parses an arrInfo string into tokens.
///
/// Counts follow `[`, `|` or `+` directly and never start with `0`.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        let token = match c {
            '{' => {
                chars.next();
                Token::EnterObject
            }
            ']' => {
                chars.next();
                Token::CloseArray
            }
            '[' => {
                chars.next();
                Token::EnterArray {
                    start: parse_count(&mut chars)?.unwrap_or(0),
                }
            }
            '|' => {
                chars.next();
                Token::Leaf {
                    repeat: parse_count(&mut chars)?.unwrap_or(0),
                }
            }
            '+' => {
                chars.next();
                match parse_count(&mut chars)? {
                    Some(count) => Token::Skip(count),
                    None => return Err(TokenizeError::new(offset, "`+` without a count")),
                }
            }
            '0'..='9' => {
                return Err(TokenizeError::new(
                    offset,
                    "count must directly follow `[`, `|` or `+`",
                ));
            }
            other => {
                return Err(TokenizeError::new(
                    offset,
                    format!("unrecognized character {other:?}"),
                ));
            }
        };

        let end = chars.peek().map_or(input.len(), |&(idx, _)| idx);
        tokens.push(SpannedToken {
            token,
            offset,
            len: end - offset,
        });
    }

    Ok(tokens)
}

fn parse_count(chars: &mut Peekable<CharIndices<'_>>) -> Result<Option<usize>, TokenizeError> {
    let start = match chars.peek() {
        Some(&(idx, c)) if c.is_ascii_digit() => {
            if c == '0' {
                return Err(TokenizeError::new(idx, "count with a leading zero"));
            }
            idx
        }
        _ => return Ok(None),
    };

    let mut value: usize = 0;
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as usize))
            .ok_or_else(|| TokenizeError::new(start, "count overflows"))?;
        chars.next();
    }

    Ok(Some(value))
}
