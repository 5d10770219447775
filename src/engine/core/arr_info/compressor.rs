use std::iter;

use super::token::{Marker, Token};
use crate::engine::errors::EncodeError;

/// Working-buffer entry: a raw marker, or a close/skip emitted while diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delta {
    Marker(Marker),
    Close,
    Skip(usize),
}

pub struct ArrInfoCompressor;

impl ArrInfoCompressor {
    /// Compresses one column's raw marker sequences (in value order) into arrInfo.
    pub fn compress(path: &str, raw: &[Vec<Marker>]) -> Result<String, EncodeError> {
        let tokens = Self::compress_tokens(path, raw)?;
        Ok(tokens.iter().map(Token::to_string).collect())
    }

    pub fn compress_tokens(path: &str, raw: &[Vec<Marker>]) -> Result<Vec<Token>, EncodeError> {
        let Some((first, rest)) = raw.split_first() else {
            return Ok(Vec::new());
        };

        let mut buffer: Vec<Delta> = first.iter().copied().map(Delta::Marker).collect();
        let mut last = first;

        for current in rest {
            let diff = last
                .iter()
                .zip(current)
                .position(|(a, b)| a != b)
                .ok_or_else(|| invariant(path, "two values share one position"))?;

            let (Marker::EnterArray(prev), Marker::EnterArray(next)) = (last[diff], current[diff])
            else {
                return Err(invariant(
                    path,
                    format!(
                        "positions diverge at {} vs {} instead of an array index",
                        last[diff], current[diff]
                    ),
                ));
            };
            if next <= prev {
                return Err(invariant(
                    path,
                    format!("array index went from {prev} to {next}"),
                ));
            }

            let closes = last[diff + 1..]
                .iter()
                .filter(|m| matches!(m, Marker::EnterArray(_)))
                .count();
            buffer.extend(iter::repeat(Delta::Close).take(closes));
            if next - prev > 1 {
                buffer.push(Delta::Skip(next - prev - 1));
            }
            buffer.extend(current[diff + 1..].iter().copied().map(Delta::Marker));
            last = current;
        }

        let has_arrays = buffer
            .iter()
            .any(|d| matches!(d, Delta::Marker(Marker::EnterArray(_))));
        if !has_arrays {
            check_array_free(path, raw.len(), &buffer)?;
            return Ok(Vec::new());
        }

        Ok(fold_tokens(&buffer))
    }
}

/// Without arrays a column holds one value reached through objects only.
fn check_array_free(path: &str, values: usize, buffer: &[Delta]) -> Result<(), EncodeError> {
    let well_formed = match buffer.split_last() {
        Some((Delta::Marker(Marker::Leaf), objects)) => objects
            .iter()
            .all(|d| matches!(d, Delta::Marker(Marker::EnterObject))),
        _ => false,
    };
    if values != 1 || !well_formed {
        return Err(invariant(
            path,
            format!("array-free column with {values} value(s) has an irregular shape"),
        ));
    }
    Ok(())
}

fn fold_tokens(buffer: &[Delta]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(buffer.len());

    for delta in buffer {
        match *delta {
            Delta::Marker(Marker::EnterObject) => tokens.push(Token::EnterObject),
            Delta::Marker(Marker::EnterArray(start)) => tokens.push(Token::EnterArray { start }),
            Delta::Close => tokens.push(Token::CloseArray),
            Delta::Skip(count) => tokens.push(Token::Skip(count)),
            Delta::Marker(Marker::Leaf) => {
                // object entries right before a leaf are implied by the path
                while tokens.last() == Some(&Token::EnterObject) {
                    tokens.pop();
                }
                match tokens.last_mut() {
                    Some(Token::Leaf { repeat }) => *repeat += 1,
                    _ => tokens.push(Token::Leaf { repeat: 0 }),
                }
            }
        }
    }

    // the trailing run is implied by the remaining values
    if tokens.last().is_some_and(Token::is_leaf) {
        tokens.pop();
    }

    tokens
}

fn invariant(path: &str, detail: impl Into<String>) -> EncodeError {
    EncodeError::Invariant {
        path: path.to_string(),
        detail: detail.into(),
    }
}
