use std::fmt;

use crate::engine::core::cursor::Spanned;

/// Raw structural marker recorded by the walker, one sequence per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    EnterObject,
    /// Entered an array element; carries the element index.
    EnterArray(usize),
    Leaf,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::EnterObject => f.write_str("{"),
            Marker::EnterArray(idx) => write!(f, "[{idx}"),
            Marker::Leaf => f.write_str("|"),
        }
    }
}

/// Compressed arrInfo token.
///
/// Zero starts and zero repeats are implicit and never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    EnterObject,
    EnterArray { start: usize },
    CloseArray,
    /// One leaf plus `repeat` more at consecutive indices.
    Leaf { repeat: usize },
    Skip(usize),
}

impl Token {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Token::Leaf { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::EnterObject => f.write_str("{"),
            Token::EnterArray { start: 0 } => f.write_str("["),
            Token::EnterArray { start } => write!(f, "[{start}"),
            Token::CloseArray => f.write_str("]"),
            Token::Leaf { repeat: 0 } => f.write_str("|"),
            Token::Leaf { repeat } => write!(f, "|{repeat}"),
            Token::Skip(count) => write!(f, "+{count}"),
        }
    }
}

/// Token plus the byte range it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub offset: usize,
    pub len: usize,
}

impl Spanned for SpannedToken {
    fn span(&self) -> (usize, usize) {
        (self.offset, self.len)
    }
}
