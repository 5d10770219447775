mod compressor;
mod token;
mod tokenizer;


pub use compressor::ArrInfoCompressor;
pub use token::{Marker, SpannedToken, Token};
pub use tokenizer::{TokenizeError, tokenize};
