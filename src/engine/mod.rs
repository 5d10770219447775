pub mod codec;
pub mod core;
pub mod errors;
pub mod types;

pub use errors::*;

#[cfg(test)]
mod codec_test;
