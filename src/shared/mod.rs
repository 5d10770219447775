pub mod config;
pub mod path;

#[cfg(test)]
mod path_test;
