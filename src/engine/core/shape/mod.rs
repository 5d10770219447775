mod sparseness;

#[cfg(test)]
mod sparseness_test;

pub use sparseness::SparsenessAnalyzer;
