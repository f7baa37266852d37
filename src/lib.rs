//! Synthetic matrix-multiplication workload: two square matrices of random
//! integers multiplied with one worker thread per output row, then printed.
//! Exists to load CPU and memory bandwidth, not to be a linear-algebra crate.

pub mod error;
pub mod matrix;
pub mod multiply;
