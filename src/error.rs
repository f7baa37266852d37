use std::io;

use thiserror::Error;

/// Every failure in the workload is fatal to the run; there is no retry
/// anywhere, so a single flat enum covers the whole pipeline.
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("failed to allocate space for a {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },

    #[error(
        "cannot multiply {a_rows}x{a_cols} by {b_rows}x{b_cols} into {c_rows}x{c_cols}"
    )]
    DimensionMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
        c_rows: usize,
        c_cols: usize,
    },

    #[error("failed to create thread for row {row}: {source}")]
    ThreadSpawn { row: usize, source: io::Error },
}
