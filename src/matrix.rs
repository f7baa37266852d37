use std::io::{self, Write};

use rand::distributions::Uniform;
use rand::prelude::*;

use crate::error::WorkloadError;

/// Exclusive upper bound on randomly generated cell values.
pub const MAX_VALUE: i128 = 1000;

/// Dense row-major matrix of wide integers. Each row owns its own buffer;
/// rows are not contiguous with each other.
///
/// The cell type is `i128` so that accumulating up to 1000 products of
/// values below 1000 can never overflow.
pub struct Matrix {
    num_rows: usize,
    num_cols: usize,
    data: Vec<Vec<i128>>,
}

impl Matrix {
    /// Allocate a matrix and fill every cell with a value drawn uniformly
    /// from `[0, MAX_VALUE)`. The caller supplies the generator so a test
    /// can pass a seeded one.
    pub fn random<R: Rng>(
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Self, WorkloadError> {
        let uniform = Uniform::new(0, MAX_VALUE);
        Self::filled(rows, cols, || rng.sample(&uniform))
    }

    /// Allocate a matrix with every cell initialized to zero.
    pub fn zeroed(rows: usize, cols: usize) -> Result<Self, WorkloadError> {
        Self::filled(rows, cols, || 0)
    }

    /// Build a matrix from explicit row data. All rows must be the same
    /// non-zero length.
    pub fn from_rows(data: Vec<Vec<i128>>) -> Self {
        assert!(!data.is_empty(), "matrix must have at least one row");
        let num_cols = data[0].len();
        assert!(num_cols > 0, "matrix must have at least one column");
        assert!(
            data.iter().all(|row| row.len() == num_cols),
            "all rows must have the same length"
        );
        Matrix {
            num_rows: data.len(),
            num_cols,
            data,
        }
    }

    fn filled(
        rows: usize,
        cols: usize,
        mut fill: impl FnMut() -> i128,
    ) -> Result<Self, WorkloadError> {
        assert!(rows > 0, "matrix must have at least one row");
        assert!(cols > 0, "matrix must have at least one column");

        let alloc_failed = |_| WorkloadError::Allocation { rows, cols };
        let mut data = Vec::new();
        data.try_reserve_exact(rows).map_err(alloc_failed)?;
        for _ in 0..rows {
            let mut row = Vec::new();
            row.try_reserve_exact(cols).map_err(alloc_failed)?;
            row.extend(std::iter::repeat_with(&mut fill).take(cols));
            data.push(row);
        }

        Ok(Matrix {
            num_rows: rows,
            num_cols: cols,
            data,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn get(&self, row: usize, col: usize) -> i128 {
        self.data[row][col]
    }

    pub fn row(&self, row: usize) -> &[i128] {
        &self.data[row]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i128]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// Hands out each row exactly once, which is what lets the multiply give
    /// every worker thread exclusive write access to its own row.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [i128]> {
        self.data.iter_mut().map(Vec::as_mut_slice)
    }

    /// Drop all backing storage and reset the dimensions to zero. Calling
    /// this again on an already-released matrix is a no-op.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.num_rows = 0;
        self.num_cols = 0;
    }

    /// Write the matrix as text: one row per line, every value right-justified
    /// in a field of at least 4 characters and followed by a space, with one
    /// blank line after the last row. Read-only.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.data {
            for value in row {
                write!(out, "{:>4} ", value)?;
            }
            writeln!(out)?;
        }
        writeln!(out)
    }
}
