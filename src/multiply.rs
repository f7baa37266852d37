use std::thread;

use crate::error::WorkloadError;
use crate::matrix::Matrix;

/// Compute `c = a * b` with one OS thread per output row.
///
/// Row `r` of `c` depends only on row `r` of `a` and all of `b`, so every
/// thread gets exclusive mutable access to exactly one result row and shared
/// read access to both operands. The scope exit is the join barrier: this
/// function does not return until every row thread has terminated.
///
/// `c` must arrive pre-zeroed; the row workers accumulate in place.
pub fn multiply_into(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<(), WorkloadError> {
    if a.num_cols() != b.num_rows()
        || c.num_rows() != a.num_rows()
        || c.num_cols() != b.num_cols()
    {
        return Err(WorkloadError::DimensionMismatch {
            a_rows: a.num_rows(),
            a_cols: a.num_cols(),
            b_rows: b.num_rows(),
            b_cols: b.num_cols(),
            c_rows: c.num_rows(),
            c_cols: c.num_cols(),
        });
    }

    // Contraction and output-column bounds kept separate on purpose; they only
    // coincide for the square workload configuration.
    let shared = a.num_cols();
    let out_cols = b.num_cols();

    thread::scope(|scope| {
        for (row_id, (a_row, c_row)) in a.rows().zip(c.rows_mut()).enumerate() {
            thread::Builder::new()
                .name(format!("mul-row-{row_id}"))
                .spawn_scoped(scope, move || {
                    for k in 0..shared {
                        let a_rk = a_row[k];
                        let b_row = b.row(k);
                        for j in 0..out_cols {
                            c_row[j] += a_rk * b_row[j];
                        }
                    }
                })
                .map_err(|source| WorkloadError::ThreadSpawn { row: row_id, source })?;
        }
        // Returning Err above still joins whatever was already spawned before
        // the scope unwinds back to the caller.
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn serial_product(a: &Matrix, b: &Matrix) -> Vec<Vec<i128>> {
        let mut out = vec![vec![0i128; b.num_cols()]; a.num_rows()];
        for r in 0..a.num_rows() {
            for k in 0..a.num_cols() {
                for j in 0..b.num_cols() {
                    out[r][j] += a.get(r, k) * b.get(k, j);
                }
            }
        }
        out
    }

    #[test]
    fn two_by_two_product_matches_hand_computation() {
        let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]);
        let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]);
        let mut c = Matrix::zeroed(2, 2).unwrap();

        multiply_into(&a, &b, &mut c).unwrap();

        assert_eq!(c.row(0), &[19, 22]);
        assert_eq!(c.row(1), &[43, 50]);
    }

    #[test]
    fn parallel_result_matches_serial_result() {
        let mut rng = StdRng::seed_from_u64(1234);
        let a = Matrix::random(16, 16, &mut rng).unwrap();
        let b = Matrix::random(16, 16, &mut rng).unwrap();
        let mut c = Matrix::zeroed(16, 16).unwrap();

        multiply_into(&a, &b, &mut c).unwrap();

        let expected = serial_product(&a, &b);
        for (r, row) in expected.iter().enumerate() {
            assert_eq!(c.row(r), row.as_slice(), "row {r} diverged");
        }
    }

    #[test]
    fn non_square_shapes_use_the_correct_output_bound() {
        let mut rng = StdRng::seed_from_u64(5678);
        let a = Matrix::random(7, 3, &mut rng).unwrap();
        let b = Matrix::random(3, 5, &mut rng).unwrap();
        let mut c = Matrix::zeroed(7, 5).unwrap();

        multiply_into(&a, &b, &mut c).unwrap();

        let expected = serial_product(&a, &b);
        for (r, row) in expected.iter().enumerate() {
            assert_eq!(c.row(r), row.as_slice(), "row {r} diverged");
        }
    }

    #[test]
    fn mismatched_dimensions_are_rejected_before_any_work() {
        let a = Matrix::from_rows(vec![vec![1, 2, 3]]);
        let b = Matrix::from_rows(vec![vec![1], vec![2]]);
        let mut c = Matrix::zeroed(1, 1).unwrap();

        let err = multiply_into(&a, &b, &mut c).unwrap_err();
        assert!(matches!(err, WorkloadError::DimensionMismatch { .. }));
        // result must be untouched
        assert_eq!(c.get(0, 0), 0);
    }

    #[test]
    fn result_shape_mismatch_is_rejected() {
        let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]);
        let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]);
        let mut c = Matrix::zeroed(2, 3).unwrap();

        let err = multiply_into(&a, &b, &mut c).unwrap_err();
        assert!(matches!(err, WorkloadError::DimensionMismatch { .. }));
    }
}
