use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::Instant;

use rand::thread_rng;

use matrix_stress::matrix::Matrix;
use matrix_stress::multiply::multiply_into;

/// Workload dimensions. These constants are the only configuration surface.
const N_ROWS: usize = 1000;
const N_COLS: usize = 1000;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = thread_rng();

    // Progress and timing go to stderr so stdout carries nothing but the
    // three matrices.
    eprintln!("Generating two {}x{} random matrices...", N_ROWS, N_COLS);
    let mut a = Matrix::random(N_ROWS, N_COLS, &mut rng)?;
    let mut b = Matrix::random(N_ROWS, N_COLS, &mut rng)?;
    let mut c = Matrix::zeroed(N_ROWS, N_COLS)?;

    eprintln!("Multiplying with one thread per output row...");
    let start = Instant::now();
    multiply_into(&a, &b, &mut c)?;
    eprintln!("Multiplication completed in {:.2?}.", start.elapsed());

    let mut out = BufWriter::new(io::stdout().lock());
    a.write_to(&mut out)?;
    b.write_to(&mut out)?;
    c.write_to(&mut out)?;
    out.flush()?;

    a.release();
    b.release();
    c.release();

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("matrix-stress: {}", err);
            ExitCode::FAILURE
        }
    }
}
