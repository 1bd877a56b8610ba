//! Binary entrypoint for `csv-consolidate`: `data/*.csv` -> `tx.json`.

use std::process::ExitCode;

fn main() -> ExitCode {
    match csv_consolidate::convert::run() {
        Ok(()) => ExitCode::SUCCESS,
        // The stderr observer has already logged the error.
        Err(_) => ExitCode::FAILURE,
    }
}
