//! `csv-consolidate` reads a directory of single-column CSV files and consolidates them into one
//! JSON document keyed by file name.
//!
//! The primary entrypoint is [`convert::run`], which uses the fixed conventions:
//!
//! - input: every `*.csv` file directly inside `data/`
//! - output: `tx.json` in the working directory, overwritten on every run
//!
//! Each input file contributes one key (its base name, e.g. `accounts` for `accounts.csv`) whose
//! value is the first field of every non-empty row, in file order. There is no header row.
//!
//! ## Example
//!
//! Given `data/accounts.csv`:
//!
//! ```text
//! A
//! B
//!
//! C,ignored
//! ```
//!
//! the output is:
//!
//! ```json
//! {
//!   "accounts": [
//!     "A",
//!     "B",
//!     "C"
//!   ]
//! }
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use csv_consolidate::convert::{convert, ConversionOptions};
//! use csv_consolidate::ingestion::StdErrObserver;
//!
//! # fn main() -> Result<(), csv_consolidate::ConversionError> {
//! let opts = ConversionOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     ..Default::default()
//! };
//! let outcome = convert(&opts)?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`convert`]: options, the conversion run and the output write
//! - [`ingestion`]: file discovery, CSV reading and observer hooks
//! - [`types`]: the ordered result mapping
//! - [`error`]: error type shared by all of the above

pub mod convert;
pub mod error;
pub mod ingestion;
pub mod types;

pub use error::{ConversionError, ConversionResult};
