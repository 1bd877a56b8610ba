//! Input side of a conversion run.
//!
//! - [`discovery`]: find the CSV files in the input directory and derive their keys
//! - [`csv`]: read the first column of a CSV file
//! - [`observability`]: observer hooks for logging and alerting

pub mod csv;
pub mod discovery;
pub mod observability;

pub use discovery::{base_name, discover_csv_files};
pub use observability::{
    CompositeObserver, ConversionContext, ConversionObserver, ConversionSeverity, ConversionStage,
    ConversionStats, FileObserver, FileStats, StdErrObserver,
};
