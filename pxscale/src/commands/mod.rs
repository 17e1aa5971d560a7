//! Commands module - the batch run and the stdin filter.

mod scale;

pub use scale::{
    process_file, run_scale, run_stdin, FileError, FileReport, FileStatus, RunSummary,
    ScaleRunOptions,
};
