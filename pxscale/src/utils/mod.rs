//! Utility functions shared across the crate.

mod paths;

pub use paths::{
    collect_candidate_files, display_relative, file_name_matcher, is_excluded,
    normalize_display_path,
};
