mod diff;
mod log;
mod repo;
#[cfg(test)]
pub(crate) mod testing;

pub use diff::{staged_diff, staged_files, truncate_diff, DEFAULT_DIFF_LIMIT, TRUNCATION_MARKER};
pub use log::{commits_since, last_tag};
pub use repo::open_repo;
