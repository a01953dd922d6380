//! Domain types shared by the classification engine and its collaborators.

pub mod counts;
pub mod target;
pub mod verdict;

pub use counts::SummaryCounts;
pub use target::Target;
pub use verdict::{ClassificationResult, FailureRecord, StageFailureResult, TestReport};
