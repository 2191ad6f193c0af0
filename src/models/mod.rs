//! Data types shared by the fetcher, the GitHub client and the formatter.
//!
//! - `commit`: CommitRecord, CommitAuthor
//! - `compare`: ComparisonRequest, Credentials, ComparePage

pub mod commit;
pub mod compare;

pub use commit::*;
pub use compare::*;
