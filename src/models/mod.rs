//! Values flowing through the pipeline.
//!
//! - `commit`: Commit (hash identity) and File (name plus borrowed owning commit)
//! - `report`: FileReport, the resolved output row

pub mod commit;
pub mod report;

pub use commit::*;
pub use report::*;
