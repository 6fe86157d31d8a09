//! Word vector text files and context vector merging.

pub mod error;
pub mod merge;
pub mod text;

pub use error::{Result, VectorsError};
pub use merge::{MergePaths, MergeStats, merge, merge_files};
pub use text::{VectorFileHeader, VectorReader, write_header, write_row};
