//! Subword embedding models in the lexvec binary format.
//!
//! A model holds a `(vocab + buckets) x dim` matrix of `f64` rows. The first
//! `vocab` rows belong to whole words; the remaining rows are a fixed-size
//! hash table of character n-gram vectors, which lets the model represent
//! words it never saw during training.
//!
//! ```no_run
//! use lexvec_model::Model;
//!
//! let model = Model::open("vectors.bin")?;
//! let vector = model.represent("unseenword")?;
//! assert_eq!(vector.len(), model.dim());
//! # Ok::<(), lexvec_model::ModelError>(())
//! ```

pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;
pub mod hash;
pub mod header;
mod model;
pub mod query;
pub mod store;
pub mod subword;

pub use error::{ModelError, Result};
pub use hash::BucketHasher;
pub use header::{Header, Vocabulary};
pub use model::{Model, Representation};
pub use query::QueryLine;
pub use store::VectorStore;
