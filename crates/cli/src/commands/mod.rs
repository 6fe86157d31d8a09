//! Subcommand implementations.

mod embed;
mod inspect;
mod merge;
mod shuffle;

pub use embed::{EmbedOptions, EmbedStats, embed};
pub use inspect::inspect;
pub use merge::merge;
pub use shuffle::{MEMORY_ENV, memory_budget, shuffle};
