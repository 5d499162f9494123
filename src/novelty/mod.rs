//! Novelty detection
//!
//! Bounded memory of observed token identifiers, so a token alerts at most
//! once while it stays in memory

mod filter;
mod set;

pub use filter::{Classification, NoveltyFilter};
pub use set::NoveltySet;
