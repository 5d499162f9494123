//! Token launch monitoring loop
//!
//! - `Pipeline`: pure per-cycle evaluation over a fetched batch
//! - `Monitor`: drives the pipeline against a `TokenSource` and `AlertSink`
//! - `LoopState` / `CycleReport`: what the loop has done so far

mod pipeline;
mod runner;
mod state;

pub use pipeline::Pipeline;
pub use runner::{shutdown_signal, Monitor};
pub use state::{CycleReport, LoopState, ScoredToken};
