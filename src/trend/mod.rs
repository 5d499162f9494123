//! Trend analysis
//!
//! Admission gate, trend scoring and the alert decision

mod decision;
mod gate;
mod scorer;
mod types;

pub use decision::AlertPolicy;
pub use gate::AdmissionGate;
pub use scorer::{age_score, log_scale_score, TrendScorer};
pub use types::{ScoreBreakdown, ScoreTier, TrendScore};
