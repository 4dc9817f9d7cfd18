//! Analysis stages: term matching, statistics, classification and the
//! re-extraction gate.

mod classifier;
mod gate;
mod options;
mod scope;
mod stats;
mod terms;

pub use classifier::PageClassifier;
pub use gate::{ExtractionGate, GateVerdict};
pub use options::AnalysisOptions;
pub use scope::{ScopeDetector, ScopeMarkers};
pub use stats::DocumentStatistics;
pub use terms::{prepare_text, TermMatcher, FINANCIAL_TERMS};
