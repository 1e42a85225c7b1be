// Engine-side result records built on top of the shared data model.
pub mod analysis;

pub use analysis::{AnalysisResult, IndicatorSnapshot, IndicatorVerdict};
