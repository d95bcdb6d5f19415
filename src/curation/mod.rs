pub mod filter;
pub mod gaps;
pub mod slicer;

pub use self::filter::{
    filter_stratified, filter_threshold, Difficulty, DifficultyFilter, FilterKind,
    StratifiedParams, ThresholdParams,
};
pub use self::gaps::{annotate_gaps, annotate_gaps_against};
pub use self::slicer::slice;
