use crate::consts::{STRATIFIED_HARD, STRATIFIED_MEDIUM, THRESHOLD_HARD, THRESHOLD_MEDIUM};
use crate::curation::slicer;
use crate::error::{SeqForgeError, SfResult};
use crate::table::SequenceTable;
use crate::util::sample_without_replacement;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::info;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Medium,
    Hard,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Threshold,
    Stratified,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParams {
    pub range: (f64, f64),
    pub min_gap: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StratifiedParams {
    pub range: (f64, f64),
    pub n_train: usize,
    pub n_oracle: usize,
}

impl Difficulty {
    pub fn threshold(self) -> ThresholdParams {
        let (range, min_gap) = match self {
            Self::Medium => THRESHOLD_MEDIUM,
            Self::Hard => THRESHOLD_HARD,
        };
        ThresholdParams { range, min_gap }
    }

    pub fn stratified(self) -> StratifiedParams {
        let (range, n_train, n_oracle) = match self {
            Self::Medium => STRATIFIED_MEDIUM,
            Self::Hard => STRATIFIED_HARD,
        };
        StratifiedParams {
            range,
            n_train,
            n_oracle,
        }
    }
}

/// A configured dataset-difficulty filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DifficultyFilter {
    Threshold(ThresholdParams),
    Stratified(StratifiedParams),
}

impl DifficultyFilter {
    pub fn preset(kind: FilterKind, difficulty: Difficulty) -> Self {
        match kind {
            FilterKind::Threshold => Self::Threshold(difficulty.threshold()),
            FilterKind::Stratified => Self::Stratified(difficulty.stratified()),
        }
    }

    pub fn needs_gaps(&self) -> bool {
        matches!(self, Self::Threshold(_))
    }

    pub fn apply(&self, table: &SequenceTable, rng: &mut Rng) -> SfResult<SequenceTable> {
        match *self {
            Self::Threshold(p) => filter_threshold(table, p.range, p.min_gap),
            Self::Stratified(p) => filter_stratified(table, p.range, p.n_train, p.n_oracle, rng),
        }
    }
}

/// Percentile slice of a gap-annotated table, keeping rows with `gap >= min_gap`.
pub fn filter_threshold(
    table: &SequenceTable,
    range: (f64, f64),
    min_gap: usize,
) -> SfResult<SequenceTable> {
    let gaps = table.gaps().ok_or(SeqForgeError::NotAnnotated)?;

    let kept: Vec<usize> = slicer::slice_indices(table, range)?
        .into_iter()
        .filter(|&i| gaps[i] >= min_gap)
        .collect();

    info!(
        "🎯 Threshold filter ({:.2}, {:.2}), gap >= {}: {} rows",
        range.0,
        range.1,
        min_gap,
        kept.len()
    );

    Ok(table.select(&kept))
}

/// Percentile slice split into the `n_train` best rows followed by `n_oracle`
/// rows drawn without replacement from the remainder.
///
/// Train rows come first in descending score order; oracle rows follow in
/// draw order.
pub fn filter_stratified(
    table: &SequenceTable,
    range: (f64, f64),
    n_train: usize,
    n_oracle: usize,
    rng: &mut Rng,
) -> SfResult<SequenceTable> {
    let mut ranked = slicer::slice_indices(table, range)?;
    let available = ranked.len();

    if n_train > available {
        return Err(SeqForgeError::SampleSize {
            requested: n_train,
            available,
        });
    }
    if n_oracle > available - n_train {
        return Err(SeqForgeError::SampleSize {
            requested: n_oracle,
            available: available - n_train,
        });
    }

    let records = table.records();
    ranked.sort_by(|&a, &b| records[b].score.total_cmp(&records[a].score));

    let remainder = ranked.split_off(n_train);
    let oracle = sample_without_replacement(rng, remainder, n_oracle);
    ranked.extend(oracle);

    info!(
        "🎯 Stratified filter ({:.2}, {:.2}): {} train + {} oracle from {} rows",
        range.0, range.1, n_train, n_oracle, available
    );

    Ok(table.select(&ranked))
}
