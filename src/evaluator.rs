use crate::error::{SeqForgeError, SfResult};
use crate::mutants::MutantBatch;
use crate::table::{hamming_distance, ScoreRange, SequenceTable};
use crate::util::{mean, median};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Ground-truth (or imputed) score per mutant, in batch order.
    pub scores: Vec<f64>,
    /// Mutants with no exact match in the source table.
    pub n_imputed: usize,
    pub median_score: f64,
    pub mean_score: f64,
    pub normalized_median: f64,
    pub median_distance: f64,
    pub mean_distance: f64,
    pub score_range: ScoreRange,
}

/// Scores mutant batches against a source table.
///
/// The lookup index and the normalization range are captured once at
/// construction.
pub struct Evaluator {
    index: HashMap<Vec<u8>, (f64, usize)>,
    range: ScoreRange,
    default_score: f64,
    seq_len: usize,
}

impl Evaluator {
    pub fn new(source: &SequenceTable, default_score: f64) -> SfResult<Self> {
        let range = source.score_range().ok_or(SeqForgeError::EmptyTable)?;
        Ok(Self::with_range(source, range, default_score))
    }

    /// Uses an explicit normalization range instead of the source's own.
    pub fn with_range(source: &SequenceTable, range: ScoreRange, default_score: f64) -> Self {
        let mut index: HashMap<Vec<u8>, (f64, usize)> = HashMap::with_capacity(source.len());
        for rec in source.iter() {
            let entry = index.entry(rec.sequence.clone()).or_insert((0.0, 0));
            entry.0 += rec.score;
            entry.1 += 1;
        }

        Self {
            index,
            range,
            default_score,
            seq_len: source.sequence_len(),
        }
    }

    pub fn score_range(&self) -> ScoreRange {
        self.range
    }

    /// Mean score of all source rows with exactly this sequence.
    pub fn lookup(&self, sequence: &[u8]) -> Option<f64> {
        self.index
            .get(sequence)
            .map(|&(sum, count)| sum / count as f64)
    }

    pub fn evaluate(&self, batch: &MutantBatch) -> SfResult<EvaluationReport> {
        self.evaluate_sequences(batch.sequences())
    }

    pub fn evaluate_sequences<'a, I>(&self, sequences: I) -> SfResult<EvaluationReport>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let sequences: Vec<&[u8]> = sequences.into_iter().collect();
        if sequences.is_empty() {
            return Err(SeqForgeError::EmptyBatch);
        }

        if let Some(bad) = sequences.iter().find(|s| s.len() != self.seq_len) {
            return Err(SeqForgeError::MalformedInput(format!(
                "mutant has length {}, source sequences have length {}",
                bad.len(),
                self.seq_len
            )));
        }

        let mut n_imputed = 0;
        let scores: Vec<f64> = sequences
            .iter()
            .map(|s| {
                self.lookup(s).unwrap_or_else(|| {
                    n_imputed += 1;
                    self.default_score
                })
            })
            .collect();

        if n_imputed > 0 {
            warn!(
                "⚠️  {} of {} mutants have no ground truth; imputed {}",
                n_imputed,
                scores.len(),
                self.default_score
            );
        }

        let distances = pairwise_distances(&sequences)?;

        let median_score = median(&scores).unwrap_or(self.default_score);
        let report = EvaluationReport {
            n_imputed,
            median_score,
            mean_score: mean(&scores).unwrap_or(self.default_score),
            normalized_median: self.range.normalize(median_score),
            median_distance: median(&distances).unwrap_or(0.0),
            mean_distance: mean(&distances).unwrap_or(0.0),
            score_range: self.range,
            scores,
        };

        debug!(
            "Evaluation: median={:.4} normalized={:.4} diversity={:.2}",
            report.median_score, report.normalized_median, report.median_distance
        );

        Ok(report)
    }
}

/// Convenience wrapper: builds an [`Evaluator`] for `source` and scores `batch`.
pub fn evaluate(
    batch: &MutantBatch,
    source: &SequenceTable,
    default_score: f64,
) -> SfResult<EvaluationReport> {
    Evaluator::new(source, default_score)?.evaluate(batch)
}

/// Hamming distance of every unordered pair, as `f64` for the statistics.
pub fn pairwise_distances(sequences: &[&[u8]]) -> SfResult<Vec<f64>> {
    let n = sequences.len();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            out.push(hamming_distance(sequences[i], sequences[j])? as f64);
        }
    }
    Ok(out)
}
