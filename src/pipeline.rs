use crate::config::Config;
use crate::curation::annotate_gaps;
use crate::error::{SeqForgeError, SfResult};
use crate::evaluator::{EvaluationReport, Evaluator};
use crate::mutants::{generate, MutantBatch, MutationModel};
use crate::table::SequenceTable;
use fastrand::Rng;
use tracing::info;

pub struct PipelineOutcome {
    pub training: SequenceTable,
    pub model: MutationModel,
    pub batch: MutantBatch,
    pub report: EvaluationReport,
}

/// Builds the training subset from `source` with the configured difficulty filter.
///
/// Gaps are computed only when the filter needs them and the table has none.
pub fn curate(source: &SequenceTable, config: &Config, rng: &mut Rng) -> SfResult<SequenceTable> {
    let filter = config.curation.difficulty_filter()?;

    let annotated;
    let table = if filter.needs_gaps() && !source.is_annotated() {
        annotated = annotate_gaps(source)?;
        &annotated
    } else {
        source
    };

    filter.apply(table, rng)
}

/// Curate, model, generate, evaluate.
///
/// `rng` is consumed first by the stratified oracle draw, then by the
/// positional-greedy position draw.
pub fn run(source: &SequenceTable, config: &Config, rng: &mut Rng) -> SfResult<PipelineOutcome> {
    if source.is_empty() {
        return Err(SeqForgeError::EmptyTable);
    }

    // 1. Curate
    let training = curate(source, config, rng)?;
    info!("📦 Training subset: {} of {} rows", training.len(), source.len());

    // 2. Model
    let model = MutationModel::build(&training)?;

    // 3. Generate
    let batch = generate(config.design.strategy, &model, config.design.n_mutants, rng)?;

    // 4. Evaluate against the full source table
    let range = source.score_range().ok_or(SeqForgeError::EmptyTable)?;
    let default_score = config.design.default_score.unwrap_or(range.min);
    let evaluator = Evaluator::with_range(source, range, default_score);
    let report = evaluator.evaluate(&batch)?;

    info!(
        "📊 Median score {:.4} (normalized {:.4}), {} imputed",
        report.median_score, report.normalized_median, report.n_imputed
    );

    Ok(PipelineOutcome {
        training,
        model,
        batch,
        report,
    })
}

/// [`run`] with a generator seeded from the configuration.
pub fn run_seeded(source: &SequenceTable, config: &Config) -> SfResult<PipelineOutcome> {
    let mut rng = config.curation.rng();
    run(source, config, &mut rng)
}
