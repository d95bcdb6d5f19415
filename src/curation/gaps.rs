use crate::consts::OPTIMAL_PERCENTILE;
use crate::curation::slicer;
use crate::error::{SeqForgeError, SfResult};
use crate::table::{hamming_unchecked, SequenceTable};
use tracing::{debug, info};

/// Annotates every row with its mutational gap: the minimum Hamming distance
/// to the top-percentile ("optimal") rows of the same table.
pub fn annotate_gaps(table: &SequenceTable) -> SfResult<SequenceTable> {
    let reference = slicer::slice(table, OPTIMAL_PERCENTILE)?;
    info!(
        "🧬 Computing mutational gaps: {} rows against {} reference sequences",
        table.len(),
        reference.len()
    );
    annotate_gaps_against(table, &reference)
}

/// Gap annotation against an explicit reference set.
///
/// Cost is `rows * reference * sequence_length`.
pub fn annotate_gaps_against(
    table: &SequenceTable,
    reference: &SequenceTable,
) -> SfResult<SequenceTable> {
    if table.is_empty() {
        return table.clone().with_gaps(Vec::new());
    }
    if reference.is_empty() {
        return Err(SeqForgeError::EmptyTable);
    }
    if reference.sequence_len() != table.sequence_len() {
        return Err(SeqForgeError::MalformedInput(format!(
            "reference sequences have length {}, table has {}",
            reference.sequence_len(),
            table.sequence_len()
        )));
    }

    let gaps = mutational_gaps(table, reference);

    if let (Some(min), Some(max)) = (gaps.iter().min(), gaps.iter().max()) {
        debug!("Gap range: {}..={}", min, max);
    }

    table.clone().with_gaps(gaps)
}

fn mutational_gaps(table: &SequenceTable, reference: &SequenceTable) -> Vec<usize> {
    table
        .iter()
        .map(|rec| {
            reference
                .iter()
                .map(|r| hamming_unchecked(&rec.sequence, &r.sequence))
                .min()
                .unwrap_or(0)
        })
        .collect()
}
