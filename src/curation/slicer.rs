use crate::error::{SeqForgeError, SfResult};
use crate::table::SequenceTable;
use tracing::debug;

/// Validates a `(lo, hi)` percentile pair.
pub fn check_range(range: (f64, f64)) -> SfResult<()> {
    let (lo, hi) = range;
    let valid = lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo <= hi && hi <= 1.0;
    if valid {
        Ok(())
    } else {
        Err(SeqForgeError::Range { lo, hi })
    }
}

/// Zero-based `[start, end)` row bounds of a percentile range over `n` rows.
///
/// Floor-based on both ends: the slice covers 1-based rank positions
/// `floor(n*lo)+1 ..= floor(n*hi)`.
pub fn percentile_bounds(n: usize, range: (f64, f64)) -> (usize, usize) {
    let start = (n as f64 * range.0).floor() as usize;
    let end = (n as f64 * range.1).floor() as usize;
    (start.min(n), end.min(n))
}

/// Row indices of `table` falling in the percentile range, ascending by score.
pub fn slice_indices(table: &SequenceTable, range: (f64, f64)) -> SfResult<Vec<usize>> {
    check_range(range)?;

    let order = table.indices_by_score();
    let (start, end) = percentile_bounds(order.len(), range);
    if end <= start {
        return Ok(Vec::new());
    }
    Ok(order[start..end].to_vec())
}

/// Score-ranked sub-table for the percentile range `(lo, hi)`.
pub fn slice(table: &SequenceTable, range: (f64, f64)) -> SfResult<SequenceTable> {
    let indices = slice_indices(table, range)?;
    debug!(
        "Percentile slice ({:.2}, {:.2}): {} of {} rows",
        range.0,
        range.1,
        indices.len(),
        table.len()
    );
    Ok(table.select(&indices))
}
