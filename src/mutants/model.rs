use crate::error::{SeqForgeError, SfResult};
use crate::table::SequenceTable;
use std::borrow::Cow;
use tracing::debug;

/// Symbol counts at one position, most frequent first.
///
/// Equal counts are ordered by ascending symbol value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionDistribution {
    pub position: usize,
    pub counts: Vec<(u8, usize)>,
}

impl PositionDistribution {
    fn from_counts(position: usize, raw: &[usize; 256]) -> Self {
        let mut counts: Vec<(u8, usize)> = raw
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(sym, &c)| (sym as u8, c))
            .collect();
        // Stable: ties keep ascending symbol order from the scan above.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Self { position, counts }
    }

    pub fn most_frequent(&self) -> Option<u8> {
        self.counts.first().map(|&(s, _)| s)
    }

    pub fn second_most_frequent(&self) -> Option<u8> {
        self.counts.get(1).map(|&(s, _)| s)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, c)| c).sum()
    }
}

/// Per-position symbol frequencies of a sequence set plus its consensus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationModel {
    distributions: Vec<PositionDistribution>,
    consensus: Vec<u8>,
}

impl MutationModel {
    pub fn build(table: &SequenceTable) -> SfResult<Self> {
        if table.is_empty() {
            return Err(SeqForgeError::EmptyTable);
        }

        let len = table.sequence_len();
        let mut raw = vec![[0usize; 256]; len];
        for rec in table.iter() {
            for (pos, &sym) in rec.sequence.iter().enumerate() {
                raw[pos][sym as usize] += 1;
            }
        }

        let distributions: Vec<PositionDistribution> = raw
            .iter()
            .enumerate()
            .map(|(pos, counts)| PositionDistribution::from_counts(pos, counts))
            .collect();

        // Every position has at least one count because the table is non-empty.
        let consensus: Vec<u8> = distributions
            .iter()
            .map(|d| d.most_frequent().unwrap_or(b'-'))
            .collect();

        debug!(
            "Mutation model over {} rows, {} positions, {} variable",
            table.len(),
            len,
            distributions.iter().filter(|d| d.counts.len() > 1).count()
        );

        Ok(Self {
            distributions,
            consensus,
        })
    }

    /// One distribution per position, in position order.
    pub fn distributions(&self) -> &[PositionDistribution] {
        &self.distributions
    }

    pub fn consensus(&self) -> &[u8] {
        &self.consensus
    }

    pub fn sequence_len(&self) -> usize {
        self.consensus.len()
    }

    pub fn consensus_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.consensus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_and_consensus() {
        let table = SequenceTable::from_pairs([
            ("ACD", 1.0),
            ("ACE", 2.0),
            ("WCE", 3.0),
            ("ACF", 4.0),
        ])
        .unwrap();
        let model = MutationModel::build(&table).unwrap();

        assert_eq!(model.consensus, b"ACE".to_vec());
        assert_eq!(model.distributions[0].counts, vec![(b'A', 3), (b'W', 1)]);
        assert_eq!(model.distributions[1].counts, vec![(b'C', 4)]);
        assert_eq!(
            model.distributions[2].counts,
            vec![(b'E', 2), (b'D', 1), (b'F', 1)]
        );
        assert!(model.distributions.iter().all(|d| d.total() == 4));
    }

    #[test]
    fn test_ties_break_by_symbol() {
        let table = SequenceTable::from_pairs([("Y", 1.0), ("B", 2.0), ("M", 3.0)]).unwrap();
        let model = MutationModel::build(&table).unwrap();
        assert_eq!(model.consensus_str(), "B");
        assert_eq!(model.distributions[0].second_most_frequent(), Some(b'M'));
    }

    #[test]
    fn test_accessors_agree_on_length() {
        let table = SequenceTable::from_pairs([("ACDE", 1.0), ("WCDF", 2.0)]).unwrap();
        let model = MutationModel::build(&table).unwrap();
        assert_eq!(model.distributions().len(), 4);
        assert_eq!(model.consensus(), b"ACDE");
        assert_eq!(model.sequence_len(), 4);
    }

    #[test]
    fn test_empty_table_fails() {
        assert!(matches!(
            MutationModel::build(&SequenceTable::default()),
            Err(SeqForgeError::EmptyTable)
        ));
    }
}
