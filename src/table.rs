use crate::error::{SeqForgeError, SfResult};
use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// A single scored sequence. Symbols are stored as ASCII bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub sequence: Vec<u8>,
    pub score: f64,
}

impl Record {
    pub fn new(sequence: &str, score: f64) -> SfResult<Self> {
        if !sequence.is_ascii() {
            return Err(SeqForgeError::MalformedInput(format!(
                "sequence '{}' contains non-ASCII symbols",
                sequence
            )));
        }
        Ok(Self {
            sequence: sequence.as_bytes().to_vec(),
            score,
        })
    }

    pub fn sequence_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sequence)
    }
}

/// Min/max of a table's scores, captured once and handed to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    /// Min-max normalization. A degenerate range maps everything to 0.0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            (value - self.min) / span
        } else {
            0.0
        }
    }
}

/// In-memory (sequence, score) table with an optional derived `gap` column.
///
/// All sequences share one length; construction rejects anything else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceTable {
    records: Vec<Record>,
    gaps: Option<Vec<usize>>,
    seq_len: usize,
}

impl SequenceTable {
    pub fn new(records: Vec<Record>) -> SfResult<Self> {
        let seq_len = records.first().map(|r| r.sequence.len()).unwrap_or(0);

        for (row, rec) in records.iter().enumerate() {
            if rec.sequence.len() != seq_len {
                return Err(SeqForgeError::MalformedInput(format!(
                    "row {} has sequence length {}, expected {}",
                    row,
                    rec.sequence.len(),
                    seq_len
                )));
            }
            if !rec.sequence.is_ascii() {
                return Err(SeqForgeError::MalformedInput(format!(
                    "row {} contains non-ASCII symbols",
                    row
                )));
            }
        }

        Ok(Self {
            records,
            gaps: None,
            seq_len,
        })
    }

    pub fn from_pairs<S, I>(pairs: I) -> SfResult<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, f64)>,
    {
        let records = pairs
            .into_iter()
            .map(|(s, score)| Record::new(s.as_ref(), score))
            .collect::<SfResult<Vec<_>>>()?;
        Self::new(records)
    }

    /// Attaches the gap column. One value per row, in row order.
    pub fn with_gaps(mut self, gaps: Vec<usize>) -> SfResult<Self> {
        if gaps.len() != self.records.len() {
            return Err(SeqForgeError::MalformedInput(format!(
                "gap column has {} values for {} rows",
                gaps.len(),
                self.records.len()
            )));
        }
        self.gaps = Some(gaps);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sequence_len(&self) -> usize {
        self.seq_len
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn gaps(&self) -> Option<&[usize]> {
        self.gaps.as_deref()
    }

    pub fn is_annotated(&self) -> bool {
        self.gaps.is_some()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.score).collect()
    }

    pub fn score_range(&self) -> Option<ScoreRange> {
        let mut iter = self.records.iter().map(|r| r.score);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));
        Some(ScoreRange { min, max })
    }

    /// Row indices ordered ascending by score. Equal scores keep row order.
    pub fn indices_by_score(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.records.len()).collect();
        idx.sort_by(|&a, &b| self.records[a].score.total_cmp(&self.records[b].score));
        idx
    }

    /// Copies the given rows (and their gaps, if any) into a new table.
    pub fn select(&self, indices: &[usize]) -> SequenceTable {
        let records = indices.iter().map(|&i| self.records[i].clone()).collect();
        let gaps = self
            .gaps
            .as_ref()
            .map(|g| indices.iter().map(|&i| g[i]).collect());

        SequenceTable {
            records,
            gaps,
            seq_len: self.seq_len,
        }
    }
}

/// Number of mismatched positions between two equal-length sequences.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> SfResult<usize> {
    if a.len() != b.len() {
        return Err(SeqForgeError::MalformedInput(format!(
            "cannot compare sequences of length {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(hamming_unchecked(a, b))
}

#[inline]
pub(crate) fn hamming_unchecked(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

pub(crate) fn serialize_symbols<T, S>(seq: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&String::from_utf8_lossy(seq.as_ref()))
}
