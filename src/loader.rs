use crate::error::{SeqForgeError, SfResult};
use crate::table::{Record, SequenceTable};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SEQUENCE_COLUMN: &str = "sequence";
pub const SCORE_COLUMN: &str = "score";
pub const GAP_COLUMN: &str = "gap";

pub fn load_table<P: AsRef<Path>>(path: P) -> SfResult<SequenceTable> {
    let path = path.as_ref();
    info!("📂 Loading sequence table: {}", path.display());
    let file = File::open(path)?;
    load_table_from_reader(file)
}

/// Reads `sequence`/`score` CSV. Other columns are ignored; header matching
/// is case-insensitive. Rows whose score does not parse to a finite number
/// are skipped.
pub fn load_table_from_reader<R: Read>(reader: R) -> SfResult<SequenceTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let find = |name: &str| -> SfResult<usize> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                SeqForgeError::MalformedInput(format!("missing '{}' column in header", name))
            })
    };
    let seq_col = find(SEQUENCE_COLUMN)?;
    let score_col = find(SCORE_COLUMN)?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let row = result?;
        let (Some(seq), Some(raw_score)) = (row.get(seq_col), row.get(score_col)) else {
            skipped += 1;
            continue;
        };

        match raw_score.parse::<f64>() {
            Ok(score) if score.is_finite() && !seq.is_empty() => {
                records.push(Record::new(seq, score)?);
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("⚠️  Skipped {} rows without a usable sequence/score", skipped);
    }

    let table = SequenceTable::new(records)?;
    debug!(
        "Loaded {} rows of length {}",
        table.len(),
        table.sequence_len()
    );
    Ok(table)
}

pub fn write_table<P: AsRef<Path>>(path: P, table: &SequenceTable) -> SfResult<()> {
    let file = File::create(path)?;
    write_table_to_writer(file, table)
}

/// Writes `sequence,score[,gap]` CSV in row order.
pub fn write_table_to_writer<W: Write>(writer: W, table: &SequenceTable) -> SfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    match table.gaps() {
        Some(gaps) => {
            wtr.write_record([SEQUENCE_COLUMN, SCORE_COLUMN, GAP_COLUMN])?;
            for (rec, gap) in table.iter().zip(gaps) {
                let seq = rec.sequence_str();
                let score = rec.score.to_string();
                let gap = gap.to_string();
                wtr.write_record([&*seq, score.as_str(), gap.as_str()])?;
            }
        }
        None => {
            wtr.write_record([SEQUENCE_COLUMN, SCORE_COLUMN])?;
            for rec in table.iter() {
                let seq = rec.sequence_str();
                let score = rec.score.to_string();
                wtr.write_record([&*seq, score.as_str()])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Maps a dataset identifier to a CSV path.
///
/// An existing path is taken as-is; otherwise `<data_dir>/<name>.csv`.
pub fn resolve_dataset<P: AsRef<Path>>(data_dir: P, name: &str) -> SfResult<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }

    let candidate = data_dir.as_ref().join(format!("{}.csv", name));
    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(SeqForgeError::UnknownDataset {
            name: name.to_string(),
            path: candidate.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_lookup_ignores_order_and_case() {
        let data = "id,Score,SEQUENCE\n1,0.5,ACDE\n2,1.5,ACDF\n";
        let table = load_table_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].sequence, b"ACDF".to_vec());
        assert_eq!(table.records()[1].score, 1.5);
    }

    #[test]
    fn test_skips_bad_scores() {
        let data = "sequence,score\nACDE,1.0\nACDF,NA\nACDG,inf\nACDH,2\n";
        let table = load_table_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(table.scores(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_column() {
        let data = "seq,score\nACDE,1.0\n";
        assert!(matches!(
            load_table_from_reader(Cursor::new(data)),
            Err(SeqForgeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_unequal_lengths_are_fatal() {
        let data = "sequence,score\nACDE,1.0\nACD,2.0\n";
        assert!(matches!(
            load_table_from_reader(Cursor::new(data)),
            Err(SeqForgeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_write_includes_gap_column() {
        let table = SequenceTable::from_pairs([("AC", 1.5), ("AD", 2.0)])
            .unwrap()
            .with_gaps(vec![1, 0])
            .unwrap();
        let mut buf = Vec::new();
        write_table_to_writer(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "sequence,score,gap\nAC,1.5,1\nAD,2,0\n");
    }
}
